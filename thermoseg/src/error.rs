use std::path::PathBuf;

use common::{FileExtensionError, SerdeFormatError};
use thiserror::Error;

/// Errors reported by slice extraction, configuration and the segmentation pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("slice index {index} is out of range for a volume of depth {depth}")]
    SliceIndexOutOfRange { index: usize, depth: usize },

    #[error("seed ({x}, {y}) lies outside the {width}x{height} image")]
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid temperature range [{min}, {max}]")]
    InvalidRange { min: f32, max: f32 },

    #[error("unknown processing variant '{0}'")]
    InvalidVariant(String),

    #[error("region grown from seed ({x}, {y}) is empty")]
    EmptySeedRegion { x: usize, y: usize },

    #[error("invalid volume: {0}")]
    InvalidVolume(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported configuration file: {0}")]
    ConfigFormat(#[from] FileExtensionError),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] SerdeFormatError),
}

pub type Result<T> = std::result::Result<T, Error>;
