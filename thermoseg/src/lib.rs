//! Thermoseg - seeded segmentation of thermal (infrared) image slices.
//!
//! This library provides:
//! - Slice extraction from 3D thermal volumes
//! - Curvature-flow smoothing and connected-threshold region growing
//! - Voting hole filling and contour extraction
//! - Compositing of label images over intensity for display
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use thermoseg::{
//!     ProcessingVariant, SeedPoint, SegmentationPipeline, Volume, DEFAULT_TEMPERATURE_RANGE,
//! };
//!
//! let volume = Volume::new(width, height, depth, samples)?;
//! let slice = volume.extract_slice(0)?;
//!
//! let pipeline = SegmentationPipeline::new();
//! let result = pipeline.run(
//!     &slice,
//!     SeedPoint::new(70, 117),
//!     DEFAULT_TEMPERATURE_RANGE,
//!     ProcessingVariant::Contouring,
//! )?;
//! ```

mod config;
mod error;
mod pipeline;
pub mod stages;
mod types;
mod volume;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Configuration and errors
// ============================================================================

pub use config::{CompositeMode, Config, Connectivity, ContourDisplay, MAX_HOLE_FILL_RADIUS};
pub use error::{Error, Result};

// ============================================================================
// Data types
// ============================================================================

pub use common::Buffer2;
pub use types::{
    LabelImage, ProcessingVariant, ResultImage, SeedPoint, StagePlan, TemperatureRange,
    BACKGROUND, DEFAULT_LEFT_SEED, DEFAULT_RIGHT_SEED, DEFAULT_TEMPERATURE_RANGE, FOREGROUND,
};
pub use volume::{extract_slice, Slice, Volume};

// ============================================================================
// Pipeline
// ============================================================================

pub use pipeline::{DualSeedResult, SeedResult, SegmentationPipeline, StageOutputs};
