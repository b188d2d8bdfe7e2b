//! Configuration for the segmentation pipeline.
//!
//! [`Config`] is a flat struct; parameters are grouped by comments into the
//! stage they control. Defaults reproduce the fixed parameters of the
//! thermal-imaging workflow, so `Config::default()` is what hosts normally use.

use std::path::Path;

use common::FileFormat;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error::{Error, Result};

// ============================================================================
// Enums
// ============================================================================

/// Pixel connectivity used when growing regions and tracing contours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Connectivity {
    /// Only horizontal and vertical neighbours: (x±1, y) and (x, y±1).
    #[default]
    Four,
    /// Diagonal neighbours too.
    Eight,
}

impl Connectivity {
    /// Neighbour offsets `(dx, dy)`.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        const FOUR: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(isize, isize); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// How a label image is combined with intensity for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompositeMode {
    /// Smoothed intensity multiplied by the 0/1 label mask.
    #[default]
    Multiply,
    /// Label colours blended over rescaled grey intensity.
    Overlay,
}

/// What the contouring variant returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContourDisplay {
    /// Contour colour overlaid on rescaled grey intensity.
    #[default]
    Overlay,
    /// Contour labels multiplied by `contour_scale`.
    Scaled,
}

// ============================================================================
// Config
// ============================================================================

/// Largest accepted hole-filling radius (a 65x65 voting window).
pub const MAX_HOLE_FILL_RADIUS: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // -- Smoothing (curvature flow) --
    /// Explicit Euler time step. Values above 0.25 are unstable in 2D.
    pub smoothing_time_step: f32,
    pub smoothing_iterations: usize,

    // -- Region growing --
    pub connectivity: Connectivity,
    /// Fail with `EmptySeedRegion` instead of returning an empty label image.
    pub reject_empty_region: bool,

    // -- Hole filling --
    /// Half-width of the square voting window.
    pub hole_fill_radius: usize,
    /// Votes above half the window needed to switch a background pixel on.
    pub hole_fill_majority: usize,

    // -- Contour --
    /// Neighbourhood that decides whether a labelled pixel is on the boundary.
    /// Independent of `connectivity`.
    pub contour_connectivity: Connectivity,
    /// Multiplier that makes a 0/1 contour visible in a 16-bit display range.
    pub contour_scale: f32,
    pub contour_display: ContourDisplay,

    // -- Compositing --
    pub segmentation_composite: CompositeMode,
    /// Weight of the label colour in overlays, in `[0, 1]`.
    pub overlay_opacity: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing_time_step: 0.125,
            smoothing_iterations: 5,
            connectivity: Connectivity::Four,
            reject_empty_region: false,
            hole_fill_radius: 2,
            hole_fill_majority: 1,
            contour_connectivity: Connectivity::Four,
            contour_scale: 16383.0,
            contour_display: ContourDisplay::Overlay,
            segmentation_composite: CompositeMode::Multiply,
            overlay_opacity: 0.5,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_time_step.is_finite() && self.smoothing_time_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "smoothing_time_step must be positive, got {}",
                self.smoothing_time_step
            )));
        }
        if self.smoothing_time_step > 0.25 {
            log::warn!(
                "smoothing_time_step {} exceeds the 2D stability limit 0.25",
                self.smoothing_time_step
            );
        }
        if self.hole_fill_radius == 0 || self.hole_fill_radius > MAX_HOLE_FILL_RADIUS {
            return Err(Error::InvalidConfig(format!(
                "hole_fill_radius must be in [1, {}], got {}",
                MAX_HOLE_FILL_RADIUS, self.hole_fill_radius
            )));
        }
        // The birth threshold can never exceed the neighbour count.
        let side = 2 * self.hole_fill_radius + 1;
        let neighbours = side * side - 1;
        let max_majority = neighbours - neighbours / 2;
        if self.hole_fill_majority > max_majority {
            return Err(Error::InvalidConfig(format!(
                "hole_fill_majority must be at most {} for radius {}, got {}",
                max_majority, self.hole_fill_radius, self.hole_fill_majority
            )));
        }
        if !self.contour_scale.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "contour_scale must be finite, got {}",
                self.contour_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(Error::InvalidConfig(format!(
                "overlay_opacity must be in [0, 1], got {}",
                self.overlay_opacity
            )));
        }
        Ok(())
    }

    /// Loads and validates a YAML or JSON file; the extension picks the format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_str_with_format(&text, format)?;
        log::info!("Loaded segmentation config from {}", path.display());
        Ok(config)
    }

    pub fn from_str_with_format(text: &str, format: FileFormat) -> Result<Self> {
        let config: Self = common::deserialize(text, format)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_string_with_format(&self, format: FileFormat) -> Result<String> {
        Ok(common::serialize(self, format)?)
    }
}
