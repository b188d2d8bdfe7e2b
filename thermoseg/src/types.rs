//! Value types shared by the extractor and the pipeline.

use std::fmt;
use std::str::FromStr;

use common::Buffer2;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::error::{Error, Result};

/// Label value of pixels outside the segmented region.
pub const BACKGROUND: u8 = 0;
/// Label value of pixels inside the segmented region.
pub const FOREGROUND: u8 = 1;

/// Binary label image: [`BACKGROUND`] or [`FOREGROUND`] per pixel.
pub type LabelImage = Buffer2<u8>;

/// Seed used for the right foot in the host's dual-seed layout.
pub const DEFAULT_RIGHT_SEED: SeedPoint = SeedPoint::new(70, 117);
/// Seed used for the left foot in the host's dual-seed layout.
pub const DEFAULT_LEFT_SEED: SeedPoint = SeedPoint::new(206, 41);
/// Skin temperature band (°C) the host preselects.
pub const DEFAULT_TEMPERATURE_RANGE: TemperatureRange = TemperatureRange {
    min: 27.0,
    max: 35.0,
};

// ============================================================================
// SeedPoint
// ============================================================================

/// Pixel index where region growing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedPoint {
    pub x: usize,
    pub y: usize,
}

impl SeedPoint {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Fails with [`Error::SeedOutOfBounds`] unless the seed lies inside `image`.
    pub fn check_inside<T>(&self, image: &Buffer2<T>) -> Result<()> {
        if image.contains(self.x, self.y) {
            Ok(())
        } else {
            Err(Error::SeedOutOfBounds {
                x: self.x,
                y: self.y,
                width: image.width(),
                height: image.height(),
            })
        }
    }
}

impl fmt::Display for SeedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for SeedPoint {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// TemperatureRange
// ============================================================================

/// Inclusive `[min, max]` band of accepted intensities.
///
/// Both bounds are finite and `min <= max`; every constructor, including
/// deserialization, enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f32; 2]", into = "[f32; 2]")]
pub struct TemperatureRange {
    min: f32,
    max: f32,
}

impl TemperatureRange {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when `other` lies entirely within `self`.
    pub fn covers(&self, other: &TemperatureRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

impl TryFrom<[f32; 2]> for TemperatureRange {
    type Error = Error;

    fn try_from([min, max]: [f32; 2]) -> Result<Self> {
        Self::new(min, max)
    }
}

impl From<TemperatureRange> for [f32; 2] {
    fn from(range: TemperatureRange) -> Self {
        [range.min, range.max]
    }
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// ============================================================================
// ProcessingVariant
// ============================================================================

/// Which stages of the pipeline run and which artifact is returned.
///
/// `Display` yields the selector label shown by the host
/// (`"image segmentation + no holes"`); [`FromStr`] accepts that label or the
/// snake_case name used in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingVariant {
    #[strum(to_string = "original")]
    Original,
    #[strum(to_string = "image smoothing")]
    Smoothing,
    #[strum(to_string = "image segmentation")]
    Segmentation,
    #[strum(to_string = "image segmentation + no holes")]
    SegmentationNoHoles,
    #[strum(to_string = "contouring")]
    Contouring,
}

/// Stages a variant runs, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePlan {
    pub smooth: bool,
    pub grow_region: bool,
    pub fill_holes: bool,
    pub extract_contour: bool,
}

impl ProcessingVariant {
    /// Snake_case identifier, as written in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            ProcessingVariant::Original => "original",
            ProcessingVariant::Smoothing => "smoothing",
            ProcessingVariant::Segmentation => "segmentation",
            ProcessingVariant::SegmentationNoHoles => "segmentation_no_holes",
            ProcessingVariant::Contouring => "contouring",
        }
    }

    pub fn plan(self) -> StagePlan {
        let (smooth, grow_region, fill_holes, extract_contour) = match self {
            ProcessingVariant::Original => (false, false, false, false),
            ProcessingVariant::Smoothing => (true, false, false, false),
            ProcessingVariant::Segmentation => (true, true, false, false),
            ProcessingVariant::SegmentationNoHoles => (true, true, true, false),
            ProcessingVariant::Contouring => (true, true, true, true),
        };
        StagePlan {
            smooth,
            grow_region,
            fill_holes,
            extract_contour,
        }
    }
}

impl FromStr for ProcessingVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ProcessingVariant::iter()
            .find(|variant| {
                variant.to_string().eq_ignore_ascii_case(wanted)
                    || variant.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| Error::InvalidVariant(s.to_string()))
    }
}

// ============================================================================
// ResultImage
// ============================================================================

/// Final artifact handed back to the host for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultImage {
    /// Intensity-like values: the slice, the smoothed slice, a masked
    /// product, or a scaled contour.
    Scalar(Buffer2<f32>),
    /// A label image returned as-is.
    Label(LabelImage),
    /// Colour overlay of labels on rescaled grey intensity.
    Rgb(Buffer2<[u8; 3]>),
}

impl ResultImage {
    pub fn width(&self) -> usize {
        match self {
            ResultImage::Scalar(image) => image.width(),
            ResultImage::Label(image) => image.width(),
            ResultImage::Rgb(image) => image.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            ResultImage::Scalar(image) => image.height(),
            ResultImage::Label(image) => image.height(),
            ResultImage::Rgb(image) => image.height(),
        }
    }

    pub fn as_scalar(&self) -> Option<&Buffer2<f32>> {
        match self {
            ResultImage::Scalar(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&LabelImage> {
        match self {
            ResultImage::Label(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<&Buffer2<[u8; 3]>> {
        match self {
            ResultImage::Rgb(image) => Some(image),
            _ => None,
        }
    }
}
