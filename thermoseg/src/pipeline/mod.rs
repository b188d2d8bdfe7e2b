//! Seed-based segmentation pipeline.
//!
//! A [`ProcessingVariant`] selects a prefix of the stage chain
//! smoothing → region growing → hole filling → contour extraction, and the
//! last artifact is composited into a [`ResultImage`]. Every stage is a pure
//! function from [`crate::stages`]; intermediates live only for one call.


use common::Buffer2;

use crate::config::{CompositeMode, Config, ContourDisplay};
use crate::error::{Error, Result};
use crate::stages;
use crate::types::{
    LabelImage, ProcessingVariant, ResultImage, SeedPoint, TemperatureRange, BACKGROUND,
};
use crate::volume::Slice;

/// Every artifact produced while running a variant.
///
/// Stages the variant skips are `None`; `smoothed` is `None` only for
/// [`ProcessingVariant::Original`].
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutputs {
    pub variant: ProcessingVariant,
    pub smoothed: Option<Buffer2<f32>>,
    pub region: Option<LabelImage>,
    pub filled: Option<LabelImage>,
    pub contour: Option<LabelImage>,
    pub result: ResultImage,
}

/// Segmentation of one seed in a [`DualSeedResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeedResult {
    pub seed: SeedPoint,
    pub labels: LabelImage,
    /// Smoothed intensity masked by `labels`.
    pub image: Buffer2<f32>,
}

/// Two independently grown regions over the same smoothed slice.
#[derive(Debug, Clone, PartialEq)]
pub struct DualSeedResult {
    pub left: SeedResult,
    pub right: SeedResult,
}

/// Runs processing variants over 2D slices.
#[derive(Debug, Clone, Default)]
pub struct SegmentationPipeline {
    config: Config,
}

impl SegmentationPipeline {
    /// Pipeline with the default workflow parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `variant` and returns its display artifact.
    ///
    /// The seed is checked against the slice for every variant, including
    /// the ones that never read it.
    pub fn run(
        &self,
        slice: &Slice,
        seed: SeedPoint,
        range: TemperatureRange,
        variant: ProcessingVariant,
    ) -> Result<ResultImage> {
        Ok(self.run_stages(slice, seed, range, variant)?.result)
    }

    /// Like [`run`](Self::run), but the variant comes from a host selector
    /// string. An unknown selector leaves the slice unchanged.
    pub fn run_selection(
        &self,
        slice: &Slice,
        seed: SeedPoint,
        range: TemperatureRange,
        selector: &str,
    ) -> Result<ResultImage> {
        match selector.parse::<ProcessingVariant>() {
            Ok(variant) => self.run(slice, seed, range, variant),
            Err(Error::InvalidVariant(name)) => {
                log::warn!("Unknown processing variant '{}', slice left unchanged", name);
                Ok(ResultImage::Scalar(slice.pixels().clone()))
            }
            Err(err) => Err(err),
        }
    }

    /// Runs `variant` and keeps every intermediate artifact.
    pub fn run_stages(
        &self,
        slice: &Slice,
        seed: SeedPoint,
        range: TemperatureRange,
        variant: ProcessingVariant,
    ) -> Result<StageOutputs> {
        seed.check_inside(slice.pixels())?;
        let plan = variant.plan();

        log::debug!(
            "Running '{}' on {}x{} slice, seed {}, range {}",
            variant,
            slice.width(),
            slice.height(),
            seed,
            range
        );

        let mut outputs = StageOutputs {
            variant,
            smoothed: None,
            region: None,
            filled: None,
            contour: None,
            result: ResultImage::Scalar(slice.pixels().clone()),
        };

        if !plan.smooth {
            return Ok(outputs);
        }
        let smoothed = self.smooth(slice.pixels());

        if !plan.grow_region {
            outputs.result = ResultImage::Scalar(smoothed.clone());
            outputs.smoothed = Some(smoothed);
            return Ok(outputs);
        }
        let region = self.grow_region(&smoothed, seed, range)?;

        if !plan.fill_holes {
            outputs.result = match self.config.segmentation_composite {
                CompositeMode::Multiply => {
                    ResultImage::Scalar(stages::multiply_by_mask(&smoothed, &region))
                }
                CompositeMode::Overlay => ResultImage::Rgb(self.overlay(&smoothed, &region)),
            };
            outputs.smoothed = Some(smoothed);
            outputs.region = Some(region);
            return Ok(outputs);
        }
        let filled = stages::voting_hole_fill(
            &region,
            self.config.hole_fill_radius,
            self.config.hole_fill_majority,
        );

        if !plan.extract_contour {
            outputs.result = ResultImage::Label(filled.clone());
        } else {
            let contour = stages::label_contour(&filled, self.config.contour_connectivity);
            outputs.result = match self.config.contour_display {
                ContourDisplay::Overlay => ResultImage::Rgb(self.overlay(&smoothed, &contour)),
                ContourDisplay::Scaled => {
                    ResultImage::Scalar(stages::scale_labels(&contour, self.config.contour_scale))
                }
            };
            outputs.contour = Some(contour);
        }

        outputs.smoothed = Some(smoothed);
        outputs.region = Some(region);
        outputs.filled = Some(filled);
        Ok(outputs)
    }

    /// Segments two seeds over one smoothed copy of `slice`.
    ///
    /// Both seeds are validated before any work starts. The regions are
    /// grown in parallel; the result equals two sequential
    /// [`ProcessingVariant::Segmentation`] runs with multiply compositing.
    pub fn run_dual(
        &self,
        slice: &Slice,
        left: SeedPoint,
        right: SeedPoint,
        range: TemperatureRange,
    ) -> Result<DualSeedResult> {
        left.check_inside(slice.pixels())?;
        right.check_inside(slice.pixels())?;

        let smoothed = self.smooth(slice.pixels());
        let (left_labels, right_labels) = rayon::join(
            || self.grow_region(&smoothed, left, range),
            || self.grow_region(&smoothed, right, range),
        );
        let (left_labels, right_labels) = (left_labels?, right_labels?);

        log::info!(
            "Dual segmentation: left {} -> {} px, right {} -> {} px",
            left,
            count_foreground(&left_labels),
            right,
            count_foreground(&right_labels)
        );

        Ok(DualSeedResult {
            left: SeedResult {
                seed: left,
                image: stages::multiply_by_mask(&smoothed, &left_labels),
                labels: left_labels,
            },
            right: SeedResult {
                seed: right,
                image: stages::multiply_by_mask(&smoothed, &right_labels),
                labels: right_labels,
            },
        })
    }

    fn smooth(&self, image: &Buffer2<f32>) -> Buffer2<f32> {
        stages::curvature_flow(
            image,
            self.config.smoothing_time_step,
            self.config.smoothing_iterations,
        )
    }

    fn grow_region(
        &self,
        smoothed: &Buffer2<f32>,
        seed: SeedPoint,
        range: TemperatureRange,
    ) -> Result<LabelImage> {
        let region =
            stages::connected_threshold(smoothed, seed, range, self.config.connectivity)?;
        if self.config.reject_empty_region && count_foreground(&region) == 0 {
            return Err(Error::EmptySeedRegion {
                x: seed.x,
                y: seed.y,
            });
        }
        Ok(region)
    }

    fn overlay(&self, smoothed: &Buffer2<f32>, labels: &LabelImage) -> Buffer2<[u8; 3]> {
        let gray = stages::rescale_intensity(smoothed);
        stages::label_overlay(&gray, labels, self.config.overlay_opacity)
    }
}

fn count_foreground(labels: &LabelImage) -> usize {
    labels.iter().filter(|&&label| label != BACKGROUND).count()
}
