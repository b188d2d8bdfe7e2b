//! Boundary extraction from a label image.

use common::Buffer2;

use crate::config::Connectivity;
use crate::types::{LabelImage, BACKGROUND};

/// Keeps the labelled pixels that touch a different label.
///
/// A foreground pixel is on the contour when at least one neighbour (per
/// `connectivity`) has another value or lies outside the image. Everything
/// else becomes background, so the result is a subset of the input
/// foreground.
pub fn label_contour(labels: &LabelImage, connectivity: Connectivity) -> LabelImage {
    let width = labels.width();
    let height = labels.height();
    let offsets = connectivity.offsets();

    let contour = Buffer2::from_fn(width, height, |x, y| {
        let label = labels[(x, y)];
        if label == BACKGROUND {
            return BACKGROUND;
        }

        let on_boundary = offsets.iter().any(|&(dx, dy)| {
            match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
                (Some(nx), Some(ny)) if nx < width && ny < height => labels[(nx, ny)] != label,
                _ => true,
            }
        });

        if on_boundary {
            label
        } else {
            BACKGROUND
        }
    });

    log::debug!(
        "Contour ({} connectivity): {} boundary pixels",
        connectivity,
        contour.iter().filter(|&&v| v != BACKGROUND).count()
    );

    contour
}

/// Converts labels to intensities, multiplying each by `scale`.
pub fn scale_labels(labels: &LabelImage, scale: f32) -> Buffer2<f32> {
    labels.map(|&label| f32::from(label) * scale)
}
