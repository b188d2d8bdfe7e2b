//! Combining label images with intensity for display.

use common::Buffer2;

use crate::types::{LabelImage, BACKGROUND};

/// Overlay colours; label `l` uses `LABEL_COLORS[l % LABEL_COLORS.len()]`.
pub const LABEL_COLORS: [[u8; 3]; 8] = [
    [255, 0, 0],
    [0, 205, 0],
    [0, 0, 255],
    [0, 255, 255],
    [255, 0, 255],
    [255, 127, 0],
    [0, 100, 0],
    [138, 43, 226],
];

/// Linearly maps the image onto `[0, 255]`, truncating to `u8`.
///
/// A constant image maps to 0. Non-finite samples are ignored when finding
/// the input range and map to 0.
pub fn rescale_intensity(image: &Buffer2<f32>) -> Buffer2<u8> {
    let (min, max) = image
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if !(max > min) {
        return Buffer2::new_filled(image.width(), image.height(), 0);
    }

    let scale = 255.0 / (f64::from(max) - f64::from(min));
    image.map(|&v| {
        if v.is_finite() {
            ((f64::from(v) - f64::from(min)) * scale).clamp(0.0, 255.0) as u8
        } else {
            0
        }
    })
}

/// Pixel-wise product of intensity and the label mask (label 0 → 0, 1 → unchanged).
pub fn multiply_by_mask(image: &Buffer2<f32>, labels: &LabelImage) -> Buffer2<f32> {
    image.zip_map(labels, |&v, &label| v * f32::from(label))
}

/// Blends label colours over a grey image.
///
/// Background pixels keep their grey value; labelled pixels become
/// `opacity * colour + (1 - opacity) * grey`, truncated per channel.
pub fn label_overlay(gray: &Buffer2<u8>, labels: &LabelImage, opacity: f32) -> Buffer2<[u8; 3]> {
    let opacity = f64::from(opacity);
    gray.zip_map(labels, |&g, &label| {
        if label == BACKGROUND {
            return [g, g, g];
        }
        let color = LABEL_COLORS[usize::from(label) % LABEL_COLORS.len()];
        color.map(|c| (opacity * f64::from(c) + (1.0 - opacity) * f64::from(g)) as u8)
    })
}
