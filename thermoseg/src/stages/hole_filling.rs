//! Voting binary hole filling.
//!
//! A background pixel is switched to foreground when foreground pixels hold
//! a majority of its square neighbourhood; foreground pixels never change.
//! For a radius `r` the window has `n = (2r + 1)²` pixels and the birth
//! threshold is `(n - 1) / 2 + majority` foreground neighbours, so the
//! default radius 2 / majority 1 needs 13 of the 24 neighbours.
//!
//! Applied to a single-slice volume with the same radius along z and edge
//! replication, every count and the threshold scale by the same factor, so
//! this 2D rule gives identical results.

use common::Buffer2;
use rayon::prelude::*;

use crate::types::{LabelImage, BACKGROUND, FOREGROUND};

/// Fills background pixels enclosed by a foreground majority, in one pass.
///
/// Pixels outside the image take the value of the nearest border pixel.
/// `radius` is expected to be small (see `Config::validate`); a `majority`
/// above half the window leaves the labels unchanged.
pub fn voting_hole_fill(labels: &LabelImage, radius: usize, majority: usize) -> LabelImage {
    let width = labels.width();
    let height = labels.height();
    if labels.is_empty() {
        return labels.clone();
    }

    let side = 2 * radius + 1;
    let neighbours = side * side - 1;
    let birth_threshold = (neighbours / 2).saturating_add(majority);

    let counts = PaddedCounts::new(labels, radius);
    let mut output = labels.clone();

    let filled: usize = output
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .map(|(y, row)| {
            let mut row_filled = 0usize;
            for (x, value) in row.iter_mut().enumerate() {
                if *value != BACKGROUND {
                    continue;
                }
                // The centre is background, so the window sum counts neighbours only.
                if counts.window_sum(x, y, side) >= birth_threshold {
                    *value = FOREGROUND;
                    row_filled += 1;
                }
            }
            row_filled
        })
        .sum();

    log::debug!(
        "Hole filling (radius {}, threshold {}/{}): {} pixels filled on {}x{}",
        radius,
        birth_threshold,
        neighbours,
        filled,
        width,
        height
    );

    output
}

/// Summed-area table of foreground pixels over the label image padded by
/// `radius` replicated border pixels on each side.
struct PaddedCounts {
    stride: usize,
    table: Vec<u32>,
}

impl PaddedCounts {
    fn new(labels: &LabelImage, radius: usize) -> Self {
        let padded_width = labels.width() + 2 * radius;
        let padded_height = labels.height() + 2 * radius;
        let stride = padded_width + 1;
        let mut table = vec![0u32; stride * (padded_height + 1)];

        let r = radius as isize;
        for py in 0..padded_height {
            let mut row_sum = 0u32;
            for px in 0..padded_width {
                let label = *labels.get_clamped(px as isize - r, py as isize - r);
                row_sum += u32::from(label != BACKGROUND);
                table[(py + 1) * stride + px + 1] = table[py * stride + px + 1] + row_sum;
            }
        }

        Self { stride, table }
    }

    /// Foreground count in the `side`×`side` window centred on image pixel (x, y).
    #[inline]
    fn window_sum(&self, x: usize, y: usize, side: usize) -> usize {
        let s = self.stride;
        let (x0, y0) = (x, y);
        let (x1, y1) = (x + side, y + side);
        let total = self.table[y1 * s + x1] + self.table[y0 * s + x0]
            - self.table[y0 * s + x1]
            - self.table[y1 * s + x0];
        total as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x5 image with background centre and the first `n` other pixels set.
    fn window_with_neighbours(n: usize) -> LabelImage {
        let mut labels = Buffer2::new_filled(5, 5, BACKGROUND);
        let others = (0..25).filter(|&i| i != 12).take(n);
        for i in others {
            labels[(i % 5, i / 5)] = FOREGROUND;
        }
        labels
    }

    /// Count of `FOREGROUND` in the 5x5 window around (x, y), by brute force.
    fn brute_force_neighbours(labels: &LabelImage, x: usize, y: usize) -> usize {
        let mut count = 0;
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                if (dx, dy) != (0, 0)
                    && *labels.get_clamped(x as isize + dx, y as isize + dy) == FOREGROUND
                {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_single_pixel_hole_is_filled() {
        let mut labels = Buffer2::new_filled(9, 9, FOREGROUND);
        labels[(4, 4)] = BACKGROUND;
        let filled = voting_hole_fill(&labels, 2, 1);
        assert!(filled.iter().all(|&v| v == FOREGROUND));
    }

    #[test]
    fn test_birth_threshold_is_13_of_24() {
        // Centre pixel (2, 2) is the only one whose window is fully inside.
        let twelve = voting_hole_fill(&window_with_neighbours(12), 2, 1);
        assert_eq!(twelve[(2, 2)], BACKGROUND);

        let thirteen = voting_hole_fill(&window_with_neighbours(13), 2, 1);
        assert_eq!(thirteen[(2, 2)], FOREGROUND);
    }

    #[test]
    fn test_majority_raises_threshold() {
        let labels = window_with_neighbours(13);
        assert_eq!(voting_hole_fill(&labels, 2, 2)[(2, 2)], BACKGROUND);
        assert_eq!(voting_hole_fill(&window_with_neighbours(14), 2, 2)[(2, 2)], FOREGROUND);
    }

    #[test]
    fn test_oversized_majority_fills_nothing() {
        let labels = window_with_neighbours(24);
        assert_eq!(voting_hole_fill(&labels, 2, usize::MAX), labels);
    }

    #[test]
    fn test_foreground_is_never_removed() {
        let labels = Buffer2::from_fn(23, 17, |x, y| u8::from((x * 7 + y * 3) % 5 == 0));
        let filled = voting_hole_fill(&labels, 2, 1);
        for (before, after) in labels.iter().zip(filled.iter()) {
            assert!(*before == BACKGROUND || *after == FOREGROUND);
        }
    }

    #[test]
    fn test_window_counts_match_brute_force() {
        let labels = Buffer2::from_fn(11, 7, |x, y| u8::from((x + 2 * y) % 3 != 0));
        let counts = PaddedCounts::new(&labels, 2);
        for y in 0..labels.height() {
            for x in 0..labels.width() {
                let centre = usize::from(labels[(x, y)] == FOREGROUND);
                assert_eq!(
                    counts.window_sum(x, y, 5) - centre,
                    brute_force_neighbours(&labels, x, y),
                    "at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_isolated_background_region_stays_when_large() {
        // A 5x5 background square inside foreground: its centre sees only
        // background, so the single pass fills the rim but not the middle.
        let labels = Buffer2::from_fn(15, 15, |x, y| {
            u8::from(!((5..10).contains(&x) && (5..10).contains(&y)))
        });
        let filled = voting_hole_fill(&labels, 2, 1);
        assert_eq!(filled[(7, 7)], BACKGROUND);
        assert_eq!(filled[(5, 5)], FOREGROUND);
    }

    #[test]
    fn test_empty_labels() {
        let labels = LabelImage::new_default(0, 0);
        assert!(voting_hole_fill(&labels, 2, 1).is_empty());
    }
}
