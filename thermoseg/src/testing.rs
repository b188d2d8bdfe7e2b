//! Synthetic thermal slices for tests.

use common::Buffer2;

use crate::types::{DEFAULT_LEFT_SEED, DEFAULT_RIGHT_SEED};
use crate::volume::Slice;

/// A uniformly warm disc, e.g. the sole of a foot.
#[derive(Debug, Clone, Copy)]
pub struct WarmDisc {
    pub center: (f32, f32),
    pub radius: f32,
    pub temperature: f32,
}

/// Deterministic pseudo-noise in `[-1, 1]`.
pub fn jitter(x: usize, y: usize) -> f32 {
    let mut h = (x as u32).wrapping_mul(0x9E37_79B1) ^ (y as u32).wrapping_mul(0x85EB_CA77);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    (h % 2001) as f32 / 1000.0 - 1.0
}

/// Background temperature with warm discs painted on top (later discs win),
/// plus `noise` amplitude of deterministic jitter.
pub fn thermal_slice(
    width: usize,
    height: usize,
    background: f32,
    discs: &[WarmDisc],
    noise: f32,
) -> Slice {
    let pixels = Buffer2::from_fn(width, height, |x, y| {
        let base = discs
            .iter()
            .rev()
            .find(|disc| {
                let dx = x as f32 - disc.center.0;
                let dy = y as f32 - disc.center.1;
                dx * dx + dy * dy <= disc.radius * disc.radius
            })
            .map_or(background, |disc| disc.temperature);
        base + noise * jitter(x, y)
    });
    Slice::new(pixels)
}

/// 256x256 slice in `[20, 40]` with two separate warm feet centred on the
/// default seeds, and a 3x3 cold spot inside the right foot at (80, 117).
pub fn feet_slice() -> Slice {
    let mut slice = thermal_slice(
        256,
        256,
        22.0,
        &[
            WarmDisc {
                center: (DEFAULT_RIGHT_SEED.x as f32, DEFAULT_RIGHT_SEED.y as f32),
                radius: 28.0,
                temperature: 30.0,
            },
            WarmDisc {
                center: (DEFAULT_LEFT_SEED.x as f32, DEFAULT_LEFT_SEED.y as f32),
                radius: 24.0,
                temperature: 31.0,
            },
        ],
        0.4,
    )
    .into_pixels();

    for y in 116..=118 {
        for x in 79..=81 {
            slice[(x, y)] = 20.0;
        }
    }
    Slice::new(slice)
}

/// Centre of the cold spot painted by [`feet_slice`].
pub const COLD_SPOT: (usize, usize) = (80, 117);
