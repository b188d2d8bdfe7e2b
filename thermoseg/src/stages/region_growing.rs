//! Seeded region growing (connected threshold).

use std::collections::VecDeque;

use common::{BitBuffer2, Buffer2};

use crate::config::Connectivity;
use crate::error::Result;
use crate::types::{LabelImage, SeedPoint, TemperatureRange, BACKGROUND, FOREGROUND};

/// Labels every pixel connected to `seed` whose value lies in `range`.
///
/// The seed itself must satisfy the range; if it does not, the returned
/// label image is all background. Fails only when the seed is outside the
/// image.
pub fn connected_threshold(
    image: &Buffer2<f32>,
    seed: SeedPoint,
    range: TemperatureRange,
    connectivity: Connectivity,
) -> Result<LabelImage> {
    seed.check_inside(image)?;

    let width = image.width();
    let height = image.height();
    let mut labels = Buffer2::new_filled(width, height, BACKGROUND);

    if !range.contains(image[(seed.x, seed.y)]) {
        log::debug!(
            "Seed {} value {} outside {}; region is empty",
            seed,
            image[(seed.x, seed.y)],
            range
        );
        return Ok(labels);
    }

    let mut visited = BitBuffer2::new_default(width, height);
    let mut queue = VecDeque::new();
    visited.insert(image.index(seed.x, seed.y));
    queue.push_back((seed.x, seed.y));

    let offsets = connectivity.offsets();
    let mut area = 0usize;

    while let Some((x, y)) = queue.pop_front() {
        labels[(x, y)] = FOREGROUND;
        area += 1;

        for &(dx, dy) in offsets {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
            else {
                continue;
            };
            if nx >= width || ny >= height {
                continue;
            }
            if visited.insert(image.index(nx, ny)) && range.contains(image[(nx, ny)]) {
                queue.push_back((nx, ny));
            }
        }
    }

    log::debug!(
        "Region from seed {} in {} ({} connectivity): {} pixels",
        seed,
        range,
        connectivity,
        area
    );

    Ok(labels)
}
