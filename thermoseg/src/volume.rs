//! Volume and slice containers, and extraction of a 2D slice from a volume.

use common::Buffer2;

use crate::error::{Error, Result};
use crate::types::SeedPoint;

/// 3D grid of scalar samples with physical geometry.
///
/// Samples are stored x-fastest, then y, then z. Geometry is axis-aligned:
/// `physical = origin + index * spacing`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    width: usize,
    height: usize,
    depth: usize,
    spacing: [f64; 3],
    origin: [f64; 3],
    samples: Vec<f32>,
}

impl Volume {
    /// Creates a volume with unit spacing and zero origin.
    pub fn new(width: usize, height: usize, depth: usize, samples: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(Error::InvalidVolume(format!(
                "extent {}x{}x{} has an empty dimension",
                width, height, depth
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|plane| plane.checked_mul(depth))
            .ok_or_else(|| {
                Error::InvalidVolume(format!(
                    "extent {}x{}x{} overflows the address space",
                    width, height, depth
                ))
            })?;
        if samples.len() != expected {
            return Err(Error::InvalidVolume(format!(
                "{} samples do not match extent {}x{}x{}",
                samples.len(),
                width,
                height,
                depth
            )));
        }

        Ok(Self {
            width,
            height,
            depth,
            spacing: [1.0; 3],
            origin: [0.0; 3],
            samples,
        })
    }

    /// Stacks equally sized planes along z.
    pub fn from_planes(planes: &[Buffer2<f32>]) -> Result<Self> {
        let first = planes
            .first()
            .ok_or_else(|| Error::InvalidVolume("no planes given".to_string()))?;

        if let Some(bad) = planes.iter().position(|plane| !plane.same_extent(first)) {
            return Err(Error::InvalidVolume(format!(
                "plane {} is {}x{}, expected {}x{}",
                bad,
                planes[bad].width(),
                planes[bad].height(),
                first.width(),
                first.height()
            )));
        }

        let samples = planes
            .iter()
            .flat_map(|plane| plane.iter().copied())
            .collect();
        Self::new(first.width(), first.height(), planes.len(), samples)
    }

    pub fn with_geometry(mut self, spacing: [f64; 3], origin: [f64; 3]) -> Result<Self> {
        if spacing.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(Error::InvalidVolume(format!(
                "spacing {:?} must be finite and positive",
                spacing
            )));
        }
        if origin.iter().any(|o| !o.is_finite()) {
            return Err(Error::InvalidVolume(format!(
                "origin {:?} must be finite",
                origin
            )));
        }
        self.spacing = spacing;
        self.origin = origin;
        Ok(self)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    #[inline]
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize, z: usize) -> f32 {
        debug_assert!(x < self.width && y < self.height && z < self.depth);
        self.samples[(z * self.height + y) * self.width + x]
    }

    /// Copies plane `z` into a 2D slice, keeping every sample value and the
    /// in-plane geometry.
    pub fn extract_slice(&self, z: usize) -> Result<Slice> {
        if z >= self.depth {
            return Err(Error::SliceIndexOutOfRange {
                index: z,
                depth: self.depth,
            });
        }

        let plane_len = self.width * self.height;
        let start = z * plane_len;
        let pixels = Buffer2::new(
            self.width,
            self.height,
            self.samples[start..start + plane_len].to_vec(),
        );

        log::debug!(
            "Extracted slice z={} ({}x{}) from volume of depth {}",
            z,
            self.width,
            self.height,
            self.depth
        );

        Ok(Slice {
            pixels,
            spacing: [self.spacing[0], self.spacing[1]],
            origin: [self.origin[0], self.origin[1]],
        })
    }

    /// Nearest voxel index of a physical point, or `None` outside the grid.
    pub fn physical_to_index(&self, point: [f64; 3]) -> Option<[usize; 3]> {
        let extent = [self.width, self.height, self.depth];
        let mut index = [0usize; 3];
        for axis in 0..3 {
            index[axis] = nearest_index(
                point[axis],
                self.origin[axis],
                self.spacing[axis],
                extent[axis],
            )?;
        }
        Some(index)
    }
}

/// Copies plane `z` of `volume`; see [`Volume::extract_slice`].
pub fn extract_slice(volume: &Volume, z: usize) -> Result<Slice> {
    volume.extract_slice(z)
}

/// A single 2D plane of scalar samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pixels: Buffer2<f32>,
    spacing: [f64; 2],
    origin: [f64; 2],
}

impl Slice {
    /// Wraps a pixel grid with unit spacing and zero origin.
    pub fn new(pixels: Buffer2<f32>) -> Self {
        Self {
            pixels,
            spacing: [1.0; 2],
            origin: [0.0; 2],
        }
    }

    #[inline]
    pub fn pixels(&self) -> &Buffer2<f32> {
        &self.pixels
    }

    #[inline]
    pub fn into_pixels(self) -> Buffer2<f32> {
        self.pixels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    #[inline]
    pub fn spacing(&self) -> [f64; 2] {
        self.spacing
    }

    #[inline]
    pub fn origin(&self) -> [f64; 2] {
        self.origin
    }

    /// Sample under `seed`, or `None` when the seed is outside the slice.
    pub fn value_at(&self, seed: SeedPoint) -> Option<f32> {
        self.pixels
            .contains(seed.x, seed.y)
            .then(|| self.pixels[(seed.x, seed.y)])
    }

    /// Converts an in-plane physical position (e.g. a placed fiducial) to the
    /// nearest pixel.
    pub fn physical_to_seed(&self, point: [f64; 2]) -> Option<SeedPoint> {
        let x = nearest_index(point[0], self.origin[0], self.spacing[0], self.width())?;
        let y = nearest_index(point[1], self.origin[1], self.spacing[1], self.height())?;
        Some(SeedPoint::new(x, y))
    }
}

impl From<Buffer2<f32>> for Slice {
    fn from(pixels: Buffer2<f32>) -> Self {
        Self::new(pixels)
    }
}

fn nearest_index(coordinate: f64, origin: f64, spacing: f64, extent: usize) -> Option<usize> {
    let continuous = ((coordinate - origin) / spacing).round();
    if !continuous.is_finite() || continuous < 0.0 || continuous >= extent as f64 {
        return None;
    }
    Some(continuous as usize)
}
