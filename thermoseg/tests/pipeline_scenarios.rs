use anyhow::Result;
use thermoseg::{
    Buffer2, Config, Error, ProcessingVariant, ResultImage, SeedPoint, SegmentationPipeline,
    TemperatureRange, Volume, BACKGROUND, DEFAULT_LEFT_SEED, DEFAULT_RIGHT_SEED, FOREGROUND,
};

/// Cool floor around 20°C with two warm soles (30°C and 32°C) around the default
/// seeds. The plane index shifts the floor so every plane differs.
fn feet_plane(z: usize) -> Buffer2<f32> {
    Buffer2::from_fn(256, 256, |x, y| {
        let near = |seed: SeedPoint, radius: f32| {
            let dx = x as f32 - seed.x as f32;
            let dy = y as f32 - seed.y as f32;
            dx * dx + dy * dy <= radius * radius
        };
        if near(DEFAULT_RIGHT_SEED, 30.0) {
            30.0
        } else if near(DEFAULT_LEFT_SEED, 25.0) {
            32.0
        } else {
            20.0 + z as f32 + ((x * 7 + y * 13) % 10) as f32 * 0.05
        }
    })
}

fn feet_volume() -> Result<Volume> {
    let planes: Vec<_> = (0..3).map(feet_plane).collect();
    Ok(Volume::from_planes(&planes)?.with_geometry([0.8, 0.8, 2.5], [0.0, 0.0, 0.0])?)
}

fn skin() -> Result<TemperatureRange> {
    Ok(TemperatureRange::new(27.0, 35.0)?)
}

fn count(labels: &Buffer2<u8>) -> usize {
    labels.iter().filter(|&&l| l == FOREGROUND).count()
}

#[test]
fn test_extract_then_segment_right_foot() -> Result<()> {
    let volume = feet_volume()?;
    let slice = volume.extract_slice(1)?;
    assert_eq!(slice.pixels(), &feet_plane(1));
    assert_eq!(slice.value_at(DEFAULT_RIGHT_SEED), Some(30.0));

    let result = SegmentationPipeline::new().run(
        &slice,
        DEFAULT_RIGHT_SEED,
        skin()?,
        ProcessingVariant::SegmentationNoHoles,
    )?;

    let labels = result.as_label().expect("label image");
    assert_eq!(labels[(DEFAULT_RIGHT_SEED.x, DEFAULT_RIGHT_SEED.y)], FOREGROUND);
    assert_eq!(labels[(DEFAULT_LEFT_SEED.x, DEFAULT_LEFT_SEED.y)], BACKGROUND);
    assert_eq!(labels[(0, 0)], BACKGROUND);

    // Disc of radius 30 covers roughly pi * 900 pixels.
    let area = count(labels);
    assert!((2500..=3000).contains(&area), "area {area}");
    Ok(())
}

#[test]
fn test_fiducial_position_maps_to_seed() -> Result<()> {
    let volume = feet_volume()?;
    let slice = volume.extract_slice(0)?;

    let seed = slice
        .physical_to_seed([70.0 * 0.8, 117.0 * 0.8])
        .expect("fiducial inside slice");
    assert_eq!(seed, DEFAULT_RIGHT_SEED);
    assert_eq!(volume.physical_to_index([56.0, 93.6, 5.0]), Some([70, 117, 2]));
    Ok(())
}

#[test]
fn test_out_of_range_requests_fail_without_output() -> Result<()> {
    let volume = feet_volume()?;
    assert!(matches!(
        volume.extract_slice(3),
        Err(Error::SliceIndexOutOfRange { index: 3, depth: 3 })
    ));

    let slice = volume.extract_slice(2)?;
    let result = SegmentationPipeline::new().run(
        &slice,
        SeedPoint::new(300, 300),
        skin()?,
        ProcessingVariant::Segmentation,
    );
    assert!(matches!(result, Err(Error::SeedOutOfBounds { .. })));
    Ok(())
}

#[test]
fn test_two_feet_segment_independently() -> Result<()> {
    let slice = feet_volume()?.extract_slice(0)?;
    let dual = SegmentationPipeline::new().run_dual(
        &slice,
        DEFAULT_LEFT_SEED,
        DEFAULT_RIGHT_SEED,
        skin()?,
    )?;

    assert!(count(&dual.left.labels) > 0);
    assert!(count(&dual.right.labels) > count(&dual.left.labels));
    let overlap = dual
        .left
        .labels
        .iter()
        .zip(dual.right.labels.iter())
        .filter(|(l, r)| **l == FOREGROUND && **r == FOREGROUND)
        .count();
    assert_eq!(overlap, 0);

    let left_mean = dual
        .left
        .image
        .iter()
        .zip(dual.left.labels.iter())
        .filter(|(_, l)| **l == FOREGROUND)
        .map(|(v, _)| *v as f64)
        .sum::<f64>()
        / count(&dual.left.labels) as f64;
    assert!((left_mean - 32.0).abs() < 1.0, "mean {left_mean}");
    Ok(())
}

#[test]
fn test_selector_strings_drive_the_pipeline() -> Result<()> {
    let slice = feet_volume()?.extract_slice(0)?;
    let pipeline = SegmentationPipeline::new();
    let range = skin()?;

    let contour = pipeline.run_selection(&slice, DEFAULT_RIGHT_SEED, range, "contouring")?;
    assert!(matches!(contour, ResultImage::Rgb(_)));

    let unchanged = pipeline.run_selection(&slice, DEFAULT_RIGHT_SEED, range, "sharpen")?;
    assert_eq!(unchanged, ResultImage::Scalar(slice.pixels().clone()));
    Ok(())
}

#[test]
fn test_config_file_drives_pipeline() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("thermoseg-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("segmentation.yaml");
    std::fs::write(
        &path,
        "contour_display: scaled\ncontour_scale: 100.0\nconnectivity: eight\n",
    )?;

    let config = Config::from_file(&path)?;
    std::fs::remove_dir_all(&dir)?;

    let slice = feet_volume()?.extract_slice(0)?;
    let result = SegmentationPipeline::from_config(config)?.run(
        &slice,
        DEFAULT_LEFT_SEED,
        skin()?,
        ProcessingVariant::Contouring,
    )?;

    let scaled = result.as_scalar().expect("scaled contour");
    assert!(scaled.iter().all(|&v| v == 0.0 || v == 100.0));
    assert!(scaled.iter().any(|&v| v == 100.0));
    assert_eq!(scaled[(DEFAULT_LEFT_SEED.x, DEFAULT_LEFT_SEED.y)], 0.0);
    Ok(())
}
