use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;

/// A failed golden-image comparison.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// The golden file was missing; the actual output has been written in
    /// its place and must be reviewed before the scenario can pass.
    #[error("benchmark image {path} did not exist; wrote current output for review")]
    GoldenCreated { path: PathBuf },
    #[error(
        "image dimensions {actual_width}x{actual_height} do not match expected {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
    #[error("image differs from {path} in {differing} pixel(s)")]
    PixelMismatch { path: PathBuf, differing: u64 },
    #[error("images are not pixel-identical ({differing} differing pixel(s))")]
    NotIdentical { differing: u64 },
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Compares `actual` against the golden image stored for a test scenario.
///
/// The golden path is `<data_dir>/<test_name><suffix>.png`. The comparison
/// is bit-exact: a single differing pixel fails. When no golden exists
/// yet, `actual` is written as the new golden and the scenario still fails
/// so a human reviews the baseline before it can pass.
pub fn validate_against_golden(
    actual: &RgbImage,
    data_dir: &Path,
    test_name: &str,
    suffix: &str,
) -> Result<(), BenchmarkError> {
    let path = data_dir.join(format!("{test_name}{suffix}.png"));
    if !path.exists() {
        actual.save(&path)?;
        return Err(BenchmarkError::GoldenCreated { path });
    }

    let expected = image::open(&path)?.to_rgb8();
    check_dimensions(&expected, actual)?;
    let differing = count_differing_pixels(&expected, actual);
    if differing > 0 {
        return Err(BenchmarkError::PixelMismatch { path, differing });
    }
    Ok(())
}

/// Requires two in-memory images to be identical: equal dimensions first,
/// then a zero pixel-by-pixel difference.
pub fn verify_equal_images(
    expected: &RgbImage,
    actual: &RgbImage,
) -> Result<(), BenchmarkError> {
    check_dimensions(expected, actual)?;
    let differing = count_differing_pixels(expected, actual);
    if differing > 0 {
        return Err(BenchmarkError::NotIdentical { differing });
    }
    Ok(())
}

fn check_dimensions(expected: &RgbImage, actual: &RgbImage) -> Result<(), BenchmarkError> {
    if expected.dimensions() != actual.dimensions() {
        return Err(BenchmarkError::DimensionMismatch {
            expected_width: expected.width(),
            expected_height: expected.height(),
            actual_width: actual.width(),
            actual_height: actual.height(),
        });
    }
    Ok(())
}

fn count_differing_pixels(a: &RgbImage, b: &RgbImage) -> u64 {
    a.pixels().zip(b.pixels()).filter(|(p, q)| p != q).count() as u64
}
