use std::path::Path;

use anyhow::Result;
use image::RgbImage;

use crate::landmarks::Landmarks;

/// Outcome of running the detection engine on one image.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Whether the engine completed landmark extraction for the image.
    pub success: bool,
    /// The image the engine loaded, used for annotation overlays.
    pub image: RgbImage,
    pub landmarks: Landmarks,
}

/// Capability interface to the external landmark detection engine.
///
/// A per-image detection miss is reported through [`Detection::success`]
/// and gets recorded by the caller; `Err` is reserved for unrecoverable
/// I/O and aborts the run. Implementations must be deterministic for a
/// given input so cached results stay meaningful.
pub trait LandmarkDetector {
    fn detect(&mut self, image_path: &Path, ground_truth: &Landmarks) -> Result<Detection>;
}
