use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;
use log::{info, warn};

use crate::annotations;
use crate::detector::LandmarkDetector;
use crate::landmarks::Landmarks;
use crate::render;

/// Outcome of processing one annotated image.
#[derive(Debug, Clone)]
pub struct ResultRecord {
    pub image_path: PathBuf,
    pub annotations: Landmarks,
    pub detected: Landmarks,
    pub success: bool,
}

/// Runs the detector over every image in the annotation export.
///
/// Images whose path contains any entry of `ignored` as a substring are
/// skipped. Every processed image yields exactly one record, failed
/// detections included, so callers can compute failure rates. Iteration
/// follows the annotation map's key order, not the export's line order.
///
/// With `annotate_dir` set, an overlay of ground truth and detection is
/// written there as `<image-stem>.png` for visual review.
pub fn process_database(
    detector: &mut dyn LandmarkDetector,
    ignored: &[String],
    annotations_path: &Path,
    annotate_dir: Option<&Path>,
) -> Result<Vec<ResultRecord>> {
    let ground_truth = annotations::import_landmarks(annotations_path)?;
    info!("loaded annotations for {} image(s)", ground_truth.len());

    let mut records = Vec::with_capacity(ground_truth.len());
    for (image_path, annotations) in &ground_truth {
        let path_str = image_path.to_string_lossy();
        if ignored.iter().any(|entry| path_str.contains(entry.as_str())) {
            info!("skipping ignored image {}", path_str);
            continue;
        }

        let detection = detector
            .detect(image_path, annotations)
            .with_context(|| format!("detecting landmarks in {}", path_str))?;
        if !detection.success {
            warn!("detection failed for {}", path_str);
        }

        if let Some(dir) = annotate_dir {
            let mut overlay = detection.image.clone();
            render::draw_anchor_points(&mut overlay, annotations, render::ANNOTATION_COLOR);
            render::draw_detected_regions(&mut overlay, &detection.landmarks);
            render::draw_anchor_points(&mut overlay, &detection.landmarks, render::DETECTION_COLOR);
            save_overlay(dir, image_path, &overlay)?;
        }

        records.push(ResultRecord {
            image_path: image_path.clone(),
            annotations: annotations.clone(),
            detected: detection.landmarks,
            success: detection.success,
        });
    }
    Ok(records)
}

fn save_overlay(dir: &Path, image_path: &Path, overlay: &RgbImage) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating overlay directory {}", dir.display()))?;
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let out = dir.join(format!("{stem}.png"));
    overlay
        .save(&out)
        .with_context(|| format!("writing overlay {}", out.display()))?;
    Ok(())
}
