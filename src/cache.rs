use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::detector::LandmarkDetector;
use crate::landmarks::Landmarks;

/// On-disk memoization of detection results, one JSON file per image.
///
/// Entries are never invalidated automatically; delete the entry file (or
/// the whole cache root) to force recomputation after the detection engine
/// changes.
pub struct LandmarkCache {
    root: PathBuf,
}

impl LandmarkCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the cache entry for an image.
    ///
    /// The entry name is derived from the full absolute image path, not
    /// just the file name, so equally named images in different
    /// directories get distinct entries.
    pub fn entry_path(&self, image_path: &Path) -> PathBuf {
        self.root.join(entry_file_name(image_path))
    }

    /// Returns the cached landmarks for an image, or `None` when no entry
    /// exists. A present but malformed entry is an error.
    pub fn load(&self, image_path: &Path) -> Result<Option<Landmarks>> {
        let path = self.entry_path(image_path);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading cache entry {}", path.display()))?;
        let landmarks = serde_json::from_str(&raw)
            .with_context(|| format!("parsing cache entry {}", path.display()))?;
        Ok(Some(landmarks))
    }

    /// Writes the landmarks for an image, overwriting any previous entry.
    pub fn store(&self, image_path: &Path, landmarks: &Landmarks) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("creating cache root {}", self.root.display()))?;
        let path = self.entry_path(image_path);
        let data = serde_json::to_string_pretty(landmarks)?;
        std::fs::write(&path, data)
            .with_context(|| format!("writing cache entry {}", path.display()))?;
        Ok(())
    }
}

/// Returns the landmarks for an image, detecting and persisting them on a
/// cache miss. The detection engine is owned by the caller and is only
/// invoked when no entry exists.
pub fn load_or_detect(
    cache: &LandmarkCache,
    detector: &mut dyn LandmarkDetector,
    image_path: &Path,
    ground_truth: &Landmarks,
) -> Result<Landmarks> {
    if let Some(landmarks) = cache.load(image_path)? {
        return Ok(landmarks);
    }
    let detection = detector.detect(image_path, ground_truth)?;
    cache.store(image_path, &detection.landmarks)?;
    Ok(detection.landmarks)
}

fn entry_file_name(image_path: &Path) -> String {
    let absolute =
        std::path::absolute(image_path).unwrap_or_else(|_| image_path.to_path_buf());
    let mut name: String = absolute
        .to_string_lossy()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    name.push_str(".json");
    name
}
