use std::fs;
use std::path::Path;

use anyhow::Result;
use image::RgbImage;
use passmark::{load_or_detect, Detection, LandmarkCache, LandmarkDetector, Landmarks, Point, Rect};
use tempfile::TempDir;

fn sample_landmarks() -> Landmarks {
    Landmarks {
        crown: Point::new(10, 20),
        chin: Point::new(10, 220),
        eye_left_pupil: Point::new(5, 50),
        eye_right_pupil: Point::new(15, 50),
        eye_left_corner: Point::new(2, 50),
        eye_right_corner: Point::new(18, 50),
        nose_tip: Point::new(10, 100),
        lip_left_corner: Point::new(5, 150),
        lip_right_corner: Point::new(15, 150),
        face_rect: Rect::new(0, 10, 20, 210),
        eye_left_rect: Rect::new(3, 45, 4, 4),
        eye_right_rect: Rect::new(13, 45, 4, 4),
        mouth_rect: Rect::new(5, 145, 10, 10),
        lip_contour_upper: vec![
            Point::new(5, 150),
            Point::new(10, 148),
            Point::new(15, 150),
        ],
        lip_contour_lower: vec![],
        all_landmarks: vec![Point::new(5, 50), Point::new(15, 50)],
        success: true,
    }
}

struct StubDetector {
    calls: usize,
    landmarks: Landmarks,
}

impl LandmarkDetector for StubDetector {
    fn detect(&mut self, _image_path: &Path, _ground_truth: &Landmarks) -> Result<Detection> {
        self.calls += 1;
        Ok(Detection {
            success: self.landmarks.success,
            image: RgbImage::new(8, 8),
            landmarks: self.landmarks.clone(),
        })
    }
}

#[test]
fn round_trip_preserves_all_fields() {
    let dir = TempDir::new().expect("tempdir");
    let cache = LandmarkCache::new(dir.path());
    let image_path = dir.path().join("face01.jpg");

    let original = sample_landmarks();
    cache.store(&image_path, &original).expect("store");
    let loaded = cache.load(&image_path).expect("load").expect("entry exists");
    assert_eq!(loaded, original);
}

#[test]
fn absent_entry_is_none() {
    let dir = TempDir::new().expect("tempdir");
    let cache = LandmarkCache::new(dir.path());
    let loaded = cache.load(&dir.path().join("never_seen.jpg")).expect("load");
    assert!(loaded.is_none());
}

#[test]
fn malformed_entry_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let cache = LandmarkCache::new(dir.path());
    let image_path = dir.path().join("face01.jpg");

    fs::write(cache.entry_path(&image_path), "not json at all").expect("write entry");
    assert!(cache.load(&image_path).is_err());
}

#[test]
fn same_file_name_in_different_directories_does_not_collide() {
    let dir = TempDir::new().expect("tempdir");
    let cache = LandmarkCache::new(dir.path().join("cache"));
    let front = dir.path().join("front").join("face01.jpg");
    let side = dir.path().join("side").join("face01.jpg");

    cache.store(&front, &sample_landmarks()).expect("store");
    assert_ne!(cache.entry_path(&front), cache.entry_path(&side));
    assert!(cache.load(&side).expect("load").is_none());
}

#[test]
fn cache_hit_short_circuits_the_detector() {
    let dir = TempDir::new().expect("tempdir");
    let cache = LandmarkCache::new(dir.path().join("cache"));
    let image_path = dir.path().join("face01.jpg");
    let ground_truth = Landmarks::default();

    let cached = sample_landmarks();
    cache.store(&image_path, &cached).expect("store");

    let mut detector = StubDetector {
        calls: 0,
        landmarks: Landmarks::default(),
    };
    let loaded =
        load_or_detect(&cache, &mut detector, &image_path, &ground_truth).expect("load_or_detect");
    assert_eq!(loaded, cached);
    assert_eq!(detector.calls, 0);
}

#[test]
fn cache_miss_detects_once_and_persists() {
    let dir = TempDir::new().expect("tempdir");
    let cache = LandmarkCache::new(dir.path().join("cache"));
    let image_path = dir.path().join("face01.jpg");
    let ground_truth = Landmarks::default();

    let mut detector = StubDetector {
        calls: 0,
        landmarks: sample_landmarks(),
    };

    let first =
        load_or_detect(&cache, &mut detector, &image_path, &ground_truth).expect("first call");
    assert_eq!(first, sample_landmarks());
    assert_eq!(detector.calls, 1);
    assert!(cache.entry_path(&image_path).exists());

    let second =
        load_or_detect(&cache, &mut detector, &image_path, &ground_truth).expect("second call");
    assert_eq!(second, first);
    assert_eq!(detector.calls, 1);
}
