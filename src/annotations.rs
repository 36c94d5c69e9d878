use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::landmarks::{Landmarks, Point};

/// One relevant line of the VIA export: image filename, file size, empty
/// file attributes, the six-region count, the landmark index and the
/// embedded point JSON with its doubled quotes.
static ANNOTATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(.*\.(?:jpg|JPG|png|PNG)),\d+,"\{\}",6,(\d),".*""cx"":(\d+),""cy"":(\d+)\}","\{\}""#)
        .expect("annotation line pattern")
});

/// Hand-annotated landmark kinds, discriminated by the region id column of
/// the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkKind {
    Crown,
    Chin,
    EyeLeftPupil,
    EyeRightPupil,
    LipLeftCorner,
    LipRightCorner,
}

impl TryFrom<u32> for LandmarkKind {
    type Error = anyhow::Error;

    fn try_from(value: u32) -> Result<Self> {
        Ok(match value {
            0 => Self::Crown,
            1 => Self::Chin,
            2 => Self::EyeLeftPupil,
            3 => Self::EyeRightPupil,
            4 => Self::LipLeftCorner,
            5 => Self::LipRightCorner,
            other => bail!("landmark index {other} out of range (expected 0-5)"),
        })
    }
}

impl LandmarkKind {
    fn assign(self, landmarks: &mut Landmarks, point: Point) {
        match self {
            Self::Crown => landmarks.crown = point,
            Self::Chin => landmarks.chin = point,
            Self::EyeLeftPupil => landmarks.eye_left_pupil = point,
            Self::EyeRightPupil => landmarks.eye_right_pupil = point,
            Self::LipLeftCorner => landmarks.lip_left_corner = point,
            Self::LipRightCorner => landmarks.lip_right_corner = point,
        }
    }
}

/// Loads the manually annotated landmarks from a VIA-format CSV export.
///
/// Returns a map from image path (resolved against the export's directory)
/// to its ground-truth landmarks. Lines that do not match the export
/// pattern are ignored; a landmark index outside 0-5 aborts the import, as
/// silently misassigning a point would corrupt the ground truth.
pub fn import_landmarks(csv_path: &Path) -> Result<BTreeMap<PathBuf, Landmarks>> {
    let content = std::fs::read_to_string(csv_path)
        .with_context(|| format!("reading annotations at {}", csv_path.display()))?;
    let image_dir = csv_path.parent().unwrap_or_else(|| Path::new(""));

    let mut map: BTreeMap<PathBuf, Landmarks> = BTreeMap::new();
    for caps in ANNOTATION_LINE.captures_iter(&content) {
        let image_name = &caps[1];
        let index: u32 = caps[2].parse().context("parsing landmark index")?;
        let x: i32 = caps[3].parse().context("parsing point x")?;
        let y: i32 = caps[4].parse().context("parsing point y")?;

        let kind = LandmarkKind::try_from(index)
            .with_context(|| format!("annotation for {image_name}"))?;
        let image_path = image_dir.join(image_name);
        kind.assign(map.entry(image_path).or_default(), Point::new(x, y));
    }
    Ok(map)
}
