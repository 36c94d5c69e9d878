use anyhow::{bail, Result};

use crate::landmarks::{Landmarks, Point};

/// Median crown-chin and frown-chin ratios across a ground-truth set.
///
/// Each record contributes two ratios normalized by a reference distance:
/// the inter-pupil distance plus the distance from the pupil midpoint
/// ("frown") to the mouth center. The median keeps a single bad annotation
/// or mis-detection from skewing the coefficients.
///
/// A record whose reference distance is zero (pupils and lip corners all
/// coincide) contributes to neither list instead of injecting a
/// non-finite ratio; with no usable record at all this is an error.
pub fn crown_chin_coefficients(records: &[Landmarks]) -> Result<(f64, f64)> {
    let mut crown_ratios = Vec::with_capacity(records.len());
    let mut frown_ratios = Vec::with_capacity(records.len());

    for lm in records {
        let frown = midpoint(lm.eye_left_pupil, lm.eye_right_pupil);
        let mouth_center = midpoint(lm.lip_left_corner, lm.lip_right_corner);
        let ref_dist =
            lm.eye_left_pupil.distance_to(lm.eye_right_pupil) + dist(frown, mouth_center);
        if ref_dist == 0.0 {
            continue;
        }

        let chin_crown = lm.crown.distance_to(lm.chin);
        let chin_frown = dist(frown, (lm.chin.x as f64, lm.chin.y as f64));
        crown_ratios.push(chin_crown / ref_dist);
        frown_ratios.push(chin_frown / ref_dist);
    }

    if crown_ratios.is_empty() {
        bail!("no annotation with a usable reference distance");
    }
    Ok((median(&mut crown_ratios), median(&mut frown_ratios)))
}

fn midpoint(a: Point, b: Point) -> (f64, f64) {
    ((a.x + b.x) as f64 / 2.0, (a.y + b.y) as f64 / 2.0)
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
