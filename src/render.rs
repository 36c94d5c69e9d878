use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};

use crate::landmarks::{Landmarks, Point, Rect};

/// Color used for hand-annotated ground-truth anchors.
pub const ANNOTATION_COLOR: Rgb<u8> = Rgb([255, 30, 0]);
/// Color used for engine-detected anchors and contours.
pub const DETECTION_COLOR: Rgb<u8> = Rgb([0, 30, 250]);

const FACE_REGION_COLOR: Rgb<u8> = Rgb([0, 128, 0]);
const REGION_COLOR: Rgb<u8> = Rgb([45, 82, 160]);
const DIAGNOSTIC_COLOR: Rgb<u8> = Rgb([190, 40, 40]);

const ANCHOR_RADIUS: i32 = 5;

/// Draws the six core anchors (eyes, lips, crown, chin) as hollow circles.
pub fn draw_anchor_points(img: &mut RgbImage, lm: &Landmarks, color: Rgb<u8>) {
    for point in [
        lm.eye_left_pupil,
        lm.eye_right_pupil,
        lm.lip_left_corner,
        lm.lip_right_corner,
        lm.crown,
        lm.chin,
    ] {
        draw_hollow_circle_mut(img, (point.x, point.y), ANCHOR_RADIUS, color);
    }
}

/// Draws the detected regions: face and eye rectangles, both lip contours
/// (closed), then the mouth rectangle. Undetected regions stay invisible.
pub fn draw_detected_regions(img: &mut RgbImage, lm: &Landmarks) {
    draw_region(img, lm.face_rect, FACE_REGION_COLOR);
    draw_region(img, lm.eye_left_rect, REGION_COLOR);
    draw_region(img, lm.eye_right_rect, REGION_COLOR);
    draw_closed_polyline(img, &lm.lip_contour_upper, DETECTION_COLOR);
    draw_closed_polyline(img, &lm.lip_contour_lower, DETECTION_COLOR);
    draw_region(img, lm.mouth_rect, REGION_COLOR);
}

/// Draws everything known about a record: regions and contours, the core
/// anchors, the extended points and the raw landmark cloud.
pub fn draw_all_landmarks(img: &mut RgbImage, lm: &Landmarks) {
    draw_detected_regions(img, lm);
    draw_anchor_points(img, lm, DETECTION_COLOR);
    for point in [lm.eye_left_corner, lm.eye_right_corner, lm.nose_tip] {
        draw_hollow_circle_mut(img, (point.x, point.y), ANCHOR_RADIUS, DETECTION_COLOR);
    }
    for point in &lm.all_landmarks {
        draw_hollow_circle_mut(img, (point.x, point.y), ANCHOR_RADIUS, DIAGNOSTIC_COLOR);
    }
}

fn draw_region(img: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    if rect.is_empty() {
        return;
    }
    let rect = imageproc::rect::Rect::at(rect.x, rect.y).of_size(rect.width, rect.height);
    draw_hollow_rect_mut(img, rect, color);
}

/// A contour is stored open; anything with at least two points is drawn as
/// a closed polygon.
fn draw_closed_polyline(img: &mut RgbImage, points: &[Point], color: Rgb<u8>) {
    if points.len() < 2 {
        return;
    }
    for pair in points.windows(2) {
        draw_segment(img, pair[0], pair[1], color);
    }
    let first = points[0];
    let last = points[points.len() - 1];
    if first != last {
        draw_segment(img, last, first, color);
    }
}

fn draw_segment(img: &mut RgbImage, a: Point, b: Point, color: Rgb<u8>) {
    draw_line_segment_mut(img, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), color);
}
