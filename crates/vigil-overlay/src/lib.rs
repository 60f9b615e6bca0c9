pub mod glyph;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use vigil_types::Detection;

use crate::glyph::draw_label;

/// Annotation color and stroke width are fixed, not per-detection.
pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const STROKE_WIDTH: i32 = 2;

/// Vertical gap between the label top and the box's top edge: glyph height
/// plus padding.
const LABEL_OFFSET: i32 = glyph::GLYPH_HEIGHT + 3;

/// Label of the form `"person 0.87"`.
pub fn label_text(detection: &Detection) -> String {
    format!("{} {:.2}", detection.name, detection.confidence)
}

/// Draw every detection onto the frame, in order: a hollow rectangle at the
/// truncated box corners and a label anchored just above the top-left
/// corner. Boxes partially or fully outside the frame are clipped or
/// skipped; drawing never fails. An empty detection set leaves the frame
/// untouched.
pub fn overlay_detections(frame: &mut RgbImage, detections: &[Detection]) {
    for detection in detections {
        draw_detection(frame, detection);
    }
}

fn draw_detection(frame: &mut RgbImage, detection: &Detection) {
    let (x1, y1, x2, y2) = detection.bbox.corners();
    let width = x2.saturating_sub(x1);
    let height = y2.saturating_sub(y1);
    if width <= 0 || height <= 0 {
        return;
    }

    // Corners are inclusive, so the rect spans x1..=x2 / y1..=y2; each
    // extra stroke pass is inset by one pixel.
    for inset in 0..STROKE_WIDTH {
        let w = width + 1 - 2 * inset;
        let h = height + 1 - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(x1 + inset, y1 + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(frame, rect, BOX_COLOR);
    }

    let label = label_text(detection);
    draw_label(frame, x1, (y1 - LABEL_OFFSET).max(0), &label, BOX_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::BoundingBox;

    fn blank_frame(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([0, 0, 0]))
    }

    fn detection(x1: f64, y1: f64, x2: f64, y2: f64) -> Detection {
        Detection::new(BoundingBox::new(x1, y1, x2, y2), 0.87, "person")
    }

    #[test]
    fn test_label_text_formats_confidence_to_two_decimals() {
        assert_eq!(label_text(&detection(10.0, 20.0, 50.0, 60.0)), "person 0.87");

        let low = Detection::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 0.5, "dog");
        assert_eq!(label_text(&low), "dog 0.50");
    }

    #[test]
    fn test_empty_detection_set_leaves_frame_untouched() {
        let mut frame = blank_frame(64, 48);
        let before = frame.clone();
        overlay_detections(&mut frame, &[]);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_box_corners_are_drawn() {
        let mut frame = blank_frame(100, 100);
        overlay_detections(&mut frame, &[detection(10.0, 20.0, 50.0, 60.0)]);

        assert_eq!(*frame.get_pixel(10, 20), BOX_COLOR);
        assert_eq!(*frame.get_pixel(50, 20), BOX_COLOR);
        assert_eq!(*frame.get_pixel(10, 60), BOX_COLOR);
        assert_eq!(*frame.get_pixel(50, 60), BOX_COLOR);
        // Stroke width 2: one pixel inside each edge is painted too.
        assert_eq!(*frame.get_pixel(11, 21), BOX_COLOR);
        // The interior stays untouched.
        assert_eq!(*frame.get_pixel(30, 40), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_label_is_anchored_above_the_box() {
        let mut frame = blank_frame(100, 100);
        overlay_detections(&mut frame, &[detection(10.0, 20.0, 50.0, 60.0)]);

        let label_rows = 10..20u32;
        let painted = label_rows
            .flat_map(|y| (10..90u32).map(move |x| (x, y)))
            .filter(|&(x, y)| *frame.get_pixel(x, y) == BOX_COLOR)
            .count();
        assert!(painted > 0, "expected label pixels above the box");
    }

    #[test]
    fn test_fractional_coordinates_truncate_toward_zero() {
        let mut frame = blank_frame(100, 100);
        overlay_detections(&mut frame, &[detection(10.9, 20.7, 50.2, 60.999)]);

        assert_eq!(*frame.get_pixel(10, 20), BOX_COLOR);
        assert_eq!(*frame.get_pixel(50, 60), BOX_COLOR);
    }

    #[test]
    fn test_out_of_frame_box_does_not_panic() {
        let mut frame = blank_frame(32, 32);
        overlay_detections(
            &mut frame,
            &[
                detection(-50.0, -50.0, -10.0, -10.0),
                detection(100.0, 100.0, 200.0, 200.0),
                detection(20.0, 20.0, 60.0, 60.0),
            ],
        );
    }

    #[test]
    fn test_degenerate_box_is_skipped() {
        let mut frame = blank_frame(32, 32);
        let before = frame.clone();
        overlay_detections(&mut frame, &[detection(10.0, 10.0, 10.0, 10.0)]);
        assert_eq!(frame, before);
    }
}
