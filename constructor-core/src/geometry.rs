//! Coordinate mapping, hit-testing, and direct-manipulation math.
//!
//! All pointer input arrives in screen space; the canvas renders under a
//! `scale(zoom) translate(pan/zoom)` CSS transform, so every handler first
//! maps through [`to_canvas_space`], the exact inverse of that transform.

use serde::{Deserialize, Serialize};

use crate::{Element, ElementId, Transform};

/// Smallest width an element can be resized to.
pub const MIN_ELEMENT_WIDTH: f32 = 50.0;
/// Smallest height an element can be resized to.
pub const MIN_ELEMENT_HEIGHT: f32 = 30.0;
/// Font size floor for text elements.
pub const MIN_FONT_SIZE: f32 = 12.0;
/// Font size ceiling for text elements.
pub const MAX_FONT_SIZE: f32 = 72.0;
/// Lower canvas zoom bound.
pub const MIN_ZOOM: f32 = 1.0;
/// Upper canvas zoom bound.
pub const MAX_ZOOM: f32 = 3.0;

/// A 2D point, in whichever space the context dictates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Map a screen-space position into canvas-local coordinates.
///
/// Inverts the render transform: `(client - origin - pan) / zoom`. Must stay
/// the exact inverse of the forward transform or drags drift under zoom.
#[must_use]
pub fn to_canvas_space(client: Point, canvas_origin: Point, zoom: f32, pan: Point) -> Point {
    let zoom = zoom.max(f32::EPSILON);
    Point {
        x: (client.x - canvas_origin.x - pan.x) / zoom,
        y: (client.y - canvas_origin.y - pan.y) / zoom,
    }
}

/// Rotate `point` about `center` by `degrees`.
#[must_use]
pub fn rotate_about(point: Point, center: Point, degrees: f32) -> Point {
    let radians = degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point {
        x: center.x + dx * cos - dy * sin,
        y: center.y + dx * sin + dy * cos,
    }
}

/// Whether a canvas-space point falls inside an element's rotated bounding
/// box. The point is inverse-rotated about the element center before the
/// axis-aligned containment test.
#[must_use]
pub fn element_contains(element: &Element, point: Point) -> bool {
    let t = &element.transform;
    let (cx, cy) = t.center();
    let local = rotate_about(point, Point::new(cx, cy), -t.rotation);
    local.x >= t.x && local.x <= t.x + t.width && local.y >= t.y && local.y <= t.y + t.height
}

/// Find the topmost element containing the given canvas-space point.
/// Later elements paint on top, so the list is scanned back to front.
#[must_use]
pub fn hit_test(elements: &[Element], point: Point) -> Option<ElementId> {
    elements
        .iter()
        .rev()
        .find(|e| element_contains(e, point))
        .map(|e| e.id)
}

/// Resize a bounding box by a pointer delta, clamped to the minimum size.
#[must_use]
pub fn resize_box(start_width: f32, start_height: f32, dx: f32, dy: f32) -> (f32, f32) {
    (
        MIN_ELEMENT_WIDTH.max(start_width + dx),
        MIN_ELEMENT_HEIGHT.max(start_height + dy),
    )
}

/// Scale a font size with a resized box: the ratio is the larger of the
/// width and height scale factors, and the result is rounded then clamped
/// to [[`MIN_FONT_SIZE`], [`MAX_FONT_SIZE`]].
#[must_use]
pub fn scaled_font_size(
    start_font_size: f32,
    start_width: f32,
    start_height: f32,
    new_width: f32,
    new_height: f32,
) -> f32 {
    if start_width <= 0.0 || start_height <= 0.0 {
        return start_font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }
    let ratio = (new_width / start_width).max(new_height / start_height);
    (start_font_size * ratio)
        .round()
        .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Clamp an element position so its bounding box stays inside the canvas.
#[must_use]
pub fn clamp_position(
    x: f32,
    y: f32,
    transform: &Transform,
    canvas_width: f32,
    canvas_height: f32,
) -> Point {
    Point {
        x: x.clamp(0.0, (canvas_width - transform.width).max(0.0)),
        y: y.clamp(0.0, (canvas_height - transform.height).max(0.0)),
    }
}

/// Angle of `pointer` about `center`, in degrees within [-180, 180].
#[must_use]
pub fn pointer_angle(center: Point, pointer: Point) -> f32 {
    (pointer.y - center.y)
        .atan2(pointer.x - center.x)
        .to_degrees()
}

/// Distance between two touch points.
#[must_use]
pub fn touch_distance(a: Point, b: Point) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Midpoint of two touch points.
#[must_use]
pub fn touch_centroid(a: Point, b: Point) -> Point {
    Point {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;

    #[test]
    fn canvas_space_inverts_render_transform() {
        // zoom 2, pan (40, 20), canvas at (100, 50): a canvas point (30, 10)
        // renders at 100 + 40 + 30*2 = 200, 50 + 20 + 10*2 = 90.
        let mapped = to_canvas_space(
            Point::new(200.0, 90.0),
            Point::new(100.0, 50.0),
            2.0,
            Point::new(40.0, 20.0),
        );
        assert!((mapped.x - 30.0).abs() < 1e-4);
        assert!((mapped.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn identity_zoom_is_plain_offset() {
        let mapped = to_canvas_space(
            Point::new(150.0, 120.0),
            Point::new(100.0, 100.0),
            1.0,
            Point::default(),
        );
        assert!((mapped.x - 50.0).abs() < f32::EPSILON);
        assert!((mapped.y - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn hit_test_topmost_wins() {
        let mut bottom = Element::text();
        bottom.transform = Transform::at(0.0, 0.0, 100.0, 100.0);
        let mut top = Element::text();
        top.transform = Transform::at(50.0, 50.0, 100.0, 100.0);
        let top_id = top.id;

        let elements = vec![bottom, top];
        assert_eq!(hit_test(&elements, Point::new(75.0, 75.0)), Some(top_id));
        assert_eq!(hit_test(&elements, Point::new(200.0, 200.0)), None);
    }

    #[test]
    fn hit_test_accounts_for_rotation() {
        // A thin 100x20 bar centered at (50, 50), rotated 90 degrees: the
        // point (50, 90) is inside the rotated bar but outside the AABB.
        let mut element = Element::text();
        element.transform = Transform {
            x: 0.0,
            y: 40.0,
            width: 100.0,
            height: 20.0,
            rotation: 90.0,
            auto_size: false,
        };
        let id = element.id;
        let elements = vec![element];

        assert_eq!(hit_test(&elements, Point::new(50.0, 90.0)), Some(id));
        assert_eq!(hit_test(&elements, Point::new(5.0, 50.0)), None);
    }

    #[test]
    fn resize_clamps_to_minimums() {
        let (w, h) = resize_box(60.0, 40.0, -200.0, -200.0);
        assert!((w - MIN_ELEMENT_WIDTH).abs() < f32::EPSILON);
        assert!((h - MIN_ELEMENT_HEIGHT).abs() < f32::EPSILON);
    }

    #[test]
    fn font_scales_with_larger_ratio() {
        // Width doubles, height unchanged: ratio 2 -> 24 becomes 48.
        let size = scaled_font_size(24.0, 100.0, 100.0, 200.0, 100.0);
        assert!((size - 48.0).abs() < f32::EPSILON);
    }

    #[test]
    fn font_clamps_to_range() {
        assert!((scaled_font_size(24.0, 100.0, 100.0, 1000.0, 100.0) - MAX_FONT_SIZE).abs() < f32::EPSILON);
        assert!((scaled_font_size(24.0, 100.0, 100.0, 10.0, 10.0) - MIN_FONT_SIZE).abs() < f32::EPSILON);
    }

    #[test]
    fn oversized_element_clamps_to_origin() {
        let transform = Transform::at(0.0, 0.0, 800.0, 900.0);
        let clamped = clamp_position(50.0, 50.0, &transform, 450.0, 600.0);
        assert!((clamped.x).abs() < f32::EPSILON);
        assert!((clamped.y).abs() < f32::EPSILON);
    }

    #[test]
    fn pinch_helpers() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(30.0, 40.0);
        assert!((touch_distance(a, b) - 50.0).abs() < f32::EPSILON);
        let c = touch_centroid(a, b);
        assert!((c.x - 15.0).abs() < f32::EPSILON);
        assert!((c.y - 20.0).abs() < f32::EPSILON);
    }
}
