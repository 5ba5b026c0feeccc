//! Drag Geometry
//!
//! Pointer offset capture and viewport clamping for the draggable widget.

use serde::{Deserialize, Serialize};

/// A point in client (viewport) pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Keep a widget of `widget` size fully inside `viewport`.
///
/// `0 <= x <= viewport.width - widget.width`, same for y. When the widget is
/// larger than the viewport the lower bound wins.
pub fn clamp_to_viewport(origin: Point, viewport: Size, widget: Size) -> Point {
    let max_x = viewport.width - widget.width;
    let max_y = viewport.height - widget.height;
    Point {
        x: origin.x.min(max_x).max(0.0),
        y: origin.y.min(max_y).max(0.0),
    }
}

/// An in-progress drag: where inside the widget the pointer grabbed it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    offset: Point,
}

impl DragSession {
    /// Start dragging; `widget_origin` is the widget's top-left corner
    pub fn begin(pointer: Point, widget_origin: Point) -> Self {
        Self {
            offset: Point::new(pointer.x - widget_origin.x, pointer.y - widget_origin.y),
        }
    }

    /// Clamped top-left corner for the current pointer position
    pub fn origin_for(&self, pointer: Point, viewport: Size, widget: Size) -> Point {
        let raw = Point::new(pointer.x - self.offset.x, pointer.y - self.offset.y);
        clamp_to_viewport(raw, viewport, widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size { width: 1000.0, height: 800.0 };
    const WIDGET: Size = Size { width: 300.0, height: 400.0 };

    #[test]
    fn test_offset_is_preserved() {
        let session = DragSession::begin(Point::new(110.0, 25.0), Point::new(100.0, 20.0));
        let origin = session.origin_for(Point::new(510.0, 205.0), VIEWPORT, WIDGET);
        assert_eq!(origin, Point::new(500.0, 200.0));
    }

    #[test]
    fn test_clamped_past_right_and_bottom() {
        let session = DragSession::begin(Point::new(10.0, 10.0), Point::new(0.0, 0.0));
        let origin = session.origin_for(Point::new(5000.0, 5000.0), VIEWPORT, WIDGET);
        assert_eq!(origin, Point::new(700.0, 400.0));
    }

    #[test]
    fn test_clamped_above_and_left() {
        let session = DragSession::begin(Point::new(50.0, 50.0), Point::new(0.0, 0.0));
        let origin = session.origin_for(Point::new(-300.0, 20.0), VIEWPORT, WIDGET);
        assert_eq!(origin, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_oversized_widget_pins_to_origin() {
        let tiny = Size::new(200.0, 100.0);
        let origin = clamp_to_viewport(Point::new(50.0, 50.0), tiny, WIDGET);
        assert_eq!(origin, Point::new(0.0, 0.0));
    }
}
