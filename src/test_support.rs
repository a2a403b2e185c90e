use std::cell::RefCell;

use crate::engine::{Draw, Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Clear,
    FillCircle { color: String },
    StrokeCircle,
    FillPolygon { points: Vec<Point> },
    StrokePolygon,
}

// Stands in for the canvas; remembers every call in order.
#[derive(Default)]
pub(crate) struct RecordingCanvas {
    calls: RefCell<Vec<DrawCall>>,
}

impl RecordingCanvas {
    pub(crate) fn frames(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == DrawCall::Clear)
            .count()
    }

    pub(crate) fn fill_colors(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillCircle { color, .. } => Some(color.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn polygons(&self) -> Vec<Vec<Point>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillPolygon { points } => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn strokes(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, DrawCall::StrokeCircle | DrawCall::StrokePolygon))
            .count()
    }

    pub(crate) fn forget(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Draw for RecordingCanvas {
    fn clear(&self, _rect: &Rect) {
        self.calls.borrow_mut().push(DrawCall::Clear);
    }

    fn fill_circle(&self, _center: Point, _radius: f64, color: &str) {
        self.calls.borrow_mut().push(DrawCall::FillCircle {
            color: color.to_string(),
        });
    }

    fn stroke_circle(&self, _center: Point, _radius: f64, _color: &str, _line_width: f64) {
        self.calls.borrow_mut().push(DrawCall::StrokeCircle);
    }

    fn fill_polygon(&self, points: &[Point], _color: &str) {
        self.calls.borrow_mut().push(DrawCall::FillPolygon {
            points: points.to_vec(),
        });
    }

    fn stroke_polygon(&self, _points: &[Point], _color: &str, _line_width: f64) {
        self.calls.borrow_mut().push(DrawCall::StrokePolygon);
    }
}
