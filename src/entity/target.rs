use crate::engine::{Draw, Point};
use crate::geometry;
use crate::layout::{HIGHLIGHT_COLOR, OUTLINE_COLOR};

// inner highlight sits up and left of center to fake a light source
const HIGHLIGHT_SHIFT: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    slot: usize,
    center: Point,
    radius: f64,
    rest_color: String,
    hit_color: String,
    hit: bool,
}

impl Target {
    pub fn new(slot: usize, center: Point, radius: f64, rest_color: &str, hit_color: &str) -> Self {
        Target {
            slot,
            center,
            radius,
            rest_color: rest_color.to_string(),
            hit_color: hit_color.to_string(),
            hit: false,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn rest_color(&self) -> &str {
        &self.rest_color
    }

    pub fn hit_color(&self) -> &str {
        &self.hit_color
    }

    /// Displayed color always follows the hit flag
    pub fn color(&self) -> &str {
        if self.hit {
            &self.hit_color
        } else {
            &self.rest_color
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::contains(point, self.center, self.radius)
    }

    pub fn mark_hit(&mut self) {
        self.hit = true;
    }

    pub fn reset(&mut self) {
        self.hit = false;
    }

    pub fn draw(&self, renderer: &dyn Draw) {
        renderer.fill_circle(self.center, self.radius, self.color());
        renderer.stroke_circle(self.center, self.radius, OUTLINE_COLOR, 2.0);

        if !self.hit {
            let shine = Point::new(
                self.center.x - HIGHLIGHT_SHIFT,
                self.center.y - HIGHLIGHT_SHIFT,
            );
            // canvas arc rejects negative radii
            let radius = (self.radius - HIGHLIGHT_SHIFT).max(0.0);
            renderer.fill_circle(shine, radius, HIGHLIGHT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingCanvas;

    fn target() -> Target {
        Target::new(2, Point::new(80.0, 240.0), 30.0, "#ef4444", "#6b7280")
    }

    #[test]
    fn color_tracks_hit_flag() {
        let mut bubble = target();
        assert_eq!(bubble.color(), "#ef4444");
        bubble.mark_hit();
        assert!(bubble.is_hit());
        assert_eq!(bubble.color(), "#6b7280");
        bubble.reset();
        assert!(!bubble.is_hit());
        assert_eq!(bubble.color(), bubble.rest_color());
    }

    #[test]
    fn contains_uses_center_and_radius() {
        let bubble = target();
        assert!(bubble.contains(Point::new(80.0, 240.0)));
        assert!(bubble.contains(Point::new(50.0, 240.0)));
        assert!(!bubble.contains(Point::new(80.0, 160.0)));
    }

    #[test]
    fn highlight_only_while_unhit() {
        let canvas = RecordingCanvas::default();
        let mut bubble = target();
        bubble.draw(&canvas);
        assert_eq!(
            canvas.fill_colors(),
            vec!["#ef4444".to_string(), HIGHLIGHT_COLOR.to_string()]
        );

        let canvas = RecordingCanvas::default();
        bubble.mark_hit();
        bubble.draw(&canvas);
        assert_eq!(canvas.fill_colors(), vec!["#6b7280".to_string()]);
        assert_eq!(canvas.strokes(), 1);
    }
}
