use crate::engine::Point;

/// Hit-test against a disc, boundary inclusive
pub fn contains(point: Point, center: Point, radius: f64) -> bool {
    point.distance_to(center) <= radius
}

/// Point on a circle's edge facing `from`, pushed `clearance` further out.
/// Falls back to the right-hand edge when `from` sits on the center.
pub fn approach_point(center: Point, radius: f64, from: Point, clearance: f64) -> Point {
    let direction = center
        .direction_to(from)
        .unwrap_or(Point { x: 1.0, y: 0.0 });
    center.advance(direction, radius + clearance)
}
