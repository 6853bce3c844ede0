//! Point and segment distance math used by hit-testing.

use kurbo::{Point, Rect, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Distance from a point to a line segment (a→b).
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to the nearest endpoint. A degenerate segment measures to `a`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg: Vec2 = b - a;
    let pv: Vec2 = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    distance(point, proj)
}

/// Minimum distance from a point to a polyline.
///
/// A single-point polyline measures to that point; an empty one is infinitely far.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => distance(point, *only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Axis-aligned rectangle spanned by two opposite corners, in any drag direction.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Whether `point` lies inside `rect`, edges included.
pub fn rect_contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Whether `point` lies strictly inside `rect`. An empty or inverted rect contains nothing.
pub fn rect_contains_strict(rect: Rect, point: Point) -> bool {
    point.x > rect.x0 && point.x < rect.x1 && point.y > rect.y0 && point.y < rect.y1
}

/// Bounding box of a point list, or `None` when it is empty.
pub fn bounds_of(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p)),
    )
}

/// Midpoint of two points.
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}
