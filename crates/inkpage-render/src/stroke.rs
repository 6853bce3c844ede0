//! Rasterization of a single stroke.

use crate::renderer::{Paint, Surface};
use inkpage_core::geometry::midpoint;
use inkpage_core::{Stroke, StrokeTool, Theme};
use kurbo::{BezPath, Circle, Point, Rect, Shape};

const PATH_TOLERANCE: f64 = 0.1;

/// What a stroke rasterizes to.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeShape {
    /// A path stroked with the stroke's width.
    Outline(BezPath),
    /// A filled disc, used for single-point strokes of every tool and for
    /// shapes whose anchors coincide.
    Dot { center: Point, radius: f64 },
}

/// Build the geometry for a stroke, or `None` for an empty stroke.
pub fn stroke_shape(stroke: &Stroke) -> Option<StrokeShape> {
    let points = stroke.points();
    let (first, last) = stroke.anchors()?;
    if stroke.is_dot() {
        return Some(StrokeShape::Dot {
            center: first,
            radius: stroke.size() / 2.0,
        });
    }

    let path = match stroke.tool() {
        StrokeTool::Brush | StrokeTool::Eraser => smoothed_path(points),
        StrokeTool::Rectangle => Rect::from_points(first, last).to_path(PATH_TOLERANCE),
        StrokeTool::Circle => Circle::new(first, stroke.radius()).to_path(PATH_TOLERANCE),
        StrokeTool::Line => {
            let mut path = BezPath::new();
            path.move_to(first);
            path.line_to(last);
            path
        }
    };
    Some(StrokeShape::Outline(path))
}

/// Quadratic smoothing through a captured polyline.
///
/// Each interior point is a control point and the curve passes through the
/// midpoint to its successor. The path starts and ends on the raw endpoints.
fn smoothed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);
    for pair in rest.windows(2) {
        path.quad_to(pair[0], midpoint(pair[0], pair[1]));
    }
    if let Some(&last) = rest.last() {
        path.line_to(last);
    }
    path
}

/// Paint one stroke. Skips silently when no surface is available yet.
pub fn render_stroke<S: Surface + ?Sized>(surface: Option<&mut S>, stroke: &Stroke, theme: Theme) {
    let Some(surface) = surface else {
        log::debug!("No surface available, skipping stroke {}", stroke.id());
        return;
    };
    draw_stroke(surface, stroke, theme);
}

pub(crate) fn draw_stroke<S: Surface + ?Sized>(surface: &mut S, stroke: &Stroke, theme: Theme) {
    let Some(shape) = stroke_shape(stroke) else {
        return;
    };
    let color = stroke.paint_color(theme);
    match shape {
        StrokeShape::Outline(path) => {
            let paint = Paint::stroke(color, stroke.size())
                .rounded()
                .with_alpha(stroke.alpha());
            surface.stroke_path(&path, &paint);
        }
        StrokeShape::Dot { center, radius } => {
            let paint = Paint::fill(color).with_alpha(stroke.alpha());
            surface.fill_path(&Circle::new(center, radius).to_path(PATH_TOLERANCE), &paint);
        }
    }
}
