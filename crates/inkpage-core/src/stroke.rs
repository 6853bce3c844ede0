//! Stroke definitions: the atomic drawable unit of a page.

use crate::color::SerializableColor;
use crate::geometry::{bounds_of, distance};
use crate::theme::Theme;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Smallest stroke width accepted, in page units.
pub const MIN_STROKE_SIZE: f64 = 0.5;

/// The closed set of tools that produce strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeTool {
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Line,
}

impl StrokeTool {
    /// Whether the full point sequence matters (brush/eraser), as opposed to
    /// only the first and last anchors.
    pub fn is_freehand(self) -> bool {
        matches!(self, StrokeTool::Brush | StrokeTool::Eraser)
    }
}

/// Color, width and opacity applied to new strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: SerializableColor,
    /// Width in page units.
    pub size: f64,
    /// Opacity percentage, 0..=100.
    pub opacity: u8,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::rgb(0x1a, 0x1a, 0x1a),
            size: 4.0,
            opacity: 100,
        }
    }
}

/// One committed (or in-progress) drawable shape or path.
///
/// For rectangle, circle and line strokes only the first and last points are
/// meaningful; intermediate samples are ignored by rendering and hit-testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    tool: StrokeTool,
    points: Vec<Point>,
    color: SerializableColor,
    size: f64,
    opacity: u8,
}

impl Stroke {
    /// Create an empty stroke with a fresh id.
    pub fn new(tool: StrokeTool, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool,
            points: Vec::new(),
            color: style.color,
            size: style.size.max(MIN_STROKE_SIZE),
            opacity: style.opacity.min(100),
        }
    }

    /// Create a stroke from an already captured point sequence.
    pub fn from_points(tool: StrokeTool, points: Vec<Point>, style: StrokeStyle) -> Self {
        Self {
            points,
            ..Self::new(tool, style)
        }
    }

    /// Append a captured point. Only the session controller extends strokes;
    /// committed strokes are never mutated.
    pub(crate) fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn tool(&self) -> StrokeTool {
        self.tool
    }

    /// Points in capture order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The color the stroke was drawn with (ignored for erasers).
    pub fn color(&self) -> SerializableColor {
        self.color
    }

    /// Width in page units.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Opacity percentage, 0..=100.
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Opacity as an alpha factor in `0.0..=1.0`.
    pub fn alpha(&self) -> f64 {
        f64::from(self.opacity) / 100.0
    }

    /// The color that actually reaches the page. Erasers paint with the
    /// theme background instead of removing pixels.
    pub fn paint_color(&self, theme: Theme) -> SerializableColor {
        match self.tool {
            StrokeTool::Eraser => theme.background(),
            _ => self.color,
        }
    }

    /// First and last point (the same point for a single-point stroke).
    pub fn anchors(&self) -> Option<(Point, Point)> {
        Some((*self.points.first()?, *self.points.last()?))
    }

    /// Whether the stroke collapses to a single dot: one point, or a shape
    /// whose anchors coincide.
    pub fn is_dot(&self) -> bool {
        match self.anchors() {
            Some((a, b)) => self.points.len() == 1 || (!self.tool.is_freehand() && a == b),
            None => false,
        }
    }

    /// Circle radius: distance from the first to the last point.
    pub fn radius(&self) -> f64 {
        self.anchors().map(|(a, b)| distance(a, b)).unwrap_or(0.0)
    }

    /// Bounding box of the rendered geometry, including half the stroke width.
    pub fn bounds(&self) -> Rect {
        let half = self.size / 2.0;
        let geometry = match self.tool {
            StrokeTool::Brush | StrokeTool::Eraser => bounds_of(&self.points),
            StrokeTool::Rectangle | StrokeTool::Line => {
                self.anchors().map(|(a, b)| Rect::from_points(a, b))
            }
            StrokeTool::Circle => self.anchors().map(|(center, _)| {
                let r = self.radius();
                Rect::new(center.x - r, center.y - r, center.x + r, center.y + r)
            }),
        };
        geometry.map(|r| r.inflate(half, half)).unwrap_or(Rect::ZERO)
    }

    /// Rectangle around the stroke used to draw its selection outline.
    /// The padding grows with the stroke width.
    pub fn selection_outline(&self) -> Rect {
        let pad = self.size;
        self.bounds().inflate(pad, pad)
    }
}
