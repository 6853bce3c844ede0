//! Render target abstraction and per-frame options.

use crate::export::RasterImage;
use inkpage_core::{PAGE_HEIGHT, PAGE_WIDTH, Preferences, SerializableColor, Theme};
use kurbo::{BezPath, Rect, Size};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// End cap for stroked paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Corner join for stroked paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Complete drawing style for a single surface call.
///
/// Every call carries its own paint, so no alpha or color state survives
/// from one draw to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: SerializableColor,
    /// Global alpha multiplied into `color`, 0.0..=1.0.
    pub alpha: f64,
    /// Line width for stroked paths.
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    /// Alternating on/off lengths.
    pub dash: Option<Vec<f64>>,
}

impl Paint {
    /// Opaque fill paint.
    pub fn fill(color: SerializableColor) -> Self {
        Self {
            color,
            alpha: 1.0,
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            dash: None,
        }
    }

    /// Opaque stroke paint with butt caps and miter joins.
    pub fn stroke(color: SerializableColor, width: f64) -> Self {
        Self {
            width,
            ..Self::fill(color)
        }
    }

    /// Use round caps and joins.
    pub fn rounded(mut self) -> Self {
        self.cap = LineCap::Round;
        self.join = LineJoin::Round;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// An addressable raster surface in logical page coordinates.
pub trait Surface {
    /// Logical width.
    fn width(&self) -> f64;

    /// Logical height.
    fn height(&self) -> f64;

    /// Reset a region (or the whole surface) to transparent.
    fn clear(&mut self, region: Option<Rect>);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fill a closed path using the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, paint: &Paint);

    /// Stroke a path.
    fn stroke_path(&mut self, path: &BezPath, paint: &Paint);

    /// Copy out the current pixel contents.
    fn snapshot(&self) -> RasterImage;
}

/// Presentation inputs for page and overlay rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub theme: Theme,
    pub show_grid: bool,
    /// Logical page size.
    pub page_size: Size,
    /// Selection outline color.
    pub selection_color: SerializableColor,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self {
            theme: Theme::Light,
            show_grid: false,
            page_size: Size::new(PAGE_WIDTH, PAGE_HEIGHT),
            selection_color: SerializableColor::rgb(59, 130, 246),
        }
    }

    /// Options matching a document's saved preferences.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self::new()
            .with_theme(preferences.theme)
            .with_grid(preferences.show_grid)
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_size(mut self, page_size: Size) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_selection_color(mut self, color: SerializableColor) -> Self {
        self.selection_color = color;
        self
    }

    /// The logical page rectangle.
    pub fn page_rect(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.page_size)
    }
}
