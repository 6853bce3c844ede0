//! InkPage Core Library
//!
//! Platform-agnostic data model for the InkPage drawing surface: strokes,
//! pages with undo/redo history, hit-testing, selection and persistence.

pub mod color;
pub mod document;
pub mod geometry;
pub mod input;
pub mod page;
pub mod selection;
pub mod session;
pub mod storage;
pub mod stroke;
pub mod theme;
pub mod tools;

pub use color::SerializableColor;
pub use document::{Document, Preferences};
pub use hit_test::{DEFAULT_HIT_THRESHOLD, hit_test};
pub use input::{PageViewport, PointerSample};
pub use page::{Page, PageId};
pub use selection::Selection;
pub use session::{DrawingSession, Repaint};
pub use stroke::{Stroke, StrokeId, StrokeStyle, StrokeTool};
pub use theme::Theme;
pub use tools::ToolKind;

/// Logical page width in page units (A4 at 96 dpi).
pub const PAGE_WIDTH: f64 = 794.0;
/// Logical page height in page units.
pub const PAGE_HEIGHT: f64 = 1123.0;
/// Side length of one grid cell in page units.
pub const GRID_SIZE: f64 = 20.0;
