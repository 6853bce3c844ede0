//! InkPage Render Library
//!
//! Render target abstraction, a tiny-skia raster implementation, and the
//! stroke, page and overlay renderers built on top of it.
//! Every entry point tolerates a missing surface by skipping the draw.

pub mod export;
mod overlay;
mod page;
mod pixmap;
mod renderer;
mod stroke;

pub use export::{
    ExportBundle, ExportPage, RasterImage, SheetLayout, bundle_file_name, export_file_name,
    export_page_png, render_page_image, sanitize_title,
};
pub use overlay::{render_overlay, render_selection};
pub use page::{GRID_LINE_WIDTH, grid_path, render_page};
pub use pixmap::PixmapSurface;
pub use renderer::{LineCap, LineJoin, Paint, RenderOptions, RenderResult, RendererError, Surface};
pub use stroke::{StrokeShape, render_stroke, stroke_shape};
