//! CPU raster surface backed by tiny-skia.

use crate::export::RasterImage;
use crate::renderer::{
    LineCap, LineJoin, Paint, RenderOptions, RenderResult, RendererError, Surface,
};
use inkpage_core::SerializableColor;
use kurbo::{BezPath, PathEl, Rect, Size};
use tiny_skia::{BlendMode, Color, FillRule, PathBuilder, Pixmap, StrokeDash, Transform};

/// An in-memory RGBA surface. Drawing happens in logical units and is scaled
/// to device pixels by `scale`.
pub struct PixmapSurface {
    pixmap: Pixmap,
    size: Size,
    scale: f64,
}

impl PixmapSurface {
    /// A surface with one device pixel per logical unit.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Self::with_scale(Size::new(width as f64, height as f64), 1.0)
    }

    /// A surface of logical `size` rasterized at `scale` device pixels per unit.
    pub fn with_scale(size: Size, scale: f64) -> RenderResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RendererError::Surface(format!("Invalid scale factor {}", scale)));
        }
        let width = (size.width * scale).round();
        let height = (size.height * scale).round();
        let max = f64::from(u32::MAX);
        if !(width >= 1.0 && height >= 1.0 && width <= max && height <= max) {
            return Err(RendererError::Surface(format!(
                "Invalid surface size {}x{}",
                width, height
            )));
        }
        let pixmap = Pixmap::new(width as u32, height as u32).ok_or_else(|| {
            RendererError::Surface(format!("Failed to allocate {}x{} pixmap", width, height))
        })?;
        log::debug!("Created {}x{} pixmap surface (scale {})", width, height, scale);
        Ok(Self { pixmap, size, scale })
    }

    /// A surface sized for a full page.
    pub fn for_page(options: &RenderOptions, scale: f64) -> RenderResult<Self> {
        Self::with_scale(options.page_size, scale)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Straight-alpha color of one device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(SerializableColor::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale as f32, self.scale as f32)
    }
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let r = rect.abs();
    tiny_skia::Rect::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32)
}

fn to_skia_paint(paint: &Paint) -> tiny_skia::Paint<'static> {
    let c = paint.color;
    let mut color = Color::from_rgba8(c.r, c.g, c.b, c.a);
    color.apply_opacity(paint.alpha as f32);

    let mut skia = tiny_skia::Paint::default();
    skia.set_color(color);
    skia.anti_alias = true;
    skia
}

fn to_skia_stroke(paint: &Paint) -> tiny_skia::Stroke {
    let dash = paint.dash.as_ref().and_then(|intervals| {
        StrokeDash::new(intervals.iter().map(|v| *v as f32).collect(), 0.0)
    });
    tiny_skia::Stroke {
        width: paint.width as f32,
        line_cap: match paint.cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: match paint.join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        },
        dash,
        ..Default::default()
    }
}

impl Surface for PixmapSurface {
    fn width(&self) -> f64 {
        self.size.width
    }

    fn height(&self) -> f64 {
        self.size.height
    }

    fn clear(&mut self, region: Option<Rect>) {
        let Some(region) = region else {
            self.pixmap.fill(Color::TRANSPARENT);
            return;
        };
        let Some(rect) = to_skia_rect(region) else {
            return;
        };
        let mut paint = tiny_skia::Paint::default();
        paint.blend_mode = BlendMode::Clear;
        let transform = self.transform();
        self.pixmap.fill_rect(rect, &paint, transform, None);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(rect) = to_skia_rect(rect) else {
            log::trace!("Skipping degenerate rectangle fill");
            return;
        };
        let transform = self.transform();
        self.pixmap.fill_rect(rect, &to_skia_paint(paint), transform, None);
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        let Some(path) = to_skia_path(path) else {
            log::trace!("Skipping degenerate path fill");
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &to_skia_paint(paint), FillRule::Winding, transform, None);
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &Paint) {
        let Some(path) = to_skia_path(path) else {
            log::trace!("Skipping degenerate path stroke");
            return;
        };
        let transform = self.transform();
        self.pixmap.stroke_path(
            &path,
            &to_skia_paint(paint),
            &to_skia_stroke(paint),
            transform,
            None,
        );
    }

    fn snapshot(&self) -> RasterImage {
        let rgba_data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RasterImage {
            rgba_data,
            width: self.pixmap.width(),
            height: self.pixmap.height(),
        }
    }
}
