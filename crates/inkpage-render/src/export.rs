//! Raster snapshots and multi-page export data.

use crate::page::render_page;
use crate::pixmap::PixmapSurface;
use crate::renderer::{RenderOptions, RenderResult, RendererError, Surface};
use inkpage_core::{Document, Page, PageId};
use kurbo::{Rect, Size};

/// A4 paper size in millimetres (portrait).
pub const A4_SIZE_MM: Size = Size::new(210.0, 297.0);
/// Margin around the page image in exported documents, in millimetres.
pub const EXPORT_MARGIN_MM: f64 = 10.0;

/// Straight-alpha RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub rgba_data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RasterImage {
    /// RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba_data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        let mut png_data = Vec::new();
        let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("Failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(&self.rgba_data)
            .map_err(|e| RendererError::Encode(format!("Failed to write PNG data: {}", e)))?;
        writer
            .finish()
            .map_err(|e| RendererError::Encode(format!("Failed to finish PNG: {}", e)))?;
        Ok(png_data)
    }
}

/// Render one page onto a fresh surface and snapshot it.
pub fn render_page_image(
    page: &Page,
    options: &RenderOptions,
    scale: f64,
) -> RenderResult<RasterImage> {
    let mut surface = PixmapSurface::for_page(options, scale)?;
    render_page(Some(&mut surface), page, options);
    Ok(surface.snapshot())
}

/// Render one page and encode it as PNG.
pub fn export_page_png(page: &Page, options: &RenderOptions, scale: f64) -> RenderResult<Vec<u8>> {
    render_page_image(page, options, scale)?.to_png()
}

/// One rendered page of an export bundle.
#[derive(Debug, Clone)]
pub struct ExportPage {
    pub page_id: PageId,
    pub image: RasterImage,
    /// Footer text, e.g. "Page 2 of 5".
    pub annotation: String,
}

/// Every page of a document rendered for a multi-page container.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub title: String,
    pub pages: Vec<ExportPage>,
    /// Where the page images sit on each sheet.
    pub layout: SheetLayout,
}

impl ExportBundle {
    /// Render all pages of `document` in order.
    pub fn build(document: &Document, options: &RenderOptions, scale: f64) -> RenderResult<Self> {
        let total = document.page_count();
        let pages = document
            .pages()
            .iter()
            .enumerate()
            .map(|(i, page)| {
                Ok(ExportPage {
                    page_id: page.id(),
                    image: render_page_image(page, options, scale)?,
                    annotation: format!("Page {} of {}", i + 1, total),
                })
            })
            .collect::<RenderResult<Vec<_>>>()?;

        log::info!("Rendered {} page(s) of \"{}\" for export", total, document.title());
        Ok(Self {
            title: document.title().to_string(),
            pages,
            layout: SheetLayout::fit(options.page_size, EXPORT_MARGIN_MM),
        })
    }
}

/// Placement of a page image on an A4 sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    /// Sheet size in millimetres, rotated to landscape for wide pages.
    pub sheet: Size,
    /// Image rectangle on the sheet, centered within the margins.
    pub image: Rect,
}

impl SheetLayout {
    /// Fit a page of `page_size` onto A4 keeping its aspect ratio.
    pub fn fit(page_size: Size, margin: f64) -> Self {
        let aspect = page_size.width / page_size.height;
        let sheet = if aspect < 1.0 {
            A4_SIZE_MM
        } else {
            Size::new(A4_SIZE_MM.height, A4_SIZE_MM.width)
        };

        let available = Size::new(sheet.width - 2.0 * margin, sheet.height - 2.0 * margin);
        let image_size = if aspect > available.width / available.height {
            Size::new(available.width, available.width / aspect)
        } else {
            Size::new(available.height * aspect, available.height)
        };
        let origin = (
            (sheet.width - image_size.width) / 2.0,
            (sheet.height - image_size.height) / 2.0,
        );
        Self {
            sheet,
            image: Rect::from_origin_size(origin, image_size),
        }
    }
}

/// Title made safe for a file name: anything but ASCII letters and digits
/// becomes `_`, then lower-cased.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// File name for a single exported page, numbered from 1.
pub fn export_file_name(title: &str, page_number: usize, date: &str) -> String {
    format!("{}-page-{}-{}.png", sanitize_title(title), page_number, date)
}

/// File name for a whole-document export.
pub fn bundle_file_name(title: &str, date: &str) -> String {
    format!("{}-{}.pdf", sanitize_title(title), date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpage_core::{SerializableColor, Stroke, StrokeStyle, StrokeTool, Theme};
    use kurbo::Point;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_export_page_png() {
        let options = RenderOptions::new().with_size(Size::new(40.0, 30.0));
        let png = export_page_png(&Page::new(), &options, 1.0).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_render_page_image_is_opaque_background() {
        let options = RenderOptions::new()
            .with_theme(Theme::Dark)
            .with_size(Size::new(10.0, 10.0));
        let image = render_page_image(&Page::new(), &options, 2.0).unwrap();
        assert_eq!((image.width, image.height), (20, 20));
        assert_eq!(image.pixel(19, 19), Some([0x12, 0x12, 0x12, 255]));
        assert_eq!(image.pixel(20, 0), None);
    }

    #[test]
    fn test_bundle_annotations() {
        let mut doc = Document::new();
        doc.set_title("Sketch");
        doc.active_page_mut().commit_stroke(Stroke::from_points(
            StrokeTool::Line,
            vec![Point::new(0.0, 5.0), Point::new(20.0, 5.0)],
            StrokeStyle {
                color: SerializableColor::black(),
                size: 4.0,
                opacity: 100,
            },
        ));
        doc.add_page();
        doc.add_page();

        let options = RenderOptions::new().with_size(Size::new(20.0, 10.0));
        let bundle = ExportBundle::build(&doc, &options, 1.0).unwrap();

        assert_eq!(bundle.title, "Sketch");
        let annotations: Vec<_> = bundle.pages.iter().map(|p| p.annotation.as_str()).collect();
        assert_eq!(annotations, ["Page 1 of 3", "Page 2 of 3", "Page 3 of 3"]);
        assert_eq!(bundle.pages[0].image.pixel(10, 5), Some([0, 0, 0, 255]));
        assert_eq!(bundle.pages[1].image.pixel(10, 5), Some([255, 255, 255, 255]));
        assert_eq!(bundle.pages[2].page_id, doc.pages()[2].id());
    }

    #[test]
    fn test_portrait_page_layout() {
        let layout = SheetLayout::fit(Size::new(794.0, 1123.0), EXPORT_MARGIN_MM);
        assert_eq!(layout.sheet, A4_SIZE_MM);
        // Width-bound: 190mm wide, height follows the aspect ratio.
        assert!((layout.image.width() - 190.0).abs() < 1e-9);
        assert!((layout.image.height() - 190.0 * 1123.0 / 794.0).abs() < 1e-9);
        assert!((layout.image.center().x - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_landscape_page_layout() {
        let layout = SheetLayout::fit(Size::new(400.0, 100.0), EXPORT_MARGIN_MM);
        assert_eq!(layout.sheet, Size::new(297.0, 210.0));
        assert!((layout.image.width() - 277.0).abs() < 1e-9);
        assert!((layout.image.height() - 277.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(sanitize_title("My Drawing #1"), "my_drawing__1");
        assert_eq!(
            export_file_name("Untitled Page", 2, "2024-05-01"),
            "untitled_page-page-2-2024-05-01.png"
        );
        assert_eq!(bundle_file_name("Café", "2024-05-01"), "caf_-2024-05-01.pdf");
    }
}
