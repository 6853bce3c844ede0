//! Full page composition: background, committed strokes, grid.

use crate::renderer::{Paint, RenderOptions, Surface};
use crate::stroke::draw_stroke;
use inkpage_core::{GRID_SIZE, Page};
use kurbo::{BezPath, Point};

/// Width of grid lines in page units.
pub const GRID_LINE_WIDTH: f64 = 0.5;

/// Repaint the persistent page surface from the committed stroke list.
///
/// The output depends only on the page's strokes and `options`, so repeated
/// calls produce identical pixels. Skips silently when no surface is available.
pub fn render_page<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    page: &Page,
    options: &RenderOptions,
) {
    let Some(surface) = surface else {
        log::debug!("No surface available, skipping page {}", page.id());
        return;
    };

    surface.clear(None);
    surface.fill_rect(options.page_rect(), &Paint::fill(options.theme.background()));

    for stroke in page.strokes() {
        draw_stroke(surface, stroke, options.theme);
    }

    // Drawn last, so the grid sits above strokes.
    if options.show_grid {
        surface.stroke_path(
            &grid_path(options),
            &Paint::stroke(options.theme.grid(), GRID_LINE_WIDTH),
        );
    }
}

/// Vertical then horizontal grid lines spanning the page.
pub fn grid_path(options: &RenderOptions) -> BezPath {
    let width = options.page_size.width;
    let height = options.page_size.height;
    let mut path = BezPath::new();

    let mut x = 0.0;
    while x <= width {
        path.move_to(Point::new(x, 0.0));
        path.line_to(Point::new(x, height));
        x += GRID_SIZE;
    }

    let mut y = 0.0;
    while y <= height {
        path.move_to(Point::new(0.0, y));
        path.line_to(Point::new(width, y));
        y += GRID_SIZE;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixmap::PixmapSurface;
    use inkpage_core::{SerializableColor, Stroke, StrokeStyle, StrokeTool, Theme};
    use kurbo::Size;

    fn line_page() -> Page {
        let mut page = Page::new();
        page.commit_stroke(Stroke::from_points(
            StrokeTool::Line,
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            StrokeStyle {
                color: SerializableColor::black(),
                size: 2.0,
                opacity: 100,
            },
        ));
        page
    }

    #[test]
    fn test_line_scenario() {
        let options = RenderOptions::new();
        let mut surface = PixmapSurface::for_page(&options, 1.0).unwrap();
        render_page(Some(&mut surface), &line_page(), &options);

        assert_eq!(surface.pixel(50, 0), Some(SerializableColor::black()));
        assert_eq!(surface.pixel(50, 50), Some(Theme::Light.background()));
    }

    #[test]
    fn test_render_is_idempotent() {
        let options = RenderOptions::new().with_theme(Theme::Dark).with_grid(true);
        let page = line_page();
        let mut surface = PixmapSurface::for_page(&options, 1.0).unwrap();

        render_page(Some(&mut surface), &page, &options);
        let first = surface.snapshot();
        render_page(Some(&mut surface), &page, &options);
        assert_eq!(first, surface.snapshot());
    }

    #[test]
    fn test_repaint_drops_undone_strokes() {
        let options = RenderOptions::new();
        let mut page = line_page();
        let mut surface = PixmapSurface::for_page(&options, 1.0).unwrap();
        render_page(Some(&mut surface), &page, &options);

        page.undo();
        render_page(Some(&mut surface), &page, &options);
        assert_eq!(surface.pixel(50, 0), Some(Theme::Light.background()));
    }

    #[test]
    fn test_later_strokes_draw_over_earlier() {
        let options = RenderOptions::new().with_size(Size::new(40.0, 40.0));
        let mut page = Page::new();
        for color in [SerializableColor::rgb(255, 0, 0), SerializableColor::rgb(0, 0, 255)] {
            page.commit_stroke(Stroke::from_points(
                StrokeTool::Line,
                vec![Point::new(0.0, 20.0), Point::new(40.0, 20.0)],
                StrokeStyle {
                    color,
                    size: 6.0,
                    opacity: 100,
                },
            ));
        }
        let mut surface = PixmapSurface::for_page(&options, 1.0).unwrap();
        render_page(Some(&mut surface), &page, &options);
        assert_eq!(surface.pixel(20, 20), Some(SerializableColor::rgb(0, 0, 255)));
    }

    #[test]
    fn test_grid_overlay() {
        let options = RenderOptions::new()
            .with_size(Size::new(100.0, 100.0))
            .with_grid(true);
        let mut surface = PixmapSurface::for_page(&options, 2.0).unwrap();
        render_page(Some(&mut surface), &Page::new(), &options);

        // At scale 2 the line at x=20 straddles device columns 39 and 40.
        let on_line = surface.pixel(40, 15).unwrap();
        let off_line = surface.pixel(50, 15).unwrap();
        assert_ne!(on_line, Theme::Light.background());
        assert_eq!(off_line, Theme::Light.background());
    }

    #[test]
    fn test_grid_path_covers_both_edges() {
        let options = RenderOptions::new().with_size(Size::new(40.0, 20.0));
        let path = grid_path(&options);
        // x = 0, 20, 40 and y = 0, 20, two elements each.
        assert_eq!(path.elements().len(), 10);
    }

    #[test]
    fn test_missing_surface_is_skipped() {
        render_page::<PixmapSurface>(None, &line_page(), &RenderOptions::new());
    }
}
