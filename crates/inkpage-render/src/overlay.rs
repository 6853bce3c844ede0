//! Transient overlay: in-progress stroke preview and selection outlines.

use crate::renderer::{Paint, RenderOptions, Surface};
use crate::stroke::draw_stroke;
use inkpage_core::Stroke;
use kurbo::Shape;

/// Dash pattern for selection outlines, in page units.
const SELECTION_DASH: [f64; 2] = [6.0, 4.0];
const SELECTION_LINE_WIDTH: f64 = 1.0;

/// Repaint the overlay surface with the stroke being drawn, if any.
pub fn render_overlay<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    preview: Option<&Stroke>,
    options: &RenderOptions,
) {
    let Some(surface) = surface else {
        log::debug!("No overlay surface available, skipping preview");
        return;
    };
    surface.clear(None);
    if let Some(stroke) = preview {
        draw_stroke(surface, stroke, options.theme);
    }
}

/// Repaint the overlay surface with a dashed outline around each selected stroke.
pub fn render_selection<'a, S, I>(surface: Option<&mut S>, selected: I, options: &RenderOptions)
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = &'a Stroke>,
{
    let Some(surface) = surface else {
        log::debug!("No overlay surface available, skipping selection");
        return;
    };
    surface.clear(None);

    let paint = Paint::stroke(options.selection_color, SELECTION_LINE_WIDTH)
        .with_dash(SELECTION_DASH.to_vec());
    for stroke in selected {
        let outline = stroke.selection_outline();
        if outline.area() <= 0.0 {
            continue;
        }
        surface.stroke_path(&outline.to_path(0.1), &paint);
    }
}
