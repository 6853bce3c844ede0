//! Drawing session: pointer sequencing, the in-progress stroke and selection.
//!
//! The session is the only owner of an uncommitted stroke. Pages never see a
//! stroke until [`DrawingSession::finish`] commits it.

use crate::document::{Document, Preferences};
use crate::hit_test::{DEFAULT_HIT_THRESHOLD, hit_test};
use crate::input::PointerSample;
use crate::page::{Page, PageId};
use crate::selection::Selection;
use crate::stroke::{Stroke, StrokeStyle};
use crate::tools::ToolKind;
use kurbo::Point;

/// Which surface the caller must repaint after a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repaint {
    /// Nothing visible changed.
    #[default]
    None,
    /// Only the transient overlay (preview stroke, selection outline).
    Overlay,
    /// The committed page content changed; repaint the page and clear the overlay.
    Page,
}

/// A stroke being captured for a specific page.
#[derive(Debug, Clone)]
struct ActiveStroke {
    page: PageId,
    stroke: Stroke,
}

/// Per-user interaction state around a document.
#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    tool: ToolKind,
    style: StrokeStyle,
    active: Option<ActiveStroke>,
    selection: Selection,
}

impl DrawingSession {
    /// Create a session starting from saved tool defaults.
    pub fn new(preferences: &Preferences) -> Self {
        Self {
            tool: preferences.tool,
            style: preferences.style,
            active: None,
            selection: Selection::new(),
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. The selection is dropped, as it only makes sense for `Select`.
    pub fn set_tool(&mut self, tool: ToolKind) -> Repaint {
        self.tool = tool;
        if self.selection.is_empty() {
            return Repaint::None;
        }
        self.selection.clear();
        Repaint::Overlay
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Style applied to strokes started after this call.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Check if a stroke is being captured.
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// The in-progress stroke, for overlay preview.
    pub fn preview(&self) -> Option<&Stroke> {
        self.active.as_ref().map(|a| &a.stroke)
    }

    /// The page the in-progress stroke belongs to.
    pub fn preview_page(&self) -> Option<PageId> {
        self.active.as_ref().map(|a| a.page)
    }

    /// Start a stroke on `page` at the sample position.
    ///
    /// Ignored while another stroke is in progress, for tools that do not
    /// draw, for multi-touch gestures and for samples without a position.
    pub fn begin(&mut self, doc: &mut Document, page: PageId, sample: PointerSample) -> Repaint {
        if self.active.is_some() {
            return Repaint::None;
        }
        let Some(tool) = self.tool.stroke_tool() else {
            return Repaint::None;
        };
        let Some(point) = sample.drawing_position() else {
            return Repaint::None;
        };
        if !doc.set_active_page(page) {
            log::warn!("Pointer down on unknown page {}", page);
            return Repaint::None;
        }

        let mut stroke = Stroke::new(tool, self.style);
        stroke.push_point(point);
        self.active = Some(ActiveStroke { page, stroke });
        Repaint::Overlay
    }

    /// Append a sample to the in-progress stroke.
    pub fn extend(&mut self, sample: PointerSample) -> Repaint {
        let Some(active) = self.active.as_mut() else {
            return Repaint::None;
        };
        let Some(point) = sample.drawing_position() else {
            return Repaint::None;
        };
        active.stroke.push_point(point);
        Repaint::Overlay
    }

    /// Commit the in-progress stroke to its page.
    ///
    /// A release with nothing in progress is a no-op; a stroke whose page has
    /// disappeared is discarded without touching any page.
    pub fn finish(&mut self, doc: &mut Document) -> Repaint {
        let Some(ActiveStroke { page, stroke }) = self.active.take() else {
            return Repaint::None;
        };
        let Some(target) = doc.page_mut(page) else {
            log::warn!("Discarding stroke for deleted page {}", page);
            return Repaint::Overlay;
        };
        if target.commit_stroke(stroke) {
            Repaint::Page
        } else {
            Repaint::Overlay
        }
    }

    /// Drop the in-progress stroke without committing it.
    pub fn cancel(&mut self) -> Repaint {
        match self.active.take() {
            Some(_) => Repaint::Overlay,
            None => Repaint::None,
        }
    }

    /// Select the top-most stroke under `point`.
    ///
    /// With `additive` the hit stroke is toggled and misses keep the selection;
    /// otherwise the hit stroke replaces the selection and a miss clears it.
    pub fn select_at(&mut self, page: &Page, point: Point, additive: bool) -> Repaint {
        let before = self.selection.clone();
        match hit_test(point, page.strokes(), DEFAULT_HIT_THRESHOLD) {
            Some(stroke) if additive => self.selection.toggle(stroke.id()),
            Some(stroke) => self.selection.select_only(stroke.id()),
            None if additive => {}
            None => self.selection.clear(),
        }
        if self.selection == before {
            Repaint::None
        } else {
            Repaint::Overlay
        }
    }

    /// Delete the selected strokes from `page` as one undoable step.
    pub fn delete_selected(&mut self, page: &mut Page) -> Repaint {
        if !page.delete_strokes(self.selection.ids()) {
            return Repaint::None;
        }
        self.selection.clear();
        Repaint::Page
    }

    /// Undo on `page`, dropping selected ids that are no longer visible.
    pub fn undo(&mut self, page: &mut Page) -> Repaint {
        if !page.undo() {
            return Repaint::None;
        }
        self.selection.retain_existing(page.strokes());
        Repaint::Page
    }

    /// Redo on `page`, dropping selected ids that are no longer visible.
    pub fn redo(&mut self, page: &mut Page) -> Repaint {
        if !page.redo() {
            return Repaint::None;
        }
        self.selection.retain_existing(page.strokes());
        Repaint::Page
    }
}
