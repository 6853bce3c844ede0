//! Stroke selection membership.

use crate::stroke::{Stroke, StrokeId};
use kurbo::Rect;

/// Ordered, duplicate-free set of selected stroke ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<StrokeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[StrokeId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.ids.contains(&id)
    }

    /// Add a stroke to the selection.
    pub fn select(&mut self, id: StrokeId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Replace the selection with a single stroke.
    pub fn select_only(&mut self, id: StrokeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add the stroke if absent, remove it if present.
    pub fn toggle(&mut self, id: StrokeId) {
        if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Forget ids that no longer name a visible stroke (after undo/redo/delete).
    pub fn retain_existing(&mut self, strokes: &[Stroke]) {
        self.ids.retain(|id| strokes.iter().any(|s| s.id() == *id));
    }

    /// Replace the selection with every stroke whose bounds intersect `rect`.
    pub fn select_in_rect(&mut self, rect: Rect, strokes: &[Stroke]) {
        self.ids = strokes
            .iter()
            .filter(|s| !s.is_empty() && rect.intersect(s.bounds()).area() > 0.0)
            .map(Stroke::id)
            .collect();
    }

    /// The selected strokes, in paint order.
    pub fn strokes<'a>(&'a self, strokes: &'a [Stroke]) -> impl Iterator<Item = &'a Stroke> + 'a {
        strokes.iter().filter(move |s| self.contains(s.id()))
    }
}
