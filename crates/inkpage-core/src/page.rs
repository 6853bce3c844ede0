//! A page: ordered committed strokes plus a linear undo/redo log.

use crate::stroke::{Stroke, StrokeId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for pages.
pub type PageId = Uuid;

/// One canvas surface holding an ordered stroke list and its own history.
///
/// History is a list of full stroke-list snapshots. The visible strokes are
/// always the snapshot at `history_index`, so the two can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "PageRecord", into = "PageRecord")]
pub struct Page {
    id: PageId,
    history: Vec<Vec<Stroke>>,
    history_index: usize,
}

/// On-disk form of a page: the history log is not persisted.
#[derive(Serialize, Deserialize)]
struct PageRecord {
    id: PageId,
    strokes: Vec<Stroke>,
}

impl From<PageRecord> for Page {
    fn from(record: PageRecord) -> Self {
        Page::with_strokes(record.id, record.strokes)
    }
}

impl From<Page> for PageRecord {
    fn from(mut page: Page) -> Self {
        let strokes = page.history.swap_remove(page.history_index);
        PageRecord { id: page.id, strokes }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Create an empty page with a single empty snapshot.
    pub fn new() -> Self {
        Self::with_strokes(Uuid::new_v4(), Vec::new())
    }

    /// Restore a page whose history starts at the given strokes.
    pub fn with_strokes(id: PageId, strokes: Vec<Stroke>) -> Self {
        Self {
            id,
            history: vec![strokes],
            history_index: 0,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    /// Committed strokes in paint order (back to front).
    pub fn strokes(&self) -> &[Stroke] {
        &self.history[self.history_index]
    }

    /// Get a stroke by ID.
    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes().iter().find(|s| s.id() == id)
    }

    /// Check if the page has no visible strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes().is_empty()
    }

    /// Index of the active snapshot.
    pub fn history_index(&self) -> usize {
        self.history_index
    }

    /// Number of snapshots in the log.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// All snapshots, oldest first.
    pub fn history(&self) -> &[Vec<Stroke>] {
        &self.history
    }

    /// Drop any redo branch, append a snapshot and make it active.
    fn push_snapshot(&mut self, strokes: Vec<Stroke>) {
        self.history.truncate(self.history_index + 1);
        self.history.push(strokes);
        self.history_index = self.history.len() - 1;
    }

    /// Append a finished stroke as a new history entry.
    /// Returns false (and changes nothing) for a stroke without points.
    pub fn commit_stroke(&mut self, stroke: Stroke) -> bool {
        if stroke.is_empty() {
            log::debug!("Ignoring commit of empty stroke {}", stroke.id());
            return false;
        }
        let mut strokes = self.strokes().to_vec();
        strokes.push(stroke);
        self.push_snapshot(strokes);
        true
    }

    /// Remove the given strokes as one new history entry.
    ///
    /// Any non-empty id set records a snapshot and drops the redo branch, even
    /// when none of the ids is visible. An empty set changes nothing.
    pub fn delete_strokes(&mut self, ids: &[StrokeId]) -> bool {
        if ids.is_empty() {
            return false;
        }
        let remaining: Vec<Stroke> = self
            .strokes()
            .iter()
            .filter(|s| !ids.contains(&s.id()))
            .cloned()
            .collect();
        self.push_snapshot(remaining);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Step back one snapshot.
    /// Returns true if undo was performed, false if already at the oldest state.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.history_index -= 1;
        true
    }

    /// Step forward one snapshot.
    /// Returns true if redo was performed, false if already at the newest state.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.history_index += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{StrokeStyle, StrokeTool};
    use kurbo::Point;

    fn line(x: f64) -> Stroke {
        Stroke::from_points(
            StrokeTool::Line,
            vec![Point::new(x, 0.0), Point::new(x, 100.0)],
            StrokeStyle::default(),
        )
    }

    fn assert_invariants(page: &Page) {
        assert!(page.history_index() < page.history_len());
        assert_eq!(page.strokes(), page.history()[page.history_index()].as_slice());
    }

    fn ids(page: &Page) -> Vec<StrokeId> {
        page.strokes().iter().map(Stroke::id).collect()
    }

    #[test]
    fn test_page_creation() {
        let page = Page::new();
        assert!(page.is_empty());
        assert_eq!(page.history_len(), 1);
        assert_eq!(page.history_index(), 0);
        assert!(!page.can_undo());
        assert!(!page.can_redo());
    }

    #[test]
    fn test_commit_appends_snapshot() {
        let mut page = Page::new();
        let a = line(10.0);
        let b = line(20.0);
        assert!(page.commit_stroke(a.clone()));
        assert!(page.commit_stroke(b.clone()));

        assert_eq!(ids(&page), vec![a.id(), b.id()]);
        assert_eq!(page.history_len(), 3);
        assert_eq!(page.history_index(), 2);
        assert_invariants(&page);
    }

    #[test]
    fn test_commit_empty_stroke_is_noop() {
        let mut page = Page::new();
        assert!(!page.commit_stroke(Stroke::new(StrokeTool::Brush, StrokeStyle::default())));
        assert_eq!(page.history_len(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut page = Page::new();
        page.commit_stroke(line(10.0));
        let after_commit = page.strokes().to_vec();

        assert!(page.undo());
        assert!(page.is_empty());
        assert!(page.redo());
        assert_eq!(page.strokes(), after_commit.as_slice());
        assert_invariants(&page);
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut page = Page::new();
        assert!(!page.undo());
        assert!(!page.redo());

        page.commit_stroke(line(10.0));
        assert!(!page.redo());
        assert!(page.undo());
        assert!(!page.undo());
        assert_eq!(page.history_index(), 0);
    }

    #[test]
    fn test_new_commit_discards_redo_branch() {
        let mut page = Page::new();
        let a = line(10.0);
        let b = line(20.0);
        page.commit_stroke(a.clone());
        page.undo();
        page.commit_stroke(b.clone());

        assert!(!page.can_redo());
        assert!(!page.redo());
        assert_eq!(ids(&page), vec![b.id()]);
        assert!(page.history().iter().all(|snap| snap.iter().all(|s| s.id() != a.id())));
        assert_invariants(&page);
    }

    #[test]
    fn test_delete_strokes() {
        let mut page = Page::new();
        let a = line(10.0);
        let b = line(20.0);
        let c = line(30.0);
        for s in [&a, &b, &c] {
            page.commit_stroke(s.clone());
        }

        assert!(page.delete_strokes(&[a.id(), c.id()]));
        assert_eq!(ids(&page), vec![b.id()]);
        assert_eq!(page.history_len(), 5);

        assert!(page.undo());
        assert_eq!(ids(&page), vec![a.id(), b.id(), c.id()]);
        assert_invariants(&page);
    }

    #[test]
    fn test_delete_with_empty_selection_is_noop() {
        let mut page = Page::new();
        page.commit_stroke(line(10.0));
        let strokes = page.strokes().to_vec();
        let history = page.history().to_vec();

        assert!(!page.delete_strokes(&[]));
        assert_eq!(page.strokes(), strokes.as_slice());
        assert_eq!(page.history(), history.as_slice());
    }

    #[test]
    fn test_delete_of_unknown_id_still_records_history() {
        let mut page = Page::new();
        page.commit_stroke(line(10.0));
        let strokes = page.strokes().to_vec();

        assert!(page.delete_strokes(&[Uuid::new_v4()]));
        assert_eq!(page.strokes(), strokes.as_slice());
        assert_eq!(page.history_len(), 3);
        assert_eq!(page.history_index(), 2);
        assert_invariants(&page);
    }

    #[test]
    fn test_delete_after_undo_discards_redo_branch() {
        let mut page = Page::new();
        let a = line(10.0);
        page.commit_stroke(a.clone());
        assert!(page.undo());

        // `a` is no longer visible, so its id matches nothing.
        assert!(page.delete_strokes(&[a.id()]));
        assert_eq!(page.history_len(), 2);
        assert_eq!(page.history_index(), 1);
        assert!(!page.can_redo());
        assert!(page.is_empty());
        assert!(page.history().iter().all(|snap| snap.iter().all(|s| s.id() != a.id())));
        assert_invariants(&page);
    }

    #[test]
    fn test_invariants_hold_over_mixed_sequence() {
        let mut page = Page::new();
        let mut committed = Vec::new();
        for step in 0..60u32 {
            match step % 7 {
                0 | 1 | 4 => {
                    let s = line(f64::from(step));
                    committed.push(s.id());
                    page.commit_stroke(s);
                }
                2 | 5 => {
                    page.undo();
                }
                3 => {
                    page.redo();
                }
                _ => {
                    let first = committed.first().copied();
                    page.delete_strokes(&first.into_iter().collect::<Vec<_>>());
                }
            }
            assert_invariants(&page);
        }
    }

    #[test]
    fn test_serialization_drops_history() {
        let mut page = Page::new();
        page.commit_stroke(line(10.0));
        page.commit_stroke(line(20.0));
        page.undo();

        let json = serde_json::to_string(&page).unwrap();
        let loaded: Page = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.id(), page.id());
        assert_eq!(loaded.strokes(), page.strokes());
        assert_eq!(loaded.history_len(), 1);
        assert!(!loaded.can_undo());
        assert!(!loaded.can_redo());
    }
}
