//! Multi-page drawing document and persisted preferences.

use crate::page::{Page, PageId};
use crate::stroke::StrokeStyle;
use crate::theme::Theme;
use crate::tools::ToolKind;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Title given to new documents.
pub const DEFAULT_TITLE: &str = "Untitled Page";
/// Title used when a blank title is saved.
pub const FALLBACK_TITLE: &str = "Untitled Artwork";

/// Tool defaults and display toggles restored with a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub tool: ToolKind,
    #[serde(default)]
    pub style: StrokeStyle,
    #[serde(default)]
    pub show_grid: bool,
    #[serde(default)]
    pub theme: Theme,
}

/// A drawing: an ordered list of pages addressed by stable ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: String,
    /// Document title.
    title: String,
    /// Pages in display order. Never empty.
    #[serde(deserialize_with = "deserialize_pages")]
    pages: Vec<Page>,
    /// Index of the page receiving input. Reset to the first page on load.
    #[serde(skip)]
    active_page: usize,
    #[serde(default)]
    pub preferences: Preferences,
}

/// A file without pages gets one empty page so the document is always drawable.
fn deserialize_pages<'de, D>(deserializer: D) -> Result<Vec<Page>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut pages = Vec::<Page>::deserialize(deserializer)?;
    if pages.is_empty() {
        pages.push(Page::new());
    }
    Ok(pages)
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new document with one empty page.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_TITLE.to_string(),
            pages: vec![Page::new()],
            active_page: 0,
            preferences: Preferences::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the title; blank titles fall back to a placeholder.
    pub fn set_title(&mut self, title: &str) {
        let trimmed = title.trim();
        self.title = if trimmed.is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            trimmed.to_string()
        };
    }

    /// Pages in display order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Position of a page in display order.
    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    /// Get a page by ID.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    /// Get a mutable reference to a page by ID.
    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id() == id)
    }

    /// The page currently receiving input.
    pub fn active_page(&self) -> &Page {
        &self.pages[self.active_page]
    }

    /// Mutable access to the active page.
    pub fn active_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.active_page]
    }

    pub fn active_page_index(&self) -> usize {
        self.active_page
    }

    /// Make a page active. Returns false for an unknown id.
    pub fn set_active_page(&mut self, id: PageId) -> bool {
        match self.page_index(id) {
            Some(index) => {
                self.active_page = index;
                true
            }
            None => false,
        }
    }

    /// Append an empty page and make it active.
    pub fn add_page(&mut self) -> PageId {
        let page = Page::new();
        let id = page.id();
        self.pages.push(page);
        self.active_page = self.pages.len() - 1;
        log::info!("Added page {} ({} total)", id, self.pages.len());
        id
    }

    /// Remove a page. The last remaining page cannot be deleted.
    /// Returns true if the page was removed.
    pub fn delete_page(&mut self, id: PageId) -> bool {
        if self.pages.len() <= 1 {
            return false;
        }
        let Some(index) = self.page_index(id) else {
            return false;
        };
        self.pages.remove(index);
        self.active_page = self.active_page.min(self.pages.len() - 1);
        log::info!("Deleted page {} ({} left)", id, self.pages.len());
        true
    }

    /// Check if no page has any strokes.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
