//! Mapping of raw pointer samples to logical page coordinates.

use crate::{PAGE_HEIGHT, PAGE_WIDTH};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Where a page is currently displayed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageViewport {
    /// Top-left corner of the displayed page in client coordinates.
    pub origin: Point,
    /// Displayed page size in client units (after zoom and device scaling).
    pub displayed_size: Size,
}

impl PageViewport {
    pub fn new(origin: Point, displayed_size: Size) -> Self {
        Self {
            origin,
            displayed_size,
        }
    }

    /// Convert a client coordinate into logical page coordinates.
    ///
    /// Returns `None` while the page has no displayed area (e.g. before layout).
    pub fn to_logical(&self, client: Point) -> Option<Point> {
        let Size { width, height } = self.displayed_size;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let local: Vec2 = client - self.origin;
        Some(Point::new(
            local.x / width * PAGE_WIDTH,
            local.y / height * PAGE_HEIGHT,
        ))
    }
}

/// One pointer/touch sample handed to the drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Logical position, if the event carried a usable coordinate.
    pub position: Option<Point>,
    /// Number of active touches (1 for a mouse).
    pub touches: u32,
}

impl PointerSample {
    /// A single-pointer sample at a logical position.
    pub fn at(position: Point) -> Self {
        Self {
            position: Some(position),
            touches: 1,
        }
    }

    /// A sample from a raw client coordinate, mapped through the page viewport.
    pub fn from_client(viewport: &PageViewport, client: Point, touches: u32) -> Self {
        Self {
            position: viewport.to_logical(client),
            touches,
        }
    }

    /// Multi-touch gestures never draw.
    pub fn is_gesture(&self) -> bool {
        self.touches > 1
    }

    /// The position usable for drawing, if any.
    pub fn drawing_position(&self) -> Option<Point> {
        if self.is_gesture() {
            return None;
        }
        self.position
    }
}
