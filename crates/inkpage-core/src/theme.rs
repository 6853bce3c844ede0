//! Light/dark theme colors that affect rendered pixels.

use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};

/// Page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Bridge from a "background is dark" flag.
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Page background fill. Eraser strokes paint with this color too.
    pub fn background(self) -> SerializableColor {
        match self {
            Theme::Light => SerializableColor::white(),
            Theme::Dark => SerializableColor::rgb(0x12, 0x12, 0x12),
        }
    }

    /// Low-contrast grid line color.
    pub fn grid(self) -> SerializableColor {
        match self {
            Theme::Light => SerializableColor::rgb(0xf0, 0xf0, 0xf0),
            Theme::Dark => SerializableColor::rgb(0x2a, 0x2a, 0x2a),
        }
    }

    /// Flip between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
