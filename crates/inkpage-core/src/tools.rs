//! Tool set exposed to the interaction layer.

use crate::stroke::StrokeTool;
use serde::{Deserialize, Serialize};

/// Available tools.
///
/// `Pan` and `Select` never produce strokes; every other tool maps to a
/// [`StrokeTool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Pan,
    Select,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Line,
        ToolKind::Pan,
        ToolKind::Select,
    ];

    /// The stroke tool this tool draws with, if any.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            ToolKind::Brush => Some(StrokeTool::Brush),
            ToolKind::Eraser => Some(StrokeTool::Eraser),
            ToolKind::Rectangle => Some(StrokeTool::Rectangle),
            ToolKind::Circle => Some(StrokeTool::Circle),
            ToolKind::Line => Some(StrokeTool::Line),
            ToolKind::Pan | ToolKind::Select => None,
        }
    }

    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Pan => "Pan",
            ToolKind::Select => "Select",
        }
    }

    /// Single-key shortcut.
    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Brush => 'B',
            ToolKind::Eraser => 'E',
            ToolKind::Rectangle => 'R',
            ToolKind::Circle => 'C',
            ToolKind::Line => 'L',
            ToolKind::Pan => 'H',
            ToolKind::Select => 'V',
        }
    }

    /// Look up a tool by its shortcut key (case-insensitive).
    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }
}

impl From<StrokeTool> for ToolKind {
    fn from(tool: StrokeTool) -> Self {
        match tool {
            StrokeTool::Brush => ToolKind::Brush,
            StrokeTool::Eraser => ToolKind::Eraser,
            StrokeTool::Rectangle => ToolKind::Rectangle,
            StrokeTool::Circle => ToolKind::Circle,
            StrokeTool::Line => ToolKind::Line,
        }
    }
}
