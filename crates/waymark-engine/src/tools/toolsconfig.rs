// Imports
use crate::items::MarkerKind;
use waymark_compose::Color;
use waymark_compose::color;

/// The configuration of all tools.
#[derive(Debug, Clone, Default)]
pub struct ToolsConfig {
    pub marker_tool: MarkerToolConfig,
    pub label_tool: LabelToolConfig,
}

#[derive(Debug, Clone)]
pub struct MarkerToolConfig {
    /// The marker kind the next click places. Set when the marker tool is picked in the toolbar.
    pub kind: MarkerKind,
    /// The color of newly placed markers.
    pub color: Color,
}

impl Default for MarkerToolConfig {
    fn default() -> Self {
        Self {
            kind: MarkerKind::Default,
            color: color::SWATCH_BLUE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabelToolConfig {
    /// The color of newly placed labels.
    pub color: Color,
    /// The placeholder text of newly placed labels, replaced through the inline editor.
    pub placeholder_text: String,
}

impl Default for LabelToolConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            placeholder_text: String::from("Text"),
        }
    }
}
