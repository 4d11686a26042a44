// Imports
use serde::{Deserialize, Serialize};
use waymark_compose::Color;

/// A free-standing text label at a logical position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "label")]
pub struct Label {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "text")]
    pub text: String,
    #[serde(rename = "position")]
    pub position: na::Vector2<f64>,
    #[serde(rename = "color")]
    pub color: Color,
    /// Scale factor of the rendered text.
    #[serde(rename = "size", default = "super::scale_default")]
    pub size: f64,
}

impl Label {
    /// A new label at the given position, with a freshly generated id.
    pub fn new(text: impl Into<String>, position: na::Vector2<f64>, color: Color) -> Self {
        Self {
            id: super::generate_id(),
            text: text.into(),
            position,
            color,
            size: super::SCALE_DEFAULT,
        }
    }

    /// Merge the set fields of the given update into self.
    pub fn apply_update(&mut self, update: LabelUpdate) {
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
    }
}

/// A partial update of a label. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelUpdate {
    pub text: Option<String>,
    pub position: Option<na::Vector2<f64>>,
    pub color: Option<Color>,
    pub size: Option<f64>,
}
