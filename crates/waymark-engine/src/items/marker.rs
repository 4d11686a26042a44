// Imports
use serde::{Deserialize, Serialize};
use waymark_compose::color;
use waymark_compose::Color;

/// The kind of a marker, deciding which icon the overlay renders into the pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename = "marker_kind")]
pub enum MarkerKind {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "end")]
    End,
    #[serde(rename = "checkpoint")]
    Checkpoint,
    #[serde(rename = "restaurant")]
    Restaurant,
    #[serde(rename = "cafe")]
    Cafe,
    #[serde(rename = "school")]
    School,
    #[serde(rename = "hospital")]
    Hospital,
    #[serde(rename = "park")]
    Park,
}

impl Default for MarkerKind {
    fn default() -> Self {
        Self::Default
    }
}

impl std::str::FromStr for MarkerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "checkpoint" => Ok(Self::Checkpoint),
            "restaurant" => Ok(Self::Restaurant),
            "cafe" => Ok(Self::Cafe),
            "school" => Ok(Self::School),
            "hospital" => Ok(Self::Hospital),
            "park" => Ok(Self::Park),
            s => Err(anyhow::anyhow!(
                "Creating MarkerKind from &str failed, invalid name {s}"
            )),
        }
    }
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
            Self::Checkpoint => write!(f, "checkpoint"),
            Self::Restaurant => write!(f, "restaurant"),
            Self::Cafe => write!(f, "cafe"),
            Self::School => write!(f, "school"),
            Self::Hospital => write!(f, "hospital"),
            Self::Park => write!(f, "park"),
        }
    }
}

/// A typed marker pin at a logical position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "marker")]
pub struct Marker {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    #[serde(rename = "position")]
    pub position: na::Vector2<f64>,
    #[serde(rename = "color")]
    pub color: Color,
    /// Scale factor of the rendered pin.
    #[serde(rename = "size", default = "super::scale_default")]
    pub size: f64,
    /// Optional caption rendered under the pin.
    #[serde(rename = "text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Marker {
    /// A new marker at the given position, with a freshly generated id and default styling.
    pub fn new(kind: MarkerKind, position: na::Vector2<f64>) -> Self {
        Self {
            id: super::generate_id(),
            kind,
            position,
            color: color::SWATCH_BLUE,
            size: super::SCALE_DEFAULT,
            text: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Merge the set fields of the given update into self.
    pub fn apply_update(&mut self, update: MarkerUpdate) {
        if let Some(kind) = update.kind {
            self.kind = kind;
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
        if let Some(text) = update.text {
            self.text = Some(text);
        }
    }
}

/// A partial update of a marker. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerUpdate {
    pub kind: Option<MarkerKind>,
    pub position: Option<na::Vector2<f64>>,
    pub color: Option<Color>,
    pub size: Option<f64>,
    pub text: Option<String>,
}
