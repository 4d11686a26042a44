// Modules
pub mod label;
pub mod marker;
pub mod route;

// Re-exports
pub use label::Label;
pub use label::LabelUpdate;
pub use marker::Marker;
pub use marker::MarkerKind;
pub use marker::MarkerUpdate;
pub use route::Route;

/// The minimum scale factor of markers and labels.
pub const SCALE_MIN: f64 = 0.5;
/// The maximum scale factor of markers and labels.
pub const SCALE_MAX: f64 = 3.0;
/// The default scale factor of markers and labels.
pub const SCALE_DEFAULT: f64 = 1.0;

pub(crate) fn scale_default() -> f64 {
    SCALE_DEFAULT
}

/// Generate a fresh unique item id.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The kind of a selectable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Marker,
    Label,
}

/// A reference to a selectable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemRef {
    /// The id of the referenced item.
    pub id: String,
    /// The kind of the referenced item.
    pub kind: ItemKind,
}

impl ItemRef {
    pub fn marker(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Marker,
        }
    }

    pub fn label(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Label,
        }
    }
}
