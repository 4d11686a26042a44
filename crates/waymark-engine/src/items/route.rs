// Imports
use serde::{Deserialize, Serialize};
use waymark_compose::Color;

/// A finished route, an ordered polyline of logical coordinates.
///
/// Routes are only ever created whole (by finishing the in-progress route buffer, or by loading a
/// persisted map) and are immutable afterwards except through history-tracked replacement of the
/// whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "route")]
pub struct Route {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "points")]
    pub points: Vec<na::Vector2<f64>>,
    #[serde(rename = "color", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Route {
    /// The minimum number of points a route must have to be inserted.
    pub const MIN_POINTS: usize = 2;

    /// A new route from the given points, with a freshly generated id.
    pub fn new(points: Vec<na::Vector2<f64>>) -> Self {
        Self {
            id: super::generate_id(),
            points,
            color: None,
        }
    }
}
