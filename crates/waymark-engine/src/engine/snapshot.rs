// Imports
use crate::items::{Label, Marker, Route};
use crate::{Camera, Engine, WidgetFlags};
use serde::{Deserialize, Serialize};

/// The persisted view settings of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "view_settings")]
pub struct ViewSettings {
    /// The viewport center in logical coordinates.
    #[serde(rename = "center")]
    pub center: na::Vector2<f64>,
    #[serde(rename = "zoom")]
    pub zoom: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            center: na::Vector2::zeros(),
            zoom: Camera::ZOOM_DEFAULT,
        }
    }
}

// A map snapshot, used when saving/loading the current map to/from a record.
#[derive(Debug, Clone, Default)]
pub struct MapSnapshot {
    pub name: String,
    pub routes: Vec<Route>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
    pub view: ViewSettings,
}

impl Engine {
    /// Take a snapshot of the current state.
    pub fn take_snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            name: self.document.name.clone(),
            routes: self.store.routes().to_vec(),
            markers: self.store.markers().to_vec(),
            labels: self.store.labels().to_vec(),
            view: ViewSettings {
                center: self.camera.viewport_center(),
                zoom: self.camera.zoom(),
            },
        }
    }

    /// Import a map snapshot. A loaded map should always be imported with this method.
    ///
    /// Replaces the collections, restores the persisted view and resets the history.
    pub fn load_snapshot(&mut self, snapshot: MapSnapshot) -> WidgetFlags {
        let mut widget_flags = self.store.import_from_snapshot(&snapshot)
            | self.camera.zoom_to(snapshot.view.zoom)
            | self.camera.set_viewport_center(snapshot.view.center);

        self.document.name = snapshot.name;

        widget_flags.refresh_ui = true;
        widget_flags
    }
}
