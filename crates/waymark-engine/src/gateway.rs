// Imports
use futures::channel::oneshot;
use std::collections::HashMap;
use tracing::error;

/// The error taxonomy of the persistence boundary.
///
/// Gateway faults never propagate as panics into the editing core: they are values the embedder
/// may display, and in-memory state is untouched by a failed save or load.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A fetch was requested for an id with no record.
    #[error("Map not found")]
    NotFound,
    /// A record blob could not be serialized or parsed.
    #[error("map data (de)serialization failed")]
    Serialization(#[from] serde_json::Error),
    /// Any other fault of the backing store.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A new map record handed to the gateway for creation.
///
/// The annotation collections and view settings are independent flat JSON text blobs with no
/// schema versioning.
#[derive(Debug, Clone)]
pub struct NewMapRecord {
    pub user_id: String,
    pub name: String,
    pub route_data: String,
    pub marker_data: String,
    pub label_data: String,
    pub settings_data: String,
}

/// A stored map record.
#[derive(Debug, Clone)]
pub struct MapRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub route_data: String,
    pub marker_data: String,
    pub label_data: String,
    pub settings_data: String,
}

/// The external key-value store that persists maps.
///
/// Asynchronous and fire-and-forget from the engine's perspective: operations hand back oneshot
/// receivers, there are no retries and no partial-failure recovery. Every save creates a new
/// record; there is no update-by-id path.
pub trait MapGateway: std::fmt::Debug {
    /// Create a new record. Resolves to the id of the created map.
    fn create_map(
        &mut self,
        record: NewMapRecord,
    ) -> oneshot::Receiver<Result<String, GatewayError>>;

    /// Fetch the record with the given id. Resolves to [GatewayError::NotFound] when absent.
    fn fetch_map(&self, id: &str) -> oneshot::Receiver<Result<MapRecord, GatewayError>>;
}

/// An in-memory gateway that resolves its channels synchronously.
///
/// The reference collaborator for embedders without a backend, and the test double.
#[derive(Debug, Default)]
pub struct MemoryMapGateway {
    maps: HashMap<String, MapRecord>,
}

impl MapGateway for MemoryMapGateway {
    fn create_map(
        &mut self,
        record: NewMapRecord,
    ) -> oneshot::Receiver<Result<String, GatewayError>> {
        let (tx, rx) = oneshot::channel();

        let id = uuid::Uuid::new_v4().to_string();
        self.maps.insert(
            id.clone(),
            MapRecord {
                id: id.clone(),
                user_id: record.user_id,
                name: record.name,
                route_data: record.route_data,
                marker_data: record.marker_data,
                label_data: record.label_data,
                settings_data: record.settings_data,
            },
        );

        if tx.send(Ok(id)).is_err() {
            error!("Sending create_map result failed, receiver was already dropped.");
        }
        rx
    }

    fn fetch_map(&self, id: &str) -> oneshot::Receiver<Result<MapRecord, GatewayError>> {
        let (tx, rx) = oneshot::channel();

        let result = self.maps.get(id).cloned().ok_or(GatewayError::NotFound);
        if tx.send(result).is_err() {
            error!("Sending fetch_map result failed, receiver was already dropped.");
        }
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Engine;
    use crate::items::{Label, Marker, MarkerKind, Route};
    use approx::assert_relative_eq;
    use futures::executor::block_on;
    use waymark_compose::color;

    #[test]
    fn save_load_roundtrip() {
        let mut engine = Engine::default();
        let _ = engine.store.insert_marker(Marker {
            id: String::from("m1"),
            kind: MarkerKind::Cafe,
            position: na::vector![10.0, 20.0],
            color: color::SWATCH_BLUE,
            size: 1.5,
            text: Some(String::from("Espresso stop")),
        });
        let _ = engine.store.insert_label(Label::new(
            "Old town",
            na::vector![4.0, 4.25],
            color::SWATCH_PINK,
        ));
        let _ = engine.store.insert_route(Route::new(vec![
            na::vector![0.0, 0.0],
            na::vector![1.0, 2.0],
            na::vector![3.0, 5.0],
        ]));
        let _ = engine.sync_view(na::vector![12.5, 47.0], 3.0);

        let mut gateway = MemoryMapGateway::default();
        let receiver = engine
            .save_map(&mut gateway, "user-1", "Morning loop")
            .unwrap();
        let map_id = block_on(receiver).unwrap().unwrap();

        let record = block_on(gateway.fetch_map(&map_id)).unwrap().unwrap();
        let mut loaded = Engine::default();
        let _ = loaded.load_map_record(record).unwrap();

        assert_eq!(loaded.store.routes(), engine.store.routes());
        assert_eq!(loaded.store.markers(), engine.store.markers());
        assert_eq!(loaded.store.labels(), engine.store.labels());
        assert_eq!(loaded.document.name, "Morning loop");
        assert_relative_eq!(
            loaded.camera.viewport_center(),
            engine.camera.viewport_center()
        );
        assert_relative_eq!(loaded.camera.zoom(), engine.camera.zoom());

        // loading starts a fresh session, nothing to unwind
        assert!(!loaded.store.can_undo());
    }

    #[test]
    fn fetching_an_unknown_map_resolves_to_not_found() {
        let gateway = MemoryMapGateway::default();

        match block_on(gateway.fetch_map("missing")).unwrap() {
            Err(GatewayError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(GatewayError::NotFound.to_string(), "Map not found");
    }

    #[test]
    fn a_corrupt_record_is_rejected_without_touching_state() {
        let mut engine = Engine::default();
        let _ = engine.store.insert_marker(Marker::new(
            MarkerKind::Park,
            na::vector![1.0, 1.0],
        ));

        let record = MapRecord {
            id: String::from("corrupt"),
            user_id: String::from("user-1"),
            name: String::from("Broken"),
            route_data: String::from("not json"),
            marker_data: String::from("[]"),
            label_data: String::from("[]"),
            settings_data: String::from("{}"),
        };

        assert!(engine.load_map_record(record).is_err());
        assert_eq!(engine.store.markers().len(), 1);
        assert_eq!(engine.document.name, "Untitled map");
    }
}
