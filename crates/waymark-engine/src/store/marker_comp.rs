// Imports
use super::AnnotationStore;
use crate::WidgetFlags;
use crate::items::{Marker, MarkerUpdate};
use std::sync::Arc;
use tracing::debug;

/// Systems that are related to markers.
impl AnnotationStore {
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    /// Insert a new marker into the store.
    pub fn insert_marker(&mut self, marker: Marker) -> WidgetFlags {
        let mut widget_flags = self.save_checkpoint();
        Arc::make_mut(&mut self.markers).push(marker);

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Merge the set fields of the given update into the marker with the given id.
    ///
    /// An unknown id is a silent no-op and does not record a history entry.
    pub fn update_marker(&mut self, id: &str, update: MarkerUpdate) -> WidgetFlags {
        if !self.markers.iter().any(|marker| marker.id == id) {
            debug!("Not updating marker with unknown id {id}.");
            return WidgetFlags::default();
        }

        let mut widget_flags = self.save_checkpoint();
        if let Some(marker) = Arc::make_mut(&mut self.markers)
            .iter_mut()
            .find(|marker| marker.id == id)
        {
            marker.apply_update(update);
        }

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Move the marker with the given id.
    ///
    /// This is the drag hot path: it must never push a history entry itself. The gesture's
    /// pointer-down saves the single checkpoint that brackets all of its position updates.
    pub fn update_marker_position(&mut self, id: &str, position: na::Vector2<f64>) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        if !self.markers.iter().any(|marker| marker.id == id) {
            return widget_flags;
        }
        if let Some(marker) = Arc::make_mut(&mut self.markers)
            .iter_mut()
            .find(|marker| marker.id == id)
        {
            marker.position = position;
        }

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Remove the marker with the given id.
    ///
    /// If it is the selected item, the selection is cleared in the same update. An unknown id is a
    /// silent no-op and does not record a history entry.
    pub fn delete_marker(&mut self, id: &str) -> WidgetFlags {
        if !self.markers.iter().any(|marker| marker.id == id) {
            debug!("Not deleting marker with unknown id {id}.");
            return WidgetFlags::default();
        }

        let mut widget_flags = self.save_checkpoint();
        Arc::make_mut(&mut self.markers).retain(|marker| marker.id != id);

        if self.selection.as_ref().is_some_and(|sel| sel.id == id) {
            self.selection = None;
            widget_flags.refresh_ui = true;
        }

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }
}
