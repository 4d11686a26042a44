// Imports
use super::AnnotationStore;
use crate::WidgetFlags;
use crate::items::{Label, LabelUpdate};
use std::sync::Arc;
use tracing::debug;

/// Systems that are related to text labels.
impl AnnotationStore {
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|label| label.id == id)
    }

    /// Insert a new label into the store.
    pub fn insert_label(&mut self, label: Label) -> WidgetFlags {
        let mut widget_flags = self.save_checkpoint();
        Arc::make_mut(&mut self.labels).push(label);

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Merge the set fields of the given update into the label with the given id.
    ///
    /// An unknown id is a silent no-op and does not record a history entry.
    pub fn update_label(&mut self, id: &str, update: LabelUpdate) -> WidgetFlags {
        if !self.labels.iter().any(|label| label.id == id) {
            debug!("Not updating label with unknown id {id}.");
            return WidgetFlags::default();
        }

        let mut widget_flags = self.save_checkpoint();
        if let Some(label) = Arc::make_mut(&mut self.labels)
            .iter_mut()
            .find(|label| label.id == id)
        {
            label.apply_update(update);
        }

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Move the label with the given id.
    ///
    /// Drag hot path, must never push a history entry itself (see
    /// [AnnotationStore::update_marker_position]).
    pub fn update_label_position(&mut self, id: &str, position: na::Vector2<f64>) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        if !self.labels.iter().any(|label| label.id == id) {
            return widget_flags;
        }
        if let Some(label) = Arc::make_mut(&mut self.labels)
            .iter_mut()
            .find(|label| label.id == id)
        {
            label.position = position;
        }

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Remove the label with the given id.
    ///
    /// If it is the selected item, the selection is cleared in the same update. An unknown id is a
    /// silent no-op and does not record a history entry.
    pub fn delete_label(&mut self, id: &str) -> WidgetFlags {
        if !self.labels.iter().any(|label| label.id == id) {
            debug!("Not deleting label with unknown id {id}.");
            return WidgetFlags::default();
        }

        let mut widget_flags = self.save_checkpoint();
        Arc::make_mut(&mut self.labels).retain(|label| label.id != id);

        if self.selection.as_ref().is_some_and(|sel| sel.id == id) {
            self.selection = None;
            widget_flags.refresh_ui = true;
        }

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }
}
