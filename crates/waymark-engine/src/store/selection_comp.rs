// Imports
use super::AnnotationStore;
use crate::WidgetFlags;
use crate::items::{ItemKind, ItemRef, Label, Marker};

/// Systems that are related to the selection.
///
/// At most one item is selected at any time. The selection is not part of the history.
impl AnnotationStore {
    pub fn selection(&self) -> Option<&ItemRef> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<ItemRef>) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        if self.selection != selection {
            self.selection = selection;
            widget_flags.refresh_ui = true;
            widget_flags.redraw = true;
        }

        widget_flags
    }

    pub fn clear_selection(&mut self) -> WidgetFlags {
        self.set_selection(None)
    }

    /// The selected marker, if the selection references one.
    pub fn selected_marker(&self) -> Option<&Marker> {
        self.selection
            .as_ref()
            .filter(|sel| sel.kind == ItemKind::Marker)
            .and_then(|sel| self.marker(&sel.id))
    }

    /// The selected label, if the selection references one.
    pub fn selected_label(&self) -> Option<&Label> {
        self.selection
            .as_ref()
            .filter(|sel| sel.kind == ItemKind::Label)
            .and_then(|sel| self.label(&sel.id))
    }

    /// Move the referenced item, dispatching on its kind. Drag hot path, not history-tracked.
    pub fn update_item_position(
        &mut self,
        item: &ItemRef,
        position: na::Vector2<f64>,
    ) -> WidgetFlags {
        match item.kind {
            ItemKind::Marker => self.update_marker_position(&item.id, position),
            ItemKind::Label => self.update_label_position(&item.id, position),
        }
    }

    /// Remove the referenced item, dispatching on its kind.
    pub fn delete_item(&mut self, item: &ItemRef) -> WidgetFlags {
        match item.kind {
            ItemKind::Marker => self.delete_marker(&item.id),
            ItemKind::Label => self.delete_label(&item.id),
        }
    }
}
