// Modules
pub mod label_comp;
pub mod marker_comp;
pub mod route_comp;
pub mod selection_comp;

// Imports
use crate::WidgetFlags;
use crate::engine::snapshot::MapSnapshot;
use crate::items::{ItemRef, Label, Marker, Route};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// A snapshot of the three persistent collections.
///
/// The in-progress route buffer and the selection are deliberately excluded, they are not
/// time-travel-tracked.
#[derive(Debug, Clone, Default)]
pub struct HistoryEntry {
    pub routes: Arc<Vec<Route>>,
    pub markers: Arc<Vec<Marker>>,
    pub labels: Arc<Vec<Label>>,
}

/// The store of all annotations of the currently edited map, wrapped with the undo/redo history.
///
/// The collections are the primary state; the systems operating on them are implemented as methods
/// on AnnotationStore, loosely categorized into the sibling `*_comp` modules:
///     * 'route_comp': finished routes and the in-progress route buffer
///     * 'marker_comp': marker pins
///     * 'label_comp': text labels
///     * 'selection_comp': the single selected item
///
/// Every structural mutation saves the pre-mutation state as a history entry before applying
/// itself. The one exception are the per-pixel position updates during a drag gesture, which must
/// never push on their own; the gesture's pointer-down saves exactly one checkpoint instead.
/// Collections are held behind [Arc] with copy-on-write, so a history entry is a set of pointer
/// clones until the live state diverges from it.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    routes: Arc<Vec<Route>>,
    markers: Arc<Vec<Marker>>,
    labels: Arc<Vec<Label>>,
    /// The in-progress route buffer. Not a first-class route until finished.
    current_route: Vec<na::Vector2<f64>>,
    /// The single selected item, if any.
    selection: Option<ItemRef>,
    /// Undo stack, oldest entry first.
    past: VecDeque<HistoryEntry>,
    /// Redo stack, nearest entry first.
    future: VecDeque<HistoryEntry>,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self {
            routes: Arc::new(Vec::new()),
            markers: Arc::new(Vec::new()),
            labels: Arc::new(Vec::new()),
            current_route: Vec::new(),
            selection: None,
            past: VecDeque::new(),
            future: VecDeque::new(),
        }
    }
}

impl AnnotationStore {
    /// Max length of the undo stack.
    pub(crate) const HISTORY_MAX_LEN: usize = 100;

    /// Create a history entry from the current state.
    pub(crate) fn create_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            routes: Arc::clone(&self.routes),
            markers: Arc::clone(&self.markers),
            labels: Arc::clone(&self.labels),
        }
    }

    /// Replace the current collections with the given history entry.
    fn import_history_entry(&mut self, history_entry: HistoryEntry) {
        self.routes = Arc::clone(&history_entry.routes);
        self.markers = Arc::clone(&history_entry.markers);
        self.labels = Arc::clone(&history_entry.labels);
    }

    /// Checks the equality of the current state to all fields of the given history entry,
    /// doing pointer compares on the collection Arc's.
    fn eq_w_history_entry(&self, history_entry: &HistoryEntry) -> bool {
        Arc::ptr_eq(&self.routes, &history_entry.routes)
            && Arc::ptr_eq(&self.markers, &history_entry.markers)
            && Arc::ptr_eq(&self.labels, &history_entry.labels)
    }

    /// Save the current state as a history entry and invalidate the redo stack.
    ///
    /// This is the single history-push path: every structural mutation calls it with its
    /// pre-mutation state, and a drag gesture calls it exactly once at pointer-down so that the
    /// position updates that follow are bracketed by one entry.
    pub fn save_checkpoint(&mut self) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        if self
            .past
            .back()
            .map(|last| !self.eq_w_history_entry(last))
            .unwrap_or(true)
        {
            self.past.push_back(self.create_history_entry());

            while self.past.len() > Self::HISTORY_MAX_LEN {
                self.past.pop_front();
            }
        } else {
            debug!("State has not changed since the last history entry, not pushing.");
        }

        // any new checkpoint invalidates the redo stack
        self.future.clear();

        widget_flags.hide_undo = Some(!self.can_undo());
        widget_flags.hide_redo = Some(!self.can_redo());

        widget_flags
    }

    /// Undo the latest changes. A no-op if the undo stack is empty.
    pub fn undo(&mut self) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        let Some(previous) = self.past.pop_back() else {
            return widget_flags;
        };
        self.future.push_front(self.create_history_entry());
        self.import_history_entry(previous);

        widget_flags.hide_undo = Some(!self.can_undo());
        widget_flags.hide_redo = Some(!self.can_redo());
        widget_flags.store_modified = true;
        widget_flags.redraw = true;

        widget_flags
    }

    /// Redo the latest undone changes. A no-op if the redo stack is empty.
    pub fn redo(&mut self) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        let Some(next) = self.future.pop_front() else {
            return widget_flags;
        };
        self.past.push_back(self.create_history_entry());
        self.import_history_entry(next);

        widget_flags.hide_undo = Some(!self.can_undo());
        widget_flags.hide_redo = Some(!self.can_redo());
        widget_flags.store_modified = true;
        widget_flags.redraw = true;

        widget_flags
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// The number of entries on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// The number of entries on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Empty routes, markers, labels and the in-progress route atomically, as one history entry.
    pub fn clear_all(&mut self) -> WidgetFlags {
        let mut widget_flags = self.save_checkpoint();

        self.routes = Arc::new(Vec::new());
        self.markers = Arc::new(Vec::new());
        self.labels = Arc::new(Vec::new());
        self.current_route.clear();
        widget_flags |= self.clear_selection();

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Reset the entire store, including the history.
    pub(crate) fn clear(&mut self) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        self.routes = Arc::new(Vec::new());
        self.markers = Arc::new(Vec::new());
        self.labels = Arc::new(Vec::new());
        self.current_route.clear();
        self.selection = None;
        self.past.clear();
        self.future.clear();

        widget_flags.hide_undo = Some(true);
        widget_flags.hide_redo = Some(true);
        widget_flags.redraw = true;
        widget_flags.refresh_ui = true;
        widget_flags
    }

    /// Import from a map snapshot. A loaded map should always be imported with this method.
    ///
    /// Replaces all collections and resets the history.
    pub(crate) fn import_from_snapshot(&mut self, snapshot: &MapSnapshot) -> WidgetFlags {
        let mut widget_flags = self.clear();

        self.routes = Arc::new(snapshot.routes.clone());
        self.markers = Arc::new(snapshot.markers.clone());
        self.labels = Arc::new(snapshot.labels.clone());

        widget_flags.store_modified = true;
        widget_flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemKind, LabelUpdate, MarkerKind, MarkerUpdate};
    use waymark_compose::color;
    use waymark_compose::Color;

    fn cafe_marker() -> Marker {
        Marker {
            id: String::from("m1"),
            kind: MarkerKind::Cafe,
            position: na::vector![10.0, 20.0],
            color: color::SWATCH_BLUE,
            size: 1.0,
            text: None,
        }
    }

    #[test]
    fn undo_unwinds_a_mutation_sequence() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        let _ = store.insert_label(Label::new("Harbor", na::vector![1.0, 2.0], color::SWATCH_PINK));
        let _ = store.insert_route(Route::new(vec![
            na::vector![0.0, 0.0],
            na::vector![5.0, 5.0],
        ]));
        let _ = store.update_marker(
            "m1",
            MarkerUpdate {
                color: Some(color::SWATCH_GREEN),
                ..Default::default()
            },
        );
        let label_id = store.labels()[0].id.clone();
        let _ = store.delete_label(&label_id);

        let n = 5;
        assert_eq!(store.undo_depth(), n);

        for _ in 0..n {
            let _ = store.undo();
        }

        assert!(store.routes().is_empty());
        assert!(store.markers().is_empty());
        assert!(store.labels().is_empty());
        assert_eq!(store.undo_depth(), 0);
        assert_eq!(store.redo_depth(), n);
    }

    #[test]
    fn redo_restores_and_new_edits_invalidate_it() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        let pre_undo = store.markers().to_vec();

        let _ = store.undo();
        assert!(store.markers().is_empty());

        let _ = store.redo();
        assert_eq!(store.markers(), pre_undo.as_slice());

        let _ = store.undo();
        let _ = store.insert_label(Label::new("Pier", na::vector![3.0, 3.0], Color::BLACK));
        assert_eq!(store.redo_depth(), 0);
        let _ = store.redo();
        assert!(store.markers().is_empty());
    }

    #[test]
    fn finish_current_route_discards_short_buffers() {
        let mut store = AnnotationStore::default();

        let _ = store.finish_current_route();
        assert!(store.routes().is_empty());
        assert!(!store.can_undo());

        let _ = store.add_to_current_route(na::vector![1.0, 1.0]);
        let _ = store.finish_current_route();
        assert!(store.routes().is_empty());
        assert!(store.current_route().is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn finish_current_route_materializes_one_route() {
        let mut store = AnnotationStore::default();

        let _ = store.add_to_current_route(na::vector![0.0, 0.0]);
        let _ = store.add_to_current_route(na::vector![10.0, 0.0]);
        let _ = store.add_to_current_route(na::vector![10.0, 10.0]);
        let _ = store.finish_current_route();

        assert_eq!(store.routes().len(), 1);
        assert_eq!(store.routes()[0].points.len(), 3);
        assert!(store.current_route().is_empty());
        assert_eq!(store.undo_depth(), 1);

        let _ = store.undo();
        assert!(store.routes().is_empty());
    }

    #[test]
    fn insert_route_applies_the_min_point_guard() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_route(Route::new(vec![na::vector![1.0, 1.0]]));
        assert!(store.routes().is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn drag_gesture_records_one_history_entry() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        assert_eq!(store.undo_depth(), 1);

        // pointer-down
        let _ = store.save_checkpoint();
        // pointer-moves
        for i in 0..25 {
            let _ = store.update_marker_position("m1", na::vector![10.0 + f64::from(i), 20.0]);
        }

        assert_eq!(store.undo_depth(), 2);

        let _ = store.undo();
        assert_eq!(store.marker("m1").unwrap().position, na::vector![10.0, 20.0]);
        let _ = store.redo();
        assert_eq!(store.marker("m1").unwrap().position, na::vector![34.0, 20.0]);
    }

    #[test]
    fn deleting_the_selected_marker_clears_the_selection() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        let _ = store.set_selection(Some(ItemRef::marker("m1")));

        let _ = store.delete_marker("m1");
        assert!(store.selection().is_none());
    }

    #[test]
    fn deleting_another_item_keeps_the_selection() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        let label = Label::new("Dock", na::vector![2.0, 2.0], Color::BLACK);
        let label_id = label.id.clone();
        let _ = store.insert_label(label);
        let _ = store.set_selection(Some(ItemRef::marker("m1")));

        let _ = store.delete_label(&label_id);
        assert_eq!(store.selection(), Some(&ItemRef::marker("m1")));
    }

    #[test]
    fn updates_with_unknown_ids_are_silent_noops() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        let before = store.markers().to_vec();

        let _ = store.update_marker(
            "missing",
            MarkerUpdate {
                size: Some(2.0),
                ..Default::default()
            },
        );
        let _ = store.update_label(
            "missing",
            LabelUpdate {
                text: Some(String::from("nope")),
                ..Default::default()
            },
        );
        let _ = store.delete_marker("missing");

        assert_eq!(store.markers(), before.as_slice());
        // no wasted undo slots
        assert_eq!(store.undo_depth(), 1);
    }

    #[test]
    fn clear_all_is_a_single_undoable_entry() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        let _ = store.insert_route(Route::new(vec![
            na::vector![0.0, 0.0],
            na::vector![1.0, 1.0],
        ]));
        let _ = store.add_to_current_route(na::vector![9.0, 9.0]);
        let _ = store.set_selection(Some(ItemRef::marker("m1")));

        let _ = store.clear_all();
        assert!(store.routes().is_empty());
        assert!(store.markers().is_empty());
        assert!(store.current_route().is_empty());
        assert!(store.selection().is_none());

        let _ = store.undo();
        assert_eq!(store.markers().len(), 1);
        assert_eq!(store.routes().len(), 1);
        // the route buffer and the selection are not time-travel-tracked
        assert!(store.current_route().is_empty());
        assert!(store.selection().is_none());
    }

    #[test]
    fn cafe_marker_scenario() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());

        let _ = store.undo();
        assert!(store.markers().is_empty());

        let _ = store.redo();
        assert_eq!(store.markers(), [cafe_marker()].as_slice());
        assert_eq!(store.markers()[0].kind, MarkerKind::Cafe);
        assert_eq!(store.markers()[0].id, "m1");
    }

    #[test]
    fn selection_accessors_resolve_by_kind() {
        let mut store = AnnotationStore::default();

        let _ = store.insert_marker(cafe_marker());
        let _ = store.set_selection(Some(ItemRef {
            id: String::from("m1"),
            kind: ItemKind::Marker,
        }));
        assert!(store.selected_marker().is_some());
        assert!(store.selected_label().is_none());
    }
}
