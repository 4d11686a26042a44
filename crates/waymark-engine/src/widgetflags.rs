/// Flags returned to the UI widget that embeds the engine.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WidgetFlags {
    /// Needs overlay redrawing, i.e. items need to be re-projected and repainted.
    pub redraw: bool,
    /// Refresh the UI with the engine state (active tool, selection, preview mode).
    pub refresh_ui: bool,
    /// Whether the store was modified, i.e. items inserted, modified, deleted.
    pub store_modified: bool,
    /// Update the current view offset and size.
    pub update_view: bool,
    /// Indicates that the camera has changed its zoom.
    pub zoomed: bool,
    /// Is Some when undo button visibility should be changed. Is None if it should not be changed.
    pub hide_undo: Option<bool>,
    /// Is Some when redo button visibility should be changed. Is None if it should not be changed.
    pub hide_redo: Option<bool>,
    /// Is Some when the viewport's own pan gesture should be enabled/disabled.
    ///
    /// Set while an item is dragged, so the viewport does not pan underneath the drag.
    pub enable_view_pan: Option<bool>,
    /// Is Some when the inline text editor input should be focused/unfocused.
    ///
    /// Set after placing a new label, so its text can be typed right away.
    pub focus_text_input: Option<bool>,
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self {
            redraw: false,
            refresh_ui: false,
            store_modified: false,
            update_view: false,
            zoomed: false,
            hide_undo: None,
            hide_redo: None,
            enable_view_pan: None,
            focus_text_input: None,
        }
    }
}

impl WidgetFlags {
    /// Merge with another WidgetFlags struct, prioritizing other for conflicting values.
    pub fn merge(&mut self, other: Self) {
        self.redraw |= other.redraw;
        self.refresh_ui |= other.refresh_ui;
        self.store_modified |= other.store_modified;
        self.update_view |= other.update_view;
        self.zoomed |= other.zoomed;
        if other.hide_undo.is_some() {
            self.hide_undo = other.hide_undo;
        }
        if other.hide_redo.is_some() {
            self.hide_redo = other.hide_redo;
        }
        if other.enable_view_pan.is_some() {
            self.enable_view_pan = other.enable_view_pan;
        }
        if other.focus_text_input.is_some() {
            self.focus_text_input = other.focus_text_input;
        }
    }
}

impl std::ops::BitOr for WidgetFlags {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self.merge(rhs);
        self
    }
}

impl std::ops::BitOrAssign for WidgetFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.merge(rhs);
    }
}
