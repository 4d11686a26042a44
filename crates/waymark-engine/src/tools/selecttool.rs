// Imports
use super::{ToolBehaviour, ToolStyle};
use crate::WidgetFlags;
use crate::engine::{EngineView, EngineViewMut};
use crate::items::ItemRef;
use waymark_compose::EventResult;
use waymark_compose::pointerevent::{PointerEvent, ToolProgress};

/// Distance in surface pixels within which a pointer press grabs an item's anchor.
const HIT_RADIUS: f64 = 16.0;

#[derive(Debug, Clone)]
pub enum SelectState {
    Up,
    /// An item is being dragged. The single history checkpoint of the gesture was saved when the
    /// drag began.
    Dragging { item: ItemRef },
    /// A drag just ended. The click the viewport synthesizes from the release must be swallowed.
    DragEnded,
}

/// The select tool: selecting, dragging and background-deselecting while no drawing mode is
/// active.
#[derive(Debug, Clone)]
pub struct SelectTool {
    pub(crate) state: SelectState,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self {
            state: SelectState::Up,
        }
    }
}

impl ToolBehaviour for SelectTool {
    fn init(&mut self, _engine_view: &EngineView) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn deinit(&mut self) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        if matches!(self.state, SelectState::Dragging { .. }) {
            widget_flags.enable_view_pan = Some(true);
        }
        self.state = SelectState::Up;
        widget_flags
    }

    fn style(&self) -> ToolStyle {
        ToolStyle::Select
    }

    fn handle_event(
        &mut self,
        event: PointerEvent,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<ToolProgress>, WidgetFlags) {
        let mut widget_flags = WidgetFlags::default();

        let event_result = match (&mut self.state, event) {
            (
                SelectState::Up | SelectState::DragEnded,
                PointerEvent::Down { position, .. },
            ) => match item_at_surface_pos(engine_view, position) {
                Some(item) => {
                    // the single checkpoint bracketing the whole drag gesture
                    widget_flags |= engine_view.store.save_checkpoint()
                        | engine_view.store.set_selection(Some(item.clone()));
                    // the viewport must not pan underneath the drag
                    widget_flags.enable_view_pan = Some(false);
                    self.state = SelectState::Dragging { item };
                    EventResult::consumed(ToolProgress::InProgress)
                }
                None => {
                    self.state = SelectState::Up;
                    EventResult::ignored(ToolProgress::Idle)
                }
            },
            (SelectState::Dragging { item }, PointerEvent::Move { position }) => {
                let coord = engine_view.camera.unproject(position);
                widget_flags |= engine_view.store.update_item_position(item, coord);
                EventResult::consumed(ToolProgress::InProgress)
            }
            (SelectState::Dragging { .. }, PointerEvent::Up { .. }) => {
                // the release terminates the drag wherever it lands, also outside the viewport
                self.state = SelectState::DragEnded;
                widget_flags.enable_view_pan = Some(true);
                widget_flags.store_modified = true;
                EventResult::consumed(ToolProgress::Finished)
            }
            (SelectState::Dragging { .. }, PointerEvent::Cancel) => {
                self.state = SelectState::Up;
                widget_flags.enable_view_pan = Some(true);
                EventResult::consumed(ToolProgress::Finished)
            }
            (SelectState::Dragging { .. }, _) => {
                // clicks and keys while dragging must not trigger any placement
                EventResult::consumed(ToolProgress::InProgress)
            }
            (SelectState::DragEnded, PointerEvent::Click { .. }) => {
                // drag suppresses click, the fresh selection stays
                self.state = SelectState::Up;
                EventResult::consumed(ToolProgress::Idle)
            }
            (SelectState::Up, PointerEvent::Click { .. }) => {
                // background click deselects
                widget_flags |= engine_view.store.clear_selection();
                EventResult::consumed(ToolProgress::Idle)
            }
            (SelectState::DragEnded, _) => {
                self.state = SelectState::Up;
                EventResult::ignored(ToolProgress::Idle)
            }
            (SelectState::Up, _) => EventResult::ignored(ToolProgress::Idle),
        };

        (event_result, widget_flags)
    }
}

/// Resolve the topmost item whose anchor projects within [HIT_RADIUS] of the given surface
/// position.
///
/// Labels paint above markers, and within each class later insertions paint on top, so the search
/// mirrors that order.
fn item_at_surface_pos(
    engine_view: &EngineViewMut,
    position: na::Vector2<f64>,
) -> Option<ItemRef> {
    for label in engine_view.store.labels().iter().rev() {
        if (engine_view.camera.project(label.position) - position).norm() <= HIT_RADIUS {
            return Some(ItemRef::label(label.id.clone()));
        }
    }
    for marker in engine_view.store.markers().iter().rev() {
        if (engine_view.camera.project(marker.position) - position).norm() <= HIT_RADIUS {
            return Some(ItemRef::marker(marker.id.clone()));
        }
    }
    None
}
