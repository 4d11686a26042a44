// Imports
use super::{ToolBehaviour, ToolStyle};
use crate::WidgetFlags;
use crate::engine::{EngineView, EngineViewMut};
use waymark_compose::EventResult;
use waymark_compose::pointerevent::{PointerEvent, ToolProgress};

/// The route tool. Its drawing state is the store's in-progress route buffer, which survives
/// switching tools; only finishing or cancelling consumes it.
#[derive(Debug, Clone, Default)]
pub struct RouteTool;

impl ToolBehaviour for RouteTool {
    fn init(&mut self, _engine_view: &EngineView) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn deinit(&mut self) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn style(&self) -> ToolStyle {
        ToolStyle::Route
    }

    fn handle_event(
        &mut self,
        event: PointerEvent,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<ToolProgress>, WidgetFlags) {
        let mut widget_flags = WidgetFlags::default();

        let event_result = match event {
            PointerEvent::Click { position } => {
                let coord = engine_view.camera.unproject(position);
                widget_flags |= engine_view.store.clear_selection()
                    | engine_view.store.add_to_current_route(coord);
                EventResult::consumed(ToolProgress::InProgress)
            }
            PointerEvent::DoubleClick { .. } => {
                // finishes only, the double click must not append another point
                widget_flags |= engine_view.store.finish_current_route();
                EventResult::consumed(ToolProgress::Finished)
            }
            PointerEvent::Cancel => {
                widget_flags |= engine_view.store.clear_current_route();
                EventResult::consumed(ToolProgress::Finished)
            }
            PointerEvent::Down { .. }
            | PointerEvent::Move { .. }
            | PointerEvent::Up { .. }
            | PointerEvent::KeyPressed { .. } => {
                // the viewport keeps panning normally while a route is drawn
                let progress = if engine_view.store.current_route().is_empty() {
                    ToolProgress::Idle
                } else {
                    ToolProgress::InProgress
                };
                EventResult::ignored(progress)
            }
        };

        (event_result, widget_flags)
    }
}
