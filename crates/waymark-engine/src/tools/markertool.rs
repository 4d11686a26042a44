// Imports
use super::{ToolBehaviour, ToolStyle};
use crate::WidgetFlags;
use crate::engine::{EngineView, EngineViewMut};
use crate::items::Marker;
use waymark_compose::EventResult;
use waymark_compose::pointerevent::{PointerEvent, ToolProgress};

/// The marker tool: single-shot, one click places one marker of the configured kind, then the
/// holder reverts to the select tool.
#[derive(Debug, Clone, Default)]
pub struct MarkerTool;

impl ToolBehaviour for MarkerTool {
    fn init(&mut self, _engine_view: &EngineView) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn deinit(&mut self) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn style(&self) -> ToolStyle {
        ToolStyle::Marker
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
                let marker = Marker::new(engine_view.tools_config.marker_tool.kind, coord)
                    .with_color(engine_view.tools_config.marker_tool.color);

                widget_flags |= engine_view.store.clear_selection()
                    | engine_view.store.insert_marker(marker);
                EventResult::consumed(ToolProgress::Finished)
            }
            PointerEvent::Cancel => EventResult::consumed(ToolProgress::Finished),
            _ => EventResult::ignored(ToolProgress::Idle),
        };

        (event_result, widget_flags)
    }
}
