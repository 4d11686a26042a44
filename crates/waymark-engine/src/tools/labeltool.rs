// Imports
use super::{ToolBehaviour, ToolStyle};
use crate::WidgetFlags;
use crate::engine::{EngineView, EngineViewMut};
use crate::items::{ItemRef, Label};
use waymark_compose::EventResult;
use waymark_compose::pointerevent::{PointerEvent, ToolProgress};

/// The label tool: single-shot like the marker tool, but the freshly placed label becomes the
/// selection so its placeholder text can be replaced right away.
#[derive(Debug, Clone, Default)]
pub struct LabelTool;

impl ToolBehaviour for LabelTool {
    fn init(&mut self, _engine_view: &EngineView) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn deinit(&mut self) -> WidgetFlags {
        WidgetFlags::default()
    }

    fn style(&self) -> ToolStyle {
        ToolStyle::Label
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
                let label = Label::new(
                    engine_view.tools_config.label_tool.placeholder_text.clone(),
                    coord,
                    engine_view.tools_config.label_tool.color,
                );
                let item = ItemRef::label(label.id.clone());

                widget_flags |= engine_view.store.clear_selection()
                    | engine_view.store.insert_label(label)
                    | engine_view.store.set_selection(Some(item));
                widget_flags.focus_text_input = Some(true);
                EventResult::consumed(ToolProgress::Finished)
            }
            PointerEvent::Cancel => EventResult::consumed(ToolProgress::Finished),
            _ => EventResult::ignored(ToolProgress::Idle),
        };

        (event_result, widget_flags)
    }
}
