// Imports
use super::{Tool, ToolBehaviour, ToolStyle};
use super::{LabelTool, MarkerTool, RouteTool, SelectTool};
use crate::engine::EngineViewMut;
use crate::widgetflags::WidgetFlags;
use waymark_compose::EventResult;
use waymark_compose::eventresult::EventPropagation;
use waymark_compose::pointerevent::{KeyboardKey, PointerEvent, ToolProgress};

/// The toolholder holds the current tool and drives the drawing-mode state machine.
///
/// Styles are mutually exclusive: exactly one tool is installed at any time, and every transition
/// goes through [ToolHolder::change_style]. Single-shot tools transition back to
/// [ToolStyle::Select] through the [ToolProgress::Finished] they report after one placement.
#[derive(Debug)]
pub struct ToolHolder {
    style: ToolStyle,
    current_tool: Tool,
}

impl Default for ToolHolder {
    fn default() -> Self {
        Self {
            style: ToolStyle::default(),
            current_tool: Tool::default(),
        }
    }
}

impl ToolHolder {
    /// The current tool style.
    pub fn style(&self) -> ToolStyle {
        self.style
    }

    pub fn current_tool_ref(&self) -> &Tool {
        &self.current_tool
    }

    /// Change the tool style, deinitializing the previous tool and installing a fresh one.
    ///
    /// Deinit cleans up interaction state only, so an unfinished route buffer survives switching
    /// tools. Discarding it is reserved for an explicit cancel.
    pub fn change_style(
        &mut self,
        new_style: ToolStyle,
        engine_view: &mut EngineViewMut,
    ) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();

        if self.style != new_style {
            widget_flags |= self.current_tool.deinit();

            let mut new_tool = new_tool(new_style);
            widget_flags |= new_tool.init(&engine_view.as_im());
            self.current_tool = new_tool;
            self.style = new_style;

            widget_flags.refresh_ui = true;
        }

        widget_flags
    }

    /// Handle a pointer event with the current tool.
    pub fn handle_pointer_event(
        &mut self,
        event: PointerEvent,
        engine_view: &mut EngineViewMut,
    ) -> (EventPropagation, WidgetFlags) {
        let (mut event_result, mut widget_flags) =
            self.current_tool.handle_event(event.clone(), engine_view);

        if !event_result.handled {
            let (fallback_result, wf) = self.handle_event_fallback(event, engine_view);
            if fallback_result.handled {
                event_result = fallback_result;
            }
            widget_flags |= wf;
        }

        widget_flags |= self.handle_tool_progress(event_result.progress, engine_view);

        // Always redraw after handling a pointer event
        widget_flags.redraw = true;

        (event_result.propagate, widget_flags)
    }

    /// Handles the event in the global scope if the current tool has not handled it.
    ///
    /// Escape cancels the running interaction, deselects and returns to the select tool. Delete
    /// removes the selected item.
    fn handle_event_fallback(
        &mut self,
        event: PointerEvent,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<ToolProgress>, WidgetFlags) {
        let mut widget_flags = WidgetFlags::default();

        let event_result = match event {
            PointerEvent::KeyPressed {
                keyboard_key: KeyboardKey::Escape,
                ..
            } => {
                let (_, wf) = self
                    .current_tool
                    .handle_event(PointerEvent::Cancel, engine_view);
                widget_flags |= wf | engine_view.store.clear_selection();
                EventResult::consumed(ToolProgress::Finished)
            }
            PointerEvent::KeyPressed {
                keyboard_key: KeyboardKey::Delete,
                ..
            } => {
                if let Some(item) = engine_view.store.selection().cloned() {
                    widget_flags |= engine_view.store.delete_item(&item);
                    EventResult::consumed(ToolProgress::Idle)
                } else {
                    EventResult::ignored(ToolProgress::Idle)
                }
            }
            _ => EventResult::ignored(ToolProgress::Idle),
        };

        (event_result, widget_flags)
    }

    /// Single-shot tools revert to the select tool when they report being finished.
    fn handle_tool_progress(
        &mut self,
        progress: ToolProgress,
        engine_view: &mut EngineViewMut,
    ) -> WidgetFlags {
        match progress {
            ToolProgress::Idle | ToolProgress::InProgress => WidgetFlags::default(),
            ToolProgress::Finished => self.change_style(ToolStyle::Select, engine_view),
        }
    }
}

fn new_tool(style: ToolStyle) -> Tool {
    match style {
        ToolStyle::Select => Tool::Select(SelectTool::default()),
        ToolStyle::Route => Tool::Route(RouteTool::default()),
        ToolStyle::Marker => Tool::Marker(MarkerTool::default()),
        ToolStyle::Label => Tool::Label(LabelTool::default()),
    }
}
