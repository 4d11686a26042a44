// Imports
use super::ToolStyle;
use crate::WidgetFlags;
use crate::engine::{EngineView, EngineViewMut};
use waymark_compose::EventResult;
use waymark_compose::pointerevent::{PointerEvent, ToolProgress};

/// Types implementing this trait are tools: the exclusive handlers of viewport pointer events
/// while their style is active.
pub trait ToolBehaviour {
    /// Init the tool when it is installed as the current tool.
    fn init(&mut self, engine_view: &EngineView) -> WidgetFlags;

    /// Deinit the tool before it is replaced.
    ///
    /// Must leave no dangling interaction state (an active drag is ended and the view pan gesture
    /// re-enabled), but keeps durable editing state such as the in-progress route buffer.
    fn deinit(&mut self) -> WidgetFlags;

    /// The style this tool implements.
    fn style(&self) -> ToolStyle;

    /// Handle a pointer event.
    ///
    /// Reporting [ToolProgress::Finished] makes the holder revert to the select tool, which is how
    /// single-shot placement and finishing a route return to idle.
    fn handle_event(
        &mut self,
        event: PointerEvent,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<ToolProgress>, WidgetFlags);
}
