// Modules
pub mod labeltool;
pub mod markertool;
pub mod routetool;
pub mod selecttool;
pub mod toolbehaviour;
pub mod toolholder;
pub mod toolsconfig;

// Re-exports
pub use labeltool::LabelTool;
pub use markertool::MarkerTool;
pub use routetool::RouteTool;
pub use selecttool::SelectTool;
pub use toolbehaviour::ToolBehaviour;
pub use toolholder::ToolHolder;
pub use toolsconfig::ToolsConfig;

// Imports
use crate::WidgetFlags;
use crate::engine::{EngineView, EngineViewMut};
use serde::{Deserialize, Serialize};
use waymark_compose::EventResult;
use waymark_compose::pointerevent::{PointerEvent, ToolProgress};

/// The current tool, dispatching events to the concrete tool state machines.
#[derive(Debug)]
pub enum Tool {
    Select(SelectTool),
    Route(RouteTool),
    Marker(MarkerTool),
    Label(LabelTool),
}

impl Default for Tool {
    fn default() -> Self {
        Self::Select(SelectTool::default())
    }
}

impl ToolBehaviour for Tool {
    fn init(&mut self, engine_view: &EngineView) -> WidgetFlags {
        match self {
            Tool::Select(selecttool) => selecttool.init(engine_view),
            Tool::Route(routetool) => routetool.init(engine_view),
            Tool::Marker(markertool) => markertool.init(engine_view),
            Tool::Label(labeltool) => labeltool.init(engine_view),
        }
    }

    fn deinit(&mut self) -> WidgetFlags {
        match self {
            Tool::Select(selecttool) => selecttool.deinit(),
            Tool::Route(routetool) => routetool.deinit(),
            Tool::Marker(markertool) => markertool.deinit(),
            Tool::Label(labeltool) => labeltool.deinit(),
        }
    }

    fn style(&self) -> ToolStyle {
        match self {
            Tool::Select(selecttool) => selecttool.style(),
            Tool::Route(routetool) => routetool.style(),
            Tool::Marker(markertool) => markertool.style(),
            Tool::Label(labeltool) => labeltool.style(),
        }
    }

    fn handle_event(
        &mut self,
        event: PointerEvent,
        engine_view: &mut EngineViewMut,
    ) -> (EventResult<ToolProgress>, WidgetFlags) {
        match self {
            Tool::Select(selecttool) => selecttool.handle_event(event, engine_view),
            Tool::Route(routetool) => routetool.handle_event(event, engine_view),
            Tool::Marker(markertool) => markertool.handle_event(event, engine_view),
            Tool::Label(labeltool) => labeltool.handle_event(event, engine_view),
        }
    }
}

/// The exclusive drawing mode, deciding what a viewport gesture means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename = "tool_style")]
pub enum ToolStyle {
    /// Select and move existing items; the viewport pans underneath.
    #[serde(rename = "select")]
    Select,
    /// Clicks append points to the in-progress route.
    #[serde(rename = "route")]
    Route,
    /// The next click places one marker.
    #[serde(rename = "marker")]
    Marker,
    /// The next click places one label.
    #[serde(rename = "label")]
    Label,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self::Select
    }
}

impl std::str::FromStr for ToolStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "route" => Ok(Self::Route),
            "marker" => Ok(Self::Marker),
            "label" => Ok(Self::Label),
            s => Err(anyhow::anyhow!(
                "Creating ToolStyle from &str failed, invalid name {s}"
            )),
        }
    }
}

impl std::fmt::Display for ToolStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolStyle::Select => write!(f, "select"),
            ToolStyle::Route => write!(f, "route"),
            ToolStyle::Marker => write!(f, "marker"),
            ToolStyle::Label => write!(f, "label"),
        }
    }
}
