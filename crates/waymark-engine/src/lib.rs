#![warn(missing_debug_implementations)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::single_match)]

//! The waymark-engine crate is the editing core of Waymark. It holds the annotation store with its
//! undo/redo history, the tools, the camera and the persistence gateway boundary.
//!
//! The main entry point is the [Engine] struct.

// Modules
pub mod camera;
pub mod document;
pub mod engine;
pub mod gateway;
pub mod items;
pub mod store;
pub mod tools;
pub mod widgetflags;

// Re-exports
pub use camera::Camera;
pub use document::Document;
pub use engine::Engine;
pub use gateway::MapGateway;
pub use store::AnnotationStore;
pub use tools::ToolHolder;
pub use widgetflags::WidgetFlags;

// Renames
extern crate nalgebra as na;
