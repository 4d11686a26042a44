#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![allow(clippy::single_match)]

//! the waymark-compose crate provides waymark with the building blocks that are shared between the
//! editing engine and its embedders: colors, pointer events and event result plumbing.

// Modules
/// colors
pub mod color;
/// event results
pub mod eventresult;
/// module for pointer events
pub mod pointerevent;

// Re-exports
pub use color::Color;
pub use eventresult::EventResult;
pub use pointerevent::PointerEvent;

// Renames
extern crate nalgebra as na;
