// Imports
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A pointer event, emitted by the viewport that embeds the engine.
///
/// Positions are in surface (pixel) coordinates. The engine converts them to logical coordinates
/// through its camera, so embedders never project themselves.
///
/// `Down` / `Move` / `Up` describe a raw press-drag-release sequence and must be delivered even
/// when the pointer leaves the viewport bounds mid-drag (track the pointer globally, as a drag is
/// only terminated by `Up` or `Cancel`). `Click` and `DoubleClick` are the viewport's synthesized
/// gesture events and arrive after the raw sequence they originate from.
#[derive(Debug, Clone)]
pub enum PointerEvent {
    /// The pointer was pressed down.
    Down {
        /// The surface position of the press.
        position: na::Vector2<f64>,
        /// Modifier keys pressed during the event.
        modifier_keys: HashSet<ModifierKey>,
    },
    /// The pointer moved while pressed down. Emitted repeatedly during a drag.
    Move {
        /// The surface position the pointer moved to.
        position: na::Vector2<f64>,
    },
    /// The pointer was released.
    Up {
        /// The surface position of the release.
        position: na::Vector2<f64>,
    },
    /// A click gesture on the viewport.
    Click {
        /// The surface position of the click.
        position: na::Vector2<f64>,
    },
    /// A double click gesture on the viewport.
    DoubleClick {
        /// The surface position of the double click.
        position: na::Vector2<f64>,
    },
    /// A keyboard key pressed event.
    KeyPressed {
        /// The key.
        keyboard_key: KeyboardKey,
        /// Modifier keys pressed during the event.
        modifier_keys: HashSet<ModifierKey>,
    },
    /// Cancel event when the pointer vanishes unexpectedly.
    ///
    /// Should finish all current actions and reset all tool state.
    Cancel,
}

/// A key on the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyboardKey {
    /// A unicode character.
    Unicode(char),
    /// Escape.
    Escape,
    /// Delete.
    Delete,
    /// Unsupported key.
    Unsupported,
}

/// A modifier key.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename = "modifier_key")]
pub enum ModifierKey {
    /// Shift.
    #[serde(rename = "keyboard_shift")]
    KeyboardShift,
    /// Ctrl.
    #[serde(rename = "keyboard_ctrl")]
    KeyboardCtrl,
    /// Alt.
    #[serde(rename = "keyboard_alt")]
    KeyboardAlt,
}

/// The progress of the current tool while handling events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToolProgress {
    /// In idle state.
    Idle,
    /// In progress state.
    InProgress,
    /// The tool is finished with its current interaction.
    Finished,
}
