//! Host-agnostic input events delivered by the UI event loop.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys that can be configured as the edit-mode switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Alt,
    Control,
    Shift,
    /// Command on macOS, Super/Windows elsewhere
    Platform,
}

/// A key transition reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Modifier(ModifierKey),
    Character(char),
    Other,
}

/// Pointer event with its position in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
}

impl PointerEvent {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Point::new(x, y))
    }
}
