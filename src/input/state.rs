//! Input state machine - mode and gesture state for overlay interactions.
//!
//! Two orthogonal axes: `Mode` (which gestures a pointer-down starts,
//! selected by the edit modifier key) and `InputState` (the gesture in
//! progress, if any).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Drafting          (pointer down on empty overlay, draw mode)
//! Idle -> DraggingBlock     (pointer down on a block body, edit mode)
//! Idle -> ResizingBlock     (pointer down on a block edge/corner, edit mode)
//!
//! Any -> Idle               (pointer up - commits, or mode switch - cancels)
//! ```

use super::hit_test::ResizeHandle;
use crate::geometry::{Point, Rect};
use uuid::Uuid;

/// Interaction mode, driven solely by the edit modifier key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Pointer gestures draw new blocks
    #[default]
    Draw,
    /// Pointer gestures move and resize existing blocks
    Edit,
}

/// Gesture in progress. Points are container-relative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InputState {
    /// No active gesture
    #[default]
    Idle,

    /// Drawing a new block; only the ephemeral draft changes
    Drafting {
        /// Where the pointer went down
        start: Point,
        /// Latest pointer position
        current: Point,
    },

    /// Moving a block by its body
    DraggingBlock {
        uid: Uuid,
        /// Pointer position at gesture start
        start_pointer: Point,
        /// Block geometry at gesture start
        start_rect: Rect,
    },

    /// Resizing a block by one of its handles; the opposite edges stay put
    ResizingBlock {
        uid: Uuid,
        handle: ResizeHandle,
        /// Pointer position at gesture start
        start_pointer: Point,
        /// Block geometry at gesture start
        start_rect: Rect,
    },
}

impl InputState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if any gesture is active
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    /// Returns true if currently drawing a draft
    pub fn is_drafting(&self) -> bool {
        matches!(self, Self::Drafting { .. })
    }

    /// Returns true if currently dragging a block
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingBlock { .. })
    }

    /// Returns true if currently resizing a block
    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingBlock { .. })
    }

    /// Block targeted by a drag or resize
    pub fn target_block(&self) -> Option<Uuid> {
        match self {
            Self::DraggingBlock { uid, .. } | Self::ResizingBlock { uid, .. } => Some(*uid),
            _ => None,
        }
    }

    /// Draft corners `(start, current)`, if drafting
    pub fn draft_points(&self) -> Option<(Point, Point)> {
        match self {
            Self::Drafting { start, current } => Some((*start, *current)),
            _ => None,
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Start drawing a draft
    pub fn start_draft(&mut self, start: Point) {
        *self = Self::Drafting {
            start,
            current: start,
        };
    }

    /// Update the draft's moving corner
    pub fn set_draft_current(&mut self, current: Point) {
        if let Self::Drafting { current: c, .. } = self {
            *c = current;
        }
    }

    /// Start dragging a block
    pub fn start_dragging(&mut self, uid: Uuid, start_pointer: Point, start_rect: Rect) {
        *self = Self::DraggingBlock {
            uid,
            start_pointer,
            start_rect,
        };
    }

    /// Start resizing a block
    pub fn start_resizing(&mut self, uid: Uuid, handle: ResizeHandle, start_pointer: Point, start_rect: Rect) {
        *self = Self::ResizingBlock {
            uid,
            handle,
            start_pointer,
            start_rect,
        };
    }
}
