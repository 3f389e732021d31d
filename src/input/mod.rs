//! Pointer and keyboard input handling for the page overlay.
//!
//! ## Architecture
//!
//! `InteractionController` owns the interaction mode and an explicit
//! gesture state machine (`InputState`). It holds no block data: every
//! handler receives the `Session` by reference, reads the latest committed
//! block from the store at gesture start and writes each step back through
//! the store, so consecutive gestures on the same block never work from a
//! stale copy.
//!
//! ## Modules
//!
//! - `state` - Mode and gesture state enums
//! - `events` - Host-agnostic pointer and key events
//! - `coords` - Viewport/container conversion and rect math
//! - `hit_test` - Block body vs resize handle detection
//! - `mouse_down` - Pointer down (draft/drag/resize start, selection)
//! - `drag` - Pointer move (draft update, drag, resize)
//! - `mouse_up` - Pointer up (commit draft, end gesture)
//! - `keyboard` - Modifier-driven mode switching

pub mod coords;
mod drag;
mod events;
mod keyboard;
mod mouse_down;
mod mouse_up;
mod state;

pub use coords::CoordinateMapper;
pub use events::{Key, ModifierKey, PointerEvent};
pub use hit_test::{HitTarget, ResizeHandle};
pub use state::{InputState, Mode};

use crate::constants::DEFAULT_HANDLE_SIZE;
use crate::geometry::Rect;
use crate::settings::Settings;
use tracing::debug;
use uuid::Uuid;

/// What a pointer event did, so the host knows whether to re-render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerOutcome {
    /// Nothing changed
    Ignored,
    /// The active block changed (or was cleared)
    Selected(Option<Uuid>),
    DraftStarted,
    DraftUpdated,
    /// Draft committed as a new block
    BlockCreated(Uuid),
    /// Draft released with no area
    DraftDiscarded,
    DragStarted(Uuid),
    Moved(Uuid),
    ResizeStarted(Uuid, ResizeHandle),
    Resized(Uuid),
    /// Drag or resize finished
    GestureEnded(Uuid),
}

pub struct InteractionController {
    mode: Mode,
    state: InputState,
    edit_modifier: ModifierKey,
    handle_size: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ModifierKey::default(), DEFAULT_HANDLE_SIZE)
    }
}

impl InteractionController {
    pub fn new(edit_modifier: ModifierKey, handle_size: f32) -> Self {
        Self {
            mode: Mode::Draw,
            state: InputState::Idle,
            edit_modifier,
            handle_size: handle_size.max(0.0),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.edit_modifier, settings.handle_size)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn edit_modifier(&self) -> ModifierKey {
        self.edit_modifier
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Block being dragged or resized, if any.
    pub fn target_block(&self) -> Option<Uuid> {
        self.state.target_block()
    }

    /// The ephemeral draft rectangle while drawing.
    pub fn draft(&self) -> Option<Rect> {
        self.state
            .draft_points()
            .map(|(start, current)| CoordinateMapper::resolve_rect(start, current))
    }

    /// Abandon the active gesture without committing anything further.
    ///
    /// Drag and resize steps are persisted as they happen, so a cancelled
    /// drag leaves the block where the last completed move put it. A
    /// cancelled draft is simply dropped.
    pub fn cancel(&mut self) {
        if self.state.is_active() {
            debug!(state = ?self.state, "Cancelling active gesture");
            self.state.reset();
        }
    }
}
