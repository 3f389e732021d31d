//! Keyboard handling - the edit modifier switches between draw and edit mode.

use super::{InteractionController, Key, Mode};
use tracing::trace;

impl InteractionController {
    /// Returns true when the key switched the mode.
    pub fn key_down(&mut self, key: Key) -> bool {
        if key == Key::Modifier(self.edit_modifier) {
            self.set_mode(Mode::Edit)
        } else {
            false
        }
    }

    /// Returns true when the key switched the mode.
    pub fn key_up(&mut self, key: Key) -> bool {
        if key == Key::Modifier(self.edit_modifier) {
            self.set_mode(Mode::Draw)
        } else {
            false
        }
    }

    /// Switching mode cancels whatever gesture was in progress. Key repeat
    /// while the modifier is held is not a switch and leaves gestures alone.
    fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.cancel();
        trace!(from = ?self.mode, to = ?mode, "Interaction mode changed");
        self.mode = mode;
        true
    }
}
