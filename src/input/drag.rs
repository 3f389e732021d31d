//! Pointer move handling - draft updates, block drag and resize.
//!
//! ## Performance Notes
//!
//! Pointer move fires at display rate during a gesture. Each step is a
//! single in-place store update; the draft never touches the store.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::coords::CoordinateMapper;
use super::{InputState, InteractionController, PointerEvent, PointerOutcome};
use crate::geometry::{Point, Rect, Size};
use crate::profile_scope;
use crate::session::Session;
use crate::types::BlockPatch;
use tracing::debug;

impl InteractionController {
    pub fn pointer_move(&mut self, session: &mut Session, event: &PointerEvent) -> PointerOutcome {
        profile_scope!("pointer_move");

        if self.state.is_idle() {
            return PointerOutcome::Ignored;
        }

        let Some(container) = session.container() else {
            // Document went away under the gesture
            self.cancel();
            return PointerOutcome::Ignored;
        };
        let point = CoordinateMapper::to_container_point(event.position, &container);
        self.step(session, container.size, point)
    }

    /// Advance the active gesture to `point` (container-relative).
    pub(super) fn step(&mut self, session: &mut Session, container: Size, point: Point) -> PointerOutcome {
        match self.state {
            InputState::Idle => PointerOutcome::Ignored,

            InputState::Drafting { .. } => {
                self.state.set_draft_current(point);
                PointerOutcome::DraftUpdated
            }

            InputState::DraggingBlock {
                uid,
                start_pointer,
                start_rect,
            } => {
                profile_scope!("block_drag");
                let delta = point - start_pointer;
                let moved = CoordinateMapper::clamp_to_container(
                    Rect::new(
                        start_rect.x + delta.x,
                        start_rect.y + delta.y,
                        start_rect.width,
                        start_rect.height,
                    ),
                    container,
                );
                if session.store_mut().update(uid, &BlockPatch::position(moved.x, moved.y)) {
                    PointerOutcome::Moved(uid)
                } else {
                    debug!(%uid, "Dragged block vanished, ending drag");
                    self.state.reset();
                    PointerOutcome::Ignored
                }
            }

            InputState::ResizingBlock {
                uid,
                handle,
                start_pointer,
                start_rect,
            } => {
                profile_scope!("block_resize");
                let delta = point - start_pointer;
                let resized = CoordinateMapper::apply_resize_delta(start_rect, handle, delta);
                let resized = CoordinateMapper::constrain_resize(resized, handle, container);
                if session.store_mut().update(uid, &BlockPatch::rect(resized)) {
                    PointerOutcome::Resized(uid)
                } else {
                    debug!(%uid, "Resized block vanished, ending resize");
                    self.state.reset();
                    PointerOutcome::Ignored
                }
            }
        }
    }
}
