//! Pointer up handling - commit drafts, finish drags and resizes.

use super::coords::CoordinateMapper;
use super::{InputState, InteractionController, PointerEvent, PointerOutcome};
use crate::profile_scope;
use crate::session::Session;
use tracing::debug;

impl InteractionController {
    pub fn pointer_up(&mut self, session: &mut Session, event: &PointerEvent) -> PointerOutcome {
        profile_scope!("pointer_up");

        if self.state.is_idle() {
            return PointerOutcome::Ignored;
        }

        let Some(container) = session.container() else {
            self.cancel();
            return PointerOutcome::Ignored;
        };
        let point = CoordinateMapper::to_container_point(event.position, &container);

        match self.state {
            InputState::Idle => PointerOutcome::Ignored,

            InputState::Drafting { start, .. } => {
                // The draft is cleared whatever happens next
                self.state.reset();

                let rect = CoordinateMapper::resolve_rect(start, point);
                let committed = CoordinateMapper::clip_to_container(rect, container.size)
                    .filter(|rect| rect.is_valid())
                    .and_then(|rect| session.create_block(rect, None));

                match committed {
                    Some(uid) => PointerOutcome::BlockCreated(uid),
                    None => {
                        debug!(?rect, "Discarding empty draft");
                        PointerOutcome::DraftDiscarded
                    }
                }
            }

            InputState::DraggingBlock { uid, .. } | InputState::ResizingBlock { uid, .. } => {
                // The release position is the final step of the gesture
                let outcome = self.step(session, container.size, point);
                self.state.reset();
                match outcome {
                    PointerOutcome::Ignored => PointerOutcome::Ignored,
                    _ => PointerOutcome::GestureEnded(uid),
                }
            }
        }
    }
}
