//! Pointer down handling - draft start, drag/resize start, selection.

use super::coords::CoordinateMapper;
use super::hit_test::{HitTarget, hit_test};
use super::{InteractionController, Mode, PointerEvent, PointerOutcome};
use crate::profile_scope;
use crate::session::Session;
use tracing::debug;

impl InteractionController {
    pub fn pointer_down(&mut self, session: &mut Session, event: &PointerEvent) -> PointerOutcome {
        profile_scope!("pointer_down");

        // One gesture at a time
        if self.state.is_active() {
            debug!(state = ?self.state, "Ignoring pointer down during active gesture");
            return PointerOutcome::Ignored;
        }

        let (Some(page), Some(container)) = (session.current_page(), session.container()) else {
            return PointerOutcome::Ignored;
        };

        let point = CoordinateMapper::to_container_point(event.position, &container);
        if !CoordinateMapper::in_container(point, container.size) {
            return PointerOutcome::Ignored;
        }

        // Handles only grab in edit mode; drawing may start right beside a block
        let tolerance = match self.mode {
            Mode::Draw => 0.0,
            Mode::Edit => self.handle_size,
        };
        let hit = hit_test(session.store(), page, point, tolerance);

        match (self.mode, hit) {
            // Drawing never starts on top of an existing block; it selects it instead
            (Mode::Draw, Some(target)) => {
                session.set_active_block(Some(target.uid()));
                PointerOutcome::Selected(Some(target.uid()))
            }
            (Mode::Draw, None) => {
                self.state.start_draft(point);
                PointerOutcome::DraftStarted
            }
            (Mode::Edit, Some(HitTarget::Handle(uid, handle))) => {
                let Some(start_rect) = session.store().get(uid).map(|b| b.rect()) else {
                    return PointerOutcome::Ignored;
                };
                session.set_active_block(Some(uid));
                self.state.start_resizing(uid, handle, point, start_rect);
                PointerOutcome::ResizeStarted(uid, handle)
            }
            (Mode::Edit, Some(HitTarget::Body(uid))) => {
                let Some(start_rect) = session.store().get(uid).map(|b| b.rect()) else {
                    return PointerOutcome::Ignored;
                };
                session.set_active_block(Some(uid));
                self.state.start_dragging(uid, point, start_rect);
                PointerOutcome::DragStarted(uid)
            }
            (Mode::Edit, None) => {
                session.set_active_block(None);
                PointerOutcome::Selected(None)
            }
        }
    }
}
