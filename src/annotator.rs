//! Host-facing entry point: session, input controller and settings together.
//!
//! The host UI forwards raw pointer/key events and the results of its own
//! prompts (labels, table sizes, copy ranges) here, and asks for the
//! overlay scene when it repaints. Anything that changes what is on screen
//! underneath a gesture (navigation, deletion, import) cancels the gesture
//! first.

use crate::input::{InteractionController, Key, PointerEvent, PointerOutcome};
use crate::pdf::{PageRenderer, RenderError};
use crate::persistence::PersistenceError;
use crate::render::{OverlayPresenter, OverlayScene};
use crate::session::Session;
use crate::settings::Settings;
use crate::store::PageSelection;
use crate::types::{Block, PageIndex};
use uuid::Uuid;

pub struct Annotator {
    pub session: Session,
    pub input: InteractionController,
    pub settings: Settings,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Annotator {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: Session::new(),
            input: InteractionController::from_settings(&settings),
            settings,
        }
    }

    pub fn open_document(&mut self, renderer: &dyn PageRenderer) -> Result<(), RenderError> {
        self.input.cancel();
        self.session
            .load_document_from(renderer, self.settings.render_scale)
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        self.input.pointer_down(&mut self.session, event)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> PointerOutcome {
        self.input.pointer_move(&mut self.session, event)
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> PointerOutcome {
        self.input.pointer_up(&mut self.session, event)
    }

    pub fn key_down(&mut self, key: Key) -> bool {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        self.input.key_up(key)
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn next_page(&mut self) -> bool {
        self.input.cancel();
        self.session.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.input.cancel();
        self.session.previous_page()
    }

    pub fn go_to_page(&mut self, page: PageIndex) -> bool {
        self.input.cancel();
        self.session.go_to_page(page)
    }

    pub fn go_to_block(&mut self, uid: Uuid) -> bool {
        self.input.cancel();
        self.session.go_to_block(uid)
    }

    // ------------------------------------------------------------------------
    // Block actions
    // ------------------------------------------------------------------------

    pub fn rename_block(&mut self, uid: Uuid, label: impl Into<String>) -> bool {
        self.session.rename_block(uid, label)
    }

    pub fn delete_block(&mut self, uid: Uuid) -> Option<Block> {
        if self.input.target_block() == Some(uid) {
            self.input.cancel();
        }
        self.session.delete_block(uid)
    }

    /// Copy to pages given as `"N"` or `"start-end"`.
    pub fn copy_block(&mut self, uid: Uuid, pages: &str) -> Vec<Uuid> {
        self.session.copy_block(uid, &PageSelection::parse(pages))
    }

    pub fn toggle_table(&mut self, uid: Uuid, rows: usize, cols: usize) -> bool {
        self.session.toggle_table(uid, rows, cols)
    }

    pub fn import(&mut self, bytes: &[u8]) -> Result<usize, PersistenceError> {
        self.input.cancel();
        self.session.import(bytes)
    }

    pub fn export(&self) -> Result<Vec<u8>, PersistenceError> {
        self.session.export()
    }

    // ------------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------------

    pub fn overlay(&self) -> Option<OverlayScene> {
        OverlayPresenter::present(&self.session, &self.input)
    }

    pub fn blocks_for_display(&self) -> Vec<&Block> {
        self.session.blocks_for_display()
    }
}
