//! Explicit annotation state: the block store plus everything the overlay
//! needs to know about the document being annotated.
//!
//! `Session` is the single owner of the block collection, the loaded
//! document's page sizes, the current page, the on-screen container origin
//! and the active (selected) block. The input controller and the overlay
//! presenter receive it by reference; nothing here is global.
//!
//! With no document loaded (zero pages) there is no current page, no
//! container, navigation is refused and the overlay renders nothing.

use crate::geometry::{Bounds, Point, Rect, Size};
use crate::pdf::{PageRenderer, RenderError};
use crate::persistence::{self, PersistenceError};
use crate::store::{BlockStore, PageSelection};
use crate::types::{Block, BlockPatch, PageIndex};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Session {
    store: BlockStore,
    /// Pixel size of each page at the render scale, index 0 is page 1
    page_sizes: Vec<Size>,
    current_page: PageIndex,
    container_origin: Point,
    active_block: Option<Uuid>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing block collection (e.g. an import).
    pub fn with_store(store: BlockStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------------
    // Document
    // ------------------------------------------------------------------------

    /// Install the pixel sizes of the loaded document's pages and go to page 1.
    /// An empty list is the zero-page state.
    pub fn load_document(&mut self, page_sizes: Vec<Size>) {
        info!(pages = page_sizes.len(), "Document loaded");
        self.current_page = if page_sizes.is_empty() { 0 } else { 1 };
        self.page_sizes = page_sizes;
        self.active_block = None;
    }

    /// Query every page's dimensions from a renderer at `scale`.
    pub fn load_document_from(
        &mut self,
        renderer: &dyn PageRenderer,
        scale: f32,
    ) -> Result<(), RenderError> {
        let sizes = (1..=renderer.page_count())
            .map(|page| renderer.page_dimensions(page, scale))
            .collect::<Result<Vec<_>, _>>()?;
        self.load_document(sizes);
        Ok(())
    }

    /// Back to the zero-page state. Blocks are kept.
    pub fn close_document(&mut self) {
        self.page_sizes.clear();
        self.current_page = 0;
        self.active_block = None;
    }

    pub fn page_count(&self) -> u32 {
        self.page_sizes.len() as u32
    }

    pub fn has_document(&self) -> bool {
        !self.page_sizes.is_empty()
    }

    pub fn current_page(&self) -> Option<PageIndex> {
        (self.current_page >= 1).then_some(self.current_page)
    }

    pub fn page_size(&self, page: PageIndex) -> Option<Size> {
        let index = usize::try_from(page.checked_sub(1)?).ok()?;
        self.page_sizes.get(index).copied()
    }

    /// Overlay container in viewport space: the host-reported origin with
    /// the current page's pixel size.
    pub fn container(&self) -> Option<Bounds> {
        let size = self.page_size(self.current_page()?)?;
        Some(Bounds::new(self.container_origin, size))
    }

    /// Where the host placed the overlay container in its viewport.
    pub fn set_container_origin(&mut self, origin: Point) {
        self.container_origin = origin;
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn next_page(&mut self) -> bool {
        match self.current_page() {
            Some(page) if page < self.page_count() => self.go_to_page(page + 1),
            _ => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page() {
            Some(page) if page > 1 => self.go_to_page(page - 1),
            _ => false,
        }
    }

    /// Jump to `page`, clamped to the document. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: PageIndex) -> bool {
        if !self.has_document() {
            return false;
        }
        let target = page.clamp(1, self.page_count());
        if target == self.current_page {
            return false;
        }
        debug!(from = self.current_page, to = target, "Page changed");
        self.current_page = target;
        // Selection does not follow the user across pages
        if self
            .active_block
            .and_then(|uid| self.store.get(uid))
            .is_some_and(|b| b.page != target)
        {
            self.active_block = None;
        }
        true
    }

    /// Show the block's page and select it.
    pub fn go_to_block(&mut self, uid: Uuid) -> bool {
        let Some(page) = self.store.get(uid).map(|b| b.page) else {
            debug!(%uid, "Ignoring go_to_block for unknown block");
            return false;
        };
        if self.has_document() && page > self.page_count() {
            debug!(%uid, page, "Block lies beyond the loaded document");
            return false;
        }
        if self.has_document() {
            self.go_to_page(page);
        }
        self.active_block = Some(uid);
        true
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn active_block(&self) -> Option<Uuid> {
        self.active_block
    }

    pub fn set_active_block(&mut self, uid: Option<Uuid>) {
        self.active_block = uid.filter(|uid| self.store.contains(*uid));
    }

    // ------------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------------

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut BlockStore {
        &mut self.store
    }

    /// Blocks on the current page, insertion order.
    pub fn current_blocks(&self) -> &[Block] {
        self.current_page()
            .map(|page| self.store.blocks_for_page(page))
            .unwrap_or(&[])
    }

    /// Every block sorted by `(page, y)` for list views.
    pub fn blocks_for_display(&self) -> Vec<&Block> {
        self.store.sorted_for_display()
    }

    /// Create a block on the current page.
    pub fn create_block(&mut self, rect: Rect, label: Option<String>) -> Option<Uuid> {
        let page = self.current_page()?;
        self.store.create(page, rect, label)
    }

    pub fn rename_block(&mut self, uid: Uuid, label: impl Into<String>) -> bool {
        self.store.update(uid, &BlockPatch::label(label))
    }

    pub fn delete_block(&mut self, uid: Uuid) -> Option<Block> {
        let removed = self.store.delete(uid)?;
        if self.active_block == Some(uid) {
            self.active_block = None;
        }
        Some(removed)
    }

    /// Copy a block to every page of `selection`. Pages past the end of a
    /// loaded document are skipped.
    pub fn copy_block(&mut self, uid: Uuid, selection: &PageSelection) -> Vec<Uuid> {
        let limit = self.has_document().then(|| self.page_count());
        let pages = selection
            .pages()
            .filter(|page| limit.is_none_or(|count| *page <= count));
        let copies = self.store.copy_to_pages(uid, pages);
        if !copies.is_empty() {
            info!(%uid, copies = copies.len(), "Block copied");
            self.active_block = None;
        }
        copies
    }

    pub fn attach_table(&mut self, uid: Uuid, rows: usize, cols: usize) -> bool {
        self.store.attach_table(uid, rows, cols)
    }

    pub fn detach_table(&mut self, uid: Uuid) -> bool {
        self.store.detach_table(uid)
    }

    pub fn toggle_table(&mut self, uid: Uuid, rows: usize, cols: usize) -> bool {
        self.store.toggle_table(uid, rows, cols)
    }

    pub fn set_table_cell(&mut self, uid: Uuid, row: usize, col: usize, text: impl Into<String>) -> bool {
        self.store.set_table_cell(uid, row, col, text)
    }

    // ------------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------------

    /// Replace the block collection with an imported payload. A rejected
    /// payload leaves the session untouched.
    pub fn import(&mut self, bytes: &[u8]) -> Result<usize, PersistenceError> {
        let store = persistence::import_blocks(bytes)?;
        let count = store.len();
        self.store = store;
        self.active_block = None;
        info!(blocks = count, "Blocks imported");
        Ok(count)
    }

    pub fn export(&self) -> Result<Vec<u8>, PersistenceError> {
        persistence::export_blocks(&self.store)
    }
}
