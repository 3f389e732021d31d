//! Block store - the authoritative, page-scoped block collection.
//!
//! Blocks live in one ordered `Vec` per page (insertion order is the
//! canonical order). A uid → page map keeps lookups O(1), and a per-page
//! R-tree serves pointer hit tests.
//!
//! Every mutation reads and writes the block in place, so two consecutive
//! operations on the same block always see each other's result. Operations
//! on unknown uids are benign no-ops that return `false`/`None`.

mod page_selection;

pub use page_selection::PageSelection;

use crate::geometry::{Point, Rect};
use crate::spatial_index::SpatialIndex;
use crate::types::{Block, BlockPatch, PageIndex, TableGrid};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
pub struct BlockStore {
    pages: BTreeMap<PageIndex, Vec<Block>>,
    locations: HashMap<Uuid, PageIndex>,
    indexes: HashMap<PageIndex, SpatialIndex>,
}

impl PartialEq for BlockStore {
    fn eq(&self, other: &Self) -> bool {
        self.pages == other.pages
    }
}

impl std::fmt::Debug for BlockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockStore").field("pages", &self.pages).finish()
    }
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-validated blocks, keeping their order
    /// within each page. Fails with the first repeated uid.
    pub fn from_blocks<I>(blocks: I) -> Result<Self, Uuid>
    where
        I: IntoIterator<Item = Block>,
    {
        let mut pages: BTreeMap<PageIndex, Vec<Block>> = BTreeMap::new();
        let mut locations = HashMap::new();
        for block in blocks {
            if locations.insert(block.uid, block.page).is_some() {
                return Err(block.uid);
            }
            pages.entry(block.page).or_default().push(block);
        }

        let indexes = pages
            .iter()
            .map(|(page, blocks)| {
                let index = SpatialIndex::from_blocks(blocks.iter().map(|b| (b.uid, b.rect())));
                (*page, index)
            })
            .collect();

        Ok(Self {
            pages,
            locations,
            indexes,
        })
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn get(&self, uid: Uuid) -> Option<&Block> {
        let page = self.locations.get(&uid)?;
        self.pages.get(page)?.iter().find(|b| b.uid == uid)
    }

    pub fn contains(&self, uid: Uuid) -> bool {
        self.locations.contains_key(&uid)
    }

    /// Read-only view of one page, in insertion order.
    pub fn blocks_for_page(&self, page: PageIndex) -> &[Block] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty pages in ascending page order.
    pub fn pages(&self) -> impl Iterator<Item = (PageIndex, &[Block])> {
        self.pages.iter().map(|(page, blocks)| (*page, blocks.as_slice()))
    }

    /// Every block: page order, then insertion order within a page.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.pages.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// All blocks ordered by `(page, y)` for list views. Storage order is
    /// untouched; ties keep insertion order.
    pub fn sorted_for_display(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.iter().collect();
        blocks.sort_by(|a, b| a.page.cmp(&b.page).then(a.y.total_cmp(&b.y)));
        blocks
    }

    /// Top-most block on `page` whose box, grown by `tolerance`, contains
    /// `point`. Later insertions are drawn on top and win.
    pub fn block_at(&self, page: PageIndex, point: Point, tolerance: f32) -> Option<&Block> {
        let index = self.indexes.get(&page)?;
        let probe = Rect::new(point.x, point.y, 0.0, 0.0).inflate(tolerance);
        let candidates: HashSet<Uuid> = index.query_rect(probe).into_iter().collect();
        if candidates.is_empty() {
            return None;
        }
        self.blocks_for_page(page)
            .iter()
            .rev()
            .find(|b| candidates.contains(&b.uid))
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Create a block on `page`. Returns `None` (and stores nothing) when the
    /// rect has no positive area or the page is not a valid page number.
    pub fn create(&mut self, page: PageIndex, rect: Rect, label: Option<String>) -> Option<Uuid> {
        if page == 0 || !rect.is_valid() {
            debug!(page, ?rect, "Discarding block with invalid geometry");
            return None;
        }
        let rect = Rect::new(rect.x.max(0.0), rect.y.max(0.0), rect.width, rect.height);
        let block = Block::new(page, rect, label.unwrap_or_default());
        let uid = block.uid;
        self.insert_block(block);
        Some(uid)
    }

    /// Merge `patch` into the block. Rejects the whole patch when the merged
    /// block would break a storage invariant.
    pub fn update(&mut self, uid: Uuid, patch: &BlockPatch) -> bool {
        let Some(block) = self.get_mut(uid) else {
            debug!(%uid, "Ignoring update for unknown block");
            return false;
        };
        let merged = patch.apply_to(block);
        if !merged.is_valid() {
            debug!(%uid, ?patch, "Rejecting update that would invalidate block");
            return false;
        }
        let moved = merged.rect() != block.rect();
        *block = merged;
        if moved {
            self.reindex(uid);
        }
        true
    }

    /// Remove the block. Unknown uids are a no-op returning `None`.
    pub fn delete(&mut self, uid: Uuid) -> Option<Block> {
        let Some(page) = self.locations.remove(&uid) else {
            debug!(%uid, "Ignoring delete for unknown block");
            return None;
        };
        let blocks = self.pages.get_mut(&page)?;
        let position = blocks.iter().position(|b| b.uid == uid)?;
        let removed = blocks.remove(position);
        if blocks.is_empty() {
            self.pages.remove(&page);
            self.indexes.remove(&page);
        } else if let Some(index) = self.indexes.get_mut(&page) {
            index.remove(uid);
        }
        Some(removed)
    }

    /// Clone the block onto each target page (the source page included if
    /// listed). Every copy gets a fresh uid and keeps label and table.
    pub fn copy_to_pages<I>(&mut self, uid: Uuid, pages: I) -> Vec<Uuid>
    where
        I: IntoIterator<Item = PageIndex>,
    {
        let Some(source) = self.get(uid).cloned() else {
            debug!(%uid, "Ignoring copy of unknown block");
            return Vec::new();
        };
        pages
            .into_iter()
            .filter(|page| *page >= 1)
            .map(|page| {
                let copy = source.clone_to_page(page);
                let copy_uid = copy.uid;
                self.insert_block(copy);
                copy_uid
            })
            .collect()
    }

    /// Attach an empty `rows x cols` table, replacing any existing one.
    pub fn attach_table(&mut self, uid: Uuid, rows: usize, cols: usize) -> bool {
        let Some(grid) = TableGrid::new(rows, cols) else {
            debug!(%uid, rows, cols, "Ignoring table with empty dimension");
            return false;
        };
        self.update(uid, &BlockPatch::table(Some(grid)))
    }

    /// Remove the table if present.
    pub fn detach_table(&mut self, uid: Uuid) -> bool {
        match self.get(uid) {
            Some(block) if block.table.is_some() => self.update(uid, &BlockPatch::table(None)),
            _ => false,
        }
    }

    /// Detach when a table is attached, otherwise attach a new one.
    pub fn toggle_table(&mut self, uid: Uuid, rows: usize, cols: usize) -> bool {
        match self.get(uid).map(|b| b.table.is_some()) {
            Some(true) => self.detach_table(uid),
            Some(false) => self.attach_table(uid, rows, cols),
            None => false,
        }
    }

    pub fn set_table_cell(&mut self, uid: Uuid, row: usize, col: usize, text: impl Into<String>) -> bool {
        self.get_mut(uid)
            .and_then(|b| b.table.as_mut())
            .is_some_and(|table| table.set_cell(row, col, text))
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Append an already-built block. Callers guarantee validity and a fresh
    /// uid; duplicates are refused.
    fn insert_block(&mut self, block: Block) -> bool {
        if self.locations.contains_key(&block.uid) {
            return false;
        }
        let page = block.page;
        self.locations.insert(block.uid, page);
        self.indexes
            .entry(page)
            .or_default()
            .insert(block.uid, block.rect());
        self.pages.entry(page).or_default().push(block);
        true
    }

    fn get_mut(&mut self, uid: Uuid) -> Option<&mut Block> {
        let page = self.locations.get(&uid)?;
        self.pages.get_mut(page)?.iter_mut().find(|b| b.uid == uid)
    }

    fn reindex(&mut self, uid: Uuid) {
        if let Some(block) = self.get(uid) {
            let (page, rect) = (block.page, block.rect());
            self.indexes.entry(page).or_default().insert(uid, rect);
        }
    }
}
