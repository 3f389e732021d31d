//! Core types for block annotation.
//!
//! A `Block` is a user-declared rectangle on one page. It may carry a
//! `TableGrid` describing a rows x cols cell structure laid over the block.
//! Blocks are addressed by a stable `uid` for their whole lifetime, never by
//! position in a collection.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 1-based page number within the loaded document.
pub type PageIndex = u32;

// ============================================================================
// TableGrid
// ============================================================================

/// A rows x cols grid of cell text, addressed row-major as `data[r][c]`.
///
/// Dimensions are fixed at creation; only cell contents change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    rows: usize,
    cols: usize,
    data: Vec<Vec<String>>,
}

impl TableGrid {
    /// Create a grid with every cell empty. Returns `None` for a zero dimension.
    pub fn new(rows: usize, cols: usize) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(Self {
            rows,
            cols,
            data: vec![vec![String::new(); cols]; rows],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn data(&self) -> &[Vec<String>] {
        &self.data
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.data.get(row)?.get(col).map(String::as_str)
    }

    /// Replace one cell's content. Out-of-range addresses are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) -> bool {
        match self.data.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = text.into();
                true
            }
            None => false,
        }
    }

    /// Positive dimensions and a `data` matrix of exactly `rows x cols`.
    ///
    /// Always true for grids built with `new`; deserialized grids are checked
    /// on import.
    pub fn is_consistent(&self) -> bool {
        self.rows > 0
            && self.cols > 0
            && self.data.len() == self.rows
            && self.data.iter().all(|row| row.len() == self.cols)
    }
}

// ============================================================================
// Block
// ============================================================================

/// A rectangular annotated region on a single page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub uid: Uuid,
    pub page: PageIndex,
    #[serde(default)]
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableGrid>,
}

impl Block {
    /// Create a block with a freshly generated uid.
    pub fn new(page: PageIndex, rect: Rect, label: impl Into<String>) -> Self {
        Self {
            uid: Uuid::new_v4(),
            page,
            label: label.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            table: None,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Full clone onto another page: new uid, same geometry, label and table.
    pub fn clone_to_page(&self, page: PageIndex) -> Block {
        Block {
            uid: Uuid::new_v4(),
            page,
            ..self.clone()
        }
    }

    /// Whether this block satisfies every storage invariant.
    pub fn is_valid(&self) -> bool {
        self.page >= 1
            && self.rect().is_valid()
            && self.x >= 0.0
            && self.y >= 0.0
            && self.table.as_ref().is_none_or(TableGrid::is_consistent)
    }
}

// ============================================================================
// BlockPatch
// ============================================================================

/// Partial update for a block.
///
/// There is no `page` field: moving a block to another page is
/// only possible through a copy, which keeps `page` and the storage key in
/// sync. `table` is doubly optional: `None` leaves the table alone,
/// `Some(None)` detaches it and `Some(Some(grid))` replaces it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockPatch {
    pub label: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub table: Option<Option<TableGrid>>,
}

impl BlockPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Default::default()
        }
    }

    pub fn table(table: Option<TableGrid>) -> Self {
        Self {
            table: Some(table),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch over `block`, returning the updated copy.
    ///
    /// `uid` and `page` always come from `block`.
    pub fn apply_to(&self, block: &Block) -> Block {
        let mut merged = block.clone();
        if let Some(label) = &self.label {
            merged.label = label.clone();
        }
        if let Some(x) = self.x {
            merged.x = x;
        }
        if let Some(y) = self.y {
            merged.y = y;
        }
        if let Some(width) = self.width {
            merged.width = width;
        }
        if let Some(height) = self.height {
            merged.height = height;
        }
        if let Some(table) = &self.table {
            merged.table = table.clone();
        }
        merged
    }
}
