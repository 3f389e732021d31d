//! Overlay presenter - a declarative scene for the current page.
//!
//! The scene borrows nothing: it is a snapshot the host can keep while
//! the next event mutates the session.

use crate::geometry::{Rect, Size};
use crate::input::InteractionController;
use crate::profile_scope;
use crate::session::Session;
use crate::types::{Block, PageIndex, TableGrid};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayScene {
    pub page: PageIndex,
    /// Container size in pixels
    pub size: Size,
    /// Committed blocks in storage order (later ones paint on top)
    pub blocks: Vec<BlockShape>,
    pub draft: Option<DraftShape>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockShape {
    pub uid: Uuid,
    pub rect: Rect,
    pub label: String,
    pub active: bool,
    pub stroke: StrokeStyle,
    pub grid: Option<GridShape>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellShape>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellShape {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    /// Cell content, or its 1-based row-major index when empty
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DraftShape {
    pub rect: Rect,
    pub stroke: StrokeStyle,
}

pub struct OverlayPresenter;

impl OverlayPresenter {
    /// Scene for the current page, or `None` in the zero-page state.
    pub fn present(session: &Session, input: &InteractionController) -> Option<OverlayScene> {
        profile_scope!("present_overlay");
        let page = session.current_page()?;
        let size = session.page_size(page)?;
        let active = session.active_block();

        let blocks = session
            .store()
            .blocks_for_page(page)
            .iter()
            .map(|block| Self::block_shape(block, active == Some(block.uid)))
            .collect();

        let draft = input
            .draft()
            .filter(|rect| rect.width > 0.0 || rect.height > 0.0)
            .map(|rect| DraftShape {
                rect,
                stroke: StrokeStyle::Dashed,
            });

        Some(OverlayScene {
            page,
            size,
            blocks,
            draft,
        })
    }

    fn block_shape(block: &Block, active: bool) -> BlockShape {
        let rect = block.rect();
        BlockShape {
            uid: block.uid,
            rect,
            label: block.label.clone(),
            active,
            stroke: StrokeStyle::Solid,
            grid: block.table.as_ref().map(|table| Self::grid_shape(table, rect)),
        }
    }

    fn grid_shape(table: &TableGrid, rect: Rect) -> GridShape {
        let (rows, cols) = (table.rows(), table.cols());
        let cell_width = rect.width / cols as f32;
        let cell_height = rect.height / rows as f32;

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                let text = match table.cell(row, col) {
                    Some(text) if !text.is_empty() => text.to_string(),
                    _ => (row * cols + col + 1).to_string(),
                };
                CellShape {
                    row,
                    col,
                    rect: Rect::new(
                        rect.x + col as f32 * cell_width,
                        rect.y + row as f32 * cell_height,
                        cell_width,
                        cell_height,
                    ),
                    text,
                }
            })
            .collect();

        GridShape { rows, cols, cells }
    }
}
