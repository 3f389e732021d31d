//! Blockmark - rectangular block annotation over document pages.
//!
//! The crate is organised around a single explicit state object:
//!
//! - `store` - the page-scoped block collection (sole owner of block lifetime)
//! - `session` - store + current page + document page sizes + active block
//! - `input` - pointer/keyboard state machine (draw vs edit mode)
//! - `render` - derived overlay scene and its rasterisation
//! - `annotator` - session + input controller + settings, the host-facing API
//! - `pdf` - page renderer boundary and its PDFium implementation
//! - `persistence` - JSON import/export of block collections

pub mod annotator;
pub mod constants;
pub mod geometry;
pub mod input;
pub mod pdf;
pub mod perf;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod spatial_index;
pub mod store;
pub mod types;

pub use annotator::Annotator;
pub use geometry::{Bounds, Point, Rect, Size};
pub use session::Session;
pub use store::{BlockStore, PageSelection};
pub use types::{Block, BlockPatch, PageIndex, TableGrid};
