//! Overlay rendering.
//!
//! - `overlay` - derives the drawable scene from session + input state
//! - `raster` - strokes a scene onto an RGBA page image
//!
//! Neither module mutates blocks; the scene is rebuilt from scratch
//! whenever the host wants to repaint.

pub mod overlay;
pub mod raster;

pub use overlay::{BlockShape, CellShape, DraftShape, GridShape, OverlayPresenter, OverlayScene, StrokeStyle};
pub use raster::rasterize_overlay;
