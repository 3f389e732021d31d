//! Page rendering boundary.
//!
//! The annotation core only needs page pixel sizes; `PageRenderer` is the
//! seam a host (or the CLI) uses to supply them and to paint page content.
//!
//! - `PageRenderer` - what the core consumes
//! - `PdfiumPageRenderer` - PDF implementation backed by pdfium
//! - `PdfiumLoader` - PDFium library lookup
//!
//! Pages are 1-based throughout.

mod pdfium_loader;
mod renderer;

pub use pdfium_loader::PdfiumLoader;
pub use renderer::PdfiumPageRenderer;

use crate::geometry::Size;
use crate::types::PageIndex;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load pdfium: {0}")]
    LibraryUnavailable(String),

    #[error("Failed to open document: {0}")]
    Document(String),

    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: PageIndex, count: u32 },

    #[error("Render scale {0} out of range")]
    InvalidScale(f32),

    #[error("Failed to render page {page}: {reason}")]
    Page { page: PageIndex, reason: String },
}

pub trait PageRenderer {
    fn page_count(&self) -> u32;

    /// Pixel size of `page` at `scale`.
    fn page_dimensions(&self, page: PageIndex, scale: f32) -> Result<Size, RenderError>;

    /// Draw `page` at `scale` into `target`, replacing its contents and size.
    fn render_page(&self, page: PageIndex, scale: f32, target: &mut RgbaImage) -> Result<(), RenderError>;
}
