//! PDF page renderer backed by pdfium.
//!
//! The document bytes are kept and reopened per call; pdfium documents
//! borrow their source, and page requests are rare compared to input events.

use super::{PageRenderer, PdfiumLoader, RenderError};
use crate::constants::{MAX_RENDER_SCALE, MIN_RENDER_SCALE};
use crate::geometry::Size;
use crate::profile_scope;
use crate::types::PageIndex;
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

pub struct PdfiumPageRenderer {
    pdfium: Pdfium,
    bytes: Vec<u8>,
    page_count: u32,
}

impl PdfiumPageRenderer {
    pub fn open(path: &Path, library_dir: Option<&Path>) -> Result<Self, RenderError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes, library_dir)
    }

    pub fn from_bytes(bytes: Vec<u8>, library_dir: Option<&Path>) -> Result<Self, RenderError> {
        let pdfium = PdfiumLoader::load(library_dir)?;
        let page_count = {
            let document = pdfium
                .load_pdf_from_byte_slice(&bytes, None)
                .map_err(|e| RenderError::Document(format!("{e:?}")))?;
            u32::from(document.pages().len())
        };
        debug!(pages = page_count, "PDF opened");
        Ok(Self {
            pdfium,
            bytes,
            page_count,
        })
    }

    fn with_page<T>(
        &self,
        page: PageIndex,
        f: impl FnOnce(&PdfPage<'_>) -> Result<T, RenderError>,
    ) -> Result<T, RenderError> {
        let index = page
            .checked_sub(1)
            .filter(|index| *index < self.page_count)
            .and_then(|index| u16::try_from(index).ok())
            .ok_or(RenderError::PageOutOfRange {
                page,
                count: self.page_count,
            })?;
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(|e| RenderError::Document(format!("{e:?}")))?;
        let pdf_page = document.pages().get(index).map_err(|e| RenderError::Page {
            page,
            reason: format!("{e:?}"),
        })?;
        f(&pdf_page)
    }
}

fn check_scale(scale: f32) -> Result<(), RenderError> {
    if scale.is_finite() && (MIN_RENDER_SCALE..=MAX_RENDER_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(RenderError::InvalidScale(scale))
    }
}

impl PageRenderer for PdfiumPageRenderer {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_dimensions(&self, page: PageIndex, scale: f32) -> Result<Size, RenderError> {
        check_scale(scale)?;
        self.with_page(page, |pdf_page| {
            Ok(Size::new(
                (pdf_page.width().value * scale).round(),
                (pdf_page.height().value * scale).round(),
            ))
        })
    }

    fn render_page(&self, page: PageIndex, scale: f32, target: &mut RgbaImage) -> Result<(), RenderError> {
        profile_scope!("render_page", 50.0);
        check_scale(scale)?;
        self.with_page(page, |pdf_page| {
            let config = PdfRenderConfig::new().scale_page_by_factor(scale);
            let bitmap = pdf_page
                .render_with_config(&config)
                .map_err(|e| RenderError::Page {
                    page,
                    reason: format!("{e:?}"),
                })?;
            let (width, height) = (bitmap.width().max(0) as u32, bitmap.height().max(0) as u32);
            *target = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
                RenderError::Page {
                    page,
                    reason: format!("bitmap does not match {width}x{height}"),
                }
            })?;
            Ok(())
        })
    }
}
