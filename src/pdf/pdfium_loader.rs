//! PDFium library loader with platform-specific search paths.

use super::RenderError;
use crate::constants::PDFIUM_LIBRARY_NAME;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct PdfiumLoader;

impl PdfiumLoader {
    /// Load the PDFium library from known search paths or system library.
    ///
    /// Search order:
    /// 1. `extra_dir` (the `pdfium_library_dir` setting), if given
    /// 2. `lib/` in current working directory (development)
    /// 3. `lib/` relative to executable
    /// 4. `Resources/lib/` in a macOS bundle
    /// 5. System library fallback
    pub fn load(extra_dir: Option<&Path>) -> Result<Pdfium, RenderError> {
        for path in Self::search_paths(extra_dir) {
            if !path.exists() {
                continue;
            }
            match Pdfium::bind_to_library(&path) {
                Ok(bindings) => {
                    debug!(path = %path.display(), "Loaded pdfium");
                    return Ok(Pdfium::new(bindings));
                }
                Err(e) => debug!(path = %path.display(), error = ?e, "Skipping unusable pdfium"),
            }
        }
        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| RenderError::LibraryUnavailable(format!("{e:?}")))
    }

    pub fn search_paths(extra_dir: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(dir) = extra_dir {
            paths.push(dir.join(PDFIUM_LIBRARY_NAME));
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join("lib").join(PDFIUM_LIBRARY_NAME));
        }

        if let Ok(exe) = std::env::current_exe() {
            if let Some(parent) = exe.parent() {
                paths.push(parent.join("lib").join(PDFIUM_LIBRARY_NAME));

                if let Some(grandparent) = parent.parent() {
                    paths.push(grandparent.join("Resources/lib").join(PDFIUM_LIBRARY_NAME));
                }
            }
        }

        paths
    }
}
