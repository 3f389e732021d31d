//! User settings persisted as JSON in the platform config directory.
//!
//! Every field has a default, so a partial or older settings file still
//! loads. A missing or unreadable file falls back to defaults.

use crate::constants::{DEFAULT_HANDLE_SIZE, DEFAULT_RENDER_SCALE, MAX_RENDER_SCALE, MIN_RENDER_SCALE};
use crate::input::ModifierKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Held to switch from draw mode to edit mode
    pub edit_modifier: ModifierKey,
    /// Page points to overlay pixels
    pub render_scale: f32,
    /// Grab distance for resize handles, in pixels
    pub handle_size: f32,
    /// Extra directory searched first for the PDFium library
    pub pdfium_library_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edit_modifier: ModifierKey::default(),
            render_scale: DEFAULT_RENDER_SCALE,
            handle_size: DEFAULT_HANDLE_SIZE,
            pdfium_library_dir: None,
        }
    }
}

impl Settings {
    /// `<config dir>/blockmark/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("blockmark").join("settings.json"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Settings loaded");
        Ok(settings.sanitized())
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Pull out-of-range values back to something usable.
    pub fn sanitized(mut self) -> Self {
        self.render_scale = if self.render_scale.is_finite() {
            self.render_scale.clamp(MIN_RENDER_SCALE, MAX_RENDER_SCALE)
        } else {
            DEFAULT_RENDER_SCALE
        };
        if !self.handle_size.is_finite() || self.handle_size < 0.0 {
            self.handle_size = DEFAULT_HANDLE_SIZE;
        }
        self
    }
}
