//! Application-wide constants.
//!
//! Centralizes magic numbers so input handling, rendering and persistence
//! agree on the same values.

// ============================================================================
// Block Geometry
// ============================================================================

/// Smallest width/height a resize may shrink a block to, in pixels
pub const MIN_BLOCK_SIZE: f32 = 1.0;

/// Default distance from a block edge that still grabs the resize handle
pub const DEFAULT_HANDLE_SIZE: f32 = 6.0;

// ============================================================================
// Pages & Rendering
// ============================================================================

/// Default page render scale (page points to overlay pixels)
pub const DEFAULT_RENDER_SCALE: f32 = 1.5;

/// Smallest accepted render scale
pub const MIN_RENDER_SCALE: f32 = 0.1;

/// Largest accepted render scale
pub const MAX_RENDER_SCALE: f32 = 8.0;

/// Upper bound on pages targeted by a single copy request
pub const MAX_COPY_TARGETS: usize = 10_000;

// ============================================================================
// Tables
// ============================================================================

/// Default rows offered when marking a block as a table
pub const DEFAULT_TABLE_ROWS: usize = 3;

/// Default columns offered when marking a block as a table
pub const DEFAULT_TABLE_COLS: usize = 3;

// ============================================================================
// Overlay Colors (RGBA)
// ============================================================================

/// Stroke for committed blocks
pub const BLOCK_STROKE_COLOR: [u8; 4] = [220, 38, 38, 255];

/// Stroke for the active (selected) block
pub const ACTIVE_STROKE_COLOR: [u8; 4] = [234, 88, 12, 255];

/// Stroke for the in-progress draft rectangle
pub const DRAFT_STROKE_COLOR: [u8; 4] = [37, 99, 235, 255];

/// Table grid lines inside a block
pub const GRID_STROKE_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Block outline thickness in pixels
pub const BLOCK_STROKE_WIDTH: u32 = 2;

/// Dash and gap length for dashed strokes, in pixels
pub const DASH_LENGTH: u32 = 6;

// ============================================================================
// Files
// ============================================================================

/// Default export file name
pub const DEFAULT_EXPORT_FILE: &str = "blocks.json";

/// PDFium dynamic library file name for the current platform
#[cfg(target_os = "macos")]
pub const PDFIUM_LIBRARY_NAME: &str = "libpdfium.dylib";

/// PDFium dynamic library file name for the current platform
#[cfg(target_os = "windows")]
pub const PDFIUM_LIBRARY_NAME: &str = "pdfium.dll";

/// PDFium dynamic library file name for the current platform
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const PDFIUM_LIBRARY_NAME: &str = "libpdfium.so";
