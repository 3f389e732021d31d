//! Stroke an overlay scene onto a rendered page image.
//!
//! Outlines only: block boxes, table grid lines and the dashed draft. The
//! scene and the image are expected to share the same pixel space (the page
//! rendered at the scale the overlay was sized for); anything outside the
//! image is clipped.

use super::overlay::{OverlayScene, StrokeStyle};
use crate::constants::{
    ACTIVE_STROKE_COLOR, BLOCK_STROKE_COLOR, BLOCK_STROKE_WIDTH, DASH_LENGTH, DRAFT_STROKE_COLOR,
    GRID_STROKE_COLOR,
};
use crate::geometry::Rect;
use crate::profile_scope;
use image::{Rgba, RgbaImage};

pub fn rasterize_overlay(scene: &OverlayScene, image: &mut RgbaImage) {
    profile_scope!("rasterize_overlay");

    for block in &scene.blocks {
        if let Some(grid) = &block.grid {
            let color = Rgba(GRID_STROKE_COLOR);
            for cell in grid.cells.iter().filter(|c| c.col > 0) {
                vertical(image, cell.rect.x, cell.rect.y, cell.rect.bottom(), 1, color, false);
            }
            for cell in grid.cells.iter().filter(|c| c.row > 0) {
                horizontal(image, cell.rect.y, cell.rect.x, cell.rect.right(), 1, color, false);
            }
        }

        let color = if block.active {
            ACTIVE_STROKE_COLOR
        } else {
            BLOCK_STROKE_COLOR
        };
        stroke_rect(image, block.rect, Rgba(color), block.stroke);
    }

    if let Some(draft) = &scene.draft {
        stroke_rect(image, draft.rect, Rgba(DRAFT_STROKE_COLOR), draft.stroke);
    }
}

fn stroke_rect(image: &mut RgbaImage, rect: Rect, color: Rgba<u8>, style: StrokeStyle) {
    let dashed = style == StrokeStyle::Dashed;
    let width = BLOCK_STROKE_WIDTH;
    let inset = width as f32;
    horizontal(image, rect.y, rect.x, rect.right(), width, color, dashed);
    horizontal(image, rect.bottom() - inset, rect.x, rect.right(), width, color, dashed);
    vertical(image, rect.x, rect.y, rect.bottom(), width, color, dashed);
    vertical(image, rect.right() - inset, rect.y, rect.bottom(), width, color, dashed);
}

fn horizontal(image: &mut RgbaImage, y: f32, x0: f32, x1: f32, width: u32, color: Rgba<u8>, dashed: bool) {
    let (y, x0, x1) = (y.round() as i64, x0.round() as i64, x1.round() as i64);
    for (i, x) in (x0..x1).enumerate() {
        if dashed && is_gap(i) {
            continue;
        }
        for dy in 0..i64::from(width) {
            put(image, x, y + dy, color);
        }
    }
}

fn vertical(image: &mut RgbaImage, x: f32, y0: f32, y1: f32, width: u32, color: Rgba<u8>, dashed: bool) {
    let (x, y0, y1) = (x.round() as i64, y0.round() as i64, y1.round() as i64);
    for (i, y) in (y0..y1).enumerate() {
        if dashed && is_gap(i) {
            continue;
        }
        for dx in 0..i64::from(width) {
            put(image, x + dx, y, color);
        }
    }
}

#[inline]
fn is_gap(i: usize) -> bool {
    (i / DASH_LENGTH as usize) % 2 == 1
}

#[inline]
fn put(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
        if x < image.width() && y < image.height() {
            image.put_pixel(x, y, color);
        }
    }
}
