//! Coordinate mapping for overlay interactions.
//!
//! Converts viewport pointer positions into container-relative geometry and
//! centralizes the rectangle math shared by drafting, dragging and resizing.

use super::hit_test::ResizeHandle;
use crate::constants::MIN_BLOCK_SIZE;
use crate::geometry::{Bounds, Point, Rect, Size};

pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Viewport position to container-relative position. No clamping.
    #[inline]
    pub fn to_container_point(position: Point, container: &Bounds) -> Point {
        position - container.origin
    }

    /// Normalize two corners into a top-left anchored rect.
    #[inline]
    pub fn resolve_rect(start: Point, end: Point) -> Rect {
        Rect::new(
            start.x.min(end.x),
            start.y.min(end.y),
            (end.x - start.x).abs(),
            (end.y - start.y).abs(),
        )
    }

    /// Apply a cumulative pointer `delta` to `rect` through `handle`.
    ///
    /// Only the edges named by the handle move; the opposite edges stay
    /// fixed. A moving edge never crosses its opposite edge, so the result
    /// is at least `MIN_BLOCK_SIZE` in both dimensions, or the starting size
    /// for a block already narrower than that.
    pub fn apply_resize_delta(rect: Rect, handle: ResizeHandle, delta: Point) -> Rect {
        let edges = handle.edges();
        let mut left = rect.x;
        let mut top = rect.y;
        let mut right = rect.right();
        let mut bottom = rect.bottom();

        if edges.left {
            left = (left + delta.x).min((right - MIN_BLOCK_SIZE).max(left));
        }
        if edges.right {
            right = (right + delta.x).max((left + MIN_BLOCK_SIZE).min(right));
        }
        if edges.top {
            top = (top + delta.y).min((bottom - MIN_BLOCK_SIZE).max(top));
        }
        if edges.bottom {
            bottom = (bottom + delta.y).max((top + MIN_BLOCK_SIZE).min(bottom));
        }

        Rect::new(left, top, right - left, bottom - top)
    }

    /// Keep the moving edges of a resized rect inside the container. Fixed
    /// edges are left alone.
    pub fn constrain_resize(rect: Rect, handle: ResizeHandle, container: Size) -> Rect {
        let edges = handle.edges();
        let mut left = rect.x;
        let mut top = rect.y;
        let mut right = rect.right();
        let mut bottom = rect.bottom();

        if edges.left {
            left = left.min(right - MIN_BLOCK_SIZE).max(0.0);
        }
        if edges.right {
            right = right.min(container.width).max(left + MIN_BLOCK_SIZE);
        }
        if edges.top {
            top = top.min(bottom - MIN_BLOCK_SIZE).max(0.0);
        }
        if edges.bottom {
            bottom = bottom.min(container.height).max(top + MIN_BLOCK_SIZE);
        }

        Rect::new(left, top, right - left, bottom - top)
    }

    /// Shift `rect` so it lies inside the container, keeping its size.
    /// A rect larger than the container is pinned to the top-left corner.
    pub fn clamp_to_container(rect: Rect, container: Size) -> Rect {
        let max_x = (container.width - rect.width).max(0.0);
        let max_y = (container.height - rect.height).max(0.0);
        Rect::new(rect.x.clamp(0.0, max_x), rect.y.clamp(0.0, max_y), rect.width, rect.height)
    }

    /// Part of `rect` that falls inside the container, if any.
    pub fn clip_to_container(rect: Rect, container: Size) -> Option<Rect> {
        rect.intersection(&Rect::new(0.0, 0.0, container.width, container.height))
    }

    /// True when a container-relative point is on the container.
    #[inline]
    pub fn in_container(point: Point, container: Size) -> bool {
        Rect::new(0.0, 0.0, container.width, container.height).contains(point)
    }
}
