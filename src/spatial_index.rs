//! Spatial Index Module
//!
//! R-tree based spatial indexing of one page's blocks, so pointer hit tests
//! are O(log n) instead of scanning the whole page.

use crate::geometry::Rect;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;
use uuid::Uuid;

/// A spatial entry representing a block's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub uid: Uuid,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SpatialEntry {
    pub fn new(uid: Uuid, rect: Rect) -> Self {
        Self {
            uid,
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

/// Spatial index for the blocks of a single page.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<Uuid, SpatialEntry>,
}

impl SpatialIndex {
    /// Bulk-load an index from `(uid, rect)` pairs.
    pub fn from_blocks<I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, Rect)>,
    {
        let entries: Vec<SpatialEntry> = blocks
            .into_iter()
            .map(|(uid, rect)| SpatialEntry::new(uid, rect))
            .collect();

        Self {
            entries: entries.iter().map(|e| (e.uid, *e)).collect(),
            tree: RTree::bulk_load(entries),
        }
    }

    /// Insert or move the entry for `uid`.
    pub fn insert(&mut self, uid: Uuid, rect: Rect) {
        if let Some(old_entry) = self.entries.remove(&uid) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(uid, rect);
        self.tree.insert(entry);
        self.entries.insert(uid, entry);
    }

    pub fn remove(&mut self, uid: Uuid) -> bool {
        if let Some(entry) = self.entries.remove(&uid) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// All blocks whose box intersects `rect`.
    pub fn query_rect(&self, rect: Rect) -> Vec<Uuid> {
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.right(), rect.bottom()]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.uid)
            .collect()
    }
}
