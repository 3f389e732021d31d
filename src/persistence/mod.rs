//! JSON import/export of the block collection.
//!
//! Export always writes the array shape: a pretty-printed list of blocks,
//! each carrying its own `page`, in page order then insertion order.
//!
//! Import accepts that shape and the older page-keyed object shape
//! (`{"1": [...], "2": [...]}`). Every block is validated before anything
//! is returned, so a rejected payload never produces a partial store.

mod error;

pub use error::{PersistenceError, PersistenceResult};

use crate::store::BlockStore;
use crate::types::{Block, PageIndex};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Serialize every block as a pretty-printed JSON array.
pub fn export_blocks(store: &BlockStore) -> PersistenceResult<Vec<u8>> {
    let blocks: Vec<&Block> = store.iter().collect();
    let bytes = serde_json::to_vec_pretty(&blocks)?;
    debug!(blocks = blocks.len(), bytes = bytes.len(), "Blocks exported");
    Ok(bytes)
}

/// Parse and validate a block collection.
pub fn import_blocks(bytes: &[u8]) -> PersistenceResult<BlockStore> {
    let value: Value = serde_json::from_slice(bytes)?;
    let blocks = match value {
        Value::Array(items) => items.into_iter().map(decode_block).collect::<Result<Vec<_>, _>>()?,
        Value::Object(pages) => {
            let mut blocks = Vec::new();
            for (key, items) in pages {
                blocks.extend(decode_page(&key, items)?);
            }
            blocks
        }
        other => {
            return Err(PersistenceError::UnrecognizedShape(format!(
                "expected an array or a page-keyed object, found {}",
                json_kind(&other)
            )));
        }
    };

    for block in &blocks {
        validate(block)?;
    }
    BlockStore::from_blocks(blocks).map_err(PersistenceError::DuplicateUid)
}

/// Write the collection to `path` atomically: a temp file in the same
/// directory is filled, then renamed over the target.
pub fn save_to_path(store: &BlockStore, path: &Path) -> PersistenceResult<()> {
    let bytes = export_blocks(store)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    info!(path = %path.display(), blocks = store.len(), "Blocks saved");
    Ok(())
}

pub fn load_from_path(path: &Path) -> PersistenceResult<BlockStore> {
    let bytes = fs::read(path)?;
    let store = import_blocks(&bytes).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "Rejected block file");
    })?;
    info!(path = %path.display(), blocks = store.len(), "Blocks loaded");
    Ok(store)
}

fn decode_block(value: Value) -> PersistenceResult<Block> {
    if !value.is_object() {
        return Err(PersistenceError::UnrecognizedShape(format!(
            "expected a block object, found {}",
            json_kind(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// One entry of the page-keyed shape. A block without `page` takes the key.
fn decode_page(key: &str, items: Value) -> PersistenceResult<Vec<Block>> {
    let page = key
        .trim()
        .parse::<PageIndex>()
        .ok()
        .filter(|page| *page >= 1)
        .ok_or_else(|| PersistenceError::UnrecognizedShape(format!("page key {key:?} is not a page number")))?;

    let Value::Array(items) = items else {
        return Err(PersistenceError::UnrecognizedShape(format!(
            "page {page} holds {}, expected an array of blocks",
            json_kind(&items)
        )));
    };

    items
        .into_iter()
        .map(|mut item| {
            if let Value::Object(fields) = &mut item {
                fields.entry("page").or_insert(Value::from(page));
            }
            let block = decode_block(item)?;
            if block.page != page {
                return Err(PersistenceError::InvalidBlock {
                    uid: block.uid,
                    reason: format!("stored under page {page} but claims page {}", block.page),
                });
            }
            Ok(block)
        })
        .collect()
}

fn validate(block: &Block) -> PersistenceResult<()> {
    let reason = if block.page < 1 {
        "page must be 1 or greater"
    } else if !block.rect().is_valid() {
        "width and height must be positive"
    } else if block.x < 0.0 || block.y < 0.0 {
        "position must not be negative"
    } else if block.table.as_ref().is_some_and(|t| !t.is_consistent()) {
        "table data does not match rows x cols"
    } else {
        return Ok(());
    };
    Err(PersistenceError::InvalidBlock {
        uid: block.uid,
        reason: reason.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
