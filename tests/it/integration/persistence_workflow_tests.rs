//! Export/import through the annotator and through files.

use crate::helpers::{TestAnnotatorBuilder, annotator_with_pages, assert_block_count};
use blockmark::geometry::Rect;
use blockmark::input::PointerEvent;
use blockmark::persistence::{self, PersistenceError};
use tempfile::tempdir;

fn annotated() -> blockmark::Annotator {
    let (mut annotator, uids) = TestAnnotatorBuilder::new()
        .with_pages(3)
        .with_block(1, Rect::new(10.0, 10.0, 40.0, 30.0))
        .with_block(1, Rect::new(100.0, 300.0, 200.0, 80.0))
        .with_block(3, Rect::new(5.5, 7.25, 90.0, 12.0))
        .build();
    annotator.rename_block(uids[0], "title");
    annotator.toggle_table(uids[1], 2, 3);
    annotator.session.set_table_cell(uids[1], 1, 2, "42.00");
    annotator
}

#[test]
fn test_export_import_round_trip() {
    let source = annotated();
    let bytes = source.export().unwrap();

    let mut target = annotator_with_pages(3);
    assert_eq!(target.import(&bytes).unwrap(), 3);

    assert_eq!(target.session.store(), source.session.store());
}

#[test]
fn test_rejected_import_leaves_store_unchanged() {
    let mut annotator = annotated();
    let before = annotator.export().unwrap();

    for payload in [&b"{\"blocks\": 1}"[..], b"[{\"page\": 1}]", b"null", b"<xml/>"] {
        assert!(annotator.import(payload).is_err());
    }

    assert_eq!(annotator.export().unwrap(), before);
}

#[test]
fn test_import_cancels_gesture() {
    let mut annotator = annotated();
    annotator.pointer_down(&PointerEvent::at(400.0, 10.0));
    assert!(annotator.input.is_active());

    annotator.import(b"[]").unwrap();

    assert!(!annotator.input.is_active());
    assert_block_count(&annotator, 0);
}

#[test]
fn test_save_and_load_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blocks.json");
    let source = annotated();

    persistence::save_to_path(source.session.store(), &path).unwrap();
    let loaded = persistence::load_from_path(&path).unwrap();

    assert_eq!(&loaded, source.session.store());
}

#[test]
fn test_save_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blocks.json");
    std::fs::write(&path, "stale").unwrap();

    persistence::save_to_path(annotated().session.store(), &path).unwrap();

    assert_eq!(persistence::load_from_path(&path).unwrap().len(), 3);
    // Only the target remains, no temp files left behind
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = persistence::load_from_path(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(PersistenceError::Io(_))));
}
