//! Rename, delete, copy and table actions as a host UI would invoke them.

use crate::helpers::{TestAnnotatorBuilder, assert_block_count, block};
use blockmark::geometry::Rect;
use blockmark::input::{Key, ModifierKey, PointerEvent, PointerOutcome};
use std::collections::HashSet;
use uuid::Uuid;

fn one_block(pages: usize) -> (blockmark::Annotator, Uuid) {
    let (annotator, uids) = TestAnnotatorBuilder::new()
        .with_pages(pages)
        .with_block(1, Rect::new(40.0, 60.0, 120.0, 80.0))
        .build();
    (annotator, uids[0])
}

#[test]
fn test_rename() {
    let (mut annotator, uid) = one_block(1);
    assert!(annotator.rename_block(uid, "Invoice total"));
    assert_eq!(block(&annotator, uid).label, "Invoice total");
    assert_eq!(annotator.overlay().unwrap().blocks[0].label, "Invoice total");
}

#[test]
fn test_copy_range_creates_one_block_per_page() {
    let (mut annotator, uid) = one_block(5);
    annotator.rename_block(uid, "header");

    let copies = annotator.copy_block(uid, "2-4");

    assert_eq!(copies.len(), 3);
    let distinct: HashSet<Uuid> = copies.iter().copied().chain([uid]).collect();
    assert_eq!(distinct.len(), 4);

    let pages: Vec<u32> = copies.iter().map(|c| block(&annotator, *c).page).collect();
    assert_eq!(pages, vec![2, 3, 4]);
    for copy in &copies {
        let copied = block(&annotator, *copy);
        assert_eq!(copied.rect(), Rect::new(40.0, 60.0, 120.0, 80.0));
        assert_eq!(copied.label, "header");
    }
    assert_block_count(&annotator, 4);
}

#[test]
fn test_copy_reversed_range_creates_nothing() {
    let (mut annotator, uid) = one_block(5);
    assert!(annotator.copy_block(uid, "4-2").is_empty());
    assert_block_count(&annotator, 1);
}

#[test]
fn test_copy_garbage_creates_nothing() {
    let (mut annotator, uid) = one_block(5);
    for input in ["", "abc", "0", "2-x", "-3"] {
        assert!(annotator.copy_block(uid, input).is_empty(), "copied for {input:?}");
    }
    assert_block_count(&annotator, 1);
}

#[test]
fn test_copy_to_source_page_adds_second_block() {
    let (mut annotator, uid) = one_block(2);
    let copies = annotator.copy_block(uid, "1");
    assert_eq!(copies.len(), 1);
    assert_eq!(annotator.session.store().blocks_for_page(1).len(), 2);
}

#[test]
fn test_copy_keeps_table() {
    let (mut annotator, uid) = one_block(3);
    annotator.toggle_table(uid, 2, 2);
    annotator.session.set_table_cell(uid, 0, 0, "qty");

    let copies = annotator.copy_block(uid, "3");

    let table = block(&annotator, copies[0]).table.clone().unwrap();
    assert_eq!(table.rows(), 2);
    assert_eq!(table.cell(0, 0), Some("qty"));
}

#[test]
fn test_attach_then_detach_table() {
    let (mut annotator, uid) = one_block(1);
    let before = block(&annotator, uid).clone();

    assert!(annotator.session.attach_table(uid, 3, 3));
    let table = block(&annotator, uid).table.clone().unwrap();
    assert_eq!((table.rows(), table.cols()), (3, 3));
    assert!(table.data().iter().flatten().all(String::is_empty));

    assert!(annotator.session.detach_table(uid));
    assert_eq!(block(&annotator, uid), &before);
    assert!(!annotator.session.detach_table(uid));
}

#[test]
fn test_attach_table_rejects_empty_dimension() {
    let (mut annotator, uid) = one_block(1);
    assert!(!annotator.session.attach_table(uid, 0, 3));
    assert!(!annotator.session.attach_table(uid, 3, 0));
    assert!(block(&annotator, uid).table.is_none());
}

#[test]
fn test_attach_table_replaces_existing() {
    let (mut annotator, uid) = one_block(1);
    annotator.session.attach_table(uid, 2, 2);
    annotator.session.set_table_cell(uid, 1, 1, "x");
    annotator.session.attach_table(uid, 1, 4);

    let table = block(&annotator, uid).table.clone().unwrap();
    assert_eq!((table.rows(), table.cols()), (1, 4));
    assert_eq!(table.cell(0, 0), Some(""));
}

#[test]
fn test_delete_twice_is_noop() {
    let (mut annotator, uid) = one_block(1);
    annotator.session.set_active_block(Some(uid));

    assert!(annotator.delete_block(uid).is_some());
    assert!(annotator.delete_block(uid).is_none());
    assert_eq!(annotator.session.active_block(), None);
    assert_block_count(&annotator, 0);
}

#[test]
fn test_delete_during_drag_ends_gesture() {
    let (mut annotator, uid) = one_block(1);
    annotator.key_down(Key::Modifier(ModifierKey::Alt));
    annotator.pointer_down(&PointerEvent::at(100.0, 100.0));
    assert!(annotator.input.is_active());

    annotator.delete_block(uid);

    assert!(!annotator.input.is_active());
    assert_eq!(annotator.pointer_move(&PointerEvent::at(120.0, 120.0)), PointerOutcome::Ignored);
    assert_block_count(&annotator, 0);
}

#[test]
fn test_actions_on_unknown_uid_are_noops() {
    let (mut annotator, _) = one_block(2);
    let ghost = Uuid::new_v4();

    assert!(!annotator.rename_block(ghost, "x"));
    assert!(annotator.delete_block(ghost).is_none());
    assert!(annotator.copy_block(ghost, "1-2").is_empty());
    assert!(!annotator.toggle_table(ghost, 2, 2));
    assert!(!annotator.go_to_block(ghost));
    assert_block_count(&annotator, 1);
}

#[test]
fn test_display_order_is_page_then_y() {
    let (mut annotator, uids) = TestAnnotatorBuilder::new()
        .with_pages(2)
        .with_block(2, Rect::new(0.0, 5.0, 10.0, 10.0))
        .with_block(1, Rect::new(0.0, 400.0, 10.0, 10.0))
        .with_block(1, Rect::new(0.0, 20.0, 10.0, 10.0))
        .build();

    let order: Vec<Uuid> = annotator.blocks_for_display().iter().map(|b| b.uid).collect();
    assert_eq!(order, vec![uids[2], uids[1], uids[0]]);

    annotator.rename_block(uids[1], "still stored second");
    let stored: Vec<Uuid> = annotator.session.store().blocks_for_page(1).iter().map(|b| b.uid).collect();
    assert_eq!(stored, vec![uids[1], uids[2]]);
}
