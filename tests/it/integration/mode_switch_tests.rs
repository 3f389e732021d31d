//! Modifier-driven mode switching and gesture cancellation.

use crate::helpers::{TestAnnotatorBuilder, annotator_with_pages, assert_block_count, assert_rect};
use blockmark::geometry::Rect;
use blockmark::input::{Key, Mode, ModifierKey, PointerEvent, PointerOutcome, ResizeHandle};
use blockmark::settings::Settings;

#[test]
fn test_modifier_switches_mode() {
    let mut annotator = annotator_with_pages(1);
    assert_eq!(annotator.input.mode(), Mode::Draw);

    assert!(annotator.key_down(Key::Modifier(ModifierKey::Alt)));
    assert_eq!(annotator.input.mode(), Mode::Edit);

    assert!(annotator.key_up(Key::Modifier(ModifierKey::Alt)));
    assert_eq!(annotator.input.mode(), Mode::Draw);
}

#[test]
fn test_other_keys_do_not_switch_mode() {
    let mut annotator = annotator_with_pages(1);
    assert!(!annotator.key_down(Key::Modifier(ModifierKey::Shift)));
    assert!(!annotator.key_down(Key::Character('e')));
    assert!(!annotator.key_down(Key::Other));
    assert_eq!(annotator.input.mode(), Mode::Draw);
}

#[test]
fn test_configured_modifier() {
    let settings = Settings {
        edit_modifier: ModifierKey::Shift,
        render_scale: 1.0,
        ..Settings::default()
    };
    let (mut annotator, _) = TestAnnotatorBuilder::new().with_settings(settings).build();

    assert!(!annotator.key_down(Key::Modifier(ModifierKey::Alt)));
    assert!(annotator.key_down(Key::Modifier(ModifierKey::Shift)));
    assert_eq!(annotator.input.mode(), Mode::Edit);
}

#[test]
fn test_mode_toggle_mid_drag_cancels_at_last_step() {
    let (mut annotator, uids) = TestAnnotatorBuilder::new()
        .with_block(1, Rect::new(100.0, 100.0, 50.0, 50.0))
        .build();
    let uid = uids[0];
    let modifier = Key::Modifier(ModifierKey::Alt);

    annotator.key_down(modifier);
    assert_eq!(annotator.pointer_down(&PointerEvent::at(125.0, 125.0)), PointerOutcome::DragStarted(uid));
    assert_eq!(annotator.pointer_move(&PointerEvent::at(135.0, 135.0)), PointerOutcome::Moved(uid));

    assert!(annotator.key_up(modifier));
    assert!(!annotator.input.is_active());

    assert_eq!(annotator.pointer_move(&PointerEvent::at(300.0, 300.0)), PointerOutcome::Ignored);
    assert_eq!(annotator.pointer_up(&PointerEvent::at(300.0, 300.0)), PointerOutcome::Ignored);
    assert_rect(&annotator, uid, Rect::new(110.0, 110.0, 50.0, 50.0));
}

#[test]
fn test_mode_toggle_mid_resize_cancels_at_last_step() {
    let (mut annotator, uids) = TestAnnotatorBuilder::new()
        .with_block(1, Rect::new(100.0, 100.0, 50.0, 50.0))
        .build();
    let uid = uids[0];
    let modifier = Key::Modifier(ModifierKey::Alt);

    annotator.key_down(modifier);
    assert_eq!(
        annotator.pointer_down(&PointerEvent::at(150.0, 150.0)),
        PointerOutcome::ResizeStarted(uid, ResizeHandle::BottomRight)
    );
    assert_eq!(annotator.pointer_move(&PointerEvent::at(170.0, 160.0)), PointerOutcome::Resized(uid));

    assert!(annotator.key_up(modifier));
    assert!(!annotator.input.is_active());

    assert_eq!(annotator.pointer_move(&PointerEvent::at(400.0, 400.0)), PointerOutcome::Ignored);
    assert_eq!(annotator.pointer_up(&PointerEvent::at(400.0, 400.0)), PointerOutcome::Ignored);
    assert_rect(&annotator, uid, Rect::new(100.0, 100.0, 70.0, 60.0));
    assert_block_count(&annotator, 1);
}

#[test]
fn test_mode_toggle_mid_draft_leaves_no_block() {
    let mut annotator = annotator_with_pages(1);

    annotator.pointer_down(&PointerEvent::at(10.0, 10.0));
    annotator.pointer_move(&PointerEvent::at(60.0, 60.0));
    annotator.key_down(Key::Modifier(ModifierKey::Alt));

    assert!(annotator.input.draft().is_none());
    assert!(annotator.overlay().unwrap().draft.is_none());
    assert_eq!(annotator.pointer_up(&PointerEvent::at(60.0, 60.0)), PointerOutcome::Ignored);
    assert_block_count(&annotator, 0);
}

#[test]
fn test_key_repeat_keeps_gesture() {
    let (mut annotator, uids) = TestAnnotatorBuilder::new()
        .with_block(1, Rect::new(100.0, 100.0, 50.0, 50.0))
        .build();
    let modifier = Key::Modifier(ModifierKey::Alt);

    annotator.key_down(modifier);
    annotator.pointer_down(&PointerEvent::at(125.0, 125.0));
    assert!(!annotator.key_down(modifier));
    assert!(!annotator.key_down(modifier));
    assert!(annotator.input.is_active());

    annotator.pointer_move(&PointerEvent::at(130.0, 140.0));
    assert_eq!(annotator.pointer_up(&PointerEvent::at(130.0, 140.0)), PointerOutcome::GestureEnded(uids[0]));
    assert_rect(&annotator, uids[0], Rect::new(105.0, 115.0, 50.0, 50.0));
}
