use std::sync::Arc;

use egui::{Color32, Pos2};
use sketchpad::{GlyphMark, HistoryStore, Mark, MarkRef, StrokeMark};

fn stroke(n: usize) -> StrokeMark {
    let x = n as f32;
    StrokeMark::with_points(vec![Pos2::new(x, x), Pos2::new(x + 1.0, x)], 2.0, Color32::BLACK)
}

fn filled_history(count: usize) -> (HistoryStore, Vec<MarkRef>) {
    let mut history = HistoryStore::new();
    let pushed = (0..count).map(|n| history.push(stroke(n))).collect();
    (history, pushed)
}

#[test]
fn test_undo_n_moves_last_n_in_reverse() {
    for count in 1..=6 {
        for undos in 0..=count {
            let (mut history, pushed) = filled_history(count);

            for _ in 0..undos {
                assert!(history.undo());
            }

            let kept = &pushed[..count - undos];
            assert_eq!(history.len(), kept.len());
            for (have, want) in history.marks().iter().zip(kept) {
                assert!(Arc::ptr_eq(have, want));
            }

            // Redo buffer holds the undone marks, most recently undone on top
            let undone: Vec<&MarkRef> = pushed[count - undos..].iter().collect();
            assert_eq!(history.redo_marks().len(), undos);
            for (have, want) in history.redo_marks().iter().rev().zip(undone) {
                assert!(Arc::ptr_eq(have, want));
            }
        }
    }
}

#[test]
fn test_undo_then_redo_is_identity() {
    let (mut history, _) = filled_history(3);
    history.push(GlyphMark::new(Pos2::new(50.0, 50.0), "😁", 28.0));
    let before = history.snapshot();

    assert!(history.undo());
    assert!(history.redo());

    let after = history.snapshot();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn test_new_push_after_undo_drops_redo() {
    let (mut history, _) = filled_history(4);
    history.undo();
    history.undo();

    history.push(stroke(10));

    assert!(!history.redo());
    assert_eq!(history.len(), 3);
    assert_eq!(
        history.marks().last().map(|m| m.as_ref()),
        Some(&Mark::from(stroke(10)))
    );
}

#[test]
fn test_abc_scenario() {
    let mut history = HistoryStore::new();
    let a = history.push(stroke(1));
    let b = history.push(stroke(2));
    let c = history.push(stroke(3));

    history.undo();
    history.undo();
    assert_eq!(history.len(), 1);
    assert!(Arc::ptr_eq(&history.marks()[0], &a));
    assert_eq!(history.redo_marks().len(), 2);
    assert!(Arc::ptr_eq(&history.redo_marks()[0], &c));
    assert!(Arc::ptr_eq(&history.redo_marks()[1], &b));

    history.redo();
    assert_eq!(history.len(), 2);
    assert!(Arc::ptr_eq(&history.marks()[1], &b));
    assert_eq!(history.redo_marks().len(), 1);
    assert!(Arc::ptr_eq(&history.redo_marks()[0], &c));
}

#[test]
fn test_clear_then_undo_and_redo_are_noops() {
    let (mut history, _) = filled_history(2);
    history.undo();

    assert!(history.clear());

    assert!(!history.undo());
    assert!(!history.redo());
    assert!(history.snapshot().is_empty());
}
