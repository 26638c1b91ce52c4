use std::cell::RefCell;
use std::rc::Rc;

use egui::{Color32, Pos2};
use sketchpad::{DrawOp, PointerEvent, RecordingSurface, Session, SketchConfig, SketchEvent};

fn recording() -> RecordingSurface {
    RecordingSurface::new()
}

#[test]
fn test_press_move_move_release_makes_one_stroke() {
    let mut session = Session::default();

    for event in [
        PointerEvent::Down(Pos2::new(5.0, 5.0)),
        PointerEvent::Move(Pos2::new(5.0, 15.0)),
        PointerEvent::Move(Pos2::new(15.0, 15.0)),
        PointerEvent::Up(Pos2::new(15.0, 15.0)),
    ] {
        session.handle_pointer(event);
    }

    let marks = session.snapshot();
    assert_eq!(marks.len(), 1);
    let stroke = marks[0].as_stroke().expect("stroke mark");
    assert_eq!(
        stroke.points(),
        &[Pos2::new(5.0, 5.0), Pos2::new(5.0, 15.0), Pos2::new(15.0, 15.0)]
    );
}

#[test]
fn test_glyph_click_places_at_offset() {
    let mut session = Session::default();
    assert!(session.select_glyph("😂"));

    session.handle_pointer(PointerEvent::Down(Pos2::new(100.0, 100.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(100.0, 100.0)));

    let marks = session.snapshot();
    assert_eq!(marks.len(), 1);
    let glyph = marks[0].as_glyph().expect("glyph mark");
    assert_eq!(glyph.glyph(), "😂");
    assert_eq!(glyph.anchor(), Pos2::new(85.0, 101.0));
}

#[test]
fn test_glyph_drag_commits_final_anchor() {
    let mut session = Session::default();
    session.select_glyph("😭");

    session.handle_pointer(PointerEvent::Down(Pos2::new(100.0, 100.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(120.0, 80.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(140.0, 60.0)));

    // Nothing committed while dragging
    assert!(session.history().is_empty());

    session.handle_pointer(PointerEvent::Up(Pos2::new(140.0, 60.0)));
    let marks = session.snapshot();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].as_glyph().unwrap().anchor(), Pos2::new(125.0, 61.0));
}

#[test]
fn test_zero_length_stroke_counts_for_undo() {
    let mut session = Session::default();
    session.handle_pointer(PointerEvent::Down(Pos2::new(30.0, 30.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(30.0, 30.0)));

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.snapshot()[0].as_stroke().unwrap().points().len(), 1);

    // The raster export shows nothing for it
    let png = session.export_png().unwrap();
    let image = image::load_from_memory(&png).unwrap().to_rgba8();
    assert!(image.pixels().all(|p| p.0[3] == 0));

    assert!(session.undo());
    assert!(session.history().is_empty());
}

#[test]
fn test_leave_ends_open_gesture() {
    let mut session = Session::default();
    session.handle_pointer(PointerEvent::Down(Pos2::new(10.0, 10.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(20.0, 20.0)));
    session.handle_pointer(PointerEvent::Leave);

    assert_eq!(session.history().len(), 1);
    assert!(session.gesture().is_idle());
    assert!(session.gesture().preview().is_none());

    // A later release outside a gesture changes nothing
    assert!(!session.handle_pointer(PointerEvent::Up(Pos2::new(20.0, 20.0))));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_changing_pen_does_not_restyle_old_strokes() {
    let mut session = Session::default();
    session.select_pen(7.0, Color32::BLACK);
    session.handle_pointer(PointerEvent::Down(Pos2::new(1.0, 1.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(9.0, 9.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(9.0, 9.0)));

    session.select_pen(1.75, Color32::RED);
    session.set_pen_hue(200.0);

    let mut surface = recording();
    session.redraw(&mut surface);
    match &surface.ops()[1] {
        DrawOp::Path { width, color, .. } => {
            assert_eq!(*width, 7.0);
            assert_eq!(*color, Color32::BLACK);
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn test_preview_renders_on_top_and_follows_tool() {
    let mut session = Session::default();
    session.select_pen(7.0, Color32::BLACK);
    session.handle_pointer(PointerEvent::Move(Pos2::new(40.0, 40.0)));

    let mut surface = recording();
    session.redraw(&mut surface);
    assert_eq!(
        surface.ops().last(),
        Some(&DrawOp::Circle {
            center: Pos2::new(40.0, 40.0),
            radius: 3.5,
            width: 1.0,
            color: Color32::BLACK,
        })
    );

    session.select_glyph("😁");
    session.handle_pointer(PointerEvent::Move(Pos2::new(60.0, 60.0)));
    let mut surface = recording();
    session.redraw(&mut surface);
    assert!(matches!(
        surface.ops().last(),
        Some(DrawOp::Text { text, .. }) if text == "😁"
    ));

    session.handle_pointer(PointerEvent::Leave);
    let mut surface = recording();
    session.redraw(&mut surface);
    assert_eq!(surface.ops(), &[DrawOp::Clear]);
}

#[test]
fn test_clear_then_redraw_is_blank() {
    let mut session = Session::default();
    session.handle_pointer(PointerEvent::Down(Pos2::new(1.0, 1.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(2.0, 2.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(2.0, 2.0)));
    session.select_glyph("😁");
    session.handle_pointer(PointerEvent::Down(Pos2::new(50.0, 50.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(50.0, 50.0)));
    assert_eq!(session.history().len(), 2);

    assert!(session.clear());

    let mut surface = recording();
    session.redraw(&mut surface);
    assert_eq!(surface.ops(), &[DrawOp::Clear]);
    assert!(!session.redo());
}

#[test]
fn test_custom_glyph_offset_from_config() {
    let config = SketchConfig {
        glyph_offset: [0.0, 0.0],
        glyph_size: 40.0,
        ..SketchConfig::default()
    };
    let mut session = Session::new(config);
    session.select_custom_glyph("hi");
    session.handle_pointer(PointerEvent::Down(Pos2::new(10.0, 20.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(10.0, 20.0)));

    let glyph = session.snapshot()[0].as_glyph().cloned().unwrap();
    assert_eq!(glyph.anchor(), Pos2::new(10.0, 20.0));
    assert_eq!(glyph.font_size(), 40.0);
    assert_eq!(glyph.glyph(), "hi");
}

fn stroke_lengths(session: &Session) -> Vec<usize> {
    session
        .snapshot()
        .iter()
        .map(|mark| mark.as_stroke().map_or(0, |stroke| stroke.points().len()))
        .collect()
}

fn draw_first_stroke(session: &mut Session) {
    session.handle_pointer(PointerEvent::Down(Pos2::new(1.0, 1.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(2.0, 2.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(2.0, 2.0)));
}

#[test]
fn test_open_stroke_is_visible_to_observers() {
    let mut session = Session::default();
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = counts.clone();
    session.subscribe(move |event: &SketchEvent| {
        if let SketchEvent::DrawingChanged { marks } = event {
            sink.borrow_mut().push(marks.len());
        }
    });

    session.handle_pointer(PointerEvent::Down(Pos2::new(5.0, 5.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(6.0, 6.0)));

    assert_eq!(*counts.borrow(), vec![1, 1]);
    assert_eq!(stroke_lengths(&session), vec![2]);
}

#[test]
fn test_undo_during_stroke_keeps_earlier_marks() {
    let mut session = Session::default();
    draw_first_stroke(&mut session);

    session.handle_pointer(PointerEvent::Down(Pos2::new(50.0, 50.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(60.0, 60.0)));
    assert!(session.undo());

    // The open stroke was the one undone, later moves go nowhere
    session.handle_pointer(PointerEvent::Move(Pos2::new(70.0, 70.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(70.0, 70.0)));
    assert_eq!(stroke_lengths(&session), vec![2]);

    assert!(session.redo());
    assert_eq!(stroke_lengths(&session), vec![2, 2]);
    assert!(!session.redo());
}

#[test]
fn test_redo_during_stroke_has_nothing_to_restore() {
    let mut session = Session::default();
    draw_first_stroke(&mut session);
    session.undo();

    // Starting a stroke is a new mark, so the undone one is gone
    session.handle_pointer(PointerEvent::Down(Pos2::new(50.0, 50.0)));
    assert!(!session.redo());
    session.handle_pointer(PointerEvent::Move(Pos2::new(60.0, 60.0)));
    session.handle_pointer(PointerEvent::Up(Pos2::new(60.0, 60.0)));

    let marks = session.snapshot();
    assert_eq!(marks.len(), 1);
    assert_eq!(
        marks[0].as_stroke().unwrap().points(),
        &[Pos2::new(50.0, 50.0), Pos2::new(60.0, 60.0)]
    );
}

#[test]
fn test_clear_during_stroke_ends_it() {
    let mut session = Session::default();
    draw_first_stroke(&mut session);

    session.handle_pointer(PointerEvent::Down(Pos2::new(50.0, 50.0)));
    session.handle_pointer(PointerEvent::Move(Pos2::new(60.0, 60.0)));
    assert!(session.clear());
    assert!(session.gesture().is_idle());

    session.handle_pointer(PointerEvent::Move(Pos2::new(70.0, 70.0)));
    assert!(!session.handle_pointer(PointerEvent::Up(Pos2::new(70.0, 70.0))));
    assert!(session.history().is_empty());
    assert!(!session.undo());
    assert!(!session.redo());
}

#[test]
fn test_undo_during_glyph_placement_then_release() {
    let mut session = Session::default();
    draw_first_stroke(&mut session);
    session.select_glyph("😁");

    session.handle_pointer(PointerEvent::Down(Pos2::new(100.0, 100.0)));
    assert!(session.undo());
    session.handle_pointer(PointerEvent::Up(Pos2::new(100.0, 100.0)));

    // The glyph lands as a new mark; the undone stroke stays undone
    let marks = session.snapshot();
    assert_eq!(marks.len(), 1);
    assert!(marks[0].as_glyph().is_some());
}
