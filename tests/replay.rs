use egui::{Color32, Pos2};
use sketch_paint::{CanvasController, StrokeEntry, StrokeLog, StrokePoint, Surface, ToolState};

// Helper to draw a zig-zag with a few strokes and an erasure
fn create_test_canvas() -> CanvasController {
    let mut canvas = CanvasController::new(200, 150, ToolState::default());

    canvas.begin_stroke(Pos2::new(10.0, 10.0));
    for i in 1..8 {
        let y = if i % 2 == 0 { 10.0 } else { 60.0 };
        canvas.extend_stroke(Pos2::new(10.0 + i as f32 * 20.0, y));
    }
    canvas.end_stroke();

    canvas.extend_stroke(Pos2::new(100.0, 100.0));

    canvas.set_brush_color(Color32::RED);
    canvas.set_brush_size(4);
    canvas.begin_stroke(Pos2::new(20.0, 120.0));
    canvas.extend_stroke(Pos2::new(180.0, 120.0));
    canvas.end_stroke();

    canvas.activate_eraser();
    canvas.begin_stroke(Pos2::new(50.0, 0.0));
    canvas.extend_stroke(Pos2::new(50.0, 140.0));
    canvas.end_stroke();

    canvas
}

#[test]
fn test_replay_matches_live_drawing() {
    let mut canvas = create_test_canvas();
    let live = canvas.surface().clone();

    canvas.replay();
    assert_eq!(canvas.surface(), &live);
}

#[test]
fn test_replay_is_deterministic() {
    let canvas = create_test_canvas();

    let mut first = Surface::new(200, 150, Color32::WHITE);
    canvas.log().replay(&mut first, Color32::WHITE);
    let mut second = Surface::new(200, 150, Color32::WHITE);
    canvas.log().replay(&mut second, Color32::WHITE);

    assert_eq!(first, second);
}

#[test]
fn test_round_trip_replays_identically() {
    let canvas = create_test_canvas();
    let json = canvas.log().serialize().unwrap();
    let restored = StrokeLog::deserialize(&json).unwrap();

    assert_eq!(&restored, canvas.log());

    let mut original = Surface::new(200, 150, Color32::WHITE);
    canvas.log().replay(&mut original, Color32::WHITE);
    let mut copy = Surface::new(200, 150, Color32::WHITE);
    restored.replay(&mut copy, Color32::WHITE);
    assert_eq!(original, copy);
}

#[test]
fn test_empty_log_replay_is_noop() {
    let mut surface = Surface::new(50, 50, Color32::GREEN);
    StrokeLog::new().replay(&mut surface, Color32::GREEN);
    assert!(surface.is_filled_with(Color32::GREEN));
}

#[test]
fn test_eraser_uses_current_background() {
    let mut canvas = CanvasController::new(100, 100, ToolState::default());

    canvas.begin_stroke(Pos2::new(10.0, 50.0));
    canvas.extend_stroke(Pos2::new(90.0, 50.0));
    canvas.end_stroke();

    canvas.activate_eraser();
    canvas.begin_stroke(Pos2::new(50.0, 10.0));
    canvas.extend_stroke(Pos2::new(50.0, 90.0));
    canvas.end_stroke();

    // Erased against white
    assert_eq!(canvas.surface().pixel(50, 50), Some(Color32::WHITE));

    canvas.change_background(Color32::BLUE);
    let surface = canvas.surface();
    assert_eq!(surface.pixel(50, 50), Some(Color32::BLUE));
    assert_eq!(surface.pixel(50, 20), Some(Color32::BLUE));
    // Brush ink keeps its own color
    assert_eq!(surface.pixel(15, 50), Some(Color32::BLACK));
}

#[test]
fn test_gap_breaks_segments() {
    let point = |x: f32, y: f32| StrokeEntry::Point(StrokePoint::new(Pos2::new(x, y), 2.0, Color32::BLACK, false));
    let log = StrokeLog::from_entries(vec![point(5.0, 5.0), StrokeEntry::Gap, point(45.0, 5.0)]);

    let mut surface = Surface::new(50, 10, Color32::WHITE);
    log.replay(&mut surface, Color32::WHITE);
    assert!(surface.is_filled_with(Color32::WHITE));
}

#[test]
fn test_segment_uses_width_and_color_of_its_end_point() {
    let log = StrokeLog::from_entries(vec![
        StrokeEntry::Point(StrokePoint::new(Pos2::new(10.0, 20.0), 2.0, Color32::BLACK, false)),
        StrokeEntry::Point(StrokePoint::new(Pos2::new(90.0, 20.0), 20.0, Color32::RED, false)),
    ]);

    let mut surface = Surface::new(100, 40, Color32::WHITE);
    log.replay(&mut surface, Color32::WHITE);
    assert_eq!(surface.pixel(50, 28), Some(Color32::RED));
}
