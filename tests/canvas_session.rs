use egui::{Color32, Pos2};
use sketch_paint::state::DEFAULT_STORAGE_KEY;
use sketch_paint::{
    CanvasController, CanvasStorage, InputEvent, KeyValueStore, LoadOutcome, MemoryStore, StrokeEntry, ToolState,
};

fn session() -> (CanvasController, CanvasStorage<MemoryStore>) {
    let mut canvas = CanvasController::new(800, 600, ToolState::default());
    canvas.init_surface(800, 600, Color32::WHITE);
    (canvas, CanvasStorage::new(MemoryStore::new()))
}

#[test]
fn test_save_clear_load_round_trip() {
    let (mut canvas, mut storage) = session();

    canvas.begin_stroke(Pos2::new(10.0, 10.0));
    canvas.extend_stroke(Pos2::new(20.0, 20.0));
    canvas.end_stroke();

    assert_eq!(canvas.surface().pixel(15, 15), Some(Color32::BLACK));
    let drawn = canvas.surface().clone();
    let entries = canvas.log().len();

    canvas.save_to(&mut storage).unwrap();
    assert!(storage.store().get(DEFAULT_STORAGE_KEY).unwrap().is_some());

    canvas.clear();
    assert!(canvas.log().is_empty());
    assert!(canvas.surface().is_filled_with(Color32::WHITE));

    let outcome = canvas.load_from(&storage).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded { entries });
    assert_eq!(canvas.log().len(), entries);
    assert_eq!(canvas.surface(), &drawn);
}

#[test]
fn test_load_without_saved_data_keeps_drawing() {
    let (mut canvas, storage) = session();
    canvas.begin_stroke(Pos2::new(100.0, 100.0));
    canvas.extend_stroke(Pos2::new(200.0, 100.0));
    canvas.end_stroke();
    let before = canvas.surface().clone();

    assert_eq!(canvas.load_from(&storage).unwrap(), LoadOutcome::NotFound);
    assert_eq!(canvas.surface(), &before);
    assert_eq!(canvas.log().point_count(), 2);
}

#[test]
fn test_malformed_saved_data_keeps_drawing() {
    let (mut canvas, mut storage) = session();
    canvas.begin_stroke(Pos2::new(100.0, 100.0));
    canvas.extend_stroke(Pos2::new(200.0, 100.0));
    canvas.end_stroke();
    let before = canvas.log().clone();

    let key = storage.key().to_owned();
    let mut store = MemoryStore::new();
    store.set(&key, "[{\"x\": 1}]").unwrap();
    storage = CanvasStorage::with_key(store, key);

    assert!(canvas.load_from(&storage).is_err());
    assert_eq!(canvas.log(), &before);
}

#[test]
fn test_clear_returns_to_brush_and_keeps_colors() {
    let (mut canvas, _) = session();
    canvas.change_background(Color32::YELLOW);
    canvas.set_brush_color(Color32::RED);
    canvas.set_brush_size(42);
    canvas.activate_eraser();

    canvas.begin_stroke(Pos2::new(10.0, 10.0));
    canvas.extend_stroke(Pos2::new(60.0, 60.0));
    canvas.end_stroke();

    canvas.clear();

    let tools = canvas.tools();
    assert!(!tools.is_eraser());
    assert_eq!(tools.brush_color(), Color32::RED);
    assert_eq!(tools.effective_color(), Color32::RED);
    assert_eq!(tools.brush_size(), 10);
    assert_eq!(tools.background_color(), Color32::YELLOW);
    assert!(canvas.surface().is_filled_with(Color32::YELLOW));
    assert!(canvas.log().is_empty());
}

#[test]
fn test_pointer_events_drive_strokes() {
    let (mut canvas, _) = session();

    canvas.handle_input(InputEvent::PointerDown { position: Pos2::new(30.0, 30.0) });
    canvas.handle_input(InputEvent::PointerMove { position: Pos2::new(60.0, 30.0) });
    canvas.handle_input(InputEvent::PointerMove { position: Pos2::new(90.0, 30.0) });
    canvas.handle_input(InputEvent::PointerUp { position: Pos2::new(90.0, 30.0) });
    assert!(!canvas.is_stroking());

    // Hover movement after release only separates strokes
    canvas.handle_input(InputEvent::PointerMove { position: Pos2::new(300.0, 300.0) });
    canvas.handle_input(InputEvent::PointerMove { position: Pos2::new(310.0, 300.0) });

    let entries = canvas.log().entries();
    assert_eq!(canvas.log().point_count(), 3);
    assert!(matches!(entries.last(), Some(StrokeEntry::Gap)));
    assert_eq!(canvas.surface().pixel(75, 30), Some(Color32::BLACK));
    assert_eq!(canvas.surface().pixel(305, 300), Some(Color32::WHITE));
}

#[test]
fn test_brush_size_display() {
    let (mut canvas, _) = session();
    assert_eq!(canvas.set_brush_size(7), "07");
    assert_eq!(canvas.set_brush_size(42), "42");
    assert_eq!(canvas.set_brush_size(500), "99");
    assert_eq!(canvas.set_brush_size(0), "01");
}

#[test]
fn test_export_jpeg_matches_surface_size() {
    let (canvas, _) = session();
    let bytes = canvas.export_image_as("image/jpeg", 1.0).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 600));

    assert!(canvas.export_image_as("image/gif", 1.0).is_err());
}
