use egui::Pos2;
use freehand_canvas::export::{DirectorySink, ExportSink};
use freehand_canvas::{CanvasController, CanvasSettings, Color, ExportError};

#[test]
fn test_save_writes_drawing_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());

    let mut controller = CanvasController::default();
    controller.initialize(32, 24, Color::WHITE).unwrap();
    controller.pointer_down(Pos2::new(4.0, 4.0));
    controller.pointer_move(Pos2::new(28.0, 20.0));
    controller.pointer_up();

    assert!(controller.save_drawing(&mut sink).unwrap());

    let path = dir.path().join("drawing.png");
    assert_eq!(sink.last_written(), Some(path.as_path()));
    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved, controller.snapshot().unwrap());
}

#[test]
fn test_save_before_initialize_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let controller = CanvasController::default();

    assert!(!controller.save_drawing(&mut sink).unwrap());
    assert!(!dir.path().join("drawing.png").exists());
    assert!(sink.last_written().is_none());
}

#[test]
fn test_configured_file_name_and_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exports");
    let mut sink = DirectorySink::new(&target);

    let settings = CanvasSettings {
        export_file_name: "sketch.png".to_owned(),
        ..CanvasSettings::default()
    };
    let mut controller = CanvasController::new(&settings);
    controller.initialize(8, 8, Color::BLACK).unwrap();

    assert!(controller.save_drawing(&mut sink).unwrap());
    assert!(target.join("sketch.png").is_file());
}

#[test]
fn test_second_save_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let mut controller = CanvasController::default();
    controller.initialize(8, 8, Color::WHITE).unwrap();
    controller.save_drawing(&mut sink).unwrap();

    controller.clear_surface();
    controller.save_drawing(&mut sink).unwrap();

    let saved = image::open(dir.path().join("drawing.png")).unwrap().to_rgba8();
    assert!(saved.pixels().all(|pixel| pixel.0[3] == 0));
}

#[test]
fn test_sink_rejects_paths_in_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let err = sink.deliver("../escape.png", b"png").unwrap_err();
    assert!(matches!(err, ExportError::InvalidFileName(_)));
}
