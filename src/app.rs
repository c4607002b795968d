use std::time::Duration;

use crate::canvas::{CanvasController, LoadOutcome};
use crate::config::PaintConfig;
use crate::input::InputHandler;
use crate::panels::{self, ToolbarAction};
use crate::renderer::Renderer;
use crate::state::{CanvasStorage, KeyValueStore, MemoryStore};
use crate::status::{messages, StatusLabel};
use crate::surface::ExportFormat;
use crate::util::time;

/// Boxed so the same app runs on files natively and on localStorage in the browser
pub type AppStorage = CanvasStorage<Box<dyn KeyValueStore>>;

pub struct PaintApp {
    config: PaintConfig,
    pub(crate) canvas: CanvasController,
    storage: AppStorage,
    status: StatusLabel,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    /// The surface is sized from the viewport on the first frame
    needs_surface: bool,
    last_export: Option<Vec<u8>>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = PaintConfig::from_env();
        let store = default_store(&config);
        let mut app = Self::with_storage(config, store, 1, 1);
        app.needs_surface = true;
        app
    }

    /// An app with a fixed surface size, independent of any window
    pub fn with_storage(config: PaintConfig, store: Box<dyn KeyValueStore>, width: u32, height: u32) -> Self {
        let canvas = CanvasController::from_config(&config, width, height);
        let storage = CanvasStorage::with_key(store, config.storage_key.clone());
        let status = StatusLabel::new(config.status_revert_secs);
        let input = InputHandler::new(egui::Rect::NOTHING);

        Self {
            config,
            canvas,
            storage,
            status,
            renderer: Renderer::new(),
            input,
            needs_surface: false,
            last_export: None,
        }
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn canvas(&self) -> &CanvasController {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasController {
        &mut self.canvas
    }

    /// Last action message, or the active tool's name
    pub fn status_text(&self) -> &str {
        self.status.text(self.canvas.tools().tool().label())
    }

    /// Bytes of the last successful download
    pub fn last_export(&self) -> Option<&[u8]> {
        self.last_export.as_deref()
    }

    /// Revert the status label and the tool once the message has been up long enough
    pub fn tick(&mut self, now: f64) {
        if self.status.tick(now) {
            self.canvas.activate_brush();
        }
    }

    pub fn apply(&mut self, action: ToolbarAction, now: f64) {
        match action {
            ToolbarAction::PickBrushColor(color) => self.canvas.set_brush_color(color),
            ToolbarAction::SetBrushSize(size) => {
                self.canvas.set_brush_size(size);
            }
            ToolbarAction::PickBackground(color) => self.canvas.change_background(color),
            ToolbarAction::SelectBrush => self.canvas.activate_brush(),
            ToolbarAction::SelectEraser => self.canvas.activate_eraser(),
            ToolbarAction::ClearCanvas => {
                self.canvas.clear();
                self.status.flash(messages::CANVAS_CLEARED, now);
            }
            ToolbarAction::Save => {
                let message = match self.canvas.save_to(&mut self.storage) {
                    Ok(()) => messages::CANVAS_SAVED,
                    Err(err) => {
                        log::error!("Failed to save canvas: {}", err);
                        messages::CANVAS_SAVE_FAILED
                    }
                };
                self.status.flash(message, now);
            }
            ToolbarAction::Load => {
                let message = match self.canvas.load_from(&self.storage) {
                    Ok(LoadOutcome::Loaded { .. }) => messages::CANVAS_LOADED,
                    Ok(LoadOutcome::NotFound) => messages::CANVAS_NOT_FOUND,
                    Err(err) => {
                        log::error!("Failed to load canvas: {}", err);
                        messages::CANVAS_LOAD_FAILED
                    }
                };
                self.status.flash(message, now);
            }
            ToolbarAction::ClearStorage => {
                let message = match self.canvas.clear_storage(&mut self.storage) {
                    Ok(()) => messages::STORAGE_CLEARED,
                    Err(err) => {
                        log::error!("Failed to clear storage: {}", err);
                        messages::STORAGE_CLEAR_FAILED
                    }
                };
                self.status.flash(message, now);
            }
            ToolbarAction::Download => {
                let message = match self.download() {
                    Ok(()) => messages::IMAGE_SAVED,
                    Err(err) => {
                        log::error!("Failed to export image: {}", err);
                        messages::IMAGE_EXPORT_FAILED
                    }
                };
                self.status.flash(message, now);
            }
        }
    }

    fn download(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let bytes = self.canvas.export_image(ExportFormat::Jpeg, 1.0)?;

        #[cfg(not(target_arch = "wasm32"))]
        {
            let path = self.config.export_path();
            std::fs::write(&path, &bytes)?;
            log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        }

        self.last_export = Some(bytes);
        Ok(())
    }

    fn fit_surface_to_viewport(&mut self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        let width = screen.width().max(1.0) as u32;
        let height = (screen.height() - self.config.toolbar_height).max(1.0) as u32;
        let background = self.canvas.tools().background_color();
        self.canvas.init_surface(width, height, background);
        self.needs_surface = false;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store(config: &PaintConfig) -> Box<dyn KeyValueStore> {
    Box::new(crate::state::FileStore::new(config.storage_dir.clone()))
}

#[cfg(target_arch = "wasm32")]
fn default_store(_config: &PaintConfig) -> Box<dyn KeyValueStore> {
    match crate::state::LocalStorageStore::new() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("{}; saved drawings will not outlive this page", err);
            Box::new(MemoryStore::new())
        }
    }
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_storage(PaintConfig::default(), Box::new(MemoryStore::new()), 800, 600)
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = time::current_time_secs();
        self.tick(now);

        if self.needs_surface {
            self.fit_surface_to_viewport(ctx);
        }

        for action in panels::tools_panel(self, ctx) {
            self.apply(action, now);
        }
        panels::central_panel(self, ctx);

        if let Some(remaining) = self.status.remaining(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    fn app() -> PaintApp {
        PaintApp::with_storage(PaintConfig::default(), Box::new(MemoryStore::new()), 120, 90)
    }

    fn draw(app: &mut PaintApp) {
        let canvas = app.canvas_mut();
        canvas.begin_stroke(Pos2::new(10.0, 10.0));
        canvas.extend_stroke(Pos2::new(40.0, 40.0));
        canvas.end_stroke();
    }

    #[test]
    fn status_reverts_to_brush() {
        let mut app = app();
        app.apply(ToolbarAction::SelectEraser, 0.0);
        assert_eq!(app.status_text(), "Eraser");

        app.apply(ToolbarAction::Save, 1.0);
        assert_eq!(app.status_text(), "Canvas Saved");

        app.tick(2.5);
        assert_eq!(app.status_text(), "Canvas Saved");
        app.tick(3.0);
        assert_eq!(app.status_text(), "Brush");
        assert_eq!(app.canvas().tools().brush_size(), 10);
    }

    #[test]
    fn load_without_save_reports_not_found() {
        let mut app = app();
        draw(&mut app);
        let before = app.canvas().log().clone();

        app.apply(ToolbarAction::Load, 0.0);
        assert_eq!(app.status_text(), "Canvas not found");
        assert_eq!(app.canvas().log(), &before);
    }

    #[test]
    fn save_clear_load_restores_drawing() {
        let mut app = app();
        draw(&mut app);
        let pixels = app.canvas().surface().clone();

        app.apply(ToolbarAction::Save, 0.0);
        app.apply(ToolbarAction::ClearCanvas, 0.0);
        assert_eq!(app.status_text(), "Canvas Cleared");
        assert!(app.canvas().log().is_empty());

        app.apply(ToolbarAction::Load, 0.0);
        assert_eq!(app.status_text(), "Canvas Loaded");
        assert_eq!(app.canvas().surface(), &pixels);
    }

    #[test]
    fn clear_storage_forgets_saved_drawing() {
        let mut app = app();
        draw(&mut app);
        app.apply(ToolbarAction::Save, 0.0);
        app.apply(ToolbarAction::ClearStorage, 0.0);
        assert_eq!(app.status_text(), "Local Storage Cleared");

        app.apply(ToolbarAction::Load, 0.0);
        assert_eq!(app.status_text(), "Canvas not found");
    }

    /// Reads work, writes and removals are refused
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> crate::state::PersistenceResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> crate::state::PersistenceResult<()> {
            Err(crate::state::PersistenceError::Unavailable("read-only".to_owned()))
        }

        fn remove(&mut self, _key: &str) -> crate::state::PersistenceResult<()> {
            Err(crate::state::PersistenceError::Unavailable("read-only".to_owned()))
        }
    }

    #[test]
    fn failed_storage_clear_is_reported() {
        let mut saved = MemoryStore::new();
        saved.set("savedCanvas", "[]").unwrap();
        let store = Box::new(ReadOnlyStore(saved));
        let mut app = PaintApp::with_storage(PaintConfig::default(), store, 120, 90);

        app.apply(ToolbarAction::ClearStorage, 0.0);
        assert_eq!(app.status_text(), "Local Storage could not be cleared");

        app.apply(ToolbarAction::Save, 0.0);
        assert_eq!(app.status_text(), "Canvas could not be saved");

        // The saved drawing is still there
        app.apply(ToolbarAction::Load, 0.0);
        assert_eq!(app.status_text(), "Canvas Loaded");
    }

    #[test]
    fn background_change_replays_drawing() {
        let mut app = app();
        draw(&mut app);
        app.apply(ToolbarAction::PickBackground(Color32::BLUE), 0.0);

        let surface = app.canvas().surface();
        assert_eq!(surface.pixel(100, 80), Some(Color32::BLUE));
        assert_eq!(surface.pixel(25, 25), Some(Color32::BLACK));
    }

    #[test]
    fn size_slider_updates_display() {
        let mut app = app();
        app.apply(ToolbarAction::SetBrushSize(7), 0.0);
        assert_eq!(app.canvas().tools().size_display(), "07");
    }

    #[test]
    fn download_keeps_jpeg_bytes() {
        let dir = std::env::temp_dir().join(format!("sketch_paint_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = PaintConfig {
            export_dir: dir.clone(),
            ..PaintConfig::default()
        };
        let mut app = PaintApp::with_storage(config, Box::new(MemoryStore::new()), 64, 48);
        draw(&mut app);

        app.apply(ToolbarAction::Download, 0.0);
        assert_eq!(app.status_text(), "Image File Saved");
        let bytes = app.last_export().unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert!(dir.join("paint-file.jpeg").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
