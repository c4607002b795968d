use egui::{Color32, Pos2};

use crate::config::PaintConfig;
use crate::event::{CanvasEvent, EventBus, LoggingHandler, StorageEvent};
use crate::input::InputEvent;
use crate::state::{CanvasStorage, DrawState, KeyValueStore, PersistenceResult};
use crate::stroke::StrokePoint;
use crate::stroke_log::StrokeLog;
use crate::surface::{ExportError, ExportFormat, Surface};
use crate::tool::ToolState;

/// Result of restoring the saved drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { entries: usize },
    /// Nothing saved; the current drawing was left alone
    NotFound,
}

/// Owns the pixels, the tool configuration and the stroke log, and turns
/// pointer input into both rendered segments and log entries.
#[derive(Debug)]
pub struct CanvasController {
    surface: Surface,
    tools: ToolState,
    log: StrokeLog,
    draw_state: DrawState,
    events: EventBus,
    /// Bumped whenever the pixels change
    revision: u64,
}

impl CanvasController {
    pub fn new(width: u32, height: u32, tools: ToolState) -> Self {
        let events = EventBus::new();
        events.subscribe(Box::new(LoggingHandler));

        Self {
            surface: Surface::new(width, height, tools.background_color()),
            tools,
            log: StrokeLog::new(),
            draw_state: DrawState::Idle,
            events,
            revision: 0,
        }
    }

    pub fn from_config(config: &PaintConfig, width: u32, height: u32) -> Self {
        let tools = ToolState::new(
            config.default_brush_size,
            config.eraser_size,
            config.brush_color,
            config.background_color,
        );
        Self::new(width, height, tools)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn log(&self) -> &StrokeLog {
        &self.log
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_stroking(&self) -> bool {
        self.draw_state.is_stroking()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Recreate the surface filled with `background` and switch back to the
    /// brush at its default size. The picked brush color survives. Any stroke
    /// in progress is dropped. The log is kept.
    pub fn init_surface(&mut self, width: u32, height: u32, background: Color32) {
        self.surface = Surface::new(width, height, background);
        self.tools.set_background_color(background);
        self.tools.activate_brush();
        self.draw_state = DrawState::Idle;
        self.touch();

        self.events.emit(CanvasEvent::SurfaceInitialized {
            width: self.surface.width(),
            height: self.surface.height(),
        });
        self.events.emit(CanvasEvent::ToolChanged { tool: self.tools.tool() });
    }

    pub fn begin_stroke(&mut self, point: Pos2) {
        // Separate this stroke from the previous one, then record its anchor.
        // The anchor has no predecessor so no segment ends at it.
        let anchor = self.capture(point);
        self.log.push_gap();
        self.log.append(anchor);
        self.draw_state.begin(point);
        self.events.emit(CanvasEvent::StrokeStarted);
    }

    pub fn extend_stroke(&mut self, point: Pos2) {
        match self.draw_state.advance(point) {
            Some(from) => {
                let captured = self.capture(point);
                self.surface.draw_segment(from, point, captured.size, captured.color);
                self.log.append(captured);
                self.touch();
            }
            None => {
                self.log.push_gap();
            }
        }
    }

    pub fn end_stroke(&mut self) {
        if let Some(segments) = self.draw_state.end() {
            self.events.emit(CanvasEvent::StrokeCompleted { segments });
        }
    }

    fn capture(&self, point: Pos2) -> StrokePoint {
        StrokePoint::new(
            point,
            self.tools.brush_size() as f32,
            self.tools.effective_color(),
            self.tools.is_eraser(),
        )
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position } => self.begin_stroke(position),
            InputEvent::PointerMove { position } => self.extend_stroke(position),
            InputEvent::PointerUp { .. } => self.end_stroke(),
        }
    }

    /// Returns the two-digit size display
    pub fn set_brush_size(&mut self, size: u32) -> String {
        let display = self.tools.set_brush_size(size);
        self.events.emit(CanvasEvent::BrushSizeChanged { size: self.tools.brush_size() });
        display
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        let was_eraser = self.tools.is_eraser();
        self.tools.set_brush_color(color);
        if was_eraser {
            self.events.emit(CanvasEvent::ToolChanged { tool: self.tools.tool() });
        }
    }

    pub fn activate_eraser(&mut self) {
        self.tools.activate_eraser();
        self.events.emit(CanvasEvent::ToolChanged { tool: self.tools.tool() });
    }

    pub fn activate_brush(&mut self) {
        self.tools.activate_brush();
        self.events.emit(CanvasEvent::ToolChanged { tool: self.tools.tool() });
    }

    /// Only records the color. Call [`Self::change_background`] to re-render as well.
    pub fn set_background_color(&mut self, color: Color32) {
        self.tools.set_background_color(color);
    }

    /// New background: recreate the surface in the new color and replay the log.
    /// Erased segments come back in the new background color.
    pub fn change_background(&mut self, color: Color32) {
        self.set_background_color(color);
        self.init_surface(self.surface.width(), self.surface.height(), color);
        self.replay();
        self.events.emit(CanvasEvent::BackgroundChanged);
    }

    /// Rebuild the pixels from the log on top of a fresh background fill
    pub fn replay(&mut self) {
        let background = self.tools.background_color();
        self.surface.fill(background);
        self.log.replay(&mut self.surface, background);
        self.touch();
    }

    /// Empty the log and start over on a blank surface
    pub fn clear(&mut self) {
        self.log.clear();
        self.init_surface(self.surface.width(), self.surface.height(), self.tools.background_color());
        self.events.emit(CanvasEvent::Cleared);
    }

    pub fn export_image(&self, format: ExportFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
        let bytes = self.surface.encode(format, quality)?;
        self.events.emit(CanvasEvent::Exported { bytes: bytes.len() });
        Ok(bytes)
    }

    /// Export by MIME type, e.g. `"image/jpeg"`
    pub fn export_image_as(&self, mime_type: &str, quality: f32) -> Result<Vec<u8>, ExportError> {
        self.export_image(mime_type.parse()?, quality)
    }

    pub fn save_to<S: KeyValueStore>(&self, storage: &mut CanvasStorage<S>) -> PersistenceResult<()> {
        storage.save(&self.log)?;
        self.events.emit(CanvasEvent::StorageEvent(StorageEvent::Saved { entries: self.log.len() }));
        Ok(())
    }

    /// Replace the log with the saved one and replay it. When nothing is saved,
    /// or the saved data is malformed, the current log and pixels are kept.
    pub fn load_from<S: KeyValueStore>(&mut self, storage: &CanvasStorage<S>) -> PersistenceResult<LoadOutcome> {
        match storage.load() {
            Ok(Some(log)) => {
                self.log = log;
                self.draw_state = DrawState::Idle;
                self.replay();
                let entries = self.log.len();
                self.events.emit(CanvasEvent::StorageEvent(StorageEvent::Loaded { entries }));
                Ok(LoadOutcome::Loaded { entries })
            }
            Ok(None) => {
                self.events.emit(CanvasEvent::StorageEvent(StorageEvent::NotFound));
                Ok(LoadOutcome::NotFound)
            }
            Err(err) => {
                self.events.emit(CanvasEvent::StorageEvent(StorageEvent::LoadFailed {
                    reason: err.to_string(),
                }));
                Err(err)
            }
        }
    }

    pub fn clear_storage<S: KeyValueStore>(&self, storage: &mut CanvasStorage<S>) -> PersistenceResult<()> {
        storage.clear()?;
        self.events.emit(CanvasEvent::StorageEvent(StorageEvent::Cleared));
        Ok(())
    }
}
