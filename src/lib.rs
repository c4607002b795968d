#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod components;
pub mod config;
pub mod event;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod status;
pub mod stroke;
pub mod stroke_log;
pub mod surface;
pub mod tool;
pub mod util;

pub use app::PaintApp;
pub use canvas::{CanvasController, LoadOutcome};
pub use config::PaintConfig;
pub use input::{InputEvent, InputHandler};
pub use renderer::Renderer;
pub use state::{CanvasStorage, DrawState, KeyValueStore, MemoryStore, PersistenceError};
pub use stroke::{StrokeEntry, StrokePoint};
pub use stroke_log::{ParseError, StrokeLog};
pub use surface::{ExportError, ExportFormat, Surface};
pub use tool::{Tool, ToolState};
