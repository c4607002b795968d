mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::{CanvasEvent, StorageEvent};
pub use handlers::{LoggingHandler, RecordingHandler};

pub trait EventHandler {
    fn handle_event(&mut self, event: &CanvasEvent);
}
