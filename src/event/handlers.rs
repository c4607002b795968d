use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{CanvasEvent, EventHandler, StorageEvent};

/// Writes every canvas event to the log
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn handle_event(&mut self, event: &CanvasEvent) {
        match event {
            CanvasEvent::StrokeStarted | CanvasEvent::StrokeCompleted { .. } => {
                log::trace!("{:?}", event);
            }
            CanvasEvent::StorageEvent(StorageEvent::LoadFailed { reason }) => {
                log::warn!("Loading the saved canvas failed: {}", reason);
            }
            _ => log::info!("{:?}", event),
        }
    }
}

/// Keeps a shared copy of every event it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    events: Rc<RefCell<Vec<CanvasEvent>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CanvasEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventHandler for RecordingHandler {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
