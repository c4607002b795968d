/// Toolbar text showing the last action.
///
/// A message stays up for `revert_after` seconds and then the label falls back
/// to the active tool's name. The owner polls [`StatusLabel::tick`] every frame
/// and switches back to the brush when it fires. A newer message replaces the
/// pending deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLabel {
    message: Option<String>,
    revert_at: Option<f64>,
    revert_after: f64,
}

impl StatusLabel {
    pub fn new(revert_after_secs: f64) -> Self {
        Self {
            message: None,
            revert_at: None,
            revert_after: revert_after_secs.max(0.0),
        }
    }

    /// Show `message` now; it reverts after the configured delay
    pub fn flash(&mut self, message: impl Into<String>, now: f64) {
        self.message = Some(message.into());
        self.revert_at = Some(now + self.revert_after);
    }

    /// Returns true exactly once per flash, when its deadline has passed
    pub fn tick(&mut self, now: f64) -> bool {
        match self.revert_at {
            Some(deadline) if now >= deadline => {
                self.message = None;
                self.revert_at = None;
                true
            }
            _ => false,
        }
    }

    /// Seconds until the pending revert, for scheduling a repaint
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.revert_at.map(|deadline| (deadline - now).max(0.0))
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The flashed message, or `tool_label` when nothing is pending
    pub fn text<'a>(&'a self, tool_label: &'a str) -> &'a str {
        self.message().unwrap_or(tool_label)
    }
}

/// Messages shown after toolbar actions
pub mod messages {
    pub const CANVAS_CLEARED: &str = "Canvas Cleared";
    pub const CANVAS_SAVED: &str = "Canvas Saved";
    pub const CANVAS_LOADED: &str = "Canvas Loaded";
    pub const CANVAS_NOT_FOUND: &str = "Canvas not found";
    pub const CANVAS_LOAD_FAILED: &str = "Canvas could not be loaded";
    pub const CANVAS_SAVE_FAILED: &str = "Canvas could not be saved";
    pub const STORAGE_CLEARED: &str = "Local Storage Cleared";
    pub const STORAGE_CLEAR_FAILED: &str = "Local Storage could not be cleared";
    pub const IMAGE_SAVED: &str = "Image File Saved";
    pub const IMAGE_EXPORT_FAILED: &str = "Image export failed";
}
