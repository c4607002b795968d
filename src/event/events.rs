use crate::tool::Tool;

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    SurfaceInitialized {
        width: u32,
        height: u32,
    },
    StrokeStarted,
    StrokeCompleted {
        segments: usize,
    },
    ToolChanged {
        tool: Tool,
    },
    BrushSizeChanged {
        size: u32,
    },
    BackgroundChanged,
    Cleared,
    StorageEvent(StorageEvent),
    Exported {
        bytes: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageEvent {
    Saved { entries: usize },
    Loaded { entries: usize },
    NotFound,
    LoadFailed { reason: String },
    Cleared,
}
