use egui::Color32;

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 99;
pub const DEFAULT_BRUSH_SIZE: u32 = 10;
pub const ERASER_SIZE: u32 = 50;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

impl Tool {
    /// Label shown in the toolbar while this tool is active
    pub fn label(self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
        }
    }
}

/// Format a brush size for the toolbar: always two digits ("05", "23")
pub fn brush_size_display(size: u32) -> String {
    format!("{:02}", size)
}

/// Current brush configuration. Lives only as long as the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    tool: Tool,
    brush_size: u32,
    brush_color: Color32,
    background_color: Color32,
    default_brush_size: u32,
    eraser_size: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE, ERASER_SIZE, Color32::BLACK, Color32::WHITE)
    }
}

impl ToolState {
    pub fn new(default_brush_size: u32, eraser_size: u32, brush_color: Color32, background_color: Color32) -> Self {
        let default_brush_size = default_brush_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        Self {
            tool: Tool::Brush,
            brush_size: default_brush_size,
            brush_color,
            background_color,
            default_brush_size,
            eraser_size: eraser_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == Tool::Eraser
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// The picked brush color, whatever the active tool
    pub fn brush_color(&self) -> Color32 {
        self.brush_color
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    /// Color new segments are painted with. The eraser paints the background.
    pub fn effective_color(&self) -> Color32 {
        match self.tool {
            Tool::Brush => self.brush_color,
            Tool::Eraser => self.background_color,
        }
    }

    pub fn size_display(&self) -> String {
        brush_size_display(self.brush_size)
    }

    /// Set the size, clamped to the slider range. Returns the two-digit display text.
    pub fn set_brush_size(&mut self, size: u32) -> String {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        self.size_display()
    }

    /// Picking a brush color always turns the eraser off
    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush_color = color;
        self.tool = Tool::Brush;
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = color;
    }

    pub fn activate_eraser(&mut self) {
        self.tool = Tool::Eraser;
        self.brush_size = self.eraser_size;
    }

    pub fn activate_brush(&mut self) {
        self.tool = Tool::Brush;
        self.brush_size = self.default_brush_size;
    }

}
