use eframe::egui;
use crate::tool::Tool;

/// Square toolbar button for picking the brush or the eraser
pub struct ToolButton {
    pub tool: Tool,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: Tool, selected: bool) -> Self {
        Self { tool, selected }
    }

    fn icon(&self) -> &'static str {
        match self.tool {
            Tool::Brush => "🖌",
            Tool::Eraser => "⌫",
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            // The active tool is drawn in black on white, the other one inverted
            let (bg_color, text_color) = if self.selected {
                (egui::Color32::WHITE, egui::Color32::BLACK)
            } else if response.hovered() {
                (egui::Color32::from_gray(60), egui::Color32::WHITE)
            } else {
                (egui::Color32::from_gray(30), egui::Color32::WHITE)
            };

            ui.painter().rect_filled(rect, 4.0, bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon(),
                egui::FontId::proportional(20.0),
                text_color,
            );
        }

        response.on_hover_text(self.tool.label())
    }
}
