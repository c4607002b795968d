use egui::Color32;

use crate::PaintApp;
use crate::components::ToolButton;
use crate::tool::{Tool, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

/// What the user asked for in the toolbar this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    PickBrushColor(Color32),
    SetBrushSize(u32),
    PickBackground(Color32),
    SelectBrush,
    SelectEraser,
    ClearCanvas,
    Save,
    Load,
    ClearStorage,
    Download,
}

/// Draws the toolbar and returns the actions triggered in it
pub fn tools_panel(app: &PaintApp, ctx: &egui::Context) -> Vec<ToolbarAction> {
    let mut actions = Vec::new();
    let tools = app.canvas().tools();

    egui::TopBottomPanel::top("tools_panel")
        .exact_height(app.config().toolbar_height)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(app.status_text());
                ui.separator();

                let mut brush_color = tools.brush_color();
                if egui::color_picker::color_edit_button_srgba(ui, &mut brush_color, egui::color_picker::Alpha::Opaque)
                    .on_hover_text("Brush color")
                    .changed()
                {
                    actions.push(ToolbarAction::PickBrushColor(brush_color));
                }

                if ToolButton::new(Tool::Brush, tools.tool() == Tool::Brush).show(ui).clicked() {
                    actions.push(ToolbarAction::SelectBrush);
                }

                let mut size = tools.brush_size();
                let slider = ui.add(egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).show_value(false));
                if slider.changed() {
                    actions.push(ToolbarAction::SetBrushSize(size));
                }
                ui.monospace(tools.size_display());
                ui.separator();

                let mut background = tools.background_color();
                if egui::color_picker::color_edit_button_srgba(ui, &mut background, egui::color_picker::Alpha::Opaque)
                    .on_hover_text("Bucket color")
                    .changed()
                {
                    actions.push(ToolbarAction::PickBackground(background));
                }

                if ToolButton::new(Tool::Eraser, tools.tool() == Tool::Eraser).show(ui).clicked() {
                    actions.push(ToolbarAction::SelectEraser);
                }
                ui.separator();

                for (label, action) in [
                    ("Clear", ToolbarAction::ClearCanvas),
                    ("Save", ToolbarAction::Save),
                    ("Load", ToolbarAction::Load),
                    ("Clear Storage", ToolbarAction::ClearStorage),
                    ("Download", ToolbarAction::Download),
                ] {
                    if ui.button(label).clicked() {
                        log::debug!("Toolbar: {:?}", action);
                        actions.push(action);
                    }
                }
            });
        });

    actions
}
