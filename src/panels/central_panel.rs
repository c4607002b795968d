use crate::PaintApp;
use crate::renderer::Renderer;

/// Canvas area: feeds pointer input to the canvas and draws the surface
pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            let (response, painter) = ui.allocate_painter(available.size(), egui::Sense::drag());

            let canvas_rect = Renderer::surface_rect(&app.canvas, response.rect.min);
            app.input.set_canvas_rect(canvas_rect);
            for event in app.input.process_input(ctx, response.hovered()) {
                app.canvas.handle_input(event);
            }

            app.renderer.render(ctx, &painter, response.rect, &app.canvas);
        });
}
