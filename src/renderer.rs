use eframe::egui::{self, Color32, Rect};

use crate::canvas::CanvasController;

/// Shows the canvas surface through an egui texture, re-uploading the pixels
/// only when the canvas revision changes.
#[derive(Default)]
pub struct Renderer {
    texture: Option<egui::TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the texture is missing or older than `revision`
    pub fn needs_upload(&self, revision: u64) -> bool {
        self.texture.is_none() || self.uploaded_revision != Some(revision)
    }

    /// Screen rectangle the surface occupies when drawn at `origin`
    pub fn surface_rect(canvas: &CanvasController, origin: egui::Pos2) -> Rect {
        let surface = canvas.surface();
        Rect::from_min_size(origin, egui::vec2(surface.width() as f32, surface.height() as f32))
    }

    /// Renders the canvas
    ///
    /// Args:
    ///     ctx (egui::Context): The egui context for the current frame
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): The area available to the canvas; the surface is anchored at its top-left
    ///     canvas (CanvasController): The canvas whose pixels are shown
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect, canvas: &CanvasController) {
        if self.needs_upload(canvas.revision()) {
            let image = canvas.surface().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("canvas_surface", image, egui::TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(canvas.revision());
            log::trace!("Uploaded canvas revision {}", canvas.revision());
        }

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                Self::surface_rect(canvas, rect.min),
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}
