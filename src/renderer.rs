// src/renderer.rs
use eframe::egui::{self, Color32, ColorImage, Rect, TextureHandle, TextureOptions};

use crate::controller::CanvasController;

const SURFACE_TEXTURE_NAME: &str = "drawing_surface";

/// Shows the controller's surface as an egui texture
#[derive(Default)]
pub struct CanvasRenderer {
    texture: Option<TextureHandle>,
    /// Controller version the texture was last built from
    uploaded_version: Option<u64>,
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded_version(&self) -> Option<u64> {
        self.uploaded_version
    }

    /// Re-upload the surface if its pixels changed since the last upload.
    ///
    /// Returns true if a new image was uploaded.
    pub fn sync(&mut self, ctx: &egui::Context, controller: &CanvasController) -> bool {
        if self.uploaded_version == Some(controller.version()) {
            return false;
        }
        let Some(snapshot) = controller.snapshot() else {
            return false;
        };

        let size = [snapshot.width() as usize, snapshot.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, snapshot.as_raw());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(
                    SURFACE_TEXTURE_NAME,
                    image,
                    TextureOptions::NEAREST,
                ));
            }
        }
        self.uploaded_version = Some(controller.version());
        true
    }

    /// Paint the canvas into `rect`.
    ///
    /// The background color is drawn underneath the surface, so transparent
    /// pixels still show it on screen while exporting as transparent.
    pub fn paint(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        controller: &CanvasController,
    ) {
        painter.rect_filled(rect, 0.0, Color32::from(controller.background()));

        self.sync(ctx, controller);
        let (Some(texture), Some((width, height))) = (&self.texture, controller.dimensions())
        else {
            return;
        };

        let surface_rect = Rect::from_min_size(rect.min, egui::vec2(width as f32, height as f32));
        painter.image(
            texture.id(),
            surface_rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_nothing_uploaded_before_initialize() {
        let ctx = egui::Context::default();
        let mut renderer = CanvasRenderer::new();
        let controller = CanvasController::default();
        assert!(!renderer.sync(&ctx, &controller));
        assert_eq!(renderer.uploaded_version(), None);
    }

    #[test]
    fn test_upload_only_on_version_change() {
        let ctx = egui::Context::default();
        let mut renderer = CanvasRenderer::new();
        let mut controller = CanvasController::default();
        controller.initialize(8, 8, Color::WHITE).unwrap();

        assert!(renderer.sync(&ctx, &controller));
        assert!(!renderer.sync(&ctx, &controller));

        controller.clear_surface();
        assert!(renderer.sync(&ctx, &controller));
        assert_eq!(renderer.uploaded_version(), Some(controller.version()));
    }

    #[test]
    fn test_paint_inside_frame() {
        let ctx = egui::Context::default();
        let mut renderer = CanvasRenderer::new();
        let mut controller = CanvasController::default();
        controller.initialize(16, 16, Color::WHITE).unwrap();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(16.0, 16.0));
            renderer.paint(ctx, &painter, rect, &controller);
        });
        assert_eq!(renderer.uploaded_version(), Some(controller.version()));
    }
}
