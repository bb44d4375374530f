//! The pixel grid a [`CanvasController`](crate::CanvasController) draws on.
//!
//! Pixels are stored premultiplied by tiny-skia. Everything that leaves this
//! module is converted back to straight (un-premultiplied) RGBA.

use egui::Pos2;
use tiny_skia::{PathBuilder, Pixmap, Rect, Transform};

use crate::brush::BrushConfig;
use crate::color::Color;
use crate::error::{SurfaceError, SurfaceResult};

pub(crate) struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Paint `color` over the whole grid with source-over blending.
    ///
    /// Existing content is not cleared first.
    pub fn fill(&mut self, color: Color) {
        // An opaque source-over fill replaces every pixel
        if color.is_opaque() {
            self.pixmap.fill(color.to_skia());
            return;
        }
        let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
        else {
            return;
        };
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(color.to_skia());
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Make every pixel fully transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Stroke the straight segment `from -> to` with `brush`.
    ///
    /// Returns false when nothing was rendered (zero-length segment).
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, brush: &BrushConfig) -> bool {
        if from == to {
            return false;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else {
            return false;
        };

        self.pixmap.stroke_path(
            &path,
            &brush.paint(),
            &brush.stroke(),
            Transform::identity(),
            None,
        );
        true
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }

    /// Copy the grid out as straight RGBA
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut raw = Vec::with_capacity(self.pixmap.pixels().len() * 4);
        for pixel in self.pixmap.pixels() {
            let pixel = pixel.demultiply();
            raw.extend_from_slice(&[pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]);
        }

        image::RgbaImage::from_raw(self.width(), self.height(), raw)
            .expect("pixmap holds exactly width * height pixels")
    }
}
