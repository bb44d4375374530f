//! The drawing surface controller: owns the surface and the stroke state
//! machine, and is the only way to mutate pixels.

use egui::Pos2;

use crate::brush::{BrushConfig, CompositingMode};
use crate::color::Color;
use crate::config::CanvasSettings;
use crate::error::{ExportResult, SurfaceResult};
use crate::export::{self, ExportSink};
use crate::input::CanvasEvent;
use crate::stroke::StrokeSession;
use crate::surface::Surface;

/// Where the controller is in the per-stroke state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    Idle,
    Drawing,
}

pub struct CanvasController {
    surface: Option<Surface>,
    brush: BrushConfig,
    background: Color,
    /// `Some` while a stroke is in progress
    session: Option<StrokeSession>,
    export_file_name: String,
    /// Bumped whenever pixel content changes
    version: u64,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new(&CanvasSettings::default())
    }
}

impl CanvasController {
    /// Create a controller with no surface yet.
    ///
    /// Pointer events, fills, clears and exports are ignored until
    /// [`initialize`](Self::initialize) has succeeded.
    pub fn new(settings: &CanvasSettings) -> Self {
        Self {
            surface: None,
            brush: BrushConfig {
                stroke_color: settings.brush_color,
                line_width: settings.brush_size,
                mode: CompositingMode::Paint,
            },
            background: settings.background_color,
            session: None,
            export_file_name: settings.export_file_name.clone(),
            version: 0,
        }
    }

    /// Allocate a `width` x `height` surface filled with `background`.
    ///
    /// The size is fixed afterwards: calling this again is a no-op.
    pub fn initialize(&mut self, width: u32, height: u32, background: Color) -> SurfaceResult<()> {
        if let Some(surface) = &self.surface {
            log::debug!(
                "Surface already initialized at {}x{}, ignoring {}x{}",
                surface.width(),
                surface.height(),
                width,
                height
            );
            return Ok(());
        }

        let mut surface = Surface::new(width, height)?;
        surface.fill(background);
        self.surface = Some(surface);
        self.background = background;
        self.bump_version();
        log::info!("Initialized {}x{} surface with background {}", width, height, background);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(|s| (s.width(), s.height()))
    }

    pub fn state(&self) -> DrawState {
        if self.session.is_some() {
            DrawState::Drawing
        } else {
            DrawState::Idle
        }
    }

    pub fn session(&self) -> Option<&StrokeSession> {
        self.session.as_ref()
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn export_file_name(&self) -> &str {
        &self.export_file_name
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Paint `color` over the whole surface.
    ///
    /// Existing strokes are not cleared: an opaque color hides them, a
    /// translucent one tints them.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
        if let Some(surface) = &mut self.surface {
            surface.fill(color);
            self.bump_version();
            log::debug!("Background filled with {}", color);
        }
    }

    pub fn set_brush_color(&mut self, color: Color) {
        self.brush.stroke_color = color;
    }

    /// Set the line width used for the next segment.
    ///
    /// A width of zero is ignored, the previous width stays in effect.
    pub fn set_brush_size(&mut self, size: u32) {
        if size == 0 {
            log::debug!("Ignoring brush size 0");
            return;
        }
        self.brush.line_width = size;
    }

    /// Flip between painting and erasing, returning the new mode
    pub fn toggle_eraser(&mut self) -> CompositingMode {
        self.brush.mode = self.brush.mode.toggled();
        log::debug!("Compositing mode is now {}", self.brush.mode.name());
        self.brush.mode
    }

    /// Make every pixel transparent. The background is not re-applied.
    pub fn clear_surface(&mut self) {
        if let Some(surface) = &mut self.surface {
            surface.clear();
            self.bump_version();
            log::info!("Surface cleared");
        }
    }

    pub fn handle_event(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::PointerDown(pos) => self.pointer_down(pos),
            CanvasEvent::PointerMove(pos) => self.pointer_move(pos),
            CanvasEvent::PointerUp(_) | CanvasEvent::PointerLeave => self.end_stroke(),
        }
    }

    /// Begin a new path at `pos`, discarding any path in progress
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.surface.is_none() {
            return;
        }
        self.session = Some(StrokeSession::begin(pos));
        log::debug!("Stroke started at ({}, {})", pos.x, pos.y);
    }

    /// Extend the current path to `pos` and render the new segment.
    ///
    /// Ignored while idle.
    pub fn pointer_move(&mut self, pos: Pos2) {
        let (Some(surface), Some(session)) = (&mut self.surface, &mut self.session) else {
            return;
        };
        let (from, to) = session.line_to(pos);
        if surface.stroke_segment(from, to, &self.brush) {
            self.bump_version();
        }
    }

    pub fn pointer_up(&mut self) {
        self.end_stroke();
    }

    pub fn pointer_leave(&mut self) {
        self.end_stroke();
    }

    fn end_stroke(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("Stroke ended after {} segments", session.segment_count());
        }
    }

    /// Read one pixel as straight RGBA
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.surface.as_ref()?.pixel(x, y)
    }

    /// Copy of the current pixel content
    pub fn snapshot(&self) -> Option<image::RgbaImage> {
        self.surface.as_ref().map(Surface::to_rgba_image)
    }

    /// Encode the current pixel content as PNG; `None` before initialization
    pub fn export_png(&self) -> ExportResult<Option<Vec<u8>>> {
        self.snapshot()
            .map(|image| export::encode_png(&image))
            .transpose()
    }

    /// Encode the drawing and hand it to `sink` under the export file name.
    ///
    /// Returns false when there was nothing to export.
    pub fn save_drawing(&self, sink: &mut dyn ExportSink) -> ExportResult<bool> {
        let Some(png) = self.export_png()? else {
            log::debug!("Nothing to export, surface not initialized");
            return Ok(false);
        };
        sink.deliver(&self.export_file_name, &png)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_and_uninitialized() {
        let controller = CanvasController::default();
        assert_eq!(controller.state(), DrawState::Idle);
        assert!(!controller.is_initialized());
        assert_eq!(controller.export_file_name(), "drawing.png");
    }

    #[test]
    fn test_second_initialize_keeps_dimensions() {
        let mut controller = CanvasController::default();
        controller.initialize(10, 20, Color::WHITE).unwrap();
        controller.initialize(30, 40, Color::BLACK).unwrap();
        assert_eq!(controller.dimensions(), Some((10, 20)));
        assert_eq!(controller.pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_pointer_down_before_initialize_is_ignored() {
        let mut controller = CanvasController::default();
        controller.pointer_down(Pos2::new(1.0, 1.0));
        assert_eq!(controller.state(), DrawState::Idle);
    }

    #[test]
    fn test_state_transitions() {
        let mut controller = CanvasController::default();
        controller.initialize(10, 10, Color::WHITE).unwrap();

        controller.handle_event(CanvasEvent::PointerDown(Pos2::new(1.0, 1.0)));
        assert_eq!(controller.state(), DrawState::Drawing);
        controller.handle_event(CanvasEvent::PointerMove(Pos2::new(5.0, 5.0)));
        assert_eq!(controller.state(), DrawState::Drawing);
        controller.handle_event(CanvasEvent::PointerLeave);
        assert_eq!(controller.state(), DrawState::Idle);

        controller.handle_event(CanvasEvent::PointerDown(Pos2::new(2.0, 2.0)));
        controller.handle_event(CanvasEvent::PointerUp(Pos2::new(2.0, 2.0)));
        assert_eq!(controller.state(), DrawState::Idle);
    }

    #[test]
    fn test_pointer_down_while_drawing_restarts_path() {
        let mut controller = CanvasController::default();
        controller.initialize(10, 10, Color::WHITE).unwrap();
        controller.pointer_down(Pos2::new(1.0, 1.0));
        controller.pointer_move(Pos2::new(3.0, 3.0));
        controller.pointer_down(Pos2::new(8.0, 8.0));

        let session = controller.session().unwrap();
        assert_eq!(session.origin(), Pos2::new(8.0, 8.0));
        assert_eq!(session.segment_count(), 0);
    }

    #[test]
    fn test_zero_brush_size_is_ignored() {
        let mut controller = CanvasController::default();
        controller.set_brush_size(12);
        controller.set_brush_size(0);
        assert_eq!(controller.brush().line_width, 12);
    }
}
