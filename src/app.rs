use std::collections::HashMap;

use crate::config::CanvasSettings;
use crate::controller::CanvasController;
use crate::export::ExportSink;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::CanvasRenderer;

/// Buttons in the tools panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolButton {
    Eraser,
    Clear,
    Save,
}

pub struct PaintApp {
    controller: CanvasController,
    renderer: CanvasRenderer,
    input: InputHandler,
    export_sink: Box<dyn ExportSink>,
    /// Screen rects of the tools panel buttons from the last frame
    tool_button_rects: HashMap<ToolButton, egui::Rect>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: CanvasSettings) -> Self {
        let sink = default_sink(&settings);
        Self::with_sink(settings, sink)
    }

    /// Build the app with an explicit export destination
    pub fn with_sink(settings: CanvasSettings, export_sink: Box<dyn ExportSink>) -> Self {
        Self {
            controller: CanvasController::new(&settings),
            renderer: CanvasRenderer::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            export_sink,
            tool_button_rects: HashMap::new(),
        }
    }

    pub fn controller(&self) -> &CanvasController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CanvasController {
        &mut self.controller
    }

    /// Draw the background backdrop and the surface texture into `rect`
    pub(crate) fn paint_canvas(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: egui::Rect,
    ) {
        self.renderer.paint(ctx, painter, rect, &self.controller);
    }

    /// Label of the eraser toggle: the mode a click switches to
    pub fn eraser_button_label(&self) -> &'static str {
        if self.controller.brush().is_erasing() {
            "Brush"
        } else {
            "Eraser"
        }
    }

    pub fn tool_button_rect(&self, button: ToolButton) -> Option<egui::Rect> {
        self.tool_button_rects.get(&button).copied()
    }

    pub(crate) fn set_tool_button_rect(&mut self, button: ToolButton, rect: egui::Rect) {
        self.tool_button_rects.insert(button, rect);
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    /// Export the drawing, logging the outcome
    pub fn save_drawing(&mut self) {
        match self.controller.save_drawing(self.export_sink.as_mut()) {
            Ok(true) => log::info!("Exported {}", self.controller.export_file_name()),
            Ok(false) => log::warn!("Export skipped: canvas is not ready yet"),
            Err(err) => log::error!("Failed to export drawing: {}", err),
        }
    }

    /// Lay out one frame: tools on the left, canvas in the remaining space
    pub fn show(&mut self, ctx: &egui::Context) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_sink(settings: &CanvasSettings) -> Box<dyn ExportSink> {
    match &settings.export_dir {
        Some(dir) => Box::new(crate::export::DirectorySink::new(dir.clone())),
        None => Box::new(crate::export::DirectorySink::downloads()),
    }
}

#[cfg(target_arch = "wasm32")]
fn default_sink(_settings: &CanvasSettings) -> Box<dyn ExportSink> {
    Box::new(crate::export::BrowserDownload)
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
