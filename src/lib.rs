#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod stroke;
mod surface;

pub use app::{PaintApp, ToolButton};
pub use brush::{BrushConfig, CompositingMode};
pub use color::Color;
pub use config::CanvasSettings;
pub use controller::{CanvasController, DrawState};
pub use error::{ExportError, SurfaceError};
pub use export::ExportSink;
pub use input::{CanvasEvent, InputHandler};
pub use renderer::CanvasRenderer;
pub use stroke::StrokeSession;
