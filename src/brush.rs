use crate::color::Color;

/// Smallest brush size offered by the size slider
pub const MIN_BRUSH_SIZE: u32 = 1;
/// Largest brush size offered by the size slider
pub const MAX_BRUSH_SIZE: u32 = 20;
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// How newly drawn pixels combine with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositingMode {
    /// Source-over: draws the stroke color on top
    #[default]
    Paint,
    /// Destination-out: covered pixels become transparent
    Erase,
}

impl CompositingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Paint => Self::Erase,
            Self::Erase => Self::Paint,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::Erase => "erase",
        }
    }

    pub(crate) fn blend_mode(self) -> tiny_skia::BlendMode {
        match self {
            Self::Paint => tiny_skia::BlendMode::SourceOver,
            Self::Erase => tiny_skia::BlendMode::DestinationOut,
        }
    }
}

/// Style applied to every segment rendered from now on.
///
/// There is no per-stroke copy: a change made mid-stroke shows up on the
/// next segment of that same stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushConfig {
    pub stroke_color: Color,
    pub line_width: u32,
    pub mode: CompositingMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            line_width: DEFAULT_BRUSH_SIZE,
            mode: CompositingMode::Paint,
        }
    }
}

impl BrushConfig {
    pub fn is_erasing(&self) -> bool {
        self.mode == CompositingMode::Erase
    }

    /// Build the tiny-skia paint for the current color and mode
    pub(crate) fn paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(self.stroke_color.to_skia());
        paint.anti_alias = true;
        paint.blend_mode = self.mode.blend_mode();
        paint
    }

    pub(crate) fn stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.line_width as f32,
            line_cap: tiny_skia::LineCap::Round,
            line_join: tiny_skia::LineJoin::Round,
            ..tiny_skia::Stroke::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brush() {
        let brush = BrushConfig::default();
        assert_eq!(brush.stroke_color, Color::BLACK);
        assert_eq!(brush.line_width, DEFAULT_BRUSH_SIZE);
        assert!(!brush.is_erasing());
    }

    #[test]
    fn test_toggle_round_trips() {
        let mode = CompositingMode::Paint;
        assert_eq!(mode.toggled(), CompositingMode::Erase);
        assert_eq!(mode.toggled().toggled(), mode);
    }

    #[test]
    fn test_erase_uses_destination_out() {
        let brush = BrushConfig {
            mode: CompositingMode::Erase,
            ..BrushConfig::default()
        };
        assert_eq!(brush.paint().blend_mode, tiny_skia::BlendMode::DestinationOut);
        assert_eq!(brush.stroke().width, DEFAULT_BRUSH_SIZE as f32);
    }
}
