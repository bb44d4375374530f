use egui::Pos2;

/// The path of the stroke currently being drawn.
///
/// Only the end of the path is kept: segments are rendered as soon as they
/// are added and no stroke history exists once the session ends.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSession {
    origin: Pos2,
    last_point: Pos2,
    segments: usize,
}

impl StrokeSession {
    /// Begin a new path at `origin`
    pub fn begin(origin: Pos2) -> Self {
        Self {
            origin,
            last_point: origin,
            segments: 0,
        }
    }

    /// Extend the path to `point`, returning the new segment's endpoints
    pub fn line_to(&mut self, point: Pos2) -> (Pos2, Pos2) {
        let from = std::mem::replace(&mut self.last_point, point);
        self.segments += 1;
        (from, point)
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn last_point(&self) -> Pos2 {
        self.last_point
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }
}
