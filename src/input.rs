use egui::{Context, LayerId, Pos2, Rect};

/// Pointer events the canvas reacts to.
///
/// Positions are relative to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// Primary button was pressed over the canvas
    PointerDown(Pos2),
    /// Pointer moved over the canvas (with or without buttons pressed)
    PointerMove(Pos2),
    /// Primary button was released over the canvas
    PointerUp(Pos2),
    /// Pointer left the canvas
    PointerLeave,
}

/// The raw pointer state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Pointer position in screen coordinates, `None` when outside the window
    pub hover_pos: Option<Pos2>,
    /// Where the primary button went down, while it is held
    pub press_origin: Option<Pos2>,
    pub primary_pressed: bool,
    pub primary_released: bool,
    /// Another layer (popup, window) is on top of the canvas at `hover_pos`
    pub hover_covered: bool,
    /// Another layer is on top of the canvas at `press_origin`
    pub press_covered: bool,
}

impl PointerSnapshot {
    /// Read the pointer state, checking overlap against `canvas_layer`
    pub fn from_context(ctx: &Context, canvas_layer: LayerId) -> Self {
        let (hover_pos, press_origin, primary_pressed, primary_released) = ctx.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.press_origin(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });

        // Panels are not areas, so no layer at all means the bare background
        let covered = |pos: Option<Pos2>| {
            pos.and_then(|pos| ctx.layer_id_at(pos))
                .is_some_and(|layer| layer != canvas_layer)
        };

        Self {
            hover_pos,
            press_origin,
            primary_pressed,
            primary_released,
            hover_covered: covered(hover_pos),
            press_covered: covered(press_origin),
        }
    }
}

/// Handles converting raw egui input into [`CanvasEvent`]s
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Last pointer position seen inside the canvas, in screen coordinates
    last_canvas_pos: Option<Pos2>,
    canvas_rect: Rect,
    canvas_layer: LayerId,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_canvas_pos: None,
            canvas_rect,
            canvas_layer: LayerId::background(),
        }
    }

    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// The layer the canvas is painted on; anything above it blocks input
    pub fn set_canvas_layer(&mut self, layer: LayerId) {
        self.canvas_layer = layer;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Read this frame's pointer state from egui and translate it
    pub fn process_input(&mut self, ctx: &Context) -> Vec<CanvasEvent> {
        self.translate(PointerSnapshot::from_context(ctx, self.canvas_layer))
    }

    /// Translate one frame of pointer state.
    ///
    /// Events come out as down first (at the press origin), then move or
    /// leave, then up. A pointer over a covering layer counts as off the canvas.
    pub fn translate(&mut self, snapshot: PointerSnapshot) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let canvas_pos = snapshot
            .hover_pos
            .filter(|pos| !snapshot.hover_covered && self.canvas_rect.contains(*pos));
        let press_pos = snapshot
            .primary_pressed
            .then_some(snapshot.press_origin.or(snapshot.hover_pos))
            .flatten()
            .filter(|pos| !snapshot.press_covered && self.canvas_rect.contains(*pos));

        if let Some(origin) = press_pos {
            events.push(CanvasEvent::PointerDown(self.to_canvas(origin)));
        }

        match (press_pos.or(self.last_canvas_pos), canvas_pos) {
            (Some(_), None) => events.push(CanvasEvent::PointerLeave),
            (previous, Some(pos)) if previous != Some(pos) => {
                events.push(CanvasEvent::PointerMove(self.to_canvas(pos)));
            }
            _ => {}
        }

        if let Some(pos) = canvas_pos {
            if snapshot.primary_released {
                events.push(CanvasEvent::PointerUp(self.to_canvas(pos)));
            }
        }

        self.last_canvas_pos = canvas_pos;
        events
    }
}
