use egui::{Context, Event, PointerButton, Pos2, Rect, Vec2};

/// Pointer input in canvas coordinates, already filtered to the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
    /// The pointer left the canvas; ends any open gesture
    Leave,
}

/// Converts raw egui input into [`PointerEvent`]s for the canvas.
///
/// Raw events are used instead of the per-frame pointer state so fast
/// strokes keep every intermediate position egui received.
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    canvas_size: Vec2,
    inside: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, canvas_size: Vec2) -> Self {
        Self {
            canvas_rect,
            canvas_size,
            inside: false,
        }
    }

    /// Update the screen rectangle the canvas occupies
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Map a screen position into canvas units
    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        let scale_x = self.canvas_size.x / self.canvas_rect.width().max(f32::EPSILON);
        let scale_y = self.canvas_size.y / self.canvas_rect.height().max(f32::EPSILON);
        let offset = pos - self.canvas_rect.min;
        Pos2::new(offset.x * scale_x, offset.y * scale_y)
    }

    /// Process this frame's raw egui input
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        ctx.input(|input| self.process_events(&input.events))
    }

    pub fn process_events(&mut self, events: &[Event]) -> Vec<PointerEvent> {
        let mut out = Vec::new();

        for event in events {
            match event {
                Event::PointerMoved(pos) => {
                    if self.canvas_rect.contains(*pos) {
                        self.inside = true;
                        out.push(PointerEvent::Move(self.to_canvas(*pos)));
                    } else if self.inside {
                        self.inside = false;
                        out.push(PointerEvent::Leave);
                    }
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if *pressed && self.canvas_rect.contains(*pos) {
                        self.inside = true;
                        out.push(PointerEvent::Down(self.to_canvas(*pos)));
                    } else if !*pressed && self.inside {
                        out.push(PointerEvent::Up(self.to_canvas(*pos)));
                    }
                }
                Event::PointerGone => {
                    if self.inside {
                        self.inside = false;
                        out.push(PointerEvent::Leave);
                    }
                }
                _ => {}
            }
        }

        out
    }
}
