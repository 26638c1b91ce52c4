use crate::history::HistoryStore;
use crate::mark::MarkRef;
use crate::surface::Surface;
use crate::tools::GestureController;

/// Repaints a surface from the model.
///
/// Nothing is drawn incrementally: every call clears the surface and draws
/// the committed marks (an open stroke among them), then a glyph being
/// placed, then the tool preview on top.
#[derive(Debug, Clone, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn redraw(
        &self,
        surface: &mut dyn Surface,
        history: &HistoryStore,
        gesture: &GestureController,
    ) {
        surface.clear();
        draw_marks(surface, history.marks());
        gesture.display_current(surface);

        if let Some(preview) = gesture.preview() {
            preview.draw(surface);
        }
    }
}

/// Draw marks in order, oldest first, without clearing
pub fn draw_marks(surface: &mut dyn Surface, marks: &[MarkRef]) {
    for mark in marks {
        mark.display(surface);
    }
}
