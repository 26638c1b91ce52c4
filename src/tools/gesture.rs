use egui::{Pos2, Vec2};
use log::debug;

use super::{Tool, ToolSelection};
use crate::history::HistoryStore;
use crate::mark::{GlyphMark, MarkRef, StrokeMark};
use crate::preview::ToolPreview;
use crate::surface::Surface;

/// Offset from the pointer to a placed glyph's anchor, so the glyph sits
/// roughly centered under the cursor.
pub const DEFAULT_GLYPH_OFFSET: Vec2 = Vec2::new(-15.0, 1.0);

/// Where the controller is in a press-drag-release gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// The newest mark in the history is a stroke that grows with every move
    DrawingStroke,
    /// A glyph follows the pointer until release
    PlacingGlyph { glyph: GlyphMark },
}

/// Turns pointer events into marks.
///
/// A stroke goes into the history on press and is extended there, so undo
/// and clear during a drag act on it like on any other mark. A glyph only
/// reaches the history on release. Every method returns whether the visible
/// canvas changed so the caller knows to redraw.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    preview: Option<ToolPreview>,
    glyph_offset: Vec2,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(DEFAULT_GLYPH_OFFSET)
    }
}

impl GestureController {
    pub fn new(glyph_offset: Vec2) -> Self {
        Self {
            state: GestureState::Idle,
            preview: None,
            glyph_offset,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn current_state_name(&self) -> &'static str {
        match self.state {
            GestureState::Idle => "Idle",
            GestureState::DrawingStroke => "DrawingStroke",
            GestureState::PlacingGlyph { .. } => "PlacingGlyph",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    pub fn preview(&self) -> Option<&ToolPreview> {
        self.preview.as_ref()
    }

    /// Start a stroke or a glyph placement depending on the active tool
    pub fn pointer_down(&mut self, pos: Pos2, tools: &ToolSelection, history: &mut HistoryStore) -> bool {
        if !self.is_idle() {
            debug!("Ignoring pointer down while {}", self.current_state_name());
            return false;
        }

        self.state = match tools.active_tool() {
            Tool::Glyph { glyph } => {
                let anchor = pos + self.glyph_offset;
                debug!("Placing glyph {} at {:?}", glyph, anchor);
                GestureState::PlacingGlyph {
                    glyph: GlyphMark::new(anchor, glyph, tools.glyph_size()),
                }
            }
            Tool::Pen { width, color } => {
                debug!("Starting stroke at {:?}", pos);
                history.begin(StrokeMark::with_points(vec![pos], width, color));
                GestureState::DrawingStroke
            }
        };
        true
    }

    /// Extend the stroke or drag the glyph, and move the tool preview.
    ///
    /// The preview is rebuilt from the current tool every time so a tool
    /// change shows up on the next move.
    pub fn pointer_move(&mut self, pos: Pos2, tools: &ToolSelection, history: &mut HistoryStore) -> bool {
        match &mut self.state {
            GestureState::Idle => {}
            GestureState::DrawingStroke => {
                if !history.extend_current(pos) {
                    debug!("Stroke is no longer open, dropping {:?}", pos);
                }
            }
            GestureState::PlacingGlyph { glyph } => glyph.move_to(pos + self.glyph_offset),
        }

        self.preview = Some(tools.preview().with_position(pos));
        true
    }

    /// Finish the gesture. A glyph is pushed to `history`; a stroke is
    /// already there and is only closed. Returns the finished mark, or
    /// `None` if there was no gesture or its stroke has been undone.
    pub fn pointer_up(&mut self, history: &mut HistoryStore) -> Option<MarkRef> {
        let finished = match std::mem::take(&mut self.state) {
            GestureState::Idle => return None,
            GestureState::DrawingStroke => {
                let stroke = history.finish_current();
                debug!("Finished stroke ({})", if stroke.is_some() { "kept" } else { "undone" });
                stroke
            }
            GestureState::PlacingGlyph { glyph } => {
                debug!("Committing glyph {} at {:?}", glyph.glyph(), glyph.anchor());
                Some(history.push(glyph))
            }
        };

        self.preview = None;
        finished
    }

    /// The pointer left the canvas: close any open gesture and hide the preview
    pub fn pointer_leave(&mut self, history: &mut HistoryStore) -> (Option<MarkRef>, bool) {
        let was_open = !self.is_idle();
        let had_preview = self.preview.take().is_some();
        let finished = self.pointer_up(history);
        (finished, had_preview || was_open)
    }

    /// Abandon the open gesture. A glyph being placed is dropped; a stroke
    /// stays wherever the history has it.
    pub fn cancel(&mut self, history: &mut HistoryStore) -> bool {
        if matches!(self.state, GestureState::DrawingStroke) {
            history.finish_current();
        }
        !matches!(std::mem::take(&mut self.state), GestureState::Idle)
    }

    /// Draw the glyph being placed, if any. An open stroke is drawn with the
    /// rest of the history.
    pub fn display_current(&self, surface: &mut dyn Surface) {
        if let GestureState::PlacingGlyph { glyph } = &self.state {
            glyph.display(surface);
        }
    }
}
