use egui::{Color32, Pos2};

use crate::surface::Surface;

/// Glyphs are filled in a fixed ink, independent of the pen color
pub const GLYPH_COLOR: Color32 = Color32::BLACK;

/// An emoji (or any short text) stamped once at an anchor point.
///
/// The anchor is the left end of the glyph's baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMark {
    anchor: Pos2,
    glyph: String,
    font_size: f32,
}

impl GlyphMark {
    pub fn new(anchor: Pos2, glyph: impl Into<String>, font_size: f32) -> Self {
        Self {
            anchor,
            glyph: glyph.into(),
            font_size,
        }
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    /// Reposition a glyph that is still being placed
    pub fn move_to(&mut self, anchor: Pos2) {
        self.anchor = anchor;
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn display(&self, surface: &mut dyn Surface) {
        surface.fill_text(&self.glyph, self.anchor, self.font_size, GLYPH_COLOR);
    }
}
