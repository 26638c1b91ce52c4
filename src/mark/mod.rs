use std::sync::Arc;

use crate::surface::Surface;

mod glyph;
mod stroke;

pub use glyph::{GLYPH_COLOR, GlyphMark};
pub use stroke::StrokeMark;

/// Committed marks are shared between the history, the redo buffer and
/// event payloads without copying their points.
pub type MarkRef = Arc<Mark>;

/// Everything that can be placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Stroke(StrokeMark),
    Glyph(GlyphMark),
}

impl Mark {
    /// Draw this mark, and only this mark, onto the surface
    pub fn display(&self, surface: &mut dyn Surface) {
        match self {
            Self::Stroke(stroke) => stroke.display(surface),
            Self::Glyph(glyph) => glyph.display(surface),
        }
    }

    pub fn as_stroke(&self) -> Option<&StrokeMark> {
        match self {
            Self::Stroke(stroke) => Some(stroke),
            _ => None,
        }
    }

    pub fn as_glyph(&self) -> Option<&GlyphMark> {
        match self {
            Self::Glyph(glyph) => Some(glyph),
            _ => None,
        }
    }

    pub fn into_ref(self) -> MarkRef {
        Arc::new(self)
    }
}

impl From<StrokeMark> for Mark {
    fn from(stroke: StrokeMark) -> Self {
        Self::Stroke(stroke)
    }
}

impl From<GlyphMark> for Mark {
    fn from(glyph: GlyphMark) -> Self {
        Self::Glyph(glyph)
    }
}
