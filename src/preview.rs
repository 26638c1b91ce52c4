use egui::{Color32, Pos2};

use crate::surface::Surface;

/// Outline width of the pen cursor
pub const PREVIEW_OUTLINE_WIDTH: f32 = 1.0;

/// Cursor ghost showing what the next press will place. Never part of history.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPreview {
    /// Circle the size of the active pen
    Circle {
        position: Pos2,
        radius: f32,
        color: Color32,
    },
    /// The active glyph, centered horizontally on the pointer
    Glyph {
        position: Pos2,
        glyph: String,
        font_size: f32,
    },
}

impl ToolPreview {
    pub fn circle(radius: f32, color: Color32) -> Self {
        Self::Circle {
            position: Pos2::ZERO,
            radius,
            color,
        }
    }

    pub fn glyph(glyph: impl Into<String>, font_size: f32) -> Self {
        Self::Glyph {
            position: Pos2::ZERO,
            glyph: glyph.into(),
            font_size,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        match self {
            Self::Circle { position, .. } | Self::Glyph { position, .. } => {
                *position = Pos2::new(x, y);
            }
        }
    }

    pub fn with_position(mut self, pos: Pos2) -> Self {
        self.set_position(pos.x, pos.y);
        self
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Self::Circle {
                position,
                radius,
                color,
            } => {
                surface.stroke_circle(*position, *radius, PREVIEW_OUTLINE_WIDTH, *color);
            }
            Self::Glyph {
                position,
                glyph,
                font_size,
            } => {
                let width = surface.measure_text(glyph, *font_size);
                let origin = Pos2::new(position.x - width / 2.0, position.y);
                surface.fill_text(glyph, origin, *font_size, crate::mark::GLYPH_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn test_circle_drawn_at_last_position() {
        let mut preview = ToolPreview::circle(3.5, Color32::BLACK);
        preview.set_position(10.0, 10.0);
        preview.set_position(40.0, 12.0);
        let mut surface = RecordingSurface::new();

        preview.draw(&mut surface);

        assert_eq!(
            surface.ops(),
            &[DrawOp::Circle {
                center: Pos2::new(40.0, 12.0),
                radius: 3.5,
                width: PREVIEW_OUTLINE_WIDTH,
                color: Color32::BLACK,
            }]
        );
    }

    #[test]
    fn test_glyph_is_centered_on_pointer() {
        let preview = ToolPreview::glyph("😂", 20.0).with_position(Pos2::new(100.0, 100.0));
        let mut surface = RecordingSurface::new();

        preview.draw(&mut surface);

        // The recording surface measures one char as one font size wide
        match &surface.ops()[0] {
            DrawOp::Text { pos, text, .. } => {
                assert_eq!(text, "😂");
                assert_eq!(*pos, Pos2::new(90.0, 100.0));
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
}
