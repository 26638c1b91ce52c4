use egui::{Color32, Pos2};

use super::Surface;

/// A single call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Path {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        width: f32,
        color: Color32,
    },
    Text {
        text: String,
        pos: Pos2,
        font_size: f32,
        color: Color32,
    },
}

/// Surface that records draw calls instead of producing pixels
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    /// Advance of one character, as a fraction of the font size
    char_advance: f32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            char_advance: 1.0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Ops recorded since the most recent clear, i.e. what is currently visible
    pub fn visible_ops(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        self.ops.push(DrawOp::Path {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, font_size: f32, color: Color32) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            pos,
            font_size,
            color,
        });
    }

    fn measure_text(&mut self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.char_advance
    }
}
