use egui::{Color32, Pos2};

use crate::surface::Surface;

/// A freehand stroke: connected straight segments through recorded points.
///
/// Width and color are captured when the stroke starts, so changing the
/// active pen later never alters strokes already on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeMark {
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
}

impl StrokeMark {
    /// Create a stroke from already recorded points
    pub fn with_points(points: Vec<Pos2>, width: f32, color: Color32) -> Self {
        Self {
            points,
            width,
            color,
        }
    }

    /// Append a point while the stroke is under construction
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn display(&self, surface: &mut dyn Surface) {
        if self.points.is_empty() {
            return;
        }
        surface.stroke_path(&self.points, self.width, self.color);
    }
}
