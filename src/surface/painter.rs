use egui::{Color32, FontId, Galley, Painter, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2};

use super::Surface;

/// Paper color of the on-screen canvas. Exports stay transparent.
pub const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

/// Draws onto an egui painter, mapping canvas coordinates into `rect`.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    canvas_size: Vec2,
}

impl<'a> PainterSurface<'a> {
    /// Creates a surface covering `rect` that represents a canvas of `canvas_size` units
    pub fn new(painter: &'a Painter, rect: Rect, canvas_size: Vec2) -> Self {
        Self {
            painter,
            rect,
            canvas_size,
        }
    }

    fn scale(&self) -> f32 {
        if self.canvas_size.x <= 0.0 {
            return 1.0;
        }
        self.rect.width() / self.canvas_size.x
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.rect.min + pos.to_vec2() * self.scale()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, CANVAS_BACKGROUND);
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.len() < 2 {
            return;
        }

        let screen_points = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter.add(Shape::line(
            screen_points,
            EguiStroke::new(width * self.scale(), color),
        ));
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        let scale = self.scale();
        self.painter.circle_stroke(
            self.to_screen(center),
            radius * scale,
            EguiStroke::new(width * scale, color),
        );
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, font_size: f32, color: Color32) {
        let galley = self.painter.layout_no_wrap(
            text.to_owned(),
            FontId::proportional(font_size * self.scale()),
            color,
        );
        let top_left = self.to_screen(pos) - Vec2::new(0.0, baseline_offset(&galley));
        self.painter.galley(top_left, galley, color);
    }

    fn measure_text(&mut self, text: &str, font_size: f32) -> f32 {
        let scale = self.scale();
        let galley = self.painter.layout_no_wrap(
            text.to_owned(),
            FontId::proportional(font_size * scale),
            Color32::BLACK,
        );
        galley.size().x / scale
    }
}

/// Distance from the top of a single-line galley to its baseline
fn baseline_offset(galley: &Galley) -> f32 {
    galley
        .rows
        .first()
        .and_then(|row| row.glyphs.first())
        .map_or(galley.size().y, |glyph| glyph.pos.y)
}
