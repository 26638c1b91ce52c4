use egui::{Color32, ecolor::rgb_from_hsv};

use crate::preview::ToolPreview;

mod gesture;
pub use gesture::{GestureController, GestureState};

/// The tool that the next press will use. Pen and glyph are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    Pen { width: f32, color: Color32 },
    Glyph { glyph: String },
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pen { .. } => "Pen",
            Self::Glyph { .. } => "Glyph",
        }
    }
}

/// Active tool settings for the session.
///
/// The pen width and color are kept while a glyph is selected, so switching
/// back to the pen restores them.
#[derive(Debug, Clone)]
pub struct ToolSelection {
    pen_width: f32,
    pen_color: Color32,
    active_glyph: Option<String>,
    glyph_size: f32,
}

impl Default for ToolSelection {
    fn default() -> Self {
        Self::new(1.0, Color32::BLACK, 28.0)
    }
}

impl ToolSelection {
    pub fn new(pen_width: f32, pen_color: Color32, glyph_size: f32) -> Self {
        Self {
            pen_width,
            pen_color,
            active_glyph: None,
            glyph_size,
        }
    }

    /// Switch to the pen with new settings, deselecting any glyph
    pub fn select_pen(&mut self, width: f32, color: Color32) -> bool {
        if !(width > 0.0 && width.is_finite()) {
            log::warn!("Ignoring pen selection with invalid width {}", width);
            return false;
        }

        self.pen_width = width;
        self.pen_color = color;
        self.active_glyph = None;
        true
    }

    /// Switch to stamping `glyph`. Blank glyphs are rejected and the
    /// previous selection stays active.
    pub fn select_glyph(&mut self, glyph: &str) -> bool {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            log::warn!("Ignoring empty glyph selection");
            return false;
        }

        self.active_glyph = Some(glyph.to_owned());
        true
    }

    /// Set the pen color from a hue in degrees at full saturation and value
    pub fn set_pen_hue(&mut self, hue_degrees: f32) {
        self.pen_color = hue_to_color(hue_degrees);
    }

    pub fn active_tool(&self) -> Tool {
        match &self.active_glyph {
            Some(glyph) => Tool::Glyph {
                glyph: glyph.clone(),
            },
            None => Tool::Pen {
                width: self.pen_width,
                color: self.pen_color,
            },
        }
    }

    pub fn active_glyph(&self) -> Option<&str> {
        self.active_glyph.as_deref()
    }

    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    pub fn pen_color(&self) -> Color32 {
        self.pen_color
    }

    pub fn glyph_size(&self) -> f32 {
        self.glyph_size
    }

    /// A fresh preview for the current tool, not yet positioned
    pub fn preview(&self) -> ToolPreview {
        match &self.active_glyph {
            Some(glyph) => ToolPreview::glyph(glyph.clone(), self.glyph_size),
            None => ToolPreview::circle(self.pen_width / 2.0, self.pen_color),
        }
    }
}

/// Fully saturated sRGB color for a hue in degrees, wrapping outside 0..360.
/// Matches `hsl(hue, 100%, 50%)`.
pub fn hue_to_color(hue_degrees: f32) -> Color32 {
    let hue = hue_degrees.rem_euclid(360.0) / 360.0;
    let [r, g, b] = rgb_from_hsv((hue, 1.0, 1.0));
    let channel = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}
