use std::path::Path;

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::pixel_size;

/// File the native binary looks for in the working directory
pub const CONFIG_FILE_NAME: &str = "sketchpad.json";

/// A pen button in the tools panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenPreset {
    pub label: String,
    pub width: f32,
    /// sRGB color
    #[serde(default)]
    pub color: [u8; 3],
}

impl PenPreset {
    pub fn new(label: &str, width: f32) -> Self {
        Self {
            label: label.to_owned(),
            width,
            color: [0, 0, 0],
        }
    }

    pub fn color32(&self) -> Color32 {
        let [r, g, b] = self.color;
        Color32::from_rgb(r, g, b)
    }
}

/// Session and app settings. Every field has a default, so a config file
/// only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Export resolution multiplier
    pub export_scale: f32,
    pub export_file_name: String,
    /// Pen width before any preset is picked
    pub default_pen_width: f32,
    pub pen_presets: Vec<PenPreset>,
    /// Built-in glyph buttons
    pub glyphs: Vec<String>,
    /// Font size of placed glyphs, in canvas units
    pub glyph_size: f32,
    /// Offset from pointer to glyph anchor
    pub glyph_offset: [f32; 2],
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 256,
            canvas_height: 256,
            export_scale: 4.0,
            export_file_name: "drawing.png".to_owned(),
            default_pen_width: 1.0,
            pen_presets: vec![PenPreset::new("Thin", 1.75), PenPreset::new("Thick", 7.0)],
            glyphs: vec!["😁".to_owned(), "😂".to_owned(), "😭".to_owned()],
            glyph_size: 28.0,
            glyph_offset: [-15.0, 1.0],
        }
    }
}

impl SketchConfig {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.export_scale > 0.0 && self.export_scale.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "export_scale must be positive, got {}",
                self.export_scale
            )));
        }
        if let Err(err) = pixel_size(self.canvas_width, self.canvas_height, self.export_scale) {
            return Err(ConfigError::Invalid(err.to_string()));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("export_file_name is empty".to_owned()));
        }
        if !(self.default_pen_width > 0.0 && self.glyph_size > 0.0) {
            return Err(ConfigError::Invalid(
                "default_pen_width and glyph_size must be positive".to_owned(),
            ));
        }
        if let Some(preset) = self.pen_presets.iter().find(|p| !(p.width > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "pen preset {:?} has width {}",
                preset.label, preset.width
            )));
        }
        if self.glyphs.iter().any(|g| g.trim().is_empty()) {
            return Err(ConfigError::Invalid("glyph list contains an empty entry".to_owned()));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    pub fn glyph_offset(&self) -> Vec2 {
        Vec2::new(self.glyph_offset[0], self.glyph_offset[1])
    }
}
