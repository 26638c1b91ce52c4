use std::path::{Path, PathBuf};

use crate::config::SketchConfig;
use crate::error::ExportResult;
use crate::mark::MarkRef;
use crate::renderer::draw_marks;
use crate::surface::RasterSurface;

/// Renders committed marks into an upscaled PNG.
///
/// Only the snapshot is drawn: no in-progress mark and no tool preview.
#[derive(Debug, Clone)]
pub struct Exporter {
    canvas_width: u32,
    canvas_height: u32,
    scale: f32,
    file_name: String,
}

impl Exporter {
    pub fn new(canvas_width: u32, canvas_height: u32, scale: f32, file_name: impl Into<String>) -> Self {
        Self {
            canvas_width,
            canvas_height,
            scale,
            file_name: file_name.into(),
        }
    }

    pub fn from_config(config: &SketchConfig) -> Self {
        Self::new(
            config.canvas_width,
            config.canvas_height,
            config.export_scale,
            config.export_file_name.clone(),
        )
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Draw `marks` onto a fresh raster surface at export resolution
    pub fn render(&self, marks: &[MarkRef]) -> ExportResult<RasterSurface> {
        let mut surface = RasterSurface::new(self.canvas_width, self.canvas_height, self.scale)?;
        draw_marks(&mut surface, marks);
        Ok(surface)
    }

    /// Render and encode as PNG bytes
    pub fn render_png(&self, marks: &[MarkRef]) -> ExportResult<Vec<u8>> {
        let surface = self.render(marks)?;
        Ok(surface.encode_png()?)
    }

    /// Render and write `<dir>/<file_name>`, returning the written path
    pub fn export_to_dir(&self, marks: &[MarkRef], dir: &Path) -> ExportResult<(PathBuf, usize)> {
        let bytes = self.render_png(marks)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &bytes)?;
        log::info!("Exported {} marks to {} ({} bytes)", marks.len(), path.display(), bytes.len());
        Ok((path, bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::mark::{Mark, StrokeMark};
    use egui::{Color32, Pos2};

    #[test]
    fn test_render_scales_to_export_resolution() {
        let exporter = Exporter::from_config(&SketchConfig::default());
        let surface = exporter.render(&[]).unwrap();
        assert_eq!(surface.image().dimensions(), (1024, 1024));
        assert!(surface.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_stroke_lands_at_scaled_position() {
        let exporter = Exporter::new(64, 64, 4.0, "drawing.png");
        let mark = Mark::from(StrokeMark::with_points(
            vec![Pos2::new(8.0, 32.0), Pos2::new(56.0, 32.0)],
            2.0,
            Color32::BLACK,
        ))
        .into_ref();

        let surface = exporter.render(&[mark]).unwrap();

        // Canvas (32, 32) maps to pixel (128, 128)
        assert_eq!(surface.image().get_pixel(128, 128).0[3], 255);
        assert_eq!(surface.image().get_pixel(128, 100).0[3], 0);
    }

    #[test]
    fn test_zero_sized_canvas_is_an_error() {
        let exporter = Exporter::new(0, 256, 4.0, "drawing.png");
        assert!(matches!(
            exporter.render(&[]),
            Err(ExportError::EmptyCanvas { width: 0, .. })
        ));
    }

    #[test]
    fn test_oversized_export_is_an_error() {
        let config = SketchConfig {
            export_scale: 1.0e6,
            ..SketchConfig::default()
        };
        assert!(matches!(
            Exporter::from_config(&config).render(&[]),
            Err(ExportError::TooLarge { .. })
        ));
    }
}
