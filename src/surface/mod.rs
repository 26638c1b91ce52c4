use egui::{Color32, Pos2};

mod painter;
mod raster;
mod recording;

pub use painter::{CANVAS_BACKGROUND, PainterSurface};
pub use raster::{MAX_RASTER_PIXELS, RasterSurface, pixel_size};
pub use recording::{DrawOp, RecordingSurface};

/// A 2D drawing target in canvas coordinates.
///
/// Marks, previews and the render pipeline only ever talk to this trait, so
/// the same drawing code paints the on-screen canvas, the export image and
/// the recorder used by tests.
pub trait Surface {
    /// Wipe every pixel back to the surface's background
    fn clear(&mut self);

    /// Stroke straight segments through `points` in order.
    ///
    /// Fewer than two points produce nothing visible.
    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Stroke the outline of a circle
    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32);

    /// Fill `text` with its left edge at `pos.x` and its baseline at `pos.y`
    fn fill_text(&mut self, text: &str, pos: Pos2, font_size: f32, color: Color32);

    /// Horizontal advance of `text` at the given font size
    fn measure_text(&mut self, text: &str, font_size: f32) -> f32;
}
