use std::io::Cursor;

use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use egui::{Color32, Pos2, Rect, Vec2};
use image::{ImageFormat, Rgba, RgbaImage};

use super::Surface;
use crate::error::{ExportError, ExportResult};
use crate::geometry::{calculate_bounds, distance_to_line_segment};

/// Largest image the rasterizer will allocate, 8192 x 8192 pixels
pub const MAX_RASTER_PIXELS: u64 = 8192 * 8192;

/// Pixel dimensions of a `width` x `height` canvas drawn at `scale`.
///
/// Fails instead of overflowing when the result is empty or larger than
/// [`MAX_RASTER_PIXELS`].
pub fn pixel_size(width: u32, height: u32, scale: f32) -> ExportResult<(u32, u32)> {
    let scaled = |units: u32| (f64::from(units) * f64::from(scale)).round();
    let (pixel_width, pixel_height) = (scaled(width), scaled(height));

    // NaN fails both comparisons and lands here too
    if !(pixel_width >= 1.0 && pixel_height >= 1.0) {
        return Err(ExportError::EmptyCanvas {
            width: pixel_width.max(0.0) as u32,
            height: pixel_height.max(0.0) as u32,
        });
    }
    if pixel_width * pixel_height > MAX_RASTER_PIXELS as f64 {
        return Err(ExportError::TooLarge {
            width: pixel_width as u64,
            height: pixel_height as u64,
            max: MAX_RASTER_PIXELS,
        });
    }

    Ok((pixel_width as u32, pixel_height as u32))
}

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Software rasterizer backed by an RGBA image.
///
/// Canvas coordinates, line widths and font sizes are all multiplied by
/// `scale`, so a 256x256 canvas drawn with scale 4 fills a 1024x1024 image.
pub struct RasterSurface {
    image: RgbaImage,
    scale: f32,
    fonts: Vec<FontRef<'static>>,
}

impl RasterSurface {
    /// Creates a transparent surface for a canvas of `width` x `height` units
    pub fn new(width: u32, height: u32, scale: f32) -> ExportResult<Self> {
        let (pixel_width, pixel_height) = pixel_size(width, height, scale)?;

        Ok(Self {
            image: RgbaImage::from_pixel(pixel_width, pixel_height, TRANSPARENT),
            scale,
            fonts: load_fonts(),
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encodes the current pixels as a PNG file in memory
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn to_pixels(&self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x * self.scale, pos.y * self.scale)
    }

    /// Pixel range covered by `rect`, clamped to the image
    fn pixel_range(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 || !rect.is_finite() {
            return None;
        }

        let x0 = rect.min.x.floor().max(0.0) as u32;
        let y0 = rect.min.y.floor().max(0.0) as u32;
        let x1 = (rect.max.x.ceil().max(0.0) as u32).min(w);
        let y1 = (rect.max.y.ceil().max(0.0) as u32).min(h);

        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Source-over blend of `color` at `coverage` into one pixel
    fn blend(&mut self, x: u32, y: u32, color: Color32, coverage: f32) {
        if coverage <= 0.0 || x >= self.image.width() || y >= self.image.height() {
            return;
        }

        let [sr, sg, sb, sa] = color.to_srgba_unmultiplied();
        let src_a = (sa as f32 / 255.0) * coverage.min(1.0);
        let dst = self.image.get_pixel_mut(x, y);
        let dst_a = dst.0[3] as f32 / 255.0;

        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let mix = |s: u8, d: u8| {
            let value = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };

        *dst = Rgba([
            mix(sr, dst.0[0]),
            mix(sg, dst.0[1]),
            mix(sb, dst.0[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }

    /// Index of the first font with a real glyph for `c`, with the glyph id
    fn glyph_for(&self, c: char) -> Option<(usize, GlyphId)> {
        self.fonts.iter().enumerate().find_map(|(index, font)| {
            let id = font.glyph_id(c);
            (id.0 != 0).then_some((index, id))
        })
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.len() < 2 {
            return;
        }

        let pixels: Vec<Pos2> = points.iter().map(|p| self.to_pixels(*p)).collect();
        let half_width = (width * self.scale) / 2.0;
        let bounds = calculate_bounds(&pixels, half_width + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_range(bounds) else {
            return;
        };

        // Coverage is accumulated per path so overlapping segments don't darken joints
        let span = (x1 - x0) as usize;
        let mut coverage = vec![0.0_f32; span * (y1 - y0) as usize];

        for segment in pixels.windows(2) {
            let seg_bounds = calculate_bounds(segment, half_width + 1.0);
            let Some((sx0, sy0, sx1, sy1)) = self.pixel_range(seg_bounds) else {
                continue;
            };

            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let distance = distance_to_line_segment(center, segment[0], segment[1]);
                    let cov = (half_width + 0.5 - distance).clamp(0.0, 1.0);
                    let slot = &mut coverage[(y - y0) as usize * span + (x - x0) as usize];
                    *slot = slot.max(cov);
                }
            }
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let cov = coverage[(y - y0) as usize * span + (x - x0) as usize];
                self.blend(x, y, color, cov);
            }
        }
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        let center = self.to_pixels(center);
        let radius = radius * self.scale;
        let half_width = (width * self.scale) / 2.0;
        let reach = radius + half_width + 1.0;
        let bounds = Rect::from_center_size(center, Vec2::splat(reach * 2.0));
        let Some((x0, y0, x1, y1)) = self.pixel_range(bounds) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = ((pixel - center).length() - radius).abs();
                self.blend(x, y, color, (half_width + 0.5 - distance).clamp(0.0, 1.0));
            }
        }
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, font_size: f32, color: Color32) {
        let origin = self.to_pixels(pos);
        let size = font_size * self.scale;
        let mut caret = origin.x;
        let mut previous: Option<(usize, GlyphId)> = None;
        let mut outlines = Vec::new();

        for c in text.chars() {
            let Some((font_index, id)) = self.glyph_for(c) else {
                continue;
            };
            let font = &self.fonts[font_index];
            let scale = font.pt_to_px_scale(size).unwrap_or(PxScale::from(size));
            let scaled = font.as_scaled(scale);

            if let Some((prev_index, prev_id)) = previous {
                if prev_index == font_index {
                    caret += scaled.kern(prev_id, id);
                }
            }

            let glyph = id.with_scale_and_position(scale, point(caret, origin.y));
            caret += scaled.h_advance(id);
            previous = Some((font_index, id));

            if let Some(outlined) = font.outline_glyph(glyph) {
                outlines.push(outlined);
            }
        }

        for outlined in outlines {
            let bounds = outlined.px_bounds();
            let mut hits = Vec::new();
            outlined.draw(|gx, gy, cov| {
                let x = bounds.min.x + gx as f32;
                let y = bounds.min.y + gy as f32;
                if x >= 0.0 && y >= 0.0 {
                    hits.push((x as u32, y as u32, cov));
                }
            });
            for (x, y, cov) in hits {
                self.blend(x, y, color, cov);
            }
        }
    }

    fn measure_text(&mut self, text: &str, font_size: f32) -> f32 {
        let mut width = 0.0;
        for c in text.chars() {
            if let Some((font_index, id)) = self.glyph_for(c) {
                let font = &self.fonts[font_index];
                let scale = font.pt_to_px_scale(font_size).unwrap_or(PxScale::from(font_size));
                width += font.as_scaled(scale).h_advance(id);
            }
        }
        width
    }
}

/// Loads egui's bundled fonts in fallback order: text first, then emoji
fn load_fonts() -> Vec<FontRef<'static>> {
    let sources: [(&str, &'static [u8]); 3] = [
        ("Ubuntu-Light", epaint_default_fonts::UBUNTU_LIGHT),
        ("NotoEmoji-Regular", epaint_default_fonts::NOTO_EMOJI_REGULAR),
        ("emoji-icon-font", epaint_default_fonts::EMOJI_ICON),
    ];

    sources
        .into_iter()
        .filter_map(|(name, bytes)| match FontRef::try_from_slice(bytes) {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("Skipping font {}: {}", name, err);
                None
            }
        })
        .collect()
}
