//! Text rasterization into the pixel buffer.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};

use crate::drawing::blend;

/// Shapes and rasterizes single lines of sans-serif text straight into an
/// ARGB pixel buffer. Owns the font system and glyph cache, so one
/// instance lives inside the indicator context for the whole session.
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    /// Draw `text` centered on (`x`, `y`), both axes. The colour's alpha
    /// channel scales the glyph coverage, so translucent text works.
    /// Returns the rendered text width in pixels.
    pub fn draw_text_center(
        &mut self,
        pixels: &mut [u32],
        stride: usize,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        colour: u32,
    ) -> f32 {
        let attrs = Attrs::new().family(Family::SansSerif);

        let metrics = Metrics::relative(size, 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let Some(run) = buffer.layout_runs().next() else {
            return 0.0;
        };

        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        for glyph in run.glyphs {
            min_x = min_x.min(glyph.x);
            max_x = max_x.max(glyph.x + glyph.w);
        }
        if min_x > max_x {
            return 0.0;
        }
        let text_width = max_x - min_x;
        let text_height = run.line_height;

        self.render_buffer(
            &mut buffer,
            pixels,
            stride,
            x - text_width / 2.0,
            y - text_height / 2.0,
            colour,
        );

        text_width
    }

    fn render_buffer(
        &mut self,
        buffer: &mut Buffer,
        pixels: &mut [u32],
        stride: usize,
        offset_x: f32,
        offset_y: f32,
        colour: u32,
    ) {
        let colour_alpha = colour >> 24;
        let rgb = colour & 0x00FF_FFFF;

        for run in buffer.layout_runs() {
            let baseline_offset = run.line_y;

            for glyph in run.glyphs {
                let physical_glyph = glyph.physical((offset_x, offset_y), 1.0);

                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y + baseline_offset as i32 - image.placement.top;

                let glyph_width = image.placement.width as usize;
                let glyph_height = image.placement.height as usize;

                for cy in 0..glyph_height {
                    for cx in 0..glyph_width {
                        let coverage = image.data[cy * glyph_width + cx] as u32;
                        if coverage == 0 {
                            continue;
                        }
                        let final_x = glyph_x as isize + cx as isize;
                        let final_y = glyph_y as isize + cy as isize;
                        if final_x < 0 || final_y < 0 || final_x >= stride as isize {
                            continue;
                        }
                        let idx = final_y as usize * stride + final_x as usize;
                        if idx >= pixels.len() {
                            continue;
                        }
                        let alpha = coverage * colour_alpha / 255;
                        pixels[idx] = blend(pixels[idx], alpha << 24 | rgb);
                    }
                }
            }
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Glyph output depends on the fonts installed on the host, so these
    // tests only pin down the parts that do not: clipping safety and the
    // empty-input path.

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut renderer = TextRenderer::new();
        let mut pixels = vec![0u32; 64 * 64];
        let width =
            renderer.draw_text_center(&mut pixels, 64, "", 32.0, 32.0, 16.0, 0xFF_FF_FF_FF);
        assert_eq!(width, 0.0);
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_draw_near_edges_stays_in_bounds() {
        let mut renderer = TextRenderer::new();
        let mut pixels = vec![0u32; 16 * 16];
        // Would slice out of bounds without clipping; must not panic
        renderer.draw_text_center(&mut pixels, 16, "0123456789", -4.0, -4.0, 32.0, 0xFF_FF_FF_FF);
        renderer.draw_text_center(&mut pixels, 16, "0123456789", 15.0, 15.0, 32.0, 0xFF_FF_FF_FF);
    }
}
