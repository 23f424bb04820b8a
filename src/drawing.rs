//! Pixel primitives shared by the render pass.
//!
//! Everything operates on a plain `&mut [u32]` ARGB buffer with a row
//! stride, so the same code draws into the off-screen widget buffer and
//! the full-resolution backing surface.

use image::RgbaImage;
use rayon::prelude::*;

const TAU: f64 = std::f64::consts::TAU;

/// Decode a 6-hex-digit colour string ("1e1e1e") into an opaque packed
/// ARGB value. A channel that fails to parse falls back to zero instead of
/// raising; a malformed string therefore degrades towards black.
pub fn parse_hex_colour(colour: &str) -> u32 {
    let channel = |range: std::ops::Range<usize>| -> u32 {
        colour
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0) as u32
    };
    0xFF00_0000 | channel(0..2) << 16 | channel(2..4) << 8 | channel(4..6)
}

/// Straight-alpha src-over blend of two packed ARGB pixels.
#[inline]
pub fn blend(dst: u32, src: u32) -> u32 {
    let sa = src >> 24;
    if sa == 0xFF {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst >> 24;
    let inv = 255 - sa;
    // Effective destination weight after the source is laid over it
    let dw = da * inv / 255;
    let out_a = sa + dw;
    if out_a == 0 {
        return 0;
    }
    let ch = |shift: u32| {
        let sc = (src >> shift) & 0xFF;
        let dc = (dst >> shift) & 0xFF;
        (sc * sa + dc * dw) / out_a
    };
    out_a << 24 | ch(16) << 16 | ch(8) << 8 | ch(0)
}

/// Scale a colour's alpha channel by `coverage` in 0.0..=1.0.
#[inline]
pub fn with_coverage(colour: u32, coverage: f64) -> u32 {
    let a = ((colour >> 24) as f64 * coverage.clamp(0.0, 1.0)) as u32;
    a << 24 | (colour & 0x00FF_FFFF)
}

/// Fill the whole buffer with one colour (no blending).
pub fn clear(pixels: &mut [u32], colour: u32) {
    pixels.fill(colour);
}

/// Blend an axis-aligned rectangle into the buffer, clipped to its bounds.
pub fn fill_rect(pixels: &mut [u32], stride: usize, x: i32, y: i32, w: u32, h: u32, colour: u32) {
    if stride == 0 || pixels.is_empty() {
        return;
    }
    let rows = pixels.len() / stride;
    let x0 = (x.max(0) as usize).min(stride);
    let y0 = y.max(0) as usize;
    let x1 = ((x as i64 + w as i64).clamp(0, stride as i64)) as usize;
    let y1 = ((y as i64 + h as i64).clamp(0, rows as i64)) as usize;
    for row in y0..y1 {
        for px in &mut pixels[row * stride + x0..row * stride + x1] {
            *px = blend(*px, colour);
        }
    }
}

/// Rectangle outline of the given thickness, drawn inside the rect bounds.
pub fn stroke_rect(
    pixels: &mut [u32],
    stride: usize,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    thickness: u32,
    colour: u32,
) {
    let t = thickness.min(w).min(h);
    fill_rect(pixels, stride, x, y, w, t, colour);
    fill_rect(pixels, stride, x, y + (h - t) as i32, w, t, colour);
    fill_rect(pixels, stride, x, y + t as i32, t, h.saturating_sub(2 * t), colour);
    fill_rect(
        pixels,
        stride,
        x + (w - t) as i32,
        y + t as i32,
        t,
        h.saturating_sub(2 * t),
        colour,
    );
}

/// Per-pixel coverage of a circular disc edge, one pixel of feathering.
#[inline]
fn disc_coverage(dist: f64, radius: f64) -> f64 {
    (radius + 0.5 - dist).clamp(0.0, 1.0)
}

/// Blend a filled disc centered at (`cx`, `cy`).
pub fn fill_circle(pixels: &mut [u32], stride: usize, cx: f64, cy: f64, radius: f64, colour: u32) {
    if stride == 0 || pixels.is_empty() || radius <= 0.0 {
        return;
    }
    let rows = pixels.len() / stride;
    let x0 = ((cx - radius - 1.0).floor().max(0.0)) as usize;
    let y0 = ((cy - radius - 1.0).floor().max(0.0)) as usize;
    let x1 = (((cx + radius + 2.0).ceil()).clamp(0.0, stride as f64)) as usize;
    let y1 = (((cy + radius + 2.0).ceil()).clamp(0.0, rows as f64)) as usize;
    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            let cov = disc_coverage((dx * dx + dy * dy).sqrt(), radius);
            if cov > 0.0 {
                let idx = py * stride + px;
                pixels[idx] = blend(pixels[idx], with_coverage(colour, cov));
            }
        }
    }
}

/// Blend an annular ring: the stroke of a circle of `radius` with the
/// given line width.
pub fn stroke_ring(
    pixels: &mut [u32],
    stride: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    line_width: f64,
    colour: u32,
) {
    stroke_arc(
        pixels, stride, cx, cy, radius, line_width, 0.0, TAU, colour,
    );
}

/// Blend an arc segment of an annular ring, from `start` to `end` radians.
/// Angles follow the screen convention (y grows downward, zero along +x,
/// increasing clockwise); `end` past a full turn wraps.
#[allow(clippy::too_many_arguments)]
pub fn stroke_arc(
    pixels: &mut [u32],
    stride: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    line_width: f64,
    start: f64,
    end: f64,
    colour: u32,
) {
    if stride == 0 || pixels.is_empty() || radius <= 0.0 || end <= start {
        return;
    }
    let rows = pixels.len() / stride;
    let span = (end - start).min(TAU);
    let start = start.rem_euclid(TAU);
    let r_out = radius + line_width / 2.0;
    let r_in = (radius - line_width / 2.0).max(0.0);

    let x0 = ((cx - r_out - 1.0).floor().max(0.0)) as usize;
    let y0 = ((cy - r_out - 1.0).floor().max(0.0)) as usize;
    let x1 = (((cx + r_out + 2.0).ceil()).clamp(0.0, stride as f64)) as usize;
    let y1 = (((cy + r_out + 2.0).ceil()).clamp(0.0, rows as f64)) as usize;

    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let cov = (r_out + 0.5 - dist).clamp(0.0, 1.0) * (dist - (r_in - 0.5)).clamp(0.0, 1.0);
            if cov <= 0.0 {
                continue;
            }
            if span < TAU {
                let angle = dy.atan2(dx).rem_euclid(TAU);
                if (angle - start).rem_euclid(TAU) > span {
                    continue;
                }
            }
            let idx = py * stride + px;
            pixels[idx] = blend(pixels[idx], with_coverage(colour, cov));
        }
    }
}

/// Paint the decoded background image onto the surface: a single blit at
/// the origin, or repeated across the full resolution when tiling is on.
/// Rows are filled in parallel; the image never writes outside the buffer.
pub fn paint_background(pixels: &mut [u32], stride: usize, img: &RgbaImage, tile: bool) {
    if stride == 0 || pixels.is_empty() || img.width() == 0 || img.height() == 0 {
        return;
    }
    let (img_w, img_h) = (img.width() as usize, img.height() as usize);
    pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(row, row_pixels)| {
            let src_y = if tile {
                row % img_h
            } else if row < img_h {
                row
            } else {
                return;
            };
            let span = if tile { stride } else { stride.min(img_w) };
            for (x, px) in row_pixels[..span].iter_mut().enumerate() {
                let src_x = if tile { x % img_w } else { x };
                let [r, g, b, a] = img.get_pixel(src_x as u32, src_y as u32).0;
                let src = (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32;
                *px = blend(*px, src);
            }
        });
}

/// Blend an off-screen ARGB buffer onto the surface at (`at_x`, `at_y`),
/// clipped to the surface bounds.
pub fn composite(
    pixels: &mut [u32],
    stride: usize,
    src: &[u32],
    src_w: usize,
    at_x: i32,
    at_y: i32,
) {
    if stride == 0 || pixels.is_empty() || src_w == 0 || src.is_empty() {
        return;
    }
    let rows = pixels.len() / stride;
    let src_h = src.len() / src_w;
    for sy in 0..src_h {
        let dy = at_y as i64 + sy as i64;
        if dy < 0 || dy >= rows as i64 {
            continue;
        }
        for sx in 0..src_w {
            let dx = at_x as i64 + sx as i64;
            if dx < 0 || dx >= stride as i64 {
                continue;
            }
            let s = src[sy * src_w + sx];
            if s >> 24 == 0 {
                continue;
            }
            let idx = dy as usize * stride + dx as usize;
            pixels[idx] = blend(pixels[idx], s);
        }
    }
}
