//! Software rasteriser backing the core's `FrameCanvas` capability.

use std::fmt;

use sort_visualiser_core::{Color, FrameCanvas};

const BYTES_PER_PIXEL: usize = 4;
/// Vertical space reserved above the chart for the HUD.
const CHART_MARGIN: u32 = 100;
const GLYPH_WIDTH: u32 = 5;
const GLYPH_SCALE: u32 = 2;
const TEXT_COLOR: Color = Color::new(255, 255, 0, 255);

/// CPU pixel surface: black clear, one-pixel-wide bars rising from the
/// bottom edge, yellow HUD text from an embedded 5x7 font. Pixels are
/// packed ARGB32 little-endian, i.e. b, g, r, a byte order.
pub struct SoftCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SoftCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize * BYTES_PER_PIXEL],
        }
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = (y * self.width + x) as usize * BYTES_PER_PIXEL;
        // Straight alpha over the black clear colour.
        let scale = |channel: u8| ((channel as u16 * color.a as u16) / 255) as u8;
        self.pixels[offset] = scale(color.b);
        self.pixels[offset + 1] = scale(color.g);
        self.pixels[offset + 2] = scale(color.r);
        self.pixels[offset + 3] = 255;
    }

    fn draw_glyph(&mut self, x: u32, y: u32, glyph: [u8; 7]) {
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                for dy in 0..GLYPH_SCALE {
                    for dx in 0..GLYPH_SCALE {
                        self.put_pixel(
                            x + col * GLYPH_SCALE + dx,
                            y + row as u32 * GLYPH_SCALE + dy,
                            TEXT_COLOR,
                        );
                    }
                }
            }
        }
    }
}

impl FrameCanvas for SoftCanvas {
    fn clear(&mut self) {
        for (i, byte) in self.pixels.iter_mut().enumerate() {
            *byte = if i % BYTES_PER_PIXEL == 3 { 255 } else { 0 };
        }
    }

    fn draw_bar(&mut self, index: usize, total: usize, height: f32, color: Color) {
        if total == 0 {
            return;
        }
        let x = (index as u64 * u64::from(self.width) / total as u64) as u32;
        let chart_height = self.height.saturating_sub(CHART_MARGIN);
        let bar = (height.clamp(0.0, 1.0) * chart_height as f32) as u32;
        for y in self.height - bar..self.height {
            self.put_pixel(x, y, color);
        }
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str) {
        let advance = (GLYPH_WIDTH + 1) * GLYPH_SCALE;
        for (i, ch) in text.chars().enumerate() {
            if let Some(glyph) = glyph_for(ch) {
                self.draw_glyph(x + i as u32 * advance, y, glyph);
            }
        }
    }

    fn pixel_buffer(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for SoftCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// 5x7 bitmap for the HUD character set; lowercase folds to uppercase and
/// anything unknown renders as a blank advance.
fn glyph_for(ch: char) -> Option<[u8; 7]> {
    let glyph = match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x13, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_width_by_height_argb() {
        let canvas = SoftCanvas::new(16, 8);
        assert_eq!(canvas.pixel_buffer().len(), 16 * 8 * 4);
    }

    #[test]
    fn clear_paints_opaque_black() {
        let mut canvas = SoftCanvas::new(4, 4);
        canvas.draw_bar(0, 4, 1.0, Color::WHITE);

        canvas.clear();

        for pixel in canvas.pixel_buffer().chunks_exact(4) {
            assert_eq!(pixel, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn bars_rise_from_the_bottom_edge() {
        let mut canvas = SoftCanvas::new(8, 200);
        canvas.clear();

        canvas.draw_bar(4, 8, 1.0, Color::WHITE);

        let x = 4;
        let bottom = (199 * 8 + x) * BYTES_PER_PIXEL;
        assert_ne!(canvas.pixel_buffer()[bottom], 0);
        // Rows above the chart area stay black.
        let top = x * BYTES_PER_PIXEL;
        assert_eq!(canvas.pixel_buffer()[top], 0);
    }

    #[test]
    fn text_renders_into_the_buffer() {
        let mut canvas = SoftCanvas::new(120, 40);
        canvas.clear();

        canvas.draw_text(0, 0, "Sort: 42");

        let lit = canvas
            .pixel_buffer()
            .chunks_exact(4)
            .filter(|pixel| pixel[1] != 0)
            .count();
        assert!(lit > 0);
    }
}
