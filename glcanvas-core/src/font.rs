//! The built-in bitmap font widget text is drawn with.
//!
//! Glyphs are 8×8 pixels, one byte per row with the most significant bit on the left. The
//! printable ASCII range is packed into a 16×6 atlas, row by row, starting at the space.

use glam::Vec2;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::{DecodedImage, ImageError};

/// Side of one glyph cell in atlas pixels.
pub const GLYPH_SIZE: u32 = 8;

/// Locates glyphs in the font atlas and measures text set in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BitmapFont {
    first_char: char,
    columns: u32,
    rows: u32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self {
            first_char: ' ',
            columns: 16,
            rows: 6,
        }
    }
}

impl BitmapFont {
    /// Atlas size in pixels.
    pub fn atlas_size(&self) -> (u32, u32) {
        (self.columns * GLYPH_SIZE, self.rows * GLYPH_SIZE)
    }

    /// Top-left and bottom-right texture coordinates of `c`, or `None` if the atlas has no
    /// cell for it.
    pub fn glyph_uvs(&self, c: char) -> Option<[Vec2; 2]> {
        let index = (c as u32).checked_sub(self.first_char as u32)?;
        if index >= self.columns * self.rows {
            return None;
        }
        let col = index % self.columns;
        let row = index / self.columns;

        let uv_size = Vec2::new(1.0 / self.columns as f32, 1.0 / self.rows as f32);
        let uv_min = Vec2::new(col as f32 * uv_size.x, row as f32 * uv_size.y);
        Some([uv_min, uv_min + uv_size])
    }

    /// On-screen size of one character at `font_size` pixels.
    pub fn char_size(&self, font_size: f32) -> Vec2 {
        Vec2::splat(font_size)
    }

    /// Size of `text` at `font_size`. Lines are separated by `\n`.
    pub fn measure_text(&self, text: &str, font_size: f32) -> Vec2 {
        let char_size = self.char_size(font_size);
        let (lines, widest) = text.split('\n').fold((0, 0), |(lines, widest), line| {
            (lines + 1, widest.max(line.chars().count()))
        });
        Vec2::new(widest as f32 * char_size.x, lines as f32 * char_size.y)
    }

    /// Renders the atlas as white glyphs on a transparent background.
    pub fn atlas_image(&self) -> Result<DecodedImage, ImageError> {
        let (width, height) = self.atlas_size();
        let mut atlas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));

        for index in 0..self.columns * self.rows {
            let code = self.first_char as u32 + index;
            let bitmap = glyph_bitmap(u8::try_from(code).unwrap_or(0));
            let origin_x = (index % self.columns) * GLYPH_SIZE;
            let origin_y = (index / self.columns) * GLYPH_SIZE;

            for (y, bits) in bitmap.iter().enumerate() {
                for x in 0..GLYPH_SIZE {
                    if bits & (0x80 >> x) != 0 {
                        atlas.put_pixel(origin_x + x, origin_y + y as u32, Rgba([255; 4]));
                    }
                }
            }
        }

        DecodedImage::from_dynamic(DynamicImage::ImageRgba8(atlas))
    }
}

/// Rows of the glyph for `ch`, top first. Characters without a glyph get a filled block.
pub fn glyph_bitmap(ch: u8) -> [u8; 8] {
    match ch {
        b'A' => [0x18, 0x3C, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00],
        b'B' => [0x7C, 0x66, 0x7C, 0x66, 0x66, 0x66, 0x7C, 0x00],
        b'C' => [0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00],
        b'D' => [0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00],
        b'E' => [0x7E, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x7E, 0x00],
        b'F' => [0x7E, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x60, 0x00],
        b'G' => [0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3E, 0x00],
        b'H' => [0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00],
        b'I' => [0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00],
        b'J' => [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00],
        b'K' => [0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00],
        b'L' => [0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00],
        b'M' => [0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00],
        b'N' => [0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00],
        b'O' => [0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
        b'P' => [0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00],
        b'Q' => [0x3C, 0x66, 0x66, 0x66, 0x6A, 0x6C, 0x36, 0x00],
        b'R' => [0x7C, 0x66, 0x66, 0x7C, 0x6C, 0x66, 0x66, 0x00],
        b'S' => [0x3C, 0x66, 0x70, 0x3C, 0x0E, 0x66, 0x3C, 0x00],
        b'T' => [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00],
        b'U' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
        b'V' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00],
        b'W' => [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00],
        b'X' => [0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00],
        b'Y' => [0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00],
        b'Z' => [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00],
        b'a' => [0x00, 0x00, 0x3C, 0x06, 0x3E, 0x66, 0x3E, 0x00],
        b'b' => [0x60, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x7C, 0x00],
        b'c' => [0x00, 0x00, 0x3C, 0x60, 0x60, 0x60, 0x3C, 0x00],
        b'd' => [0x06, 0x06, 0x3E, 0x66, 0x66, 0x66, 0x3E, 0x00],
        b'e' => [0x00, 0x00, 0x3C, 0x66, 0x7E, 0x60, 0x3C, 0x00],
        b'f' => [0x1C, 0x30, 0x7C, 0x30, 0x30, 0x30, 0x30, 0x00],
        b'g' => [0x00, 0x00, 0x3E, 0x66, 0x66, 0x3E, 0x06, 0x3C],
        b'h' => [0x60, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x00],
        b'i' => [0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x3C, 0x00],
        b'j' => [0x0C, 0x00, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38],
        b'k' => [0x60, 0x60, 0x6C, 0x78, 0x78, 0x6C, 0x66, 0x00],
        b'l' => [0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00],
        b'm' => [0x00, 0x00, 0x76, 0x7F, 0x6B, 0x6B, 0x63, 0x00],
        b'n' => [0x00, 0x00, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x00],
        b'o' => [0x00, 0x00, 0x3C, 0x66, 0x66, 0x66, 0x3C, 0x00],
        b'p' => [0x00, 0x00, 0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60],
        b'q' => [0x00, 0x00, 0x3E, 0x66, 0x66, 0x3E, 0x06, 0x06],
        b'r' => [0x00, 0x00, 0x7C, 0x66, 0x60, 0x60, 0x60, 0x00],
        b's' => [0x00, 0x00, 0x3E, 0x60, 0x3C, 0x06, 0x7C, 0x00],
        b't' => [0x30, 0x30, 0x7C, 0x30, 0x30, 0x30, 0x1C, 0x00],
        b'u' => [0x00, 0x00, 0x66, 0x66, 0x66, 0x66, 0x3E, 0x00],
        b'v' => [0x00, 0x00, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00],
        b'w' => [0x00, 0x00, 0x63, 0x6B, 0x7F, 0x7F, 0x36, 0x00],
        b'x' => [0x00, 0x00, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x00],
        b'y' => [0x00, 0x00, 0x66, 0x66, 0x66, 0x3E, 0x06, 0x3C],
        b'z' => [0x00, 0x00, 0x7E, 0x0C, 0x18, 0x30, 0x7E, 0x00],
        b'0' => [0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00],
        b'1' => [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
        b'2' => [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x30, 0x7E, 0x00],
        b'3' => [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00],
        b'4' => [0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C, 0x00],
        b'5' => [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00],
        b'6' => [0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00],
        b'7' => [0x7E, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00],
        b'8' => [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00],
        b'9' => [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00],
        b' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        b'!' => [0x18, 0x18, 0x18, 0x18, 0x00, 0x00, 0x18, 0x00],
        b'.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        b',' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30],
        b':' => [0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00],
        b';' => [0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x30],
        b'-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        b'+' => [0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00, 0x00],
        b'=' => [0x00, 0x00, 0x7E, 0x00, 0x7E, 0x00, 0x00, 0x00],
        b'/' => [0x02, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40, 0x00],
        b'\\' => [0x40, 0x60, 0x30, 0x18, 0x0C, 0x06, 0x02, 0x00],
        b'(' => [0x0C, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0C, 0x00],
        b')' => [0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x18, 0x30, 0x00],
        b'[' => [0x3C, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3C, 0x00],
        b']' => [0x3C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x3C, 0x00],
        b'{' => [0x0E, 0x18, 0x18, 0x70, 0x18, 0x18, 0x0E, 0x00],
        b'}' => [0x70, 0x18, 0x18, 0x0E, 0x18, 0x18, 0x70, 0x00],
        b'<' => [0x06, 0x0C, 0x18, 0x30, 0x18, 0x0C, 0x06, 0x00],
        b'>' => [0x60, 0x30, 0x18, 0x0C, 0x18, 0x30, 0x60, 0x00],
        b'?' => [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x00, 0x18, 0x00],
        b'@' => [0x3C, 0x66, 0x6E, 0x6E, 0x60, 0x62, 0x3C, 0x00],
        b'#' => [0x36, 0x36, 0x7F, 0x36, 0x7F, 0x36, 0x36, 0x00],
        b'$' => [0x18, 0x3E, 0x60, 0x3C, 0x06, 0x7C, 0x18, 0x00],
        b'%' => [0x62, 0x66, 0x0C, 0x18, 0x30, 0x66, 0x46, 0x00],
        b'&' => [0x38, 0x6C, 0x38, 0x76, 0xDC, 0xCC, 0x76, 0x00],
        b'*' => [0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00],
        b'_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x7E, 0x00],
        b'~' => [0x00, 0x00, 0x76, 0xDC, 0x00, 0x00, 0x00, 0x00],
        b'^' => [0x18, 0x3C, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00],
        b'|' => [0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00],
        b'\'' => [0x18, 0x18, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00],
        b'"' => [0x66, 0x66, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00],
        b'`' => [0x30, 0x18, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00],
        _ => [0x7E, 0x7E, 0x7E, 0x7E, 0x7E, 0x7E, 0x7E, 0x00],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;

    #[test]
    fn test_glyph_cells_are_laid_out_row_by_row() {
        let font = BitmapFont::default();
        assert_eq!(
            font.glyph_uvs(' '),
            Some([Vec2::ZERO, Vec2::new(1.0 / 16.0, 1.0 / 6.0)])
        );

        // 'A' is 33 cells after the space: second column of the third row.
        let [min, max] = font.glyph_uvs('A').unwrap();
        assert_eq!(min, Vec2::new(1.0 / 16.0, 2.0 / 6.0));
        assert_eq!(max, Vec2::new(1.0 / 16.0, 2.0 / 6.0) + Vec2::new(1.0 / 16.0, 1.0 / 6.0));
    }

    #[test]
    fn test_characters_outside_the_atlas_have_no_cell() {
        let font = BitmapFont::default();
        assert_eq!(font.glyph_uvs('\n'), None);
        assert_eq!(font.glyph_uvs('é'), None);
        assert!(font.glyph_uvs('~').is_some());
    }

    #[test]
    fn test_measure_text_uses_longest_line() {
        let font = BitmapFont::default();
        assert_eq!(
            font.measure_text("Textured Cube", 16.0),
            Vec2::new(208.0, 16.0)
        );
        assert_eq!(font.measure_text("ab\nabcd", 8.0), Vec2::new(32.0, 16.0));
        assert_eq!(font.measure_text("", 8.0), Vec2::new(0.0, 8.0));
    }

    #[test]
    fn test_atlas_sets_alpha_where_glyph_bits_are_set() {
        let font = BitmapFont::default();
        let atlas = font.atlas_image().unwrap();
        assert_eq!((atlas.width(), atlas.height()), (128, 48));
        assert_eq!(atlas.format(), PixelFormat::Rgba);

        let alpha = |x: u32, y: u32| atlas.pixels()[((y * 128 + x) * 4 + 3) as usize];
        assert!((0..8).all(|y| (0..8).all(|x| alpha(x, y) == 0)));

        // The top row of 'A' is 0x18, the two middle pixels.
        let top: Vec<u8> = (0..8).map(|x| alpha(8 + x, 16)).collect();
        assert_eq!(top, [0, 0, 0, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_characters_fall_back_to_a_block() {
        assert_eq!(glyph_bitmap(0x7F), glyph_bitmap(0x01));
        assert_ne!(glyph_bitmap(b'a'), glyph_bitmap(0x7F));
    }
}
