//! Bitmap font support: per-glyph bounds extraction from a 16x16 atlas
//! sheet and the byte-walking text renderer.

use crate::assets;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::geometry::Rect;
use crate::loader;

pub const GLYPH_COUNT: usize = 256;

/// Cells per atlas row/column.
const GRID: i32 = 16;

/// One glyph: its region in the atlas plus the horizontal advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    pub rect: Rect,
    pub advance: i32,
}

/// A bitmap font: the atlas image and a glyph table indexed by byte value.
/// Immutable once built.
pub struct Font {
    atlas: Canvas,
    glyphs: [Glyph; GLYPH_COUNT],
}

impl Font {
    /// Build a font from a decoded glyph sheet laid out as a 16x16 grid of
    /// equally sized cells, one cell per byte value.
    ///
    /// Each cell is trimmed to the columns that carry ink (alpha != 0):
    /// first from the right, then from the left. The advance is the trimmed
    /// width plus one pixel of spacing; a cell with no ink at all trims to
    /// zero width and keeps the one-pixel advance.
    pub fn from_atlas(atlas: Canvas) -> Font {
        let cell_w = atlas.width() / GRID;
        let cell_h = atlas.height() / GRID;

        let mut glyphs = [Glyph::default(); GLYPH_COUNT];
        for (i, glyph) in glyphs.iter_mut().enumerate() {
            let i = i as i32;
            let mut r = Rect::new(cell_w * (i % GRID), cell_h * (i / GRID), cell_w, cell_h);
            while r.w > 0 && !column_has_ink(&atlas, r.x + r.w - 1, r.y, r.h) {
                r.w -= 1;
            }
            while r.w > 0 && !column_has_ink(&atlas, r.x, r.y, r.h) {
                r.x += 1;
                r.w -= 1;
            }
            glyph.rect = r;
            glyph.advance = r.w + 1;
        }

        // Space carries no ink; give it the advance of lowercase 'a' so word
        // spacing matches the rest of the sheet.
        glyphs[b' ' as usize].rect = Rect::default();
        glyphs[b' ' as usize].advance = glyphs[b'a' as usize].advance;

        Font { atlas, glyphs }
    }

    /// Decode an encoded glyph sheet and build the font from it.
    pub fn from_bytes(data: &[u8]) -> Result<Font, String> {
        Ok(Font::from_atlas(loader::decode_image(data)?))
    }

    /// The embedded default sheet: 16x16 grid of 8x8 cells, white ink on
    /// transparent.
    pub fn builtin() -> Result<Font, String> {
        Font::from_bytes(assets::DEFAULT_FONT_PNG)
    }

    #[inline]
    pub fn glyph(&self, byte: u8) -> Glyph {
        self.glyphs[byte as usize]
    }

    #[inline]
    pub fn atlas(&self) -> &Canvas {
        &self.atlas
    }

    /// Height of one glyph cell.
    #[inline]
    pub fn line_height(&self) -> i32 {
        self.atlas.height() / GRID
    }
}

fn column_has_ink(atlas: &Canvas, x: i32, y: i32, h: i32) -> bool {
    (y..y + h).any(|row| atlas.pixel(x, row).is_some_and(|c| c.a != 0))
}

/// Draw a byte string through the tinted glyph path, advancing a cursor.
/// Returns the final cursor x.
pub fn draw_text(
    canvas: &mut Canvas,
    font: &Font,
    text: &str,
    x: i32,
    y: i32,
    color: Color,
) -> i32 {
    let mut cx = x;
    for &byte in text.as_bytes() {
        let g = font.glyph(byte);
        canvas.blit_region(font.atlas(), cx, y, g.rect, color);
        cx += g.advance;
    }
    cx
}

/// Width of `text` in pixels: the same advance accumulation as `draw_text`,
/// without blitting.
pub fn text_width(font: &Font, text: &str) -> i32 {
    text.as_bytes().iter().map(|&b| font.glyph(b).advance).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 128x128 sheet (8x8 cells). Ink only where the test puts it.
    fn sheet() -> Canvas {
        Canvas::new(128, 128)
    }

    fn ink_column(c: &mut Canvas, x: i32, y: i32, h: i32) {
        for row in y..y + h {
            c.put_pixel(x, row, Color::WHITE);
        }
    }

    fn cell_origin(byte: u8) -> (i32, i32) {
        ((byte as i32 % 16) * 8, (byte as i32 / 16) * 8)
    }

    #[test]
    fn glyph_bounds_trim_to_ink_columns() {
        let mut atlas = sheet();
        let (cx, cy) = cell_origin(b'a');
        // ink in columns 2..=5 of the cell
        ink_column(&mut atlas, cx + 2, cy + 1, 4);
        ink_column(&mut atlas, cx + 5, cy + 3, 2);

        let font = Font::from_atlas(atlas);
        let g = font.glyph(b'a');
        assert_eq!(g.rect, Rect::new(cx + 2, cy, 4, 8));
        assert_eq!(g.advance, 5);
    }

    #[test]
    fn space_inherits_a_advance_with_empty_rect() {
        let mut atlas = sheet();
        let (cx, cy) = cell_origin(b'a');
        ink_column(&mut atlas, cx + 2, cy, 8);
        ink_column(&mut atlas, cx + 5, cy, 8);

        let font = Font::from_atlas(atlas);
        let space = font.glyph(b' ');
        assert_eq!(space.advance, font.glyph(b'a').advance);
        assert_eq!(space.advance, 5);
        assert!(space.rect.is_empty());
    }

    #[test]
    fn empty_cell_gets_unit_advance() {
        let font = Font::from_atlas(sheet());
        let g = font.glyph(0);
        assert_eq!(g.rect.w, 0);
        assert_eq!(g.advance, 1);
    }

    #[test]
    fn text_width_accumulates_advances() {
        let mut atlas = sheet();
        let (ax, ay) = cell_origin(b'a');
        ink_column(&mut atlas, ax, ay, 8);
        ink_column(&mut atlas, ax + 3, ay, 8);
        let (bx, by) = cell_origin(b'b');
        ink_column(&mut atlas, bx + 1, by, 8);

        let font = Font::from_atlas(atlas);
        assert_eq!(font.glyph(b'a').advance, 5);
        assert_eq!(font.glyph(b'b').advance, 2);
        assert_eq!(text_width(&font, "ab a"), 5 + 2 + 5 + 5);
    }

    #[test]
    fn draw_text_returns_final_cursor_and_tints() {
        let mut atlas = sheet();
        let (ax, ay) = cell_origin(b'a');
        ink_column(&mut atlas, ax + 1, ay, 8);
        let font = Font::from_atlas(atlas);

        let mut canvas = Canvas::new(32, 16);
        let end = draw_text(&mut canvas, &font, "aa", 3, 2, Color::rgb(0, 255, 0));
        assert_eq!(end, 3 + font.glyph(b'a').advance * 2);

        // glyph ink lands at the cursor, tinted green
        let p = canvas.pixel(3, 2).unwrap();
        assert_eq!((p.r, p.g, p.b), (0, 255, 0));
    }

    #[test]
    fn builtin_font_has_printable_glyphs() {
        let font = Font::builtin().unwrap();
        assert_eq!(font.atlas().width(), 128);
        assert_eq!(font.atlas().height(), 128);
        assert!(font.glyph(b'A').rect.w > 0);
        assert!(font.glyph(b' ').advance > 1);
        assert!(text_width(&font, "hello") > 0);
    }
}
