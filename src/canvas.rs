//! The drawing surface: an owned row-major RGBA buffer with an active clip
//! rectangle, blended primitives and a fixed-point scaled blitter.
//!
//! `Canvas` doubles as the decoded-image type: the screen, blit sources and
//! font atlases are all canvases. Every drawing call is bounded by the clip,
//! which is itself always bounded by the surface.

use crate::color::{self, Color};
use crate::geometry::Rect;

/// Fixed-point fraction bits used by the scaled blitter (1/1024 sub-pixel).
const FP_SHIFT: i32 = 10;

/// Extent of the rect `clear` paints through the clip. Large enough to cover
/// any surface, small enough that the clip intersection cannot overflow.
const CLEAR_EXTENT: i32 = 0x00ff_ffff;

#[derive(Clone, Copy)]
enum BlendOp {
    Plain,
    Tint,
    TintAdd,
}

pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    clip: Rect,
}

impl Canvas {
    /// Create a surface filled with transparent black, clip open to the full
    /// bounds.
    ///
    /// # Panics
    /// Panics if either dimension is not positive; there is no safe way to
    /// continue with a zero-area surface.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "canvas dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels: vec![Color::default(); (width * height) as usize],
            clip: Rect::new(0, 0, width, height),
        }
    }

    /// Wrap an already-decoded pixel buffer. Returns `None` when the buffer
    /// length does not match the dimensions.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Color>) -> Option<Self> {
        if width <= 0 || height <= 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            clip: Rect::new(0, 0, width, height),
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Set the active clip. The stored rect is the intersection with the
    /// surface bounds, so the clip can never reach outside the buffer.
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = rect.intersect(self.bounds());
    }

    /// Reopen the clip to the full surface.
    pub fn reset_clip(&mut self) {
        self.clip = self.bounds();
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Bounds-checked pixel read.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.bounds().contains(x, y) {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Bounds-checked raw pixel write: no blending, ignores the clip. For
    /// building image content, not for scene drawing.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.bounds().contains(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    /// Raw RGBA bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        // Safety: Color is #[repr(C)] with four u8 fields, so the pixel
        // array is exactly width*height*4 tightly packed bytes.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr().cast::<u8>(), self.pixels.len() * 4)
        }
    }

    /// Fill the surface with `color`. This is a full-surface `draw_rect`, so
    /// it blends and it respects the active clip.
    pub fn clear(&mut self, color: Color) {
        self.draw_rect(Rect::new(0, 0, CLEAR_EXTENT, CLEAR_EXTENT), color);
    }

    /// Blend one pixel, bounds-checked against the clip.
    #[inline]
    pub fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        if color.a == 0 || !self.clip.contains(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.pixels[i] = color::blend(self.pixels[i], color);
    }

    /// Blend a filled rectangle, clipped.
    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        if color.a == 0 {
            return;
        }
        let r = rect.intersect(self.clip);
        if r.is_empty() {
            return;
        }
        for y in r.y..r.y + r.h {
            let row = self.index(r.x, y);
            for px in &mut self.pixels[row..row + r.w as usize] {
                *px = color::blend(*px, color);
            }
        }
    }

    /// Integer Bresenham line, endpoints inclusive. Each stepped pixel goes
    /// through `draw_point`, so the line is clipped per pixel.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let dx = (x2 - x1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let dy = -(y2 - y1).abs();
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);
        loop {
            self.draw_point(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Blit a whole source canvas at (x, y), unscaled, plain blend.
    pub fn blit(&mut self, src: &Canvas, x: i32, y: i32) {
        let bounds = src.bounds();
        self.blit_scaled(
            src,
            Rect::new(x, y, src.width, src.height),
            bounds,
            Color::WHITE,
            Color::NO_ADD,
        );
    }

    /// Blit a source region at (x, y), unscaled, tinted.
    pub fn blit_region(&mut self, src: &Canvas, x: i32, y: i32, src_rect: Rect, tint: Color) {
        self.blit_scaled(
            src,
            Rect::new(x, y, src_rect.w, src_rect.h),
            src_rect,
            tint,
            Color::NO_ADD,
        );
    }

    /// Draw `src_rect` of `src` into `dst` of this canvas, resampling
    /// nearest-neighbor with 10-bit fixed-point stepping.
    ///
    /// The destination is clipped before iteration; when the clip moves the
    /// start inward, the source accumulators advance by the same number of
    /// skipped steps so a partially offscreen blit samples the same texels
    /// the visible part of a full blit would.
    ///
    /// The blend operator is chosen once per call: plain for an opaque-white
    /// tint, tinted when only the tint is in play, tinted+additive when the
    /// add term has any non-zero channel. Rects with non-positive extent
    /// (including negative, see `Rect`) and source rects reaching outside
    /// the source surface are a no-op.
    pub fn blit_scaled(&mut self, src: &Canvas, dst: Rect, src_rect: Rect, tint: Color, add: Color) {
        if src_rect.is_empty() || dst.is_empty() || !src.bounds().contains_rect(src_rect) {
            return;
        }

        let op = if add.r != 0 || add.g != 0 || add.b != 0 {
            BlendOp::TintAdd
        } else if tint.packed() != Color::WHITE.packed() {
            BlendOp::Tint
        } else {
            BlendOp::Plain
        };

        let step_x = (src_rect.w << FP_SHIFT) / dst.w;
        let step_y = (src_rect.h << FP_SHIFT) / dst.h;

        let cx1 = self.clip.x;
        let cy1 = self.clip.y;
        let cx2 = self.clip.x + self.clip.w;
        let cy2 = self.clip.y + self.clip.h;

        let mut sy = src_rect.y << FP_SHIFT;
        let mut dy = dst.y;
        if dy < cy1 {
            sy += (cy1 - dy) * step_y;
            dy = cy1;
        }
        let ey = cy2.min(dst.y + dst.h);

        let mut sx0 = src_rect.x << FP_SHIFT;
        let mut dx0 = dst.x;
        if dx0 < cx1 {
            sx0 += (cx1 - dx0) * step_x;
            dx0 = cx1;
        }
        let ex = cx2.min(dst.x + dst.w);

        while dy < ey {
            let src_row = src.index(0, sy >> FP_SHIFT);
            let mut sx = sx0;
            for dx in dx0..ex {
                let s = src.pixels[src_row + (sx >> FP_SHIFT) as usize];
                let di = self.index(dx, dy);
                let d = self.pixels[di];
                self.pixels[di] = match op {
                    BlendOp::Plain => color::blend(d, s),
                    BlendOp::Tint => color::blend_tint(d, s, tint),
                    BlendOp::TintAdd => color::blend_tint_add(d, s, tint, add),
                };
                sx += step_x;
            }
            sy += step_y;
            dy += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: i32, h: i32, color: Color) -> Canvas {
        let mut c = Canvas::new(w, h);
        for y in 0..h {
            for x in 0..w {
                c.put_pixel(x, y, color);
            }
        }
        c
    }

    #[test]
    fn point_respects_clip_boundary() {
        let mut c = Canvas::new(10, 10);
        c.set_clip(Rect::new(2, 2, 4, 4));
        let red = Color::rgb(255, 0, 0);

        c.draw_point(1, 2, red); // outside, left of clip
        c.draw_point(2, 2, red); // first pixel inside
        c.draw_point(5, 5, red); // last pixel inside
        c.draw_point(6, 5, red); // one beyond

        assert_eq!(c.pixel(1, 2).unwrap().r, 0);
        assert_eq!(c.pixel(2, 2).unwrap().r, 255);
        assert_eq!(c.pixel(5, 5).unwrap().r, 255);
        assert_eq!(c.pixel(6, 5).unwrap().r, 0);
    }

    #[test]
    fn clip_never_exceeds_bounds() {
        let mut c = Canvas::new(8, 8);
        c.set_clip(Rect::new(-5, -5, 100, 100));
        assert_eq!(c.clip(), Rect::new(0, 0, 8, 8));
    }

    #[test]
    fn clear_respects_clip() {
        let mut c = Canvas::new(6, 6);
        c.set_clip(Rect::new(0, 0, 3, 6));
        c.clear(Color::rgb(9, 9, 9));
        assert_eq!(c.pixel(2, 3).unwrap(), Color::rgba(9, 9, 9, 0));
        assert_eq!(c.pixel(3, 3).unwrap(), Color::rgba(0, 0, 0, 0));
    }

    #[test]
    fn draw_rect_clips_and_fills() {
        let mut c = Canvas::new(8, 8);
        c.draw_rect(Rect::new(-2, -2, 5, 5), Color::rgb(7, 0, 0));
        assert_eq!(c.pixel(0, 0).unwrap().r, 7);
        assert_eq!(c.pixel(2, 2).unwrap().r, 7);
        assert_eq!(c.pixel(3, 3).unwrap().r, 0);
    }

    #[test]
    fn degenerate_rect_is_noop() {
        let mut c = solid(4, 4, Color::rgb(1, 1, 1));
        c.draw_rect(Rect::new(1, 1, 0, 3), Color::rgb(200, 0, 0));
        c.draw_rect(Rect::new(1, 1, -3, 3), Color::rgb(200, 0, 0));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(c.pixel(x, y).unwrap().r, 1);
            }
        }
    }

    #[test]
    fn single_point_line() {
        let mut c = Canvas::new(5, 5);
        c.draw_line(2, 2, 2, 2, Color::rgb(255, 0, 0));
        let lit: i32 = (0..25)
            .filter(|i| c.pixel(i % 5, i / 5).unwrap().r != 0)
            .count() as i32;
        assert_eq!(lit, 1);
        assert_eq!(c.pixel(2, 2).unwrap().r, 255);
    }

    #[test]
    fn line_endpoints_inclusive_no_duplicates() {
        // A diagonal blended at 50% alpha: any doubled pixel would blend
        // twice and read darker/lighter than its neighbors.
        let mut c = Canvas::new(6, 6);
        c.draw_line(0, 0, 5, 5, Color::rgba(200, 0, 0, 128));
        let expected = c.pixel(0, 0).unwrap();
        for i in 0..6 {
            assert_eq!(c.pixel(i, i).unwrap(), expected);
        }
        assert_eq!(c.pixel(1, 0).unwrap().r, 0);
    }

    #[test]
    fn axis_aligned_line_covers_span() {
        let mut c = Canvas::new(8, 8);
        c.draw_line(1, 3, 6, 3, Color::rgb(255, 255, 255));
        for x in 1..=6 {
            assert_eq!(c.pixel(x, 3).unwrap().r, 255);
        }
        assert_eq!(c.pixel(0, 3).unwrap().r, 0);
        assert_eq!(c.pixel(7, 3).unwrap().r, 0);
    }

    fn gradient_source(w: i32, h: i32) -> Canvas {
        let mut src = Canvas::new(w, h);
        for y in 0..h {
            for x in 0..w {
                src.put_pixel(x, y, Color::rgb((x * 20) as u8, (y * 20) as u8, 0));
            }
        }
        src
    }

    #[test]
    fn identity_blit_reproduces_source() {
        let src = gradient_source(8, 8);
        let mut dst = Canvas::new(8, 8);
        dst.blit_scaled(
            &src,
            Rect::new(0, 0, 8, 8),
            Rect::new(0, 0, 8, 8),
            Color::WHITE,
            Color::NO_ADD,
        );
        for y in 0..8 {
            for x in 0..8 {
                let s = src.pixel(x, y).unwrap();
                let d = dst.pixel(x, y).unwrap();
                assert_eq!((d.r, d.g, d.b), (s.r, s.g, s.b));
            }
        }
    }

    #[test]
    fn clipped_blit_matches_visible_subregion() {
        // Blitting with the left half clipped off must produce exactly the
        // pixels a full blit would have produced in the visible half.
        let src = gradient_source(8, 8);

        let mut full = Canvas::new(8, 8);
        full.blit_scaled(
            &src,
            Rect::new(-3, 0, 8, 8),
            Rect::new(0, 0, 8, 8),
            Color::WHITE,
            Color::NO_ADD,
        );

        let mut reference = Canvas::new(8, 8);
        reference.blit_scaled(
            &src,
            Rect::new(0, 0, 8, 8),
            Rect::new(0, 0, 8, 8),
            Color::WHITE,
            Color::NO_ADD,
        );

        for y in 0..8 {
            for x in 0..5 {
                assert_eq!(
                    full.pixel(x, y).unwrap(),
                    reference.pixel(x + 3, y).unwrap(),
                    "misaligned sample at ({}, {})",
                    x,
                    y
                );
            }
        }

        // same property on the vertical axis
        let mut top = Canvas::new(8, 8);
        top.blit_scaled(
            &src,
            Rect::new(0, -2, 8, 8),
            Rect::new(0, 0, 8, 8),
            Color::WHITE,
            Color::NO_ADD,
        );
        for y in 0..6 {
            for x in 0..8 {
                assert_eq!(top.pixel(x, y).unwrap(), reference.pixel(x, y + 2).unwrap());
            }
        }
    }

    #[test]
    fn scaled_blit_doubles_texels() {
        let mut src = Canvas::new(2, 1);
        src.put_pixel(0, 0, Color::rgb(10, 0, 0));
        src.put_pixel(1, 0, Color::rgb(20, 0, 0));

        let mut dst = Canvas::new(4, 1);
        dst.blit_scaled(
            &src,
            Rect::new(0, 0, 4, 1),
            Rect::new(0, 0, 2, 1),
            Color::WHITE,
            Color::NO_ADD,
        );
        let reds: Vec<u8> = (0..4).map(|x| dst.pixel(x, 0).unwrap().r).collect();
        assert_eq!(reds, vec![10, 10, 20, 20]);
    }

    #[test]
    fn blit_region_applies_tint() {
        let src = solid(2, 2, Color::WHITE);
        let mut dst = Canvas::new(2, 2);
        dst.blit_region(&src, 0, 0, Rect::new(0, 0, 2, 2), Color::rgb(128, 64, 32));
        let p = dst.pixel(0, 0).unwrap();
        assert_eq!((p.r, p.g, p.b), (128, 64, 32));
    }

    #[test]
    fn additive_term_engages_widest_operator() {
        let src = solid(1, 1, Color::rgb(10, 10, 10));
        let mut dst = Canvas::new(1, 1);
        dst.blit_scaled(
            &src,
            Rect::new(0, 0, 1, 1),
            Rect::new(0, 0, 1, 1),
            Color::WHITE,
            Color::rgb(100, 0, 0),
        );
        let p = dst.pixel(0, 0).unwrap();
        assert_eq!((p.r, p.g, p.b), (110, 10, 10));
    }

    #[test]
    fn degenerate_and_out_of_bounds_blits_are_noops() {
        let src = gradient_source(4, 4);
        let mut dst = solid(4, 4, Color::rgb(5, 5, 5));
        let before: Vec<Option<Color>> = (0..16).map(|i| dst.pixel(i % 4, i / 4)).collect();

        dst.blit_scaled(&src, Rect::new(0, 0, 4, 4), Rect::new(0, 0, 0, 4), Color::WHITE, Color::NO_ADD);
        dst.blit_scaled(&src, Rect::new(0, 0, 0, 4), Rect::new(0, 0, 4, 4), Color::WHITE, Color::NO_ADD);
        dst.blit_scaled(&src, Rect::new(0, 0, 4, 4), Rect::new(0, 0, -4, 4), Color::WHITE, Color::NO_ADD);
        dst.blit_scaled(&src, Rect::new(0, 0, 4, 4), Rect::new(2, 2, 4, 4), Color::WHITE, Color::NO_ADD);

        let after: Vec<Option<Color>> = (0..16).map(|i| dst.pixel(i % 4, i / 4)).collect();
        assert_eq!(before, after);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn zero_size_canvas_panics() {
        let _ = Canvas::new(0, 10);
    }
}
