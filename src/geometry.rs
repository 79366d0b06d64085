//! Integer rectangle math shared by the canvas, the clip region and the
//! presentation fit.

/// An axis-aligned integer rectangle. A rect with non-positive extent is
/// degenerate and disables whatever operation receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Intersection of two rects. Disjoint inputs yield a rect with
    /// non-positive extent.
    #[inline]
    pub fn intersect(self, other: Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.w).min(other.x + other.w);
        let y2 = (self.y + self.h).min(other.y + other.h);
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    #[inline]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.w && y < self.y + self.h
    }

    /// True when `other` lies entirely inside `self`.
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.w <= self.x + self.w
            && other.y + other.h <= self.y + self.h
    }
}

/// Aspect-preserving fit of a `src_w` x `src_h` surface into a `dst_w` x
/// `dst_h` window: the surface is scaled to touch on one axis and centered
/// on the other (letterbox or pillarbox as the shapes demand). Fractional
/// extents round up so the surface never falls a pixel short of the window
/// edge it touches.
pub fn letterbox_fit(src_w: i32, src_h: i32, dst_w: i32, dst_h: i32) -> Rect {
    let src_ar = src_h as f32 / src_w as f32;
    let dst_ar = dst_h as f32 / dst_w as f32;
    let (w, h) = if src_ar < dst_ar {
        let w = dst_w;
        (w, (w as f32 * src_ar).ceil() as i32)
    } else {
        let h = dst_h;
        ((h as f32 / src_ar).ceil() as i32, h)
    };
    Rect::new((dst_w - w) / 2, (dst_h - h) / 2, w, h)
}
