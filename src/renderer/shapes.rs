//! 2D primitives shared by the board, tiles and text layout

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque RGB colour; transparency is passed separately as alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(200, 30, 30);
    pub const BUTTON: Color = Color::rgb(188, 113, 55);
    pub const BUTTON_HOVER: Color = Color::rgb(214, 150, 89);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle in screen pixels (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` whose centre is `center`
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Grow (positive) or shrink (negative) by `dx`/`dy` on every side, keeping the centre
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        let size = (self.size + Vec2::new(dx * 2.0, dy * 2.0)).max(Vec2::ZERO);
        Self::centered_at(self.center(), size)
    }
}

/// Cursor overlay for a tile: an opaque frame with a transparent centre and a
/// transparent cross cut through the middle of each side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectorMask {
    /// Outer edge of the frame
    pub frame: Rect,
    /// Transparent interior
    pub inner: Rect,
    /// Transparent horizontal bar (cuts the left and right sides)
    pub cross_h: Rect,
    /// Transparent vertical bar (cuts the top and bottom sides)
    pub cross_v: Rect,
}

/// Inset of the selector frame from the tile edge
const SELECTOR_INSET: f32 = 5.0;
/// Selector border at the design width, scaled with the screen
const SELECTOR_BORDER_AT_DESIGN: f32 = 8.0;

impl SelectorMask {
    pub fn new(tile: Rect, screen_width: f32) -> Self {
        let border =
            (SELECTOR_BORDER_AT_DESIGN * screen_width / crate::consts::DESIGN_WIDTH).floor();
        let frame = tile.inflate(-SELECTOR_INSET, -SELECTOR_INSET);
        let inner = frame.inflate(-border, -border);
        let center = frame.center();

        let cross_h = Rect::centered_at(center, Vec2::new(frame.size.x, frame.size.y / 2.0));
        let cross_v = Rect::centered_at(center, Vec2::new(frame.size.x / 2.0, frame.size.y));

        Self {
            frame,
            inner,
            cross_h,
            cross_v,
        }
    }

    /// Whether a pixel of the tile is painted by the mask
    pub fn covers(&self, point: Vec2) -> bool {
        self.frame.contains(point)
            && !self.inner.contains(point)
            && !self.cross_h.contains(point)
            && !self.cross_v.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(109.9, 69.9)));
        assert!(!r.contains(Vec2::new(110.0, 30.0)));
        assert!(!r.contains(Vec2::new(50.0, 70.0)));
        assert!(!r.contains(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let shrunk = r.inflate(-5.0, -5.0);
        assert_eq!(shrunk.center(), r.center());
        assert_eq!(shrunk.size, Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_selector_mask_paints_corners_only() {
        let tile = Rect::new(0.0, 0.0, 140.0, 140.0);
        let mask = SelectorMask::new(tile, 800.0);

        // Corner of the frame is painted
        assert!(mask.covers(Vec2::new(7.0, 7.0)));
        // Tile centre is transparent
        assert!(!mask.covers(tile.center()));
        // Middle of the left side is cut by the cross bar
        assert!(!mask.covers(Vec2::new(7.0, 70.0)));
        // Outside the inset frame
        assert!(!mask.covers(Vec2::new(2.0, 2.0)));
    }
}
