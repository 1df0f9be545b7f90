//! Bounding boxes and whitespace measurements.
//!
//! Coordinates follow the decoder convention: `x` grows to the right and `y`
//! grows downwards, so `y0` is the top edge of a box.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// True when the box has no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Horizontal midpoint.
    pub fn mid_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Check whether two boxes overlap (touching edges count).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }
}

impl From<(f32, f32, f32, f32)> for Rect {
    fn from((x0, y0, x1, y1): (f32, f32, f32, f32)) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

/// Whitespace of a small box (span, line) relative to the box containing it
/// (block, page).
///
/// All percentages are rounded to whole numbers. Degenerate boxes never
/// panic: zero widths yield 0 (or `None` for [`Whitespace::right`]).
#[derive(Debug, Clone, Copy)]
pub struct Whitespace {
    outer: Rect,
    inner: Rect,
}

impl Whitespace {
    /// Compare `inner` against its container `outer`.
    pub fn new(outer: Rect, inner: Rect) -> Self {
        Self { outer, inner }
    }

    /// Width difference in percent of the outer width.
    pub fn ratio(&self) -> u32 {
        let (inner, outer) = (self.inner.width(), self.outer.width());
        if inner == 0.0 || outer == 0.0 {
            return 0;
        }
        percent((inner / outer - 1.0).abs())
    }

    /// Whitespace on the left in percent of the outer width.
    pub fn left(&self) -> u32 {
        let outer = self.outer.width();
        if outer == 0.0 {
            return 0;
        }
        ((self.outer.x0 - self.inner.x0).abs() * 100.0 / outer).round() as u32
    }

    /// Whitespace on the right in percent of the outer width.
    ///
    /// `None` when the inner box sticks out to the right; callers treat this
    /// as "not right-indented".
    pub fn right(&self) -> Option<u32> {
        let outer = self.outer.width();
        if outer == 0.0 || self.inner.x1 > self.outer.x1 {
            return None;
        }
        Some(((self.outer.x1 - self.inner.x1).abs() * 100.0 / outer).round() as u32)
    }

    /// Distance of the inner midpoint from the outer midpoint, in percent.
    pub fn center_deviation(&self) -> u32 {
        self.raw_deviation().map(percent).unwrap_or(0)
    }

    /// Check whether the inner box is centered within `threshold` percent.
    pub fn is_centered(&self, threshold: f32) -> bool {
        match self.raw_deviation() {
            Some(deviation) => deviation * 100.0 < threshold,
            None => true,
        }
    }

    /// The inner box spans (almost) the entire outer box.
    ///
    /// In that case the container gives no positional signal and the
    /// comparison should be repeated against the page.
    pub fn one_span(&self) -> bool {
        let outer = self.outer.width();
        outer <= 0.0 || self.inner.width() >= outer * 0.99
    }

    fn raw_deviation(&self) -> Option<f32> {
        let mid = self.outer.mid_x();
        if mid == 0.0 {
            return None;
        }
        Some((self.inner.mid_x() / mid - 1.0).abs())
    }
}

fn percent(fraction: f32) -> u32 {
    (fraction * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Rect {
        Rect::new(100.0, 0.0, 300.0, 20.0)
    }

    #[test]
    fn test_ratio() {
        let ws = Whitespace::new(block(), Rect::new(100.0, 0.0, 150.0, 10.0));
        assert_eq!(ws.ratio(), 75);

        let ws = Whitespace::new(block(), block());
        assert_eq!(ws.ratio(), 0);
    }

    #[test]
    fn test_degenerate_widths() {
        let zero = Rect::new(50.0, 0.0, 50.0, 10.0);
        assert_eq!(Whitespace::new(block(), zero).ratio(), 0);
        assert_eq!(Whitespace::new(zero, block()).ratio(), 0);
        assert_eq!(Whitespace::new(zero, block()).left(), 0);
        assert_eq!(Whitespace::new(zero, block()).right(), None);
        assert!(Whitespace::new(zero, block()).one_span());
    }

    #[test]
    fn test_left_and_right() {
        let ws = Whitespace::new(block(), Rect::new(150.0, 0.0, 250.0, 10.0));
        assert_eq!(ws.left(), 25);
        assert_eq!(ws.right(), Some(25));

        // Sticks out on the right
        let ws = Whitespace::new(block(), Rect::new(150.0, 0.0, 310.0, 10.0));
        assert_eq!(ws.right(), None);
    }

    #[test]
    fn test_rounding() {
        // 0.5% rounds away from zero
        let outer = Rect::new(0.0, 0.0, 200.0, 10.0);
        let ws = Whitespace::new(outer, Rect::new(1.0, 0.0, 200.0, 10.0));
        assert_eq!(ws.left(), 1);
    }

    #[test]
    fn test_centered() {
        let ws = Whitespace::new(block(), Rect::new(180.0, 0.0, 220.0, 10.0));
        assert_eq!(ws.center_deviation(), 0);
        assert!(ws.is_centered(10.0));

        let ws = Whitespace::new(block(), Rect::new(100.0, 0.0, 140.0, 10.0));
        // midpoints 120 vs 200 -> 40%
        assert_eq!(ws.center_deviation(), 40);
        assert!(!ws.is_centered(10.0));
    }

    #[test]
    fn test_centered_zero_midpoint() {
        let outer = Rect::new(-10.0, 0.0, 10.0, 10.0);
        let ws = Whitespace::new(outer, Rect::new(-5.0, 0.0, 0.0, 10.0));
        assert!(ws.is_centered(10.0));
        assert_eq!(ws.center_deviation(), 0);
    }

    #[test]
    fn test_one_span() {
        assert!(Whitespace::new(block(), block()).one_span());
        assert!(Whitespace::new(block(), Rect::new(100.0, 0.0, 299.0, 10.0)).one_span());
        assert!(!Whitespace::new(block(), Rect::new(100.0, 0.0, 290.0, 10.0)).one_span());
    }

    #[test]
    fn test_intersects() {
        let page = Rect::from_size(600.0, 800.0);
        assert!(page.intersects(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!page.intersects(&Rect::new(10.0, 810.0, 20.0, 820.0)));
    }

    #[test]
    fn test_is_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0.0, 0.0, 600.0, 0.0).is_empty());
        assert!(!Rect::from_size(600.0, 800.0).is_empty());
    }
}
