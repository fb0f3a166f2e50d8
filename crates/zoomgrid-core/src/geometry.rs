#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixels.
//!
//! Values are signed because the animation loop works with signed distances
//! and hosts may report transient negative offsets.

use serde::{Deserialize, Serialize};

/// A point (left, top) relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
///
/// Also used for the per-axis sums of folded size and padding compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either axis is zero (or negative).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin and size.
    #[inline]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Area in square pixels (0 for degenerate rectangles).
    #[inline]
    pub const fn area(&self) -> i64 {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// Round half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
#[inline]
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// `round_half_up(numerator / denominator)` for integers, without floats.
///
/// Returns 0 when `denominator` is 0.
#[inline]
pub fn div_round(numerator: i32, denominator: i32) -> i32 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = if denominator < 0 {
        (-i64::from(numerator), -i64::from(denominator))
    } else {
        (i64::from(numerator), i64::from(denominator))
    };
    (2 * n + d).div_euclid(2 * d) as i32
}
