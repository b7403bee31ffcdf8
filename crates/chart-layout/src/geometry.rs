// File: crates/chart-layout/src/geometry.rs
// Summary: Lightweight geometry types shared by planes, layout, and label placement.

/// A point in either data space or pixel space (the plane decides).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle, stored as origin + extent.
/// Width/height may be negative until `normalized()` is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn from_points(a: PointF, b: PointF) -> Self {
        Self { left: a.x, top: a.y, width: b.x - a.x, height: b.y - a.y }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> PointF {
        PointF::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Same area with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let (left, width) = if self.width < 0.0 {
            (self.left + self.width, -self.width)
        } else {
            (self.left, self.width)
        };
        let (top, height) = if self.height < 0.0 {
            (self.top + self.height, -self.height)
        } else {
            (self.top, self.height)
        };
        Self { left, top, width, height }
    }

    /// Strict interior overlap; sharing an edge does not count.
    pub fn intersects(&self, other: &RectF) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.left < b.right() && b.left < a.right() && a.top < b.bottom() && b.top < a.bottom()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { left: self.left + dx, top: self.top + dy, ..*self }
    }
}

/// Data-space bounding box as a min/max corner pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Boundaries {
    pub min: PointF,
    pub max: PointF,
}

impl Boundaries {
    pub const fn new(min: PointF, max: PointF) -> Self {
        Self { min, max }
    }

    /// All four coordinates are finite numbers.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Widen a degenerate (zero-height) y-range so every diagram has a
    /// drawable extent: `[0,0]` becomes `[0,0.1]`, an all-negative value
    /// extends up to zero, an all-positive value extends down to zero.
    pub fn corrected(mut self) -> Self {
        if self.max.y == self.min.y {
            if self.min.y == 0.0 {
                self.max.y = 0.1;
            } else if self.max.y < 0.0 {
                self.max.y = 0.0;
            } else {
                self.min.y = 0.0;
            }
        }
        self
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
