//! Plane geometry shared by the evasion engine and its callers.
//!
//! Coordinates are in the view layer's units (usually CSS pixels). Offsets
//! are relative to a phase-dependent origin, see `EvasionPhase`.

use serde::{Deserialize, Serialize};

/// A 2D point or offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero or non-finite vector.
    #[must_use]
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Scale both components.
    #[must_use]
    pub fn scale(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Width and height of a rectangle (a zone, the viewport, a button).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest offset from this rectangle's centre at which a `button`
    /// still sits fully inside it with `margin` to spare.
    ///
    /// Axes where the button does not fit collapse to zero, pinning the
    /// button to the centre line.
    #[must_use]
    pub fn inner_half_extent(self, button: Size, margin: f64) -> Vec2 {
        let half = |outer: f64, inner: f64| {
            let extent = outer / 2.0 - inner / 2.0 - margin;
            if extent.is_finite() {
                extent.max(0.0)
            } else {
                0.0
            }
        };
        Vec2::new(half(self.width, button.width), half(self.height, button.height))
    }
}

/// Clamp `offset` per axis into `[-extent, extent]`.
#[must_use]
pub fn clamp_offset(offset: Vec2, extent: Vec2) -> Vec2 {
    let clamp = |v: f64, e: f64| {
        let e = e.abs();
        if v.is_nan() || e.is_nan() {
            0.0
        } else {
            v.clamp(-e, e)
        }
    };
    Vec2::new(clamp(offset.x, extent.x), clamp(offset.y, extent.y))
}
