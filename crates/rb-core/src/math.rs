//! Minimal 2-D vector and axis-aligned bounding-box math.
//!
//! Everything here uses `f32`.  Single precision keeps body and contact
//! records half the size of `f64` equivalents and is plenty for a game-scale
//! world; positions stay well inside the range where f32 spacing matters.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2-D vector / point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length — cheaper than [`length`](Self::length) when only
    /// comparing magnitudes (the kinetic-energy test never needs the root).
    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Rotate by the unit vector `(cos θ, sin θ)` — complex multiplication.
    #[inline]
    pub fn rotate(self, rot: Vec2) -> Vec2 {
        Vec2::new(
            self.x * rot.x - self.y * rot.y,
            self.x * rot.y + self.y * rot.x,
        )
    }

    /// The unit rotation vector for `angle` radians.
    #[inline]
    pub fn for_angle(angle: f32) -> Vec2 {
        Vec2::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Aabb ──────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box, stored as `left/bottom/right/top` extents.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub l: f32,
    pub b: f32,
    pub r: f32,
    pub t: f32,
}

impl Aabb {
    /// Construct from extents.  Debug-asserts `l <= r` and `b <= t`.
    #[inline]
    pub fn new(l: f32, b: f32, r: f32, t: f32) -> Self {
        debug_assert!(l <= r && b <= t, "degenerate Aabb ({l}, {b}, {r}, {t})");
        Self { l, b, r, t }
    }

    /// The box covering a circle of `radius` centered at `center`.
    #[inline]
    pub fn for_circle(center: Vec2, radius: f32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    /// The box covering `half_extents` around `center` (no rotation).
    #[inline]
    pub fn for_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(
            center.x - half_extents.x,
            center.y - half_extents.y,
            center.x + half_extents.x,
            center.y + half_extents.y,
        )
    }

    /// `true` if the two boxes overlap (touching edges count).
    #[inline]
    pub fn intersects(self, other: Aabb) -> bool {
        self.l <= other.r && other.l <= self.r && self.b <= other.t && other.b <= self.t
    }

    /// `true` if `other` lies entirely inside `self`.
    #[inline]
    pub fn contains(self, other: Aabb) -> bool {
        self.l <= other.l && self.r >= other.r && self.b <= other.b && self.t >= other.t
    }
}
