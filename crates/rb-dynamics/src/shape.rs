//! Collider shapes with cached world-space bounding boxes.

use rb_core::{Aabb, BodyId, HashId, Vec2};

/// Collider geometry, in body-local coordinates around the shape's `offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Circle { radius: f32 },
    /// Axis-aligned-at-rest rectangle given by half extents; rotation is
    /// absorbed into a conservative AABB.
    Rect { half_w: f32, half_h: f32 },
}

/// A collider owned by exactly one body.
///
/// The world-space `bb` is a cache: it is only as fresh as the last
/// [`update`](Self::update) call.  The space refreshes active shapes each
/// step and sleeping/static shapes at migration time.
#[derive(Debug)]
pub struct Shape {
    /// Owning body.
    pub body: BodyId,

    pub kind: ShapeKind,

    /// Attachment point in body-local coordinates.
    pub offset: Vec2,

    /// Stable spatial-index key, assigned when the shape is attached to the
    /// space.  `HashId::INVALID` until then.
    pub hashid: HashId,

    /// Cached world-space bounding box.
    pub bb: Aabb,
}

impl Shape {
    /// Create a detached shape for `body`.  The bounding box starts
    /// degenerate at the origin and must be refreshed via
    /// [`update`](Self::update) before the shape is indexed.
    pub fn new(body: BodyId, kind: ShapeKind, offset: Vec2) -> Self {
        match kind {
            ShapeKind::Circle { radius } => {
                assert!(radius.is_finite() && radius > 0.0, "circle radius must be finite and positive");
            }
            ShapeKind::Rect { half_w, half_h } => {
                assert!(
                    half_w.is_finite() && half_w > 0.0 && half_h.is_finite() && half_h > 0.0,
                    "rect half extents must be finite and positive"
                );
            }
        }
        Self {
            body,
            kind,
            offset,
            hashid: HashId::INVALID,
            bb: Aabb::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Recompute and cache the world-space bounding box for a body at
    /// `position` with unit rotation vector `rot`.  Returns the fresh box.
    pub fn update(&mut self, position: Vec2, rot: Vec2) -> Aabb {
        let center = position + self.offset.rotate(rot);
        self.bb = match self.kind {
            ShapeKind::Circle { radius } => Aabb::for_circle(center, radius),
            ShapeKind::Rect { half_w, half_h } => {
                // Conservative box of the rotated rect.
                let ex = half_w * rot.x.abs() + half_h * rot.y.abs();
                let ey = half_w * rot.y.abs() + half_h * rot.x.abs();
                Aabb::for_extents(center, Vec2::new(ex, ey))
            }
        };
        self.bb
    }
}
