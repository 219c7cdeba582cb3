//! Strongly typed, zero-cost identifier wrappers.
//!
//! All simulation objects (bodies, shapes, arbiters, constraints) live in
//! arenas owned by the `Space` and are addressed by these ids.  The ids are
//! `Copy + Ord + Hash` so they can be used as map keys and sorted collection
//! elements without ceremony.  The inner integer is `pub` to allow direct
//! indexing into arena `Vec`s via `id.0 as usize`, but callers should prefer
//! the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the inner max.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as an arena index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a body in the space's body arena.
    pub struct BodyId(u32);
}

typed_id! {
    /// Index of a shape in the space's shape arena.
    pub struct ShapeId(u32);
}

typed_id! {
    /// Index of an arbiter (contact pair) in the space's arbiter arena.
    pub struct ArbiterId(u32);
}

typed_id! {
    /// Index of a constraint in the space's constraint arena.
    pub struct ConstraintId(u32);
}

typed_id! {
    /// Stable spatial-index key assigned to a shape when it is attached to a
    /// body.  Unlike `ShapeId` it is never recycled, so an index entry can
    /// outlive arena compaction.  `u64` because it only ever grows.
    pub struct HashId(u64);
}
