//! The `ShapeIndex` — an R-tree keyed by stable shape ids.
//!
//! # Why a side map
//!
//! R-tree removal needs the envelope the element was inserted with.  Shape
//! AABBs are *cached* on the shape and may have been refreshed since the
//! shape was indexed (a body can move between reindex passes), so removal by
//! the shape's current AABB could miss.  The index therefore keeps its own
//! `HashId → Aabb` record of the stored envelope; removal always uses that,
//! never the caller's possibly-newer box.  The map doubles as an O(1)
//! membership test.

use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use rb_core::{Aabb, HashId};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: an envelope plus the shape key it belongs to.
#[derive(Clone, Debug)]
struct IndexEntry {
    env: AABB<[f32; 2]>,
    id:  HashId,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.env
    }
}

/// Entries are identified by key alone; two entries for the same shape are
/// the same entry regardless of envelope.
impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[inline]
fn envelope_of(bb: Aabb) -> AABB<[f32; 2]> {
    AABB::from_corners([bb.l, bb.b], [bb.r, bb.t])
}

// ── ShapeIndex ────────────────────────────────────────────────────────────────

/// Broadphase index: stable shape key → bounding box, with overlap queries.
pub struct ShapeIndex {
    tree:    RTree<IndexEntry>,
    /// Envelope each key was inserted with — the removal source of truth.
    entries: FxHashMap<HashId, Aabb>,
}

impl Default for ShapeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeIndex {
    pub fn new() -> Self {
        Self {
            tree:    RTree::new(),
            entries: FxHashMap::default(),
        }
    }

    /// Insert `hashid` with bounding box `bb`.
    ///
    /// # Panics
    ///
    /// Panics if `hashid` is already present.  Double insertion means the
    /// activation bookkeeping lost track of which index a shape lives in.
    pub fn insert(&mut self, hashid: HashId, bb: Aabb) {
        let prev = self.entries.insert(hashid, bb);
        assert!(prev.is_none(), "shape {hashid} is already present in the spatial index");
        self.tree.insert(IndexEntry { env: envelope_of(bb), id: hashid });
    }

    /// Remove `hashid`, returning the bounding box it was stored under.
    ///
    /// # Panics
    ///
    /// Panics if `hashid` is not present.
    pub fn remove(&mut self, hashid: HashId) -> Aabb {
        let bb = self
            .entries
            .remove(&hashid)
            .unwrap_or_else(|| panic!("shape {hashid} is not present in the spatial index"));
        let removed = self.tree.remove(&IndexEntry { env: envelope_of(bb), id: hashid });
        debug_assert!(removed.is_some(), "tree entry missing for {hashid}");
        bb
    }

    /// Re-home `hashid` under a fresh bounding box (remove + insert).
    ///
    /// # Panics
    ///
    /// Panics if `hashid` is not present.
    pub fn reindex(&mut self, hashid: HashId, bb: Aabb) {
        self.remove(hashid);
        self.insert(hashid, bb);
    }

    /// Call `f` for every indexed shape whose stored box overlaps `bb`
    /// (touching edges count).
    pub fn query(&self, bb: Aabb, mut f: impl FnMut(HashId)) {
        for entry in self.tree.locate_in_envelope_intersecting(&envelope_of(bb)) {
            f(entry.id);
        }
    }

    /// `true` if `hashid` is indexed here.
    #[inline]
    pub fn contains(&self, hashid: HashId) -> bool {
        self.entries.contains_key(&hashid)
    }

    /// The bounding box `hashid` is currently stored under, if present.
    #[inline]
    pub fn stored_bb(&self, hashid: HashId) -> Option<Aabb> {
        self.entries.get(&hashid).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
