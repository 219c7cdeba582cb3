//! Unit tests for the shape index.

#[cfg(test)]
mod index {
    use rb_core::{Aabb, HashId};

    use crate::ShapeIndex;

    fn unit_box_at(x: f32, y: f32) -> Aabb {
        Aabb::new(x, y, x + 1.0, y + 1.0)
    }

    fn query_ids(index: &ShapeIndex, bb: Aabb) -> Vec<HashId> {
        let mut hits = Vec::new();
        index.query(bb, |id| hits.push(id));
        hits.sort();
        hits
    }

    #[test]
    fn insert_query_remove() {
        let mut index = ShapeIndex::new();
        index.insert(HashId(1), unit_box_at(0.0, 0.0));
        index.insert(HashId(2), unit_box_at(10.0, 10.0));
        assert_eq!(index.len(), 2);

        assert_eq!(query_ids(&index, unit_box_at(0.5, 0.5)), vec![HashId(1)]);
        assert_eq!(query_ids(&index, Aabb::new(-5.0, -5.0, 20.0, 20.0)), vec![HashId(1), HashId(2)]);
        assert!(query_ids(&index, unit_box_at(100.0, 100.0)).is_empty());

        let bb = index.remove(HashId(1));
        assert_eq!(bb, unit_box_at(0.0, 0.0));
        assert!(!index.contains(HashId(1)));
        assert!(query_ids(&index, unit_box_at(0.5, 0.5)).is_empty());
    }

    #[test]
    fn touching_edges_hit() {
        let mut index = ShapeIndex::new();
        index.insert(HashId(7), Aabb::new(0.0, 0.0, 1.0, 1.0));
        // query box sharing only the x = 1 edge
        assert_eq!(query_ids(&index, Aabb::new(1.0, 0.0, 2.0, 1.0)), vec![HashId(7)]);
    }

    #[test]
    fn reindex_moves_entry() {
        let mut index = ShapeIndex::new();
        index.insert(HashId(3), unit_box_at(0.0, 0.0));
        index.reindex(HashId(3), unit_box_at(50.0, 50.0));

        assert!(query_ids(&index, unit_box_at(0.0, 0.0)).is_empty());
        assert_eq!(query_ids(&index, unit_box_at(50.5, 50.5)), vec![HashId(3)]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn removal_uses_stored_envelope() {
        // The caller's idea of the shape's AABB may drift from what the index
        // was told; removal must rely on the stored envelope only.
        let mut index = ShapeIndex::new();
        index.insert(HashId(9), unit_box_at(0.0, 0.0));
        assert_eq!(index.stored_bb(HashId(9)), Some(unit_box_at(0.0, 0.0)));
        // No reindex happened, so remove still finds it even though the
        // "real" shape has long since moved elsewhere.
        index.remove(HashId(9));
        assert!(index.is_empty());
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn double_insert_panics() {
        let mut index = ShapeIndex::new();
        index.insert(HashId(1), unit_box_at(0.0, 0.0));
        index.insert(HashId(1), unit_box_at(1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "not present")]
    fn remove_missing_panics() {
        let mut index = ShapeIndex::new();
        index.remove(HashId(4));
    }
}
