//! Right-to-left semi-join reduction over the property chain.
//!
//! The chain is a path query, so the reduction is exact: a key is dropped
//! only if it can never appear in a full chain match. The same pass also
//! pivots each relation from object-to-subjects into the subject-to-objects
//! orientation both join strategies consume, so it runs with the filter
//! switched off as well.

use std::collections::{HashMap, HashSet};

use crate::core::TermId;
use crate::indexing::TripleStore;

/// Per-relation size of a chain view, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSize {
    pub relation: String,
    /// Surviving keys (subjects for pivoted relations, objects for the
    /// leftmost one).
    pub keys: usize,
    /// Surviving (key, value) entries.
    pub entries: u64,
}

/// The join-ready view of the chain: the leftmost relation's object-id set
/// plus one subject-to-objects map per remaining relation, derived from the
/// property indices without mutating them.
///
/// Built reduced (each relation filtered on its already-reduced right
/// neighbor) or unreduced (pivot only). Reduction never changes the join
/// result, it only shrinks the maps the join walks.
#[derive(Debug)]
pub struct ChainView {
    leftmost_objects: HashSet<TermId>,
    /// `subject_maps[k]` belongs to chain position `k + 1`.
    subject_maps: Vec<HashMap<TermId, HashSet<TermId>>>,
    reduced: bool,
}

impl ChainView {
    /// Pivot (and, when `reduce` is set, filter) the store's indices,
    /// right to left.
    pub fn build(store: &TripleStore, reduce: bool) -> Self {
        let relations = store.chain().len();
        debug_assert!(relations > 0);

        // Terminal relation first: nothing to its right, so never filtered.
        // Each pass to the left keeps a bucket only if its object id survived
        // in the neighbor just built.
        let mut maps_right_to_left: Vec<HashMap<TermId, HashSet<TermId>>> = Vec::new();
        for position in (1..relations).rev() {
            let right_neighbor = maps_right_to_left.last();
            let mut map: HashMap<TermId, HashSet<TermId>> = HashMap::new();
            for (object, subjects) in store.index(position).iter() {
                if reduce {
                    if let Some(neighbor) = right_neighbor {
                        if !neighbor.contains_key(&object) {
                            continue;
                        }
                    }
                }
                for &subject in subjects {
                    map.entry(subject).or_default().insert(object);
                }
            }
            maps_right_to_left.push(map);
        }

        let mut leftmost_objects = HashSet::new();
        for (object, _) in store.index(0).iter() {
            if reduce {
                if let Some(neighbor) = maps_right_to_left.last() {
                    if !neighbor.contains_key(&object) {
                        continue;
                    }
                }
            }
            leftmost_objects.insert(object);
        }

        maps_right_to_left.reverse();
        ChainView { leftmost_objects, subject_maps: maps_right_to_left, reduced: reduce }
    }

    /// Object ids of the leftmost relation that enter the first join edge.
    pub fn leftmost_objects(&self) -> &HashSet<TermId> {
        &self.leftmost_objects
    }

    /// Subject-to-objects map for chain position `position` (1-based onward
    /// from the second relation).
    pub fn subject_map(&self, position: usize) -> &HashMap<TermId, HashSet<TermId>> {
        &self.subject_maps[position - 1]
    }

    /// Number of join edges the view spans.
    pub fn edge_count(&self) -> usize {
        self.subject_maps.len()
    }

    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Surviving sizes per relation, in chain order.
    pub fn relation_sizes(&self, chain: &[String]) -> Vec<RelationSize> {
        let mut sizes = Vec::with_capacity(chain.len());
        sizes.push(RelationSize {
            relation: chain[0].clone(),
            keys: self.leftmost_objects.len(),
            entries: self.leftmost_objects.len() as u64,
        });
        for (map, relation) in self.subject_maps.iter().zip(&chain[1..]) {
            sizes.push(RelationSize {
                relation: relation.clone(),
                keys: map.len(),
                entries: map.values().map(|objects| objects.len() as u64).sum(),
            });
        }
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Triple;
    use crate::indexing::TripleStore;

    fn scenario_store() -> TripleStore {
        let chain: Vec<String> =
            ["follows", "friendOf", "likes", "hasReview"].iter().map(|s| s.to_string()).collect();
        let mut store = TripleStore::new(&chain);
        for (s, p, o) in [
            ("a", "follows", "b"),
            ("b", "friendOf", "c"),
            ("c", "likes", "d"),
            ("d", "hasReview", "e"),
            ("x", "follows", "y"),
        ] {
            store.insert(&Triple::new(s, p, o));
        }
        store
    }

    #[test]
    fn test_reduction_drops_dangling_follows_object() {
        let store = scenario_store();
        let unreduced = ChainView::build(&store, false);
        let reduced = ChainView::build(&store, true);

        // `y` has no friendOf continuation, so only `b` survives.
        assert_eq!(unreduced.leftmost_objects().len(), 2);
        assert_eq!(reduced.leftmost_objects().len(), 1);
        let b = store.dictionary().lookup("b").unwrap();
        assert!(reduced.leftmost_objects().contains(&b));
    }

    #[test]
    fn test_reduced_sizes_never_exceed_unreduced() {
        let store = scenario_store();
        let unreduced = ChainView::build(&store, false);
        let reduced = ChainView::build(&store, true);

        let before = unreduced.relation_sizes(store.chain());
        let after = reduced.relation_sizes(store.chain());
        for (b, a) in before.iter().zip(&after) {
            assert!(a.keys <= b.keys, "{}: {} > {}", a.relation, a.keys, b.keys);
            assert!(a.entries <= b.entries);
        }
    }

    #[test]
    fn test_terminal_relation_is_never_filtered() {
        let store = scenario_store();
        let reduced = ChainView::build(&store, true);
        let d = store.dictionary().lookup("d").unwrap();
        let e = store.dictionary().lookup("e").unwrap();
        assert_eq!(reduced.subject_map(3).len(), 1);
        assert!(reduced.subject_map(3)[&d].contains(&e));
    }
}
