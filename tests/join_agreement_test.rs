//! Both join strategies, with and without semi-join reduction, must produce
//! bit-for-bit identical survivor sets. The reduction itself may only ever
//! shrink a relation.

use std::collections::HashSet;

use catena::core::{TermId, Triple};
use catena::execution::{self, ChainView, Strategy};
use catena::TripleStore;

const CHAIN: [&str; 4] = ["follows", "friendOf", "likes", "hasReview"];

fn chain() -> Vec<String> {
    CHAIN.iter().map(|s| s.to_string()).collect()
}

fn reference_store() -> TripleStore {
    let mut store = TripleStore::new(&chain());
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

/// A deterministic store that is dense enough to exercise fan-out, dangling
/// branches and duplicate entries on every relation.
fn synthetic_store() -> TripleStore {
    let mut store = TripleStore::new(&chain());
    for i in 0..200u32 {
        store.insert(&Triple::new(
            &format!("u{}", i),
            "follows",
            &format!("u{}", (i * 7 + 1) % 90),
        ));
    }
    for i in 0..90u32 {
        if i % 3 != 0 {
            store.insert(&Triple::new(&format!("u{}", i), "friendOf", &format!("f{}", i % 40)));
        }
    }
    for i in 0..40u32 {
        store.insert(&Triple::new(&format!("f{}", i), "likes", &format!("p{}", i % 25)));
        // duplicate entry for every fourth product
        if i % 4 == 0 {
            store.insert(&Triple::new(&format!("f{}", i), "likes", &format!("p{}", i % 25)));
        }
    }
    for i in 0..25u32 {
        if i % 5 != 0 {
            store.insert(&Triple::new(&format!("p{}", i), "hasReview", &format!("r{}", i)));
        }
    }
    store
}

fn all_survivor_sets(store: &TripleStore) -> Vec<HashSet<TermId>> {
    let mut sets = Vec::new();
    for reduce in [false, true] {
        let view = ChainView::build(store, reduce);
        for strategy in [Strategy::HashJoin, Strategy::SortMergeJoin] {
            sets.push(execution::execute(strategy, &view));
        }
    }
    sets
}

#[test]
fn test_reference_scenario_survivor_is_exactly_e() {
    let store = reference_store();
    let e = store.dictionary().lookup("e").unwrap();
    let expected: HashSet<TermId> = [e].into_iter().collect();

    for survivors in all_survivor_sets(&store) {
        assert_eq!(survivors, expected);
    }
}

#[test]
fn test_all_combinations_agree_on_synthetic_data() {
    let store = synthetic_store();
    let sets = all_survivor_sets(&store);

    assert!(!sets[0].is_empty(), "synthetic chain should produce survivors");
    for other in &sets[1..] {
        assert_eq!(&sets[0], other);
    }
}

#[test]
fn test_reduction_only_shrinks_relations() {
    for store in [reference_store(), synthetic_store()] {
        let unreduced = ChainView::build(&store, false);
        let reduced = ChainView::build(&store, true);

        let before = unreduced.relation_sizes(store.chain());
        let after = reduced.relation_sizes(store.chain());
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert!(a.keys <= b.keys, "{} grew from {} to {}", a.relation, b.keys, a.keys);
            assert!(a.entries <= b.entries);
        }
    }
}

#[test]
fn test_reduction_drops_dangling_follows_object() {
    let store = reference_store();
    let b = store.dictionary().lookup("b").unwrap();
    let y = store.dictionary().lookup("y").unwrap();

    let unreduced = ChainView::build(&store, false);
    let reduced = ChainView::build(&store, true);

    let both: HashSet<TermId> = [b, y].into_iter().collect();
    let only_b: HashSet<TermId> = [b].into_iter().collect();
    assert_eq!(unreduced.leftmost_objects(), &both);
    assert_eq!(reduced.leftmost_objects(), &only_b);
}

#[test]
fn test_two_relation_chain() {
    let two_chain: Vec<String> = ["p", "q"].iter().map(|s| s.to_string()).collect();
    let mut store = TripleStore::new(&two_chain);
    store.insert(&Triple::new("s1", "p", "m1"));
    store.insert(&Triple::new("s2", "p", "m2"));
    store.insert(&Triple::new("m1", "q", "t1"));

    let t1 = store.dictionary().lookup("t1").unwrap();
    let expected: HashSet<TermId> = [t1].into_iter().collect();
    for survivors in all_survivor_sets(&store) {
        assert_eq!(survivors, expected);
    }
}
