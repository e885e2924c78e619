//! The two join strategies over a chain view.
//!
//! Both walk the chain edge by edge, carrying a survivor set of object ids
//! forward, and must agree exactly on the final survivor set at the terminal
//! relation. Selecting one never requires state computed by the other.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::TermId;
use crate::error::Error;
use crate::execution::semijoin::ChainView;

/// Join strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    HashJoin,
    SortMergeJoin,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "hash_join" => Ok(Strategy::HashJoin),
            "sort_merge_join" => Ok(Strategy::SortMergeJoin),
            _ => Err(Error::UnsupportedStrategy { name: name.to_string() }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::HashJoin => write!(f, "hash_join"),
            Strategy::SortMergeJoin => write!(f, "sort_merge_join"),
        }
    }
}

/// Run the selected strategy over the view and return the ids surviving at
/// the terminal relation.
pub fn execute(strategy: Strategy, view: &ChainView) -> HashSet<TermId> {
    match strategy {
        Strategy::HashJoin => hash_join(view),
        Strategy::SortMergeJoin => sort_merge_join(view),
    }
}

/// 32-bit integer finalizer: three shift-xor rounds with odd-constant
/// multiplication. Well distributed over dense dictionary ids.
pub(crate) fn mix(id: TermId) -> u32 {
    let mut x = id;
    x = ((x >> 16) ^ x).wrapping_mul(0x45d9_f3b);
    x = ((x >> 16) ^ x).wrapping_mul(0x45d9_f3b);
    (x >> 16) ^ x
}

/// Chained hash table keyed by hash value. A bucket hit is necessary but not
/// sufficient; callers must confirm equality against the raw ids in the
/// bucket.
#[derive(Debug, Default)]
struct BucketTable {
    buckets: HashMap<u32, Vec<TermId>>,
}

impl BucketTable {
    fn insert(&mut self, hash: u32, id: TermId) {
        self.buckets.entry(hash).or_default().push(id);
    }

    fn bucket(&self, hash: u32) -> &[TermId] {
        self.buckets.get(&hash).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Per edge: build a bucket table over the left survivor set, probe it with
/// every subject key of the right relation, and on a confirmed match carry
/// the right side's object ids forward.
fn hash_join(view: &ChainView) -> HashSet<TermId> {
    let mut survivors: HashSet<TermId> = view.leftmost_objects().clone();

    for position in 1..=view.edge_count() {
        let mut table = BucketTable::default();
        for &id in &survivors {
            table.insert(mix(id), id);
        }

        let mut next = HashSet::new();
        for (&subject, objects) in view.subject_map(position) {
            if table.bucket(mix(subject)).contains(&subject) {
                next.extend(objects.iter().copied());
            }
        }
        survivors = next;
    }

    survivors
}

/// Per edge: sort the left survivor ids and the right relation's entries by
/// key, then zipper-merge with two cursors. Key equality unions the right
/// side's object set into the next survivor set; this is a presence join,
/// no duplicate-key cross product.
fn sort_merge_join(view: &ChainView) -> HashSet<TermId> {
    let mut survivors: HashSet<TermId> = view.leftmost_objects().clone();

    for position in 1..=view.edge_count() {
        let mut left: Vec<TermId> = survivors.iter().copied().collect();
        left.sort_unstable();

        let mut right: Vec<(TermId, &HashSet<TermId>)> =
            view.subject_map(position).iter().map(|(&subject, objects)| (subject, objects)).collect();
        right.sort_unstable_by_key(|(subject, _)| *subject);

        survivors = merge(&left, &right);
    }

    survivors
}

fn merge(left: &[TermId], right: &[(TermId, &HashSet<TermId>)]) -> HashSet<TermId> {
    let mut result = HashSet::new();
    let mut left_cursor = 0;
    let mut right_cursor = 0;

    while left_cursor < left.len() && right_cursor < right.len() {
        let left_id = left[left_cursor];
        let (right_id, objects) = right[right_cursor];

        if left_id == right_id {
            result.extend(objects.iter().copied());
            left_cursor += 1;
            right_cursor += 1;
        } else if left_id > right_id {
            right_cursor += 1;
        } else {
            left_cursor += 1;
        }
    }

    result
}
