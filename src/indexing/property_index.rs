//! Per-property inverted indices and the load phase that builds them.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::{TermId, Triple};
use crate::error::{Error, Result, Stage};
use crate::indexing::dictionary::Dictionary;
use crate::parsing::{parse_term, split_triple_line};

/// Inverted index for one tracked property: object id to the ordered list of
/// subject ids observed with it. Duplicate subjects for the same object are
/// preserved, one per source triple.
#[derive(Debug, Default)]
pub struct PropertyIndex {
    postings: HashMap<TermId, Vec<TermId>>,
    entry_count: u64,
}

impl PropertyIndex {
    pub fn new() -> Self {
        PropertyIndex { postings: HashMap::new(), entry_count: 0 }
    }

    fn insert(&mut self, object: TermId, subject: TermId) {
        self.postings.entry(object).or_default().push(subject);
        self.entry_count += 1;
    }

    /// Subjects recorded for `object`, empty when the object was never seen.
    pub fn subjects(&self, object: TermId) -> &[TermId] {
        self.postings.get(&object).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &[TermId])> {
        self.postings.iter().map(|(object, subjects)| (*object, subjects.as_slice()))
    }

    /// Number of distinct object keys.
    pub fn object_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of (object, subject) entries, duplicates included.
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }
}

/// The product of the load phase: the dictionary plus one inverted index per
/// chain relation, in chain order. Read-only once loading is done.
#[derive(Debug)]
pub struct TripleStore {
    dictionary: Dictionary,
    chain: Vec<String>,
    indices: Vec<PropertyIndex>,
    tracked_triples: u64,
}

impl TripleStore {
    /// An empty store tracking the given property chain.
    pub fn new(chain: &[String]) -> Self {
        TripleStore {
            dictionary: Dictionary::new(),
            chain: chain.to_vec(),
            indices: chain.iter().map(|_| PropertyIndex::new()).collect(),
            tracked_triples: 0,
        }
    }

    /// Index one parsed triple. Triples whose property is not tracked are
    /// dropped without error; returns whether the triple was kept.
    pub fn insert(&mut self, triple: &Triple) -> bool {
        let Some(position) = self.chain.iter().position(|name| name == &triple.property) else {
            return false;
        };

        let subject_id = self.dictionary.encode(&triple.subject);
        let object_id = self.dictionary.encode(&triple.object);
        self.indices[position].insert(object_id, subject_id);
        self.tracked_triples += 1;
        true
    }

    /// Load a store from a triple file using the default term dialects.
    pub fn load(path: &Path, chain: &[String]) -> Result<Self> {
        Self::load_with_parser(path, chain, parse_term)
    }

    /// Load a store from a triple file with a caller-supplied term parser.
    ///
    /// One triple per line, whitespace-separated, trailing punctuation
    /// stripped. A line with fewer than three fields aborts the whole load
    /// with the 1-based line number; skipping it silently could corrupt the
    /// join result downstream.
    pub fn load_with_parser<F>(path: &Path, chain: &[String], parse: F) -> Result<Self>
    where
        F: for<'a> Fn(&'a str) -> &'a str,
    {
        let file = File::open(path).map_err(|e| Error::io(Stage::Load, e))?;
        let reader = BufReader::new(file);

        let mut store = Self::new(chain);
        for (line_index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::io(Stage::Load, e))?;
            let (subject, property, object) = split_triple_line(&line)
                .ok_or(Error::MalformedRecord { line: line_index as u64 + 1 })?;

            let property = parse(property);
            if let Some(position) = store.chain.iter().position(|name| name == property) {
                let subject_id = store.dictionary.encode(parse(subject));
                let object_id = store.dictionary.encode(parse(&object));
                store.indices[position].insert(object_id, subject_id);
                store.tracked_triples += 1;
            }
        }

        Ok(store)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// The inverted index for the relation at `position` in the chain.
    pub fn index(&self, position: usize) -> &PropertyIndex {
        &self.indices[position]
    }

    /// Number of triples that matched a tracked property during the load.
    pub fn tracked_triples(&self) -> u64 {
        self.tracked_triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_insert_tracks_only_chain_properties() {
        let mut store = TripleStore::new(&chain(&["follows"]));
        assert!(store.insert(&Triple::new("a", "follows", "b")));
        assert!(!store.insert(&Triple::new("a", "dislikes", "b")));
        assert_eq!(store.tracked_triples(), 1);
        // untracked terms are never encoded
        assert_eq!(store.dictionary().len(), 2);
    }

    #[test]
    fn test_duplicate_triples_are_preserved() {
        let mut store = TripleStore::new(&chain(&["follows"]));
        store.insert(&Triple::new("a", "follows", "b"));
        store.insert(&Triple::new("a", "follows", "b"));

        let b = store.dictionary().lookup("b").unwrap();
        assert_eq!(store.index(0).subjects(b).len(), 2);
        assert_eq!(store.index(0).object_count(), 1);
        assert_eq!(store.index(0).entry_count(), 2);
    }

    #[test]
    fn test_subjects_of_unseen_object_is_empty() {
        let store = TripleStore::new(&chain(&["follows"]));
        assert!(store.index(0).subjects(42).is_empty());
    }
}
