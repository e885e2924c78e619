use std::collections::HashMap;

use crate::core::TermId;
use crate::error::{Error, Result};

/// Bidirectional mapping between textual terms and dense integer ids.
///
/// Ids are issued in strictly increasing order starting at 1 the first time a
/// term is seen. The dictionary is append-only; an id is never reassigned or
/// reused within a run.
#[derive(Debug, Default)]
pub struct Dictionary {
    term_to_id: HashMap<String, TermId>,
    id_to_term: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary { term_to_id: HashMap::new(), id_to_term: Vec::new() }
    }

    /// Return the id for `term`, issuing a fresh one on first sight.
    pub fn encode(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.term_to_id.get(term) {
            id
        } else {
            let id = (self.id_to_term.len() + 1) as TermId;
            self.term_to_id.insert(term.to_string(), id);
            self.id_to_term.push(term.to_string());
            id
        }
    }

    /// Look up the term for an issued id.
    ///
    /// Fails with [`Error::UnknownId`] for ids that were never issued, which
    /// signals an internal inconsistency elsewhere in the pipeline.
    pub fn decode(&self, id: TermId) -> Result<&str> {
        id.checked_sub(1)
            .and_then(|index| self.id_to_term.get(index as usize))
            .map(|term| term.as_str())
            .ok_or(Error::UnknownId { id })
    }

    /// Return the id of an already-encoded term, without issuing one.
    pub fn lookup(&self, term: &str) -> Option<TermId> {
        self.term_to_id.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.id_to_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_starts_at_one_and_grows() {
        let mut dict = Dictionary::new();
        assert_eq!(dict.encode("alpha"), 1);
        assert_eq!(dict.encode("beta"), 2);
        assert_eq!(dict.encode("gamma"), 3);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_encode_is_idempotent() {
        let mut dict = Dictionary::new();
        let first = dict.encode("alpha");
        let second = dict.encode("alpha");
        assert_eq!(first, second);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_decode_unknown_id() {
        let mut dict = Dictionary::new();
        dict.encode("alpha");
        assert!(matches!(dict.decode(0), Err(Error::UnknownId { id: 0 })));
        assert!(matches!(dict.decode(2), Err(Error::UnknownId { id: 2 })));
    }
}
