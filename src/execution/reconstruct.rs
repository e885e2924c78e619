//! Backward reconstruction of full result tuples from the survivor set.
//!
//! The survivor set is far smaller than the indices it came from, so the
//! walk starts there and expands backwards through the *unreduced* property
//! indices, one nested level at a time. Nothing is materialized globally;
//! peak memory is bounded by the fan-out at a single surviving node.

use std::collections::HashSet;
use std::io::Write;

use crate::core::TermId;
use crate::error::{Error, Result, Stage};
use crate::indexing::TripleStore;

/// Rows buffered between output flushes when no batch size is configured.
pub const DEFAULT_OUTPUT_BATCH_SIZE: usize = 8192;

/// Lazy, finite, forward-only iterator over complete witnessing id paths.
///
/// Each yielded path is ordered leftmost-subject first:
/// `[R1.subject, R1.object, R2.object, .., Rn.object]`. Restart by building
/// a fresh iterator from the same survivor set.
pub struct ResultTuples<'a> {
    store: &'a TripleStore,
    relations: usize,
    survivors: Vec<TermId>,
    next_survivor: usize,
    /// One frame per expansion depth; frame `d` (1-based) enumerates the
    /// subjects of the relation at chain position `relations - d`.
    frames: Vec<Frame<'a>>,
    /// `path[0]` is the surviving terminal object, `path[d]` the id chosen
    /// at depth `d`.
    path: Vec<TermId>,
}

struct Frame<'a> {
    candidates: &'a [TermId],
    cursor: usize,
}

impl<'a> ResultTuples<'a> {
    pub fn new(store: &'a TripleStore, survivors: &HashSet<TermId>) -> Self {
        ResultTuples {
            store,
            relations: store.chain().len(),
            survivors: survivors.iter().copied().collect(),
            next_survivor: 0,
            frames: Vec::new(),
            path: Vec::new(),
        }
    }
}

impl Iterator for ResultTuples<'_> {
    type Item = Vec<TermId>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.frames.is_empty() {
                let object = *self.survivors.get(self.next_survivor)?;
                self.next_survivor += 1;

                self.path.clear();
                self.path.push(object);
                self.frames.push(Frame {
                    candidates: self.store.index(self.relations - 1).subjects(object),
                    cursor: 0,
                });
                continue;
            }

            let depth = self.frames.len();
            let Some(frame) = self.frames.last_mut() else {
                continue;
            };

            if frame.cursor >= frame.candidates.len() {
                self.frames.pop();
                continue;
            }

            let id = frame.candidates[frame.cursor];
            frame.cursor += 1;

            self.path.truncate(depth);
            self.path.push(id);

            if depth == self.relations {
                // Complete chain: reverse into output order.
                let mut tuple = self.path.clone();
                tuple.reverse();
                return Some(tuple);
            }

            // Descend one relation further left. An id that never occurs as
            // an object there has an empty expansion, not an error.
            self.frames.push(Frame {
                candidates: self.store.index(self.relations - 1 - depth).subjects(id),
                cursor: 0,
            });
        }
    }
}

/// Decode every surviving chain and stream it to `sink`, one line per tuple,
/// fields space-separated in chain order. The writer flushes every
/// `batch_size` rows to cap buffered output. Returns the row count.
pub fn write_results<W: Write>(
    store: &TripleStore,
    survivors: &HashSet<TermId>,
    sink: W,
    batch_size: usize,
) -> Result<u64> {
    let batch_size = batch_size.max(1);
    let mut writer = std::io::BufWriter::new(sink);
    let mut line = String::new();
    let mut pending = 0usize;
    let mut rows = 0u64;

    for tuple in ResultTuples::new(store, survivors) {
        line.clear();
        for (field, id) in tuple.iter().enumerate() {
            if field > 0 {
                line.push(' ');
            }
            line.push_str(store.dictionary().decode(*id)?);
        }
        line.push('\n');
        writer.write_all(line.as_bytes()).map_err(|e| Error::io(Stage::Reconstruct, e))?;

        rows += 1;
        pending += 1;
        if pending >= batch_size {
            writer.flush().map_err(|e| Error::io(Stage::Reconstruct, e))?;
            pending = 0;
        }
    }

    writer.flush().map_err(|e| Error::io(Stage::Reconstruct, e))?;
    Ok(rows)
}
