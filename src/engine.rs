//! Pipeline orchestration: load, reduce, join, reconstruct.

use std::collections::HashSet;
use std::fs::File;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::RunConfig;
use crate::core::TermId;
use crate::error::{Error, Result, Stage};
use crate::execution::{self, ChainView, RelationSize, Strategy, DEFAULT_OUTPUT_BATCH_SIZE};
use crate::indexing::TripleStore;

/// Summary of one completed run.
#[derive(Debug)]
pub struct RunReport {
    pub strategy: Strategy,
    pub reduced: bool,
    pub tracked_triples: u64,
    pub distinct_terms: usize,
    pub relation_sizes: Vec<RelationSize>,
    pub survivor_count: usize,
    pub rows_written: u64,
    pub load_time: Duration,
    pub reduce_time: Duration,
    pub join_time: Duration,
    pub reconstruct_time: Duration,
}

/// Survivor counts for every strategy and reduction combination against one
/// loaded store, plus whether they all agreed.
#[derive(Debug)]
pub struct CompareReport {
    pub runs: Vec<(Strategy, bool, usize)>,
    pub agreement: bool,
}

/// Execute the whole batch pipeline for `config`.
///
/// The reconstruction always walks the unreduced indices; the reduction only
/// shrinks what the join itself touches.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    config.validate()?;

    let start = Instant::now();
    let store = TripleStore::load(&config.input_path, &config.tracked_properties)?;
    let load_time = start.elapsed();
    info!(
        triples = store.tracked_triples(),
        terms = store.dictionary().len(),
        elapsed_ms = load_time.as_millis() as u64,
        "load finished"
    );

    let start = Instant::now();
    let view = ChainView::build(&store, config.use_semi_join_reduction);
    let reduce_time = start.elapsed();
    let relation_sizes = view.relation_sizes(store.chain());
    for size in &relation_sizes {
        info!(relation = %size.relation, keys = size.keys, entries = size.entries, "chain view");
    }

    let start = Instant::now();
    let survivors = execution::execute(config.strategy, &view);
    let join_time = start.elapsed();
    info!(
        strategy = %config.strategy,
        reduced = view.is_reduced(),
        survivors = survivors.len(),
        elapsed_ms = join_time.as_millis() as u64,
        "join finished"
    );
    drop(view);

    let start = Instant::now();
    let rows_written = reconstruct_to_file(config, &store, &survivors)?;
    let reconstruct_time = start.elapsed();
    info!(
        rows = rows_written,
        output = %config.output_path.display(),
        elapsed_ms = reconstruct_time.as_millis() as u64,
        "reconstruct finished"
    );

    Ok(RunReport {
        strategy: config.strategy,
        reduced: config.use_semi_join_reduction,
        tracked_triples: store.tracked_triples(),
        distinct_terms: store.dictionary().len(),
        relation_sizes,
        survivor_count: survivors.len(),
        rows_written,
        load_time,
        reduce_time,
        join_time,
        reconstruct_time,
    })
}

fn reconstruct_to_file(
    config: &RunConfig,
    store: &TripleStore,
    survivors: &HashSet<TermId>,
) -> Result<u64> {
    let sink =
        File::create(&config.output_path).map_err(|e| Error::io(Stage::Reconstruct, e))?;
    let batch_size = config.output_batch_size.unwrap_or(DEFAULT_OUTPUT_BATCH_SIZE);
    execution::write_results(store, survivors, sink, batch_size)
}

/// Load once, then run every strategy with and without reduction and check
/// that all four survivor sets are identical. Output is written only for the
/// configured combination.
pub fn compare(config: &RunConfig) -> Result<CompareReport> {
    config.validate()?;

    let store = TripleStore::load(&config.input_path, &config.tracked_properties)?;
    let reduced_view = ChainView::build(&store, true);
    let unreduced_view = ChainView::build(&store, false);

    let mut runs = Vec::new();
    let mut reference: Option<HashSet<TermId>> = None;
    let mut agreement = true;

    for strategy in [Strategy::HashJoin, Strategy::SortMergeJoin] {
        for (view, reduced) in [(&reduced_view, true), (&unreduced_view, false)] {
            let survivors = execution::execute(strategy, view);
            info!(strategy = %strategy, reduced, survivors = survivors.len(), "compare run");
            runs.push((strategy, reduced, survivors.len()));

            if strategy == config.strategy && reduced == config.use_semi_join_reduction {
                reconstruct_to_file(config, &store, &survivors)?;
            }

            match &reference {
                None => reference = Some(survivors),
                Some(expected) => {
                    if &survivors != expected {
                        agreement = false;
                    }
                }
            }
        }
    }

    Ok(CompareReport { runs, agreement })
}
