//! # Catena
//!
//! Catena is a batch engine that evaluates a fixed chain join over a
//! dictionary-encoded triple store.
//!
//! The name is the Latin word for "chain": the query shape it evaluates is a
//! path of relations joined subject-to-previous-object (the reference chain
//! being follows, friendOf, likes, hasReview), and everything in the engine
//! is organized around walking that chain: forwards to join it, backwards to
//! reconstruct the witnessing tuples.
//!
//! ## Pipeline
//!
//! raw triples → dictionary + per-property inverted indices → optional
//! semi-join reduction → join (hash or sort-merge) → survivor set →
//! backward reconstruction → decoded output stream.
//!
//! The two join strategies are interchangeable and agree exactly on the
//! survivor set; the semi-join reduction is a pure cost optimization and
//! never changes the result.
//!
//! ## Example
//!
//! ```no_run
//! use catena::{engine, RunConfig, Strategy};
//!
//! fn example() -> catena::Result<()> {
//!     let config = RunConfig {
//!         input_path: "data/100k.txt".into(),
//!         tracked_properties: ["follows", "friendOf", "likes", "hasReview"]
//!             .iter()
//!             .map(|s| s.to_string())
//!             .collect(),
//!         strategy: Strategy::HashJoin,
//!         use_semi_join_reduction: true,
//!         output_path: "output/results.txt".into(),
//!         output_batch_size: None,
//!     };
//!     let report = engine::run(&config)?;
//!     println!("{} rows", report.rows_written);
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

/// Core data structures and types
pub mod core;

/// Run configuration
pub mod config;

/// Pipeline orchestration
pub mod engine;

/// Error types and result definitions
pub mod error;

/// Semi-join reduction, join strategies and result reconstruction
pub mod execution;

/// Dictionary encoding and per-property inverted indices
pub mod indexing;

/// Triple line and term dialect parsing
pub mod parsing;

// Re-export commonly used types
pub use config::RunConfig;
pub use error::{Error, Result, Stage};
pub use execution::Strategy;
pub use indexing::{Dictionary, TripleStore};
