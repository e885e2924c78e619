//! Semi-join reduction, the join strategies and result reconstruction

pub mod join;
pub mod reconstruct;
pub mod semijoin;

pub use join::{execute, Strategy};
pub use reconstruct::{write_results, ResultTuples, DEFAULT_OUTPUT_BATCH_SIZE};
pub use semijoin::{ChainView, RelationSize};
