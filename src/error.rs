//! Error types and result definitions

use std::fmt;

use thiserror::Error;

use crate::core::TermId;

/// Result type alias for Catena operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Reduce,
    Join,
    Reconstruct,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => write!(f, "load"),
            Stage::Reduce => write!(f, "reduce"),
            Stage::Join => write!(f, "join"),
            Stage::Reconstruct => write!(f, "reconstruct"),
        }
    }
}

/// Main error type for Catena
#[derive(Error, Debug)]
pub enum Error {
    /// Input unreadable or output unwritable
    #[error("I/O error during {stage}: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    /// A line did not split into at least subject, property and one object token
    #[error("malformed record at line {line}: expected subject, property and object")]
    MalformedRecord { line: u64 },

    /// Configured strategy is not one of the known names
    #[error("unsupported join strategy `{name}` (expected `hash_join` or `sort_merge_join`)")]
    UnsupportedStrategy { name: String },

    /// Decode was called with an id the dictionary never issued
    #[error("dictionary holds no term for id {id}")]
    UnknownId { id: TermId },

    /// Invalid run configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an I/O error with the pipeline stage it interrupted.
    pub fn io(stage: Stage, source: std::io::Error) -> Self {
        Error::Io { stage, source }
    }
}
