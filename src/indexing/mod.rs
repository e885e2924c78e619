//! Dictionary encoding and per-property inverted indices

pub mod dictionary;
pub mod property_index;

pub use dictionary::Dictionary;
pub use property_index::{PropertyIndex, TripleStore};
