//! Parsing of raw triple lines and term dialects

pub mod term_parser;

pub use term_parser::{parse_term, split_triple_line};
