//! Transcript line parsing.
//!
//! [`grammar`] holds the record grammar used by both the sender catalog and
//! the message extractor, so the two passes can never disagree about what a
//! record is.

pub mod grammar;

pub use grammar::{
    Grammar, LegacyMatcher, TIMESTAMPED_PATTERN, classify_line, is_record,
};
