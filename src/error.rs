// ABOUTME: Error types for podcast feed extraction.
// ABOUTME: Provides ParseError for input-contract violations; field failures never surface here.

use std::fmt;
use thiserror::Error;

/// Errors that abort extraction outright.
///
/// Missing tags, missing attributes, and coercion failures are not errors:
/// they collapse to `None` on the affected field. The only hard failures are
/// inputs the engine cannot produce a record from at all.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input was empty or whitespace-only.
    #[error("feed input is empty")]
    Empty,

    /// The tokenizer failed before recovering a single element.
    #[error("failed to parse feed: {0}")]
    Parse(String),
}

impl ParseError {
    /// Creates a Parse error from an underlying tokenizer error.
    pub fn parse(err: impl fmt::Display) -> Self {
        ParseError::Parse(err.to_string())
    }
}
