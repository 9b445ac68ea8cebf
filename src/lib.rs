// ABOUTME: Core podcast RSS extraction library.
// ABOUTME: Turns RSS 2.0 / iTunes feed text into typed Podcast and Entry records.

pub mod document;
pub mod error;
pub mod item;
pub mod models;
pub mod parser;
pub mod time_parse;

pub use document::{split, Element, SplitDocument};
pub use error::ParseError;
pub use item::extract_entry;
pub use models::{Entry, Podcast};
pub use parser::parse_podcast;
pub use time_parse::{normalize_pub_date, parse_calendar_date, parse_timestamp};
