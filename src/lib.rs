//! sclight - incremental syntax highlighting for code and post views
//!
//! A rule-ordered regex tokenizer that assigns styles to spans of a line,
//! carries block comment state from one line to the next, and rebuilds its
//! rules whenever a style or custom rule changes.

pub mod config;
pub mod error;
pub mod syntax;

pub use error::{HighlightError, Result};
