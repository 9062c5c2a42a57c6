//! Error types for sclight

use thiserror::Error;

/// Result type alias for sclight operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
///
/// None of these abort highlighting. Pattern errors are turned into inert
/// rules, configuration errors leave the previous configuration in place.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Missing argument for {0}")]
    MissingArgument(String),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Theme parse error: {0}")]
    Theme(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}
