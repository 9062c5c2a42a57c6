//! Syntax highlighting engine
//!
//! This module provides rule-ordered regex highlighting:
//! - Rule sets built from style configuration and custom rules
//! - A pure per-line scanner with block comment carry-over
//! - A per-buffer highlighter driving the scanner over a host document

mod style;
mod tokens;
mod rules;
mod ruleset;
mod scanner;
mod document;
mod highlighter;
mod builtin;

pub use style::{Color, Span, Style};
pub use tokens::{StyleId, StyleKind, StyleTable};
pub use rules::{CommentMarkers, LineState, MatchSpan, Rule, RuleWarning, ScanResult};
pub use ruleset::{CustomRule, RuleSet};
pub use scanner::scan_line;
pub use document::{LineDocument, LineHost};
pub use highlighter::{Highlighter, StyleBatch};
pub use builtin::Flavor;
