//! Built-in rule tables
//!
//! Each flavor lists its rules in canonical order: when matches overlap,
//! a later rule overwrites an earlier one.

mod code;
mod post;

use crate::syntax::tokens::StyleKind;

/// Which view the highlighter is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    /// Editable code view: the full language rule set with block comments
    #[default]
    Code,
    /// Read-only post (log) view: success, warning and error lines
    Post,
}

/// One built-in rule before compilation
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    pub pattern: &'static str,
    pub kind: StyleKind,
    /// Style the first participating capture group instead of the whole match
    pub group_span: bool,
}

impl BuiltinRule {
    const fn whole(pattern: &'static str, kind: StyleKind) -> Self {
        Self { pattern, kind, group_span: false }
    }

    const fn group(pattern: &'static str, kind: StyleKind) -> Self {
        Self { pattern, kind, group_span: true }
    }
}

/// Start and end patterns of block comments
pub const BLOCK_COMMENT: (&str, &str) = (r"/\*", r"\*/");

/// Built-in rules for a flavor, in canonical order
pub fn rules(flavor: Flavor) -> &'static [BuiltinRule] {
    match flavor {
        Flavor::Code => code::RULES,
        Flavor::Post => post::RULES,
    }
}

/// Block comment markers for a flavor, if it has block comments
pub fn comment_markers(flavor: Flavor) -> Option<(&'static str, &'static str)> {
    match flavor {
        Flavor::Code => Some(BLOCK_COMMENT),
        Flavor::Post => None,
    }
}
