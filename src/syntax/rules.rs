//! Pattern rules for syntax highlighting
//!
//! This module defines the rule types used to match source text,
//! the block comment markers, and the per-line carry-over state.

use std::fmt;

use regex::Regex;

use crate::error::HighlightError;

use super::style::{Span, Style};
use super::tokens::StyleId;

/// Which part of a match receives the style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSpan {
    /// The whole match
    Whole,
    /// The first capture group that participated in the match
    FirstGroup,
}

/// A single-line pattern rule
///
/// A rule whose pattern failed to compile keeps its place in the rule
/// list but matches nothing.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Source pattern, kept for diagnostics
    pub source: String,
    /// Compiled pattern; `None` when the source was malformed
    pub pattern: Option<Regex>,
    /// Which style category this rule paints
    pub id: StyleId,
    /// Style captured when the rule set was built
    pub style: Style,
    pub span: MatchSpan,
}

impl Rule {
    /// Compile a rule, reporting a malformed pattern alongside the inert rule
    pub fn compile(source: &str, id: StyleId, style: Style) -> (Self, Option<RuleWarning>) {
        let (pattern, warning) = match Regex::new(source) {
            Ok(regex) => (Some(regex), None),
            Err(err) => (
                None,
                Some(RuleWarning {
                    id,
                    error: HighlightError::InvalidPattern {
                        pattern: source.to_string(),
                        source: err,
                    },
                }),
            ),
        };
        let rule = Self {
            source: source.to_string(),
            pattern,
            id,
            style,
            span: MatchSpan::Whole,
        };
        (rule, warning)
    }

    /// Builder: style the first participating capture group
    pub fn with_group_span(mut self) -> Self {
        self.span = MatchSpan::FirstGroup;
        self
    }

    /// Check whether this rule can match anything
    pub fn is_inert(&self) -> bool {
        self.pattern.is_none()
    }

    /// Byte ranges of every non-overlapping match in `text`
    ///
    /// Each search resumes at the end of the previous match; an empty match
    /// advances by one character.
    pub fn matches(&self, text: &str) -> Vec<(usize, usize)> {
        let Some(regex) = &self.pattern else {
            return Vec::new();
        };
        match self.span {
            MatchSpan::Whole => regex
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .filter(|(start, end)| start < end)
                .collect(),
            MatchSpan::FirstGroup => regex
                .captures_iter(text)
                .filter_map(|caps| {
                    let m = caps.iter().skip(1).flatten().next().or_else(|| caps.get(0))?;
                    (m.start() < m.end()).then(|| (m.start(), m.end()))
                })
                .collect(),
        }
    }
}

/// A recoverable problem found while building a rule set
#[derive(Debug)]
pub struct RuleWarning {
    /// Style of the rule that became inert
    pub id: StyleId,
    pub error: HighlightError,
}

impl fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {:?} disabled: {}", self.id, self.error)
    }
}

/// Start and end patterns of block comments
#[derive(Debug, Clone)]
pub struct CommentMarkers {
    pub start: Regex,
    pub end: Regex,
    /// Style captured when the rule set was built
    pub style: Style,
}

impl CommentMarkers {
    pub fn new(start: &str, end: &str, style: Style) -> Result<Self, regex::Error> {
        Ok(Self {
            start: Regex::new(start)?,
            end: Regex::new(end)?,
            style,
        })
    }

    /// Find the start of the next start marker at or after byte `from`
    pub fn find_start(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() {
            return None;
        }
        self.start.find_at(text, from).map(|m| m.start())
    }

    /// Find the end of the next end marker at or after byte `from`
    pub fn find_end(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() {
            return None;
        }
        self.end.find_at(text, from).map(|m| m.end())
    }
}

/// Carry-over state between consecutive lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineState {
    /// Line starts outside any block comment
    #[default]
    Normal,
    /// Line starts inside an open block comment
    InBlockComment,
}

impl LineState {
    /// Convert from the integer a host stores per line
    ///
    /// Only `1` means "inside a block comment"; anything else, including a
    /// host's "never computed" value, is normal.
    pub fn from_raw(raw: i32) -> Self {
        if raw == 1 {
            LineState::InBlockComment
        } else {
            LineState::Normal
        }
    }

    /// Convert to the integer a host stores per line
    pub fn to_raw(self) -> i32 {
        match self {
            LineState::Normal => 0,
            LineState::InBlockComment => 1,
        }
    }

    pub fn is_in_comment(self) -> bool {
        self == LineState::InBlockComment
    }
}

/// Result of scanning a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Sorted, non-overlapping spans for the line
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub end_state: LineState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::StyleKind;

    fn number() -> StyleId {
        StyleId::Builtin(StyleKind::Number)
    }

    #[test]
    fn test_rule_matches() {
        let (rule, warning) = Rule::compile(r"\d+", number(), Style::default());
        assert!(warning.is_none());
        assert_eq!(rule.source, r"\d+");
        assert_eq!(rule.matches("abc 123 def 45"), vec![(4, 7), (12, 14)]);
        assert!(rule.matches("no numbers").is_empty());
    }

    #[test]
    fn test_malformed_rule_is_inert() {
        let (rule, warning) = Rule::compile(r"(unclosed", StyleId::Custom(0), Style::default());
        assert!(rule.is_inert());
        assert_eq!(rule.source, "(unclosed");
        assert!(rule.matches("(unclosed").is_empty());

        let warning = warning.expect("malformed pattern should warn");
        assert_eq!(warning.id, StyleId::Custom(0));
        assert!(matches!(warning.error, HighlightError::InvalidPattern { .. }));
        assert!(warning.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_empty_matches_are_skipped() {
        let (rule, _) = Rule::compile(r"x*", number(), Style::default());
        // Terminates and only reports non-empty matches
        assert_eq!(rule.matches("axxbx"), vec![(1, 3), (4, 5)]);
    }

    #[test]
    fn test_group_span() {
        let (rule, _) =
            Rule::compile(r"(\.[a-z]\w*)|\b([a-z]\w*)\s*[({]", number(), Style::default());
        let rule = rule.with_group_span();
        assert_eq!(rule.matches("foo(1).bar"), vec![(0, 3), (6, 10)]);
        assert_eq!(rule.matches("loop {"), vec![(0, 4)]);
    }

    #[test]
    fn test_comment_markers() {
        let markers = CommentMarkers::new(r"/\*", r"\*/", Style::default()).unwrap();
        assert_eq!(markers.find_start("a /* b */", 0), Some(2));
        assert_eq!(markers.find_start("a /* b */", 3), None);
        assert_eq!(markers.find_end("a /* b */", 4), Some(9));
        assert_eq!(markers.find_end("a /* b", 4), None);
        assert_eq!(markers.find_end("", 0), None);
        assert_eq!(markers.find_start("abc", 10), None);
    }

    #[test]
    fn test_line_state_raw() {
        assert_eq!(LineState::from_raw(1), LineState::InBlockComment);
        assert_eq!(LineState::from_raw(0), LineState::Normal);
        assert_eq!(LineState::from_raw(-1), LineState::Normal);
        assert_eq!(LineState::InBlockComment.to_raw(), 1);
        assert_eq!(LineState::Normal.to_raw(), 0);
        assert!(LineState::InBlockComment.is_in_comment());
        assert!(!LineState::default().is_in_comment());
    }
}
