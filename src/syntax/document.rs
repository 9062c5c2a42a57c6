//! Host document abstraction
//!
//! The highlighter never owns text. It reads lines and per-line state
//! from a `LineHost` and hands styled spans back to it.

use super::rules::{LineState, RuleWarning};
use super::style::Span;

/// The text buffer a highlighter is attached to
pub trait LineHost {
    /// Number of lines in the document
    fn line_count(&self) -> usize;

    /// Text of a line, without its terminator
    fn line_text(&self, line: usize) -> Option<&str>;

    /// Stored carry-over state at the end of a line
    fn line_state(&self, line: usize) -> LineState;

    fn set_line_state(&mut self, line: usize, state: LineState);

    /// Replace the spans painted on a line
    fn apply_spans(&mut self, line: usize, spans: Vec<Span>);

    /// Report a recoverable problem, such as a malformed custom pattern
    fn warn(&mut self, warning: &RuleWarning) {
        tracing::warn!(%warning, "highlighting rule problem");
    }
}

/// One line of an in-memory document
#[derive(Debug, Clone, Default)]
struct DocLine {
    text: String,
    state: LineState,
    spans: Vec<Span>,
}

/// In-memory document holding text, line states and painted spans
#[derive(Debug, Clone, Default)]
pub struct LineDocument {
    lines: Vec<DocLine>,
}

impl LineDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from text, one line per `\n`
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| DocLine {
                text: line.to_string(),
                ..Default::default()
            })
            .collect();
        Self { lines }
    }

    /// Insert a line before `at` (or at the end when `at` is past it)
    pub fn insert_line(&mut self, at: usize, text: &str) {
        let at = at.min(self.lines.len());
        self.lines.insert(
            at,
            DocLine {
                text: text.to_string(),
                ..Default::default()
            },
        );
    }

    /// Remove a line, returning its text
    pub fn remove_line(&mut self, at: usize) -> Option<String> {
        (at < self.lines.len()).then(|| self.lines.remove(at).text)
    }

    /// Replace the text of a line; returns false if the line doesn't exist
    pub fn set_line_text(&mut self, at: usize, text: &str) -> bool {
        match self.lines.get_mut(at) {
            Some(line) => {
                line.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Spans last painted on a line
    pub fn spans(&self, line: usize) -> &[Span] {
        self.lines.get(line).map(|l| l.spans.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LineHost for LineDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|l| l.text.as_str())
    }

    fn line_state(&self, line: usize) -> LineState {
        self.lines.get(line).map(|l| l.state).unwrap_or_default()
    }

    fn set_line_state(&mut self, line: usize, state: LineState) {
        if let Some(l) = self.lines.get_mut(line) {
            l.state = state;
        }
    }

    fn apply_spans(&mut self, line: usize, spans: Vec<Span>) {
        if let Some(l) = self.lines.get_mut(line) {
            l.spans = spans;
        }
    }
}
