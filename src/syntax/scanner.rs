//! Line scanner
//!
//! Turns one line of text plus the previous line's carry-over state into
//! styled spans and the state for the next line. Scanning is a pure
//! function of its inputs.

use super::rules::{CommentMarkers, LineState, ScanResult};
use super::ruleset::RuleSet;
use super::style::{Span, Style};
use super::tokens::{StyleId, StyleKind};

/// Scan a single line
///
/// Every rule is applied in canonical order, then block comments are
/// located and laid over everything else. Where spans overlap, the one
/// applied last wins.
pub fn scan_line(text: &str, previous: LineState, rules: &RuleSet) -> ScanResult {
    let offsets = CharOffsets::new(text);
    let mut layers = Layers::new(offsets.char_len());

    for rule in rules.rules() {
        for (start, end) in rule.matches(text) {
            layers.push(offsets.to_char(start), offsets.to_char(end), rule.id, rule.style);
        }
    }

    let end_state = match rules.comments() {
        Some(markers) => block_comments(text, previous, markers, &offsets, &mut layers),
        None => previous,
    };

    ScanResult {
        spans: layers.resolve(),
        end_state,
    }
}

/// Locate block comment regions and push them as the topmost layer
fn block_comments(
    text: &str,
    previous: LineState,
    markers: &CommentMarkers,
    offsets: &CharOffsets,
    layers: &mut Layers,
) -> LineState {
    let id = StyleId::Builtin(StyleKind::BlockComment);

    // The end marker may share characters with the start marker: `/*/` closes
    let mut open = if previous.is_in_comment() {
        Some(0)
    } else {
        markers.find_start(text, 0)
    };

    while let Some(start) = open {
        let Some(end) = markers.find_end(text, start) else {
            layers.push(offsets.to_char(start), offsets.char_len(), id, markers.style);
            return LineState::InBlockComment;
        };
        layers.push(offsets.to_char(start), offsets.to_char(end), id, markers.style);

        let resume = if end > start {
            end
        } else {
            match text[start..].chars().next() {
                Some(ch) => start + ch.len_utf8(),
                None => break,
            }
        };
        open = markers.find_start(text, resume);
    }

    LineState::Normal
}

/// Byte to character offset conversion for one line
struct CharOffsets {
    /// Byte offset of every character; `None` for ASCII text
    bounds: Option<Vec<usize>>,
    chars: usize,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                bounds: None,
                chars: text.len(),
            };
        }
        let bounds: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let chars = bounds.len();
        Self {
            bounds: Some(bounds),
            chars,
        }
    }

    fn char_len(&self) -> usize {
        self.chars
    }

    fn to_char(&self, byte: usize) -> usize {
        match &self.bounds {
            None => byte,
            Some(bounds) => match bounds.binary_search(&byte) {
                Ok(i) | Err(i) => i,
            },
        }
    }
}

/// A match before overlap resolution
struct Layer {
    start: usize,
    end: usize,
    id: StyleId,
    style: Style,
}

/// Matches collected lowest precedence first
struct Layers {
    len: usize,
    layers: Vec<Layer>,
}

impl Layers {
    fn new(len: usize) -> Self {
        Self {
            len,
            layers: Vec::new(),
        }
    }

    fn push(&mut self, start: usize, end: usize, id: StyleId, style: Style) {
        let end = end.min(self.len);
        if start < end {
            self.layers.push(Layer { start, end, id, style });
        }
    }

    /// Keep the highest-precedence layer per character and merge runs
    fn resolve(self) -> Vec<Span> {
        let mut owner: Vec<Option<usize>> = vec![None; self.len];
        for (i, layer) in self.layers.iter().enumerate() {
            owner[layer.start..layer.end].fill(Some(i));
        }

        let mut spans: Vec<Span> = Vec::new();
        for (pos, slot) in owner.into_iter().enumerate() {
            let Some(i) = slot else { continue };
            let layer = &self.layers[i];
            match spans.last_mut() {
                Some(last)
                    if last.end() == pos && last.id == layer.id && last.style == layer.style =>
                {
                    last.len += 1;
                }
                _ => spans.push(Span::new(pos, 1, layer.id, layer.style)),
            }
        }
        spans
    }
}
