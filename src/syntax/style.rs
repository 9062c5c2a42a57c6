//! Style types for highlighted text
//!
//! This module provides the visual side of highlighting: colors,
//! weight/slant attributes and the styled spans handed to the host.

use crate::error::{HighlightError, Result};

use super::tokens::StyleId;

/// Foreground colors: the ANSI 16-color palette plus 24-bit RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from `#rrggbb`, `#rgb`, `rgb(r, g, b)` or an ANSI name
    ///
    /// Names are case-insensitive and accept `-`, `_` or nothing between
    /// words (`bright-red`, `bright_red`, `brightred`). `grey` is an alias
    /// of `bright-black`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || HighlightError::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(inner) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let parts: Vec<_> = inner.split(',').map(|p| p.trim().parse::<u8>()).collect();
            return match parts.as_slice() {
                [Ok(r), Ok(g), Ok(b)] => Ok(Color::Rgb(*r, *g, *b)),
                _ => Err(invalid()),
            };
        }

        let name: String = lower.chars().filter(|c| *c != '-' && *c != '_').collect();
        let color = match name.as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "brightblack" | "grey" | "gray" => Color::BrightBlack,
            "brightred" => Color::BrightRed,
            "brightgreen" => Color::BrightGreen,
            "brightyellow" => Color::BrightYellow,
            "brightblue" => Color::BrightBlue,
            "brightmagenta" => Color::BrightMagenta,
            "brightcyan" => Color::BrightCyan,
            "brightwhite" => Color::BrightWhite,
            _ => return Err(invalid()),
        };
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #abc expands to #aabbcc
        3 => {
            let mut digits = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
        }
        _ => None,
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold weight
    pub bold: bool,
    /// Italic slant
    pub italic: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled span of text within a line
///
/// Offsets are in characters, local to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Character offset where this span starts
    pub start: usize,
    /// Length in characters
    pub len: usize,
    /// Which style category produced this span
    pub id: StyleId,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, len: usize, id: StyleId, style: Style) -> Self {
        Self { start, len, id, style }
    }

    /// Character offset one past the end of this span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Check if this span contains a character position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
