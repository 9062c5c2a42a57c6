//! Style categories for syntax highlighting
//!
//! This module defines the semantic categories that rules assign to
//! text, their default visual styles, and the mutable table mapping
//! each category to its current style.

use super::style::{Color, Style};

/// Built-in style categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// Language keywords (var, arg, this)
    Keyword,
    /// Builtin and global identifiers (nil, true, thisProcess, ...)
    Builtin,
    /// Environment variable references (~name)
    EnvVar,
    /// Key-style labels (name:)
    Key,
    /// Function and method calls
    Function,
    /// Class-style (capitalized) identifiers
    Class,
    /// Punctuation and operator characters
    Punctuation,
    /// Numeric literals and named constants
    Number,
    /// Double-quoted string literals
    String,
    /// Symbol literals ('sym' or \sym)
    Symbol,
    /// Single-line comments
    Comment,
    /// Block comments
    BlockComment,
    /// Successful result lines in the post view
    Success,
    /// Warning lines in the post view
    Warning,
    /// Error lines in the post view
    Error,
}

impl StyleKind {
    /// Every built-in category, in declaration order
    pub const ALL: [StyleKind; 15] = [
        StyleKind::Keyword,
        StyleKind::Builtin,
        StyleKind::EnvVar,
        StyleKind::Key,
        StyleKind::Function,
        StyleKind::Class,
        StyleKind::Punctuation,
        StyleKind::Number,
        StyleKind::String,
        StyleKind::Symbol,
        StyleKind::Comment,
        StyleKind::BlockComment,
        StyleKind::Success,
        StyleKind::Warning,
        StyleKind::Error,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            StyleKind::Keyword => Style::fg(Color::Rgb(168, 28, 166)).with_bold(),
            StyleKind::Builtin => Style::fg(Color::Rgb(168, 28, 166)),
            StyleKind::EnvVar => Style::fg(Color::Rgb(230, 85, 68)),
            StyleKind::Key => Style::fg(Color::Rgb(0, 131, 190)),
            StyleKind::Function => Style::fg(Color::Rgb(60, 116, 246)),
            StyleKind::Class => Style::fg(Color::Rgb(194, 133, 0)),
            StyleKind::Punctuation => Style::fg(Color::Rgb(90, 108, 126)),
            StyleKind::Number => Style::fg(Color::Rgb(156, 109, 0)),
            StyleKind::String => Style::fg(Color::Rgb(77, 162, 75)),
            StyleKind::Symbol => Style::fg(Color::Rgb(0, 131, 190)),
            StyleKind::Comment => Style::fg(Color::Rgb(160, 161, 167)).with_italic(),
            StyleKind::BlockComment => Style::fg(Color::Rgb(160, 161, 167)).with_italic(),
            StyleKind::Success => Style::fg(Color::Rgb(77, 162, 75)),
            StyleKind::Warning => Style::fg(Color::Rgb(194, 133, 0)),
            StyleKind::Error => Style::fg(Color::Rgb(230, 85, 68)),
        }
    }

    /// Get the configuration name for this category
    pub fn name(&self) -> &'static str {
        match self {
            StyleKind::Keyword => "keyword",
            StyleKind::Builtin => "builtin",
            StyleKind::EnvVar => "envvar",
            StyleKind::Key => "key",
            StyleKind::Function => "method",
            StyleKind::Class => "class",
            StyleKind::Punctuation => "punctuation",
            StyleKind::Number => "number",
            StyleKind::String => "string",
            StyleKind::Symbol => "symbol",
            StyleKind::Comment => "comment",
            StyleKind::BlockComment => "block-comment",
            StyleKind::Success => "success",
            StyleKind::Warning => "warning",
            StyleKind::Error => "error",
        }
    }

    /// Parse a category from its configuration name (for theme loading)
    pub fn from_name(name: &str) -> Option<Self> {
        StyleKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Identity of the style a span was painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleId {
    /// One of the built-in categories
    Builtin(StyleKind),
    /// The n-th user-supplied custom rule
    Custom(usize),
}

/// Current style of every built-in category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    styles: [Style; StyleKind::ALL.len()],
}

impl StyleTable {
    pub fn new() -> Self {
        Self {
            styles: StyleKind::ALL.map(|kind| kind.default_style()),
        }
    }

    pub fn get(&self, kind: StyleKind) -> Style {
        self.styles[kind as usize]
    }

    pub fn set(&mut self, kind: StyleKind, style: Style) {
        self.styles[kind as usize] = style;
    }

    /// Mutable access to one category's style
    pub fn get_mut(&mut self, kind: StyleKind) -> &mut Style {
        &mut self.styles[kind as usize]
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}
