//! Theme file support
//!
//! Loads colors and custom rules from ~/.sclight.toml (or
//! %USERPROFILE%\.sclight.toml on Windows)
//!
//! Example:
//! ```toml
//! # sclight theme
//! [style.keyword]
//! color = "#a81ca6"
//! bold = true
//!
//! [style.comment]
//! color = "grey"
//! italic = false
//!
//! [[custom]]
//! pattern = "TODO"
//! color = "red"
//! ```
//!
//! Entries with unknown style names or malformed values are skipped with a
//! warning; the rest of the theme still applies.

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::Result;
use crate::syntax::{Color, CustomRule, StyleBatch, StyleKind};

/// Overrides for one style category; unset fields keep their value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleOverride {
    pub color: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

/// Theme settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    /// Per-category overrides, in file order
    pub styles: Vec<(StyleKind, StyleOverride)>,
    /// Custom rules, in file order
    pub custom: Vec<CustomRule>,
}

impl Theme {
    /// Get the theme file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".sclight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".sclight.toml"))
        }
    }

    /// Load the theme from the default path, falling back to no overrides
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Theme::default();
        };
        if !path.exists() {
            return Theme::default();
        }
        match Self::load_from(&path) {
            Ok(theme) => theme,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring theme file");
                Theme::default()
            }
        }
    }

    /// Load a theme from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse theme file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut theme = Theme::default();

        if let Some(styles) = table.get("style") {
            match styles.as_table() {
                Some(styles) => theme.parse_styles(styles),
                None => tracing::warn!("`style` is not a table"),
            }
        }

        if let Some(custom) = table.get("custom") {
            match custom.as_array() {
                Some(entries) => theme.parse_custom(entries),
                None => tracing::warn!("`custom` is not an array of tables"),
            }
        }

        Ok(theme)
    }

    fn parse_styles(&mut self, styles: &Table) {
        for (name, value) in styles {
            let Some(kind) = StyleKind::from_name(name) else {
                tracing::warn!(style = %name, "unknown style");
                continue;
            };
            let Some(entry) = value.as_table() else {
                tracing::warn!(style = %name, "style entry is not a table");
                continue;
            };

            let style = StyleOverride {
                color: entry.get("color").and_then(|v| parse_color(name, v)),
                bold: entry.get("bold").and_then(|v| parse_bool(name, "bold", v)),
                italic: entry.get("italic").and_then(|v| parse_bool(name, "italic", v)),
            };
            self.styles.push((kind, style));
        }
    }

    fn parse_custom(&mut self, entries: &[Value]) {
        for (i, entry) in entries.iter().enumerate() {
            let pattern = entry.get("pattern").and_then(Value::as_str);
            let color = entry
                .get("color")
                .and_then(Value::as_str)
                .and_then(|c| Color::parse(c).ok());

            let (Some(pattern), Some(color)) = (pattern, color) else {
                tracing::warn!(entry = i, "custom rule needs a pattern and a valid color");
                continue;
            };

            let comment = entry.get("comment").and_then(Value::as_bool).unwrap_or(false);
            self.custom.push(if comment {
                CustomRule::comment(pattern, color)
            } else {
                CustomRule::new(pattern, color)
            });
        }
    }

    /// Apply this theme to a configuration batch
    pub fn apply(&self, batch: &mut StyleBatch<'_>) {
        for (kind, style) in &self.styles {
            if let Some(color) = style.color {
                batch.set_color(*kind, color);
            }
            if let Some(bold) = style.bold {
                batch.set_bold(*kind, bold);
            }
            if let Some(italic) = style.italic {
                batch.set_italic(*kind, italic);
            }
        }
        for rule in &self.custom {
            batch.add_custom_rule(rule.clone());
        }
    }
}

fn parse_color(style: &str, value: &Value) -> Option<Color> {
    match value.as_str().map(Color::parse) {
        Some(Ok(color)) => Some(color),
        _ => {
            tracing::warn!(style, "invalid color");
            None
        }
    }
}

fn parse_bool(style: &str, field: &str, value: &Value) -> Option<bool> {
    let parsed = value.as_bool();
    if parsed.is_none() {
        tracing::warn!(style, field, "expected true or false");
    }
    parsed
}
