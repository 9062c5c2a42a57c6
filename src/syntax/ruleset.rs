//! Rule set construction
//!
//! A `RuleSet` is the compiled, ordered rule list for one flavor plus its
//! block comment markers. It is never patched in place: every style or
//! custom-rule change builds a fresh set which replaces the old one.

use super::builtin::{self, Flavor};
use super::rules::{CommentMarkers, Rule, RuleWarning};
use super::style::{Color, Style};
use super::tokens::{StyleId, StyleKind, StyleTable};

/// A user-supplied rule, appended after every built-in rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRule {
    pub pattern: String,
    pub style: Style,
}

impl CustomRule {
    pub fn new(pattern: impl Into<String>, color: Color) -> Self {
        Self {
            pattern: pattern.into(),
            style: Style::fg(color),
        }
    }

    /// A custom rule rendered like a comment (italic)
    pub fn comment(pattern: impl Into<String>, color: Color) -> Self {
        Self {
            pattern: pattern.into(),
            style: Style::fg(color).with_italic(),
        }
    }
}

/// Compiled rules in canonical order
#[derive(Debug)]
pub struct RuleSet {
    flavor: Flavor,
    rules: Vec<Rule>,
    comments: Option<CommentMarkers>,
    warnings: Vec<RuleWarning>,
}

impl RuleSet {
    /// Build the rule list from the current styles and custom rules
    ///
    /// Built-in rules come first in canonical order, custom rules follow
    /// in insertion order. A malformed pattern yields an inert rule and a
    /// warning; it never stops the rest of the set from being built.
    pub fn build(flavor: Flavor, styles: &StyleTable, custom: &[CustomRule]) -> Self {
        let mut rules = Vec::new();
        let mut warnings = Vec::new();

        for def in builtin::rules(flavor) {
            let id = StyleId::Builtin(def.kind);
            let (rule, warning) = Rule::compile(def.pattern, id, styles.get(def.kind));
            rules.push(if def.group_span { rule.with_group_span() } else { rule });
            warnings.extend(warning);
        }

        for (i, custom_rule) in custom.iter().enumerate() {
            let (rule, warning) =
                Rule::compile(&custom_rule.pattern, StyleId::Custom(i), custom_rule.style);
            rules.push(rule);
            warnings.extend(warning);
        }

        let comments = builtin::comment_markers(flavor).and_then(|(start, end)| {
            CommentMarkers::new(start, end, styles.get(StyleKind::BlockComment)).ok()
        });

        Self {
            flavor,
            rules,
            comments,
            warnings,
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Rules in canonical order, lowest precedence first
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn comments(&self) -> Option<&CommentMarkers> {
        self.comments.as_ref()
    }

    /// Problems found while building this set
    pub fn warnings(&self) -> &[RuleWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
