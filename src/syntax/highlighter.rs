//! Per-buffer highlighter
//!
//! A `Highlighter` is attached to one host document. It owns the style
//! configuration and custom rules, keeps the compiled `RuleSet` in sync
//! with them, and drives the line scanner over the host's lines.

use crate::config::Theme;
use crate::error::{HighlightError, Result};

use super::builtin::Flavor;
use super::document::LineHost;
use super::rules::{LineState, ScanResult};
use super::ruleset::{CustomRule, RuleSet};
use super::scanner;
use super::style::{Color, Style};
use super::tokens::{StyleId, StyleKind, StyleTable};

/// A batch of configuration changes, applied with one rebuild
pub struct StyleBatch<'a> {
    styles: &'a mut StyleTable,
    custom: &'a mut Vec<CustomRule>,
    added: Vec<usize>,
}

impl StyleBatch<'_> {
    pub fn set_style(&mut self, kind: StyleKind, style: Style) {
        self.styles.set(kind, style);
    }

    pub fn set_color(&mut self, kind: StyleKind, color: Color) {
        self.styles.get_mut(kind).fg = color;
    }

    pub fn set_bold(&mut self, kind: StyleKind, bold: bool) {
        self.styles.get_mut(kind).bold = bold;
    }

    pub fn set_italic(&mut self, kind: StyleKind, italic: bool) {
        self.styles.get_mut(kind).italic = italic;
    }

    /// Append a custom rule; it takes precedence over every earlier rule
    pub fn add_custom_rule(&mut self, rule: CustomRule) {
        self.added.push(self.custom.len());
        self.custom.push(rule);
    }

    pub fn clear_custom_rules(&mut self) {
        self.custom.clear();
        self.added.clear();
    }
}

/// Syntax highlighter attached to a host document
pub struct Highlighter<H: LineHost> {
    host: H,
    styles: StyleTable,
    custom: Vec<CustomRule>,
    rules: RuleSet,
}

impl<H: LineHost> Highlighter<H> {
    /// Attach a highlighter to a document and highlight it
    pub fn new(host: H, flavor: Flavor) -> Self {
        let styles = StyleTable::new();
        let rules = RuleSet::build(flavor, &styles, &[]);
        let mut highlighter = Self {
            host,
            styles,
            custom: Vec::new(),
            rules,
        };
        for warning in highlighter.rules.warnings() {
            highlighter.host.warn(warning);
        }
        highlighter.rehighlight();
        highlighter
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the document
    ///
    /// Call `line_changed` (or `rehighlight`) after editing lines.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Detach the highlighter, returning the document
    pub fn into_host(self) -> H {
        self.host
    }

    pub fn flavor(&self) -> Flavor {
        self.rules.flavor()
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn custom_rules(&self) -> &[CustomRule] {
        &self.custom
    }

    /// The current compiled rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Scan one line against the current rules
    pub fn scan_line(&self, text: &str, previous: LineState) -> ScanResult {
        scanner::scan_line(text, previous, &self.rules)
    }

    /// Rescan every line of the document in order
    pub fn rehighlight(&mut self) {
        let count = self.host.line_count();
        for line in 0..count {
            if let Some(state) = self.highlight_line(line) {
                self.host.set_line_state(line, state);
            }
        }
        tracing::debug!(lines = count, "rehighlighted document");
    }

    /// Rescan after a single line changed
    ///
    /// Returns the number of lines scanned.
    pub fn line_changed(&mut self, line: usize) -> usize {
        self.lines_changed(line, 1)
    }

    /// Rescan after `count` lines starting at `first` changed
    ///
    /// The changed lines are always rescanned. Scanning then continues
    /// only while a line's new end state differs from the one stored for
    /// it, since that is the only way a change reaches the next line.
    /// Returns the number of lines scanned.
    pub fn lines_changed(&mut self, first: usize, count: usize) -> usize {
        self.rescan(first, count, None)
    }

    /// Rescan after `count` lines were inserted at `at`
    ///
    /// Inserted lines have no meaningful stored state, so the last one is
    /// compared with the state that used to flow into the line after it.
    pub fn lines_inserted(&mut self, at: usize, count: usize) -> usize {
        let fed = if at == 0 {
            LineState::Normal
        } else {
            self.host.line_state(at - 1)
        };
        self.rescan(at, count, Some(fed))
    }

    /// Rescan after lines were removed; `at` is the line now following them
    pub fn lines_removed(&mut self, at: usize) -> usize {
        self.rescan(at, 1, None)
    }

    fn rescan(&mut self, first: usize, count: usize, fed: Option<LineState>) -> usize {
        let total = self.host.line_count();
        let end = first.saturating_add(count);
        let mut line = first;
        let mut scanned = 0;

        while line < total {
            let stored = match fed {
                Some(fed) if line + 1 == end => fed,
                _ => self.host.line_state(line),
            };
            let Some(state) = self.highlight_line(line) else {
                break;
            };
            self.host.set_line_state(line, state);
            scanned += 1;
            line += 1;

            if line >= end && state == stored {
                break;
            }
        }

        tracing::debug!(first, scanned, "incremental rehighlight");
        scanned
    }

    /// Scan one host line and paint it; returns its end state
    fn highlight_line(&mut self, line: usize) -> Option<LineState> {
        let previous = if line == 0 {
            LineState::Normal
        } else {
            self.host.line_state(line - 1)
        };
        let result = scanner::scan_line(self.host.line_text(line)?, previous, &self.rules);
        self.host.apply_spans(line, result.spans);
        Some(result.end_state)
    }

    /// Apply several configuration changes with one rebuild and rescan
    pub fn configure<F>(&mut self, f: F)
    where
        F: FnOnce(&mut StyleBatch<'_>),
    {
        let mut batch = StyleBatch {
            styles: &mut self.styles,
            custom: &mut self.custom,
            added: Vec::new(),
        };
        f(&mut batch);
        let added = batch.added;

        self.rules = RuleSet::build(self.rules.flavor(), &self.styles, &self.custom);
        for warning in self.rules.warnings() {
            if matches!(warning.id, StyleId::Custom(i) if added.contains(&i)) {
                self.host.warn(warning);
            }
        }
        self.rehighlight();
    }

    /// Apply a theme's overrides and custom rules as one batch
    pub fn apply_theme(&mut self, theme: &Theme) {
        self.configure(|b| theme.apply(b));
    }

    pub fn set_style(&mut self, kind: StyleKind, style: Style) {
        self.configure(|b| b.set_style(kind, style));
    }

    pub fn set_color(&mut self, kind: StyleKind, color: Color) {
        self.configure(|b| b.set_color(kind, color));
    }

    pub fn set_bold(&mut self, kind: StyleKind, bold: bool) {
        self.configure(|b| b.set_bold(kind, bold));
    }

    pub fn set_italic(&mut self, kind: StyleKind, italic: bool) {
        self.configure(|b| b.set_italic(kind, italic));
    }

    pub fn set_keyword_color(&mut self, color: Color) {
        self.set_color(StyleKind::Keyword, color);
    }

    pub fn set_builtin_color(&mut self, color: Color) {
        self.set_color(StyleKind::Builtin, color);
    }

    pub fn set_number_color(&mut self, color: Color) {
        self.set_color(StyleKind::Number, color);
    }

    pub fn set_envvar_color(&mut self, color: Color) {
        self.set_color(StyleKind::EnvVar, color);
    }

    /// Recolor symbols and key labels together
    pub fn set_symbol_color(&mut self, color: Color) {
        self.configure(|b| {
            b.set_color(StyleKind::Symbol, color);
            b.set_color(StyleKind::Key, color);
        });
    }

    pub fn set_key_color(&mut self, color: Color) {
        self.set_color(StyleKind::Key, color);
    }

    pub fn set_method_color(&mut self, color: Color) {
        self.set_color(StyleKind::Function, color);
    }

    pub fn set_class_color(&mut self, color: Color) {
        self.set_color(StyleKind::Class, color);
    }

    pub fn set_punctuation_color(&mut self, color: Color) {
        self.set_color(StyleKind::Punctuation, color);
    }

    pub fn set_string_color(&mut self, color: Color) {
        self.set_color(StyleKind::String, color);
    }

    /// Recolor single-line and block comments together
    pub fn set_comment_color(&mut self, color: Color) {
        self.configure(|b| {
            b.set_color(StyleKind::Comment, color);
            b.set_color(StyleKind::BlockComment, color);
        });
    }

    pub fn set_success_color(&mut self, color: Color) {
        self.set_color(StyleKind::Success, color);
    }

    pub fn set_warning_color(&mut self, color: Color) {
        self.set_color(StyleKind::Warning, color);
    }

    pub fn set_error_color(&mut self, color: Color) {
        self.set_color(StyleKind::Error, color);
    }

    /// Add a custom rule painting `pattern` in `color`
    ///
    /// A malformed pattern is kept as a rule that matches nothing and is
    /// reported through `LineHost::warn`.
    pub fn add_custom_rule(&mut self, pattern: &str, color: Color) {
        self.configure(|b| b.add_custom_rule(CustomRule::new(pattern, color)));
    }

    /// Add a custom rule rendered like a comment
    pub fn add_custom_comment_rule(&mut self, pattern: &str, color: Color) {
        self.configure(|b| b.add_custom_rule(CustomRule::comment(pattern, color)));
    }

    pub fn clear_custom_rules(&mut self) {
        self.configure(|b| b.clear_custom_rules());
    }

    /// Set a property by its widget name from untyped arguments
    ///
    /// Unknown names, missing arguments and malformed colors are rejected
    /// before anything changes; the error is returned for the host to
    /// ignore or report.
    pub fn set_property(&mut self, name: &str, args: &[&str]) -> Result<()> {
        let outcome = self.try_set_property(name, args);
        if let Err(err) = &outcome {
            tracing::debug!(property = name, %err, "property rejected");
        }
        outcome
    }

    fn try_set_property(&mut self, name: &str, args: &[&str]) -> Result<()> {
        let arg = |i: usize| {
            args.get(i)
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .ok_or_else(|| HighlightError::MissingArgument(name.to_string()))
        };

        match name {
            "clearUserColors" => self.clear_custom_rules(),
            "userColor" | "userCommentColor" => {
                let pattern = arg(0)?;
                let color = Color::parse(arg(1)?)?;
                if name == "userColor" {
                    self.add_custom_rule(pattern, color);
                } else {
                    self.add_custom_comment_rule(pattern, color);
                }
            }
            _ => {
                let kinds = color_property(name)
                    .ok_or_else(|| HighlightError::UnknownProperty(name.to_string()))?;
                let color = Color::parse(arg(0)?)?;
                self.configure(|b| {
                    for kind in kinds {
                        b.set_color(*kind, color);
                    }
                });
            }
        }
        Ok(())
    }
}

/// Categories recolored by each color property
fn color_property(name: &str) -> Option<&'static [StyleKind]> {
    let kinds: &'static [StyleKind] = match name {
        "keywordColor" => &[StyleKind::Keyword],
        "builtinColor" => &[StyleKind::Builtin],
        "numberColor" => &[StyleKind::Number],
        "envvarColor" => &[StyleKind::EnvVar],
        "symbolColor" => &[StyleKind::Symbol, StyleKind::Key],
        "keyColor" => &[StyleKind::Key],
        "methodColor" => &[StyleKind::Function],
        "classColor" => &[StyleKind::Class],
        "punctuationColor" => &[StyleKind::Punctuation],
        "stringColor" => &[StyleKind::String],
        "commentColor" => &[StyleKind::Comment, StyleKind::BlockComment],
        "successColor" => &[StyleKind::Success],
        "warningColor" => &[StyleKind::Warning],
        "errorColor" => &[StyleKind::Error],
        _ => return None,
    };
    Some(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::document::LineDocument;
    use crate::syntax::rules::RuleWarning;
    use crate::syntax::style::Span;

    /// Host that records what the highlighter did to it
    #[derive(Default)]
    struct RecordingHost {
        doc: LineDocument,
        painted: Vec<usize>,
        warnings: Vec<String>,
    }

    impl RecordingHost {
        fn new(text: &str) -> Self {
            Self {
                doc: LineDocument::from_text(text),
                ..Default::default()
            }
        }
    }

    impl LineHost for RecordingHost {
        fn line_count(&self) -> usize {
            self.doc.line_count()
        }

        fn line_text(&self, line: usize) -> Option<&str> {
            self.doc.line_text(line)
        }

        fn line_state(&self, line: usize) -> LineState {
            self.doc.line_state(line)
        }

        fn set_line_state(&mut self, line: usize, state: LineState) {
            self.doc.set_line_state(line, state);
        }

        fn apply_spans(&mut self, line: usize, spans: Vec<Span>) {
            self.painted.push(line);
            self.doc.apply_spans(line, spans);
        }

        fn warn(&mut self, warning: &RuleWarning) {
            self.warnings.push(warning.to_string());
        }
    }

    fn code(text: &str) -> Highlighter<RecordingHost> {
        Highlighter::new(RecordingHost::new(text), Flavor::Code)
    }

    fn span_at(h: &Highlighter<RecordingHost>, line: usize, pos: usize) -> Option<Span> {
        h.host().doc.spans(line).iter().find(|s| s.contains(pos)).copied()
    }

    #[test]
    fn test_attach_highlights_document() {
        let h = code("/* a\nb\nc */ x\ny");
        assert_eq!(h.host().painted, vec![0, 1, 2, 3]);
        assert_eq!(h.host().line_state(0), LineState::InBlockComment);
        assert_eq!(h.host().line_state(1), LineState::InBlockComment);
        assert_eq!(h.host().line_state(2), LineState::Normal);
        assert_eq!(h.host().line_state(3), LineState::Normal);
    }

    #[test]
    fn test_color_change_rescans_everything() {
        let mut h = code("1\n2\n3");
        h.host_mut().painted.clear();

        h.set_number_color(Color::Red);
        assert_eq!(h.host().painted, vec![0, 1, 2]);
        assert_eq!(span_at(&h, 2, 0).unwrap().style.fg, Color::Red);
    }

    #[test]
    fn test_configure_batches_into_one_pass() {
        let mut h = code("1 \"s\"");
        h.host_mut().painted.clear();

        h.configure(|b| {
            b.set_color(StyleKind::Number, Color::Red);
            b.set_color(StyleKind::String, Color::Blue);
            b.set_bold(StyleKind::String, true);
        });
        assert_eq!(h.host().painted, vec![0]);
        assert_eq!(span_at(&h, 0, 0).unwrap().style.fg, Color::Red);
        let string = span_at(&h, 0, 2).unwrap().style;
        assert_eq!(string.fg, Color::Blue);
        assert!(string.bold);
    }

    #[test]
    fn test_comment_and_symbol_setters_cover_pairs() {
        let mut h = code("");
        h.set_comment_color(Color::Green);
        assert_eq!(h.styles().get(StyleKind::Comment).fg, Color::Green);
        assert_eq!(h.styles().get(StyleKind::BlockComment).fg, Color::Green);

        h.set_symbol_color(Color::Cyan);
        assert_eq!(h.styles().get(StyleKind::Symbol).fg, Color::Cyan);
        assert_eq!(h.styles().get(StyleKind::Key).fg, Color::Cyan);

        h.set_key_color(Color::Red);
        assert_eq!(h.styles().get(StyleKind::Key).fg, Color::Red);
        assert_eq!(h.styles().get(StyleKind::Symbol).fg, Color::Cyan);
    }

    #[test]
    fn test_custom_rules() {
        let mut h = code("TODO fix this");
        h.add_custom_rule("TODO", Color::Red);

        let todo = span_at(&h, 0, 0).unwrap();
        assert_eq!((todo.start, todo.len), (0, 4));
        assert_eq!(todo.id, StyleId::Custom(0));
        assert_eq!(todo.style.fg, Color::Red);

        h.clear_custom_rules();
        assert!(h.custom_rules().is_empty());
        assert_eq!(span_at(&h, 0, 0).unwrap().id, StyleId::Builtin(StyleKind::Class));
    }

    #[test]
    fn test_malformed_custom_rule_warns_once() {
        let mut h = code("a(b");
        h.add_custom_rule("(", Color::Red);
        assert_eq!(h.custom_rules().len(), 1);
        assert_eq!(h.host().warnings.len(), 1);

        // Later rebuilds do not repeat the warning
        h.set_number_color(Color::Blue);
        assert_eq!(h.host().warnings.len(), 1);
        // Highlighting still works for everything else
        assert_eq!(span_at(&h, 0, 0).unwrap().id, StyleId::Builtin(StyleKind::Function));
    }

    #[test]
    fn test_line_changed_stops_when_state_settles() {
        let mut h = code("a\nb\nc\nd");
        h.host_mut().painted.clear();

        h.host_mut().doc.set_line_text(1, "b = 2");
        assert_eq!(h.line_changed(1), 1);
        assert_eq!(h.host().painted, vec![1]);
    }

    #[test]
    fn test_line_changed_propagates_comment() {
        let mut h = code("a\nb\nc */ d\ne");
        h.host_mut().painted.clear();

        h.host_mut().doc.set_line_text(0, "a /*");
        // Line 0 opens, 1 stays inside, 2 closes with its state unchanged
        assert_eq!(h.line_changed(0), 3);
        assert_eq!(h.host().line_state(1), LineState::InBlockComment);
        assert_eq!(h.host().line_state(2), LineState::Normal);
        assert_eq!(span_at(&h, 1, 0).unwrap().id, StyleId::Builtin(StyleKind::BlockComment));

        h.host_mut().doc.set_line_text(0, "a");
        h.line_changed(0);
        assert_eq!(h.host().line_state(1), LineState::Normal);
        assert_ne!(
            span_at(&h, 1, 0).map(|s| s.id),
            Some(StyleId::Builtin(StyleKind::BlockComment))
        );
    }

    #[test]
    fn test_lines_inserted() {
        let mut h = code("x\ny");
        h.host_mut().doc.insert_line(1, "/*");
        h.host_mut().doc.insert_line(2, "inside");
        h.host_mut().painted.clear();

        assert_eq!(h.lines_inserted(1, 2), 3);
        assert_eq!(h.host().painted, vec![1, 2, 3]);
        assert_eq!(h.host().line_state(3), LineState::InBlockComment);
    }

    #[test]
    fn test_inserted_line_matching_default_state() {
        let mut h = code("/* a\nb()\nc");
        h.host_mut().doc.insert_line(1, "*/");
        h.host_mut().painted.clear();

        // The new line ends Normal like a fresh line, but it changes what follows
        h.lines_inserted(1, 1);
        assert_eq!(h.host().painted, vec![1, 2, 3]);
        assert_eq!(span_at(&h, 2, 0).unwrap().id, StyleId::Builtin(StyleKind::Function));
        assert_eq!(h.host().line_state(3), LineState::Normal);
    }

    #[test]
    fn test_lines_removed() {
        let mut h = code("/*\na\n*/ b\nc");
        h.host_mut().doc.remove_line(0);
        h.host_mut().painted.clear();

        assert_eq!(h.lines_removed(0), 2);
        assert_eq!(h.host().line_state(0), LineState::Normal);
        assert!(h.host().doc.spans(0).is_empty());
        assert_eq!(span_at(&h, 1, 0).unwrap().id, StyleId::Builtin(StyleKind::Punctuation));
    }

    #[test]
    fn test_line_changed_out_of_range() {
        let mut h = code("a");
        assert_eq!(h.line_changed(5), 0);
    }

    #[test]
    fn test_set_property() {
        let mut h = code("var");
        h.set_property("keywordColor", &["#ff0000"]).unwrap();
        assert_eq!(h.styles().get(StyleKind::Keyword).fg, Color::Rgb(255, 0, 0));

        h.set_property("commentColor", &["blue"]).unwrap();
        assert_eq!(h.styles().get(StyleKind::BlockComment).fg, Color::Blue);

        h.set_property("userColor", &["va", "green"]).unwrap();
        h.set_property("userCommentColor", &["r", "green"]).unwrap();
        assert_eq!(h.custom_rules().len(), 2);
        assert!(h.custom_rules()[1].style.italic);

        h.set_property("clearUserColors", &[]).unwrap();
        assert!(h.custom_rules().is_empty());
    }

    #[test]
    fn test_set_property_rejects_bad_input() {
        let mut h = code("var");
        let before = h.styles().clone();

        assert!(matches!(
            h.set_property("keywordColor", &[]),
            Err(HighlightError::MissingArgument(_))
        ));
        assert!(matches!(
            h.set_property("keywordColor", &["not-a-color"]),
            Err(HighlightError::InvalidColor(_))
        ));
        assert!(matches!(
            h.set_property("userColor", &["TODO"]),
            Err(HighlightError::MissingArgument(_))
        ));
        assert!(matches!(
            h.set_property("userColor", &["", "red"]),
            Err(HighlightError::MissingArgument(_))
        ));
        assert!(matches!(
            h.set_property("fontSize", &["12"]),
            Err(HighlightError::UnknownProperty(_))
        ));

        assert_eq!(h.styles(), &before);
        assert!(h.custom_rules().is_empty());
    }

    #[test]
    fn test_apply_theme() {
        let theme = Theme::parse(concat!(
            "[style.number]\ncolor = \"red\"\nbold = true\n\n",
            "[[custom]]\npattern = \"TODO\"\ncolor = \"blue\"\n",
        ))
        .unwrap();
        let mut h = code("TODO 1");
        h.host_mut().painted.clear();

        h.apply_theme(&theme);
        assert_eq!(h.host().painted, vec![0]);
        let number = span_at(&h, 0, 5).unwrap().style;
        assert_eq!(number.fg, Color::Red);
        assert!(number.bold);
        assert_eq!(span_at(&h, 0, 0).unwrap().id, StyleId::Custom(0));
    }

    #[test]
    fn test_post_flavor() {
        let mut h = Highlighter::new(RecordingHost::new("-> 5\nWARNING: x\nplain"), Flavor::Post);
        assert_eq!(span_at(&h, 0, 0).unwrap().id, StyleId::Builtin(StyleKind::Success));
        assert_eq!(span_at(&h, 1, 0).unwrap().id, StyleId::Builtin(StyleKind::Warning));
        assert!(h.host().doc.spans(2).is_empty());

        h.add_custom_rule("plain", Color::Magenta);
        assert_eq!(h.flavor(), Flavor::Post);
        assert_eq!(span_at(&h, 2, 0).unwrap().style.fg, Color::Magenta);

        let host = h.into_host();
        assert_eq!(host.doc.line_count(), 3);
    }
}
