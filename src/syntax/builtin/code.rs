//! Code view rules (SuperCollider language)

use super::BuiltinRule;
use crate::syntax::tokens::StyleKind;

/// Canonical order, lowest precedence first
pub(super) const RULES: &[BuiltinRule] = &[
    BuiltinRule::whole(r"\b(?:var|arg|this)\b", StyleKind::Keyword),
    BuiltinRule::whole(
        concat!(
            r"\b(?:nil|true|inf|false|currentEnvironment|topEnvironment",
            r"|thisProcess|thisThread|thisFunction|thisMethod|thisCuelist)\b",
        ),
        StyleKind::Builtin,
    ),
    BuiltinRule::whole(r"~\w+", StyleKind::EnvVar),
    BuiltinRule::whole(r"\w+:", StyleKind::Key),
    // `.name` keeps its dot; `name(` / `name {` styles only the name
    BuiltinRule::group(r"(\.[a-z]\w*)|\b([a-z]\w*)\s*[({]", StyleKind::Function),
    BuiltinRule::whole(r"\b[A-Z]\w*\b", StyleKind::Class),
    BuiltinRule::whole(r"[<>&{}()\[\].,;:!=+\-*/%|]", StyleKind::Punctuation),
    // A leading minus counts only at line start or after whitespace
    BuiltinRule::whole(r"(?:\b|(?:\s|^)-)(?:\d+(?:\.\d+)?|pi)\b", StyleKind::Number),
    BuiltinRule::whole(r#""(?:[^"\\]|\\.)*""#, StyleKind::String),
    BuiltinRule::whole(r"'.*'|\\\w+\b", StyleKind::Symbol),
    BuiltinRule::whole(r"//.*", StyleKind::Comment),
];
