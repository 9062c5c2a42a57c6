//! Post view rules (interpreter output)

use super::BuiltinRule;
use crate::syntax::tokens::StyleKind;

pub(super) const RULES: &[BuiltinRule] = &[
    BuiltinRule::whole(r"^->\s.*$", StyleKind::Success),
    BuiltinRule::whole(r"^WARNING:\s.*$", StyleKind::Warning),
    BuiltinRule::whole(r"^ERROR:\s.*$", StyleKind::Error),
];
