use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{ast::Expression, inspect::inspect};

/// Names referenced by a `RuleRefExpr` but never defined by a `Rule`, in order of first use.
///
/// Each name is reported once. This is a finding for the caller to act on, not a fault.
pub fn undefined_rule_refs<'a>(root: &mut Expression<'a>) -> Vec<&'a str> {
    let mut defined = FxHashSet::default();
    let mut referenced = vec![];
    inspect(root, |expr| {
        match expr {
            Expression::Rule(rule) => {
                defined.insert(rule.name);
            }
            Expression::RuleRefExpr(rule_ref) => referenced.push(rule_ref.name),
            _ => {}
        }
        true
    });
    debug!(rules = defined.len(), refs = referenced.len(), "collected rule names");

    let mut reported = FxHashSet::default();
    referenced
        .into_iter()
        .filter(|name| !defined.contains(name) && reported.insert(*name))
        .collect()
}
