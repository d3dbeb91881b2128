//! Depth-first walker with in-place replacement.
//!
//! `walk` visits nodes in pre-order. Each visit is handed a `BackRef` for the slot which owns the
//! node, so a visitor can swap the node out of its parent without knowing what the parent is.
//! The continuation returned from `Visitor::visit` decides whether, and with which visitor,
//! the node's children are walked.

use tracing::{debug, trace, warn};

use crate::{
    ast::{Expression, Slot},
    error::WalkError,
};

#[allow(unused_variables)]
pub trait Visitor<'a> {
    /// Visit `expr`, which occupies `back_ref.slot()` in its parent.
    ///
    /// Returns the visitor to walk `expr`'s children with. That is usually `self`, but may be
    /// any visitor borrowed from `self`. Returning `None` skips the children.
    ///
    /// `expr` may be mutated directly. Changes made to its child slots are seen by the walk,
    /// as children are read only after this returns.
    fn visit(
        &mut self,
        expr: &mut Expression<'a>,
        back_ref: &mut BackRef<'a>,
    ) -> Option<&mut dyn Visitor<'a>>;

    /// Called on the visitor returned by `visit`, after all of `expr`'s children are walked.
    fn leave(&mut self, expr: &Expression<'a>) {}
}

/// Write capability for the slot holding the node currently being visited.
///
/// A replacement is installed into the parent when `visit` returns, before the walker reads the
/// slot again. The walk then continues into the children of the replacement. The replacement
/// itself is not visited.
pub struct BackRef<'a> {
    slot: Slot,
    replacement: Option<Expression<'a>>,
}

impl<'a> BackRef<'a> {
    fn new(slot: Slot) -> Self {
        Self {
            slot,
            replacement: None,
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// A root node has no parent slot, so replacing it is a no-op.
    pub fn is_root(&self) -> bool {
        self.slot == Slot::Root
    }

    /// Replace the visited node with `expr`.
    ///
    /// Only one replacement per visit is meaningful. If called again, the last write wins.
    /// A `Grammar.rules` slot only accepts `Expression::Rule`. Anything else aborts the walk
    /// with `WalkError::InvalidReplacement`.
    pub fn replace(&mut self, expr: Expression<'a>) {
        if let Some(discarded) = self.replacement.replace(expr) {
            debug!(slot = %self.slot, discarded = %discarded.kind(), "replacement overwritten");
        }
    }

    pub fn is_replaced(&self) -> bool {
        self.replacement.is_some()
    }

    fn apply(self, target: &mut Expression<'a>) -> Result<(), WalkError> {
        let Some(replacement) = self.replacement else {
            return Ok(());
        };
        let slot = self.slot;
        if slot == Slot::Root {
            warn!(kind = %replacement.kind(), "ignoring replacement of root node");
            return Ok(());
        }
        if !slot.accepts(&replacement) {
            return Err(WalkError::InvalidReplacement {
                slot,
                found: replacement.kind(),
            });
        }

        debug!(%slot, from = %target.kind(), to = %replacement.kind(), "node replaced");
        *target = replacement;
        Ok(())
    }
}

/// Walk the tree under `root` in depth-first pre-order.
///
/// `root` itself cannot be replaced: its back-reference ignores writes.
/// Returns an error, with the walk abandoned at that point, if a visitor requests an invalid
/// replacement.
pub fn walk<'a, V: Visitor<'a>>(
    visitor: &mut V,
    root: &mut Expression<'a>,
) -> Result<(), WalkError> {
    walk_slot(visitor, root, Slot::Root)
}

fn walk_slot<'a>(
    visitor: &mut dyn Visitor<'a>,
    expr: &mut Expression<'a>,
    slot: Slot,
) -> Result<(), WalkError> {
    trace!(kind = %expr.kind(), %slot, "visit");

    let mut back_ref = BackRef::new(slot);
    let next = visitor.visit(expr, &mut back_ref);
    // Applied even if children are skipped
    back_ref.apply(expr)?;

    let Some(visitor) = next else {
        return Ok(());
    };
    walk_children(visitor, expr)?;
    visitor.leave(expr);
    Ok(())
}

fn walk_children<'a>(
    visitor: &mut dyn Visitor<'a>,
    expr: &mut Expression<'a>,
) -> Result<(), WalkError> {
    match expr {
        Expression::Grammar(grammar) => {
            for (index, rule) in grammar.rules.iter_mut().enumerate() {
                walk_slot(visitor, rule, Slot::GrammarRule(index))?;
            }
        }
        Expression::Rule(rule) => walk_slot(visitor, &mut rule.expr, Slot::RuleExpr)?,
        Expression::ChoiceExpr(choice) => {
            for (index, alternative) in choice.alternatives.iter_mut().enumerate() {
                walk_slot(visitor, alternative, Slot::ChoiceAlternative(index))?;
            }
        }
        Expression::SeqExpr(seq) => {
            for (index, expr) in seq.exprs.iter_mut().enumerate() {
                walk_slot(visitor, expr, Slot::SeqElement(index))?;
            }
        }
        Expression::ActionExpr(action) => {
            walk_slot(visitor, &mut action.expr, Slot::ActionExpr)?;
        }
        Expression::LabeledExpr(labeled) => {
            walk_slot(visitor, &mut labeled.expr, Slot::LabeledExpr)?;
        }
        Expression::AndExpr(and) => walk_slot(visitor, &mut and.expr, Slot::AndExpr)?,
        Expression::NotExpr(not) => walk_slot(visitor, &mut not.expr, Slot::NotExpr)?,
        Expression::OneOrMoreExpr(repeat) => {
            walk_slot(visitor, &mut repeat.expr, Slot::OneOrMoreExpr)?;
        }
        Expression::ZeroOrMoreExpr(repeat) => {
            walk_slot(visitor, &mut repeat.expr, Slot::ZeroOrMoreExpr)?;
        }
        Expression::ZeroOrOneExpr(optional) => {
            walk_slot(visitor, &mut optional.expr, Slot::ZeroOrOneExpr)?;
        }
        Expression::AndCodeExpr(_)
        | Expression::NotCodeExpr(_)
        | Expression::StateCodeExpr(_)
        | Expression::AnyMatcher(_)
        | Expression::CharClassMatcher(_)
        | Expression::LitMatcher(_)
        | Expression::RuleRefExpr(_) => {}
    }
    Ok(())
}
