#![allow(clippy::enum_variant_names)]

//! Grammar AST.
//!
//! The node set is closed: `Expression` is a tagged union over every node kind, and all
//! traversal code matches on it exhaustively without a wildcard arm. Adding a node kind therefore
//! fails to compile until every traversal site handles it.
//!
//! Nodes are allocated in an `oxc_allocator::Allocator` arena. Each child slot exclusively owns
//! its node via `Box<'a, T>`, and ordered children live in `Vec<'a, Expression<'a>>`.
//! The tree is a strict tree: no node is reachable from two slots.

use std::fmt;

use oxc_allocator::{Allocator, Box, Vec};

#[derive(Debug)]
pub enum Expression<'a> {
    Grammar(Box<'a, Grammar<'a>>),
    Rule(Box<'a, Rule<'a>>),
    ChoiceExpr(Box<'a, ChoiceExpr<'a>>),
    SeqExpr(Box<'a, SeqExpr<'a>>),
    ActionExpr(Box<'a, ActionExpr<'a>>),
    LabeledExpr(Box<'a, LabeledExpr<'a>>),
    AndExpr(Box<'a, AndExpr<'a>>),
    NotExpr(Box<'a, NotExpr<'a>>),
    OneOrMoreExpr(Box<'a, OneOrMoreExpr<'a>>),
    ZeroOrMoreExpr(Box<'a, ZeroOrMoreExpr<'a>>),
    ZeroOrOneExpr(Box<'a, ZeroOrOneExpr<'a>>),
    AndCodeExpr(Box<'a, AndCodeExpr<'a>>),
    NotCodeExpr(Box<'a, NotCodeExpr<'a>>),
    StateCodeExpr(Box<'a, StateCodeExpr<'a>>),
    AnyMatcher(Box<'a, AnyMatcher>),
    CharClassMatcher(Box<'a, CharClassMatcher<'a>>),
    LitMatcher(Box<'a, LitMatcher<'a>>),
    RuleRefExpr(Box<'a, RuleRefExpr<'a>>),
}

impl<'a> Expression<'a> {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Self::Grammar(_) => ExpressionKind::Grammar,
            Self::Rule(_) => ExpressionKind::Rule,
            Self::ChoiceExpr(_) => ExpressionKind::ChoiceExpr,
            Self::SeqExpr(_) => ExpressionKind::SeqExpr,
            Self::ActionExpr(_) => ExpressionKind::ActionExpr,
            Self::LabeledExpr(_) => ExpressionKind::LabeledExpr,
            Self::AndExpr(_) => ExpressionKind::AndExpr,
            Self::NotExpr(_) => ExpressionKind::NotExpr,
            Self::OneOrMoreExpr(_) => ExpressionKind::OneOrMoreExpr,
            Self::ZeroOrMoreExpr(_) => ExpressionKind::ZeroOrMoreExpr,
            Self::ZeroOrOneExpr(_) => ExpressionKind::ZeroOrOneExpr,
            Self::AndCodeExpr(_) => ExpressionKind::AndCodeExpr,
            Self::NotCodeExpr(_) => ExpressionKind::NotCodeExpr,
            Self::StateCodeExpr(_) => ExpressionKind::StateCodeExpr,
            Self::AnyMatcher(_) => ExpressionKind::AnyMatcher,
            Self::CharClassMatcher(_) => ExpressionKind::CharClassMatcher,
            Self::LitMatcher(_) => ExpressionKind::LitMatcher,
            Self::RuleRefExpr(_) => ExpressionKind::RuleRefExpr,
        }
    }

    /// Whether this node kind has no structural children.
    pub fn is_leaf(&self) -> bool {
        self.kind().is_leaf()
    }

    pub fn as_rule(&self) -> Option<&Rule<'a>> {
        match self {
            Expression::Rule(rule) => Some(rule),
            _ => None,
        }
    }
}

/// Fieldless mirror of `Expression`'s variants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ExpressionKind {
    Grammar,
    Rule,
    ChoiceExpr,
    SeqExpr,
    ActionExpr,
    LabeledExpr,
    AndExpr,
    NotExpr,
    OneOrMoreExpr,
    ZeroOrMoreExpr,
    ZeroOrOneExpr,
    AndCodeExpr,
    NotCodeExpr,
    StateCodeExpr,
    AnyMatcher,
    CharClassMatcher,
    LitMatcher,
    RuleRefExpr,
}

impl ExpressionKind {
    pub fn is_leaf(self) -> bool {
        match self {
            Self::Grammar
            | Self::Rule
            | Self::ChoiceExpr
            | Self::SeqExpr
            | Self::ActionExpr
            | Self::LabeledExpr
            | Self::AndExpr
            | Self::NotExpr
            | Self::OneOrMoreExpr
            | Self::ZeroOrMoreExpr
            | Self::ZeroOrOneExpr => false,
            Self::AndCodeExpr
            | Self::NotCodeExpr
            | Self::StateCodeExpr
            | Self::AnyMatcher
            | Self::CharClassMatcher
            | Self::LitMatcher
            | Self::RuleRefExpr => true,
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Root container.
///
/// Every element of `rules` must be an `Expression::Rule`. `AstBuilder::grammar` only accepts
/// typed rules, and the walker refuses replacements which would break this.
#[derive(Debug)]
pub struct Grammar<'a> {
    pub init: Option<&'a str>,
    pub rules: Vec<'a, Expression<'a>>,
}

impl<'a> Grammar<'a> {
    pub fn rules(&self) -> impl Iterator<Item = &Rule<'a>> {
        self.rules.iter().filter_map(Expression::as_rule)
    }
}

#[derive(Debug)]
pub struct Rule<'a> {
    pub name: &'a str,
    pub display_name: Option<&'a str>,
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct ChoiceExpr<'a> {
    pub alternatives: Vec<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct SeqExpr<'a> {
    pub exprs: Vec<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ActionExpr<'a> {
    pub expr: Expression<'a>,
    pub code: &'a str,
}

#[derive(Debug)]
pub struct LabeledExpr<'a> {
    pub label: &'a str,
    pub expr: Expression<'a>,
    pub text_capture: bool,
}

#[derive(Debug)]
pub struct AndExpr<'a> {
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct NotExpr<'a> {
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct OneOrMoreExpr<'a> {
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct ZeroOrMoreExpr<'a> {
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct ZeroOrOneExpr<'a> {
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct AndCodeExpr<'a> {
    pub code: &'a str,
}

#[derive(Debug)]
pub struct NotCodeExpr<'a> {
    pub code: &'a str,
}

#[derive(Debug)]
pub struct StateCodeExpr<'a> {
    pub code: &'a str,
}

#[derive(Debug)]
pub struct AnyMatcher;

/// Character class. `val` is the raw source text including brackets, e.g. `[^a-z]`.
#[derive(Debug)]
pub struct CharClassMatcher<'a> {
    pub val: &'a str,
    pub ignore_case: bool,
    pub inverted: bool,
}

#[derive(Debug)]
pub struct LitMatcher<'a> {
    pub val: &'a str,
    pub ignore_case: bool,
}

/// Reference to a rule by name. Names are not resolved here.
#[derive(Debug)]
pub struct RuleRefExpr<'a> {
    pub name: &'a str,
}

/// A child position within a parent node.
///
/// Indexed variants address an element of an ordered child sequence, the others name the single
/// `expr` field of their parent kind. `Root` is the position of a node with no parent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slot {
    Root,
    GrammarRule(usize),
    ChoiceAlternative(usize),
    SeqElement(usize),
    RuleExpr,
    ActionExpr,
    LabeledExpr,
    AndExpr,
    NotExpr,
    OneOrMoreExpr,
    ZeroOrMoreExpr,
    ZeroOrOneExpr,
}

impl Slot {
    pub fn parent_kind(self) -> Option<ExpressionKind> {
        let kind = match self {
            Slot::Root => return None,
            Slot::GrammarRule(_) => ExpressionKind::Grammar,
            Slot::ChoiceAlternative(_) => ExpressionKind::ChoiceExpr,
            Slot::SeqElement(_) => ExpressionKind::SeqExpr,
            Slot::RuleExpr => ExpressionKind::Rule,
            Slot::ActionExpr => ExpressionKind::ActionExpr,
            Slot::LabeledExpr => ExpressionKind::LabeledExpr,
            Slot::AndExpr => ExpressionKind::AndExpr,
            Slot::NotExpr => ExpressionKind::NotExpr,
            Slot::OneOrMoreExpr => ExpressionKind::OneOrMoreExpr,
            Slot::ZeroOrMoreExpr => ExpressionKind::ZeroOrMoreExpr,
            Slot::ZeroOrOneExpr => ExpressionKind::ZeroOrOneExpr,
        };
        Some(kind)
    }

    /// Whether `expr` may occupy this slot.
    pub fn accepts(self, expr: &Expression) -> bool {
        match self {
            Slot::GrammarRule(_) => matches!(expr, Expression::Rule(_)),
            _ => true,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Root => f.write_str("root"),
            Slot::GrammarRule(index) => write!(f, "Grammar.rules[{index}]"),
            Slot::ChoiceAlternative(index) => write!(f, "ChoiceExpr.alternatives[{index}]"),
            Slot::SeqElement(index) => write!(f, "SeqExpr.exprs[{index}]"),
            slot => match slot.parent_kind() {
                Some(kind) => write!(f, "{kind}.expr"),
                None => f.write_str("root"),
            },
        }
    }
}

/// Creates AST nodes in the arena.
#[derive(Clone, Copy)]
pub struct AstBuilder<'a> {
    allocator: &'a Allocator,
}

impl<'a> AstBuilder<'a> {
    pub fn new(allocator: &'a Allocator) -> Self {
        Self { allocator }
    }

    #[inline]
    pub fn alloc<T>(&self, value: T) -> Box<'a, T> {
        Box::new_in(value, self.allocator)
    }

    /// Copy a string into the arena.
    #[inline]
    pub fn str(&self, value: &str) -> &'a str {
        self.allocator.alloc_str(value)
    }

    #[inline]
    pub fn vec<T>(&self) -> Vec<'a, T> {
        Vec::new_in(self.allocator)
    }

    fn vec_from<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<'a, T> {
        let mut vec = self.vec();
        for item in items {
            vec.push(item);
        }
        vec
    }

    pub fn grammar(
        &self,
        init: Option<&'a str>,
        rules: impl IntoIterator<Item = Box<'a, Rule<'a>>>,
    ) -> Expression<'a> {
        let rules = self.vec_from(rules.into_iter().map(Expression::Rule));
        Expression::Grammar(self.alloc(Grammar { init, rules }))
    }

    pub fn rule(&self, name: &'a str, expr: Expression<'a>) -> Box<'a, Rule<'a>> {
        self.alloc(Rule {
            name,
            display_name: None,
            expr,
        })
    }

    pub fn display_rule(
        &self,
        name: &'a str,
        display_name: &'a str,
        expr: Expression<'a>,
    ) -> Box<'a, Rule<'a>> {
        self.alloc(Rule {
            name,
            display_name: Some(display_name),
            expr,
        })
    }

    pub fn choice(&self, alternatives: impl IntoIterator<Item = Expression<'a>>) -> Expression<'a> {
        let alternatives = self.vec_from(alternatives);
        Expression::ChoiceExpr(self.alloc(ChoiceExpr { alternatives }))
    }

    pub fn seq(&self, exprs: impl IntoIterator<Item = Expression<'a>>) -> Expression<'a> {
        let exprs = self.vec_from(exprs);
        Expression::SeqExpr(self.alloc(SeqExpr { exprs }))
    }

    pub fn action(&self, expr: Expression<'a>, code: &'a str) -> Expression<'a> {
        Expression::ActionExpr(self.alloc(ActionExpr { expr, code }))
    }

    pub fn labeled(&self, label: &'a str, expr: Expression<'a>) -> Expression<'a> {
        Expression::LabeledExpr(self.alloc(LabeledExpr {
            label,
            expr,
            text_capture: false,
        }))
    }

    pub fn and(&self, expr: Expression<'a>) -> Expression<'a> {
        Expression::AndExpr(self.alloc(AndExpr { expr }))
    }

    pub fn not(&self, expr: Expression<'a>) -> Expression<'a> {
        Expression::NotExpr(self.alloc(NotExpr { expr }))
    }

    pub fn one_or_more(&self, expr: Expression<'a>) -> Expression<'a> {
        Expression::OneOrMoreExpr(self.alloc(OneOrMoreExpr { expr }))
    }

    pub fn zero_or_more(&self, expr: Expression<'a>) -> Expression<'a> {
        Expression::ZeroOrMoreExpr(self.alloc(ZeroOrMoreExpr { expr }))
    }

    pub fn zero_or_one(&self, expr: Expression<'a>) -> Expression<'a> {
        Expression::ZeroOrOneExpr(self.alloc(ZeroOrOneExpr { expr }))
    }

    pub fn and_code(&self, code: &'a str) -> Expression<'a> {
        Expression::AndCodeExpr(self.alloc(AndCodeExpr { code }))
    }

    pub fn not_code(&self, code: &'a str) -> Expression<'a> {
        Expression::NotCodeExpr(self.alloc(NotCodeExpr { code }))
    }

    pub fn state_code(&self, code: &'a str) -> Expression<'a> {
        Expression::StateCodeExpr(self.alloc(StateCodeExpr { code }))
    }

    pub fn any(&self) -> Expression<'a> {
        Expression::AnyMatcher(self.alloc(AnyMatcher))
    }

    /// `val` is the raw class text, brackets included.
    pub fn char_class(&self, val: &'a str, ignore_case: bool) -> Expression<'a> {
        Expression::CharClassMatcher(self.alloc(CharClassMatcher {
            val,
            ignore_case,
            inverted: val.starts_with("[^"),
        }))
    }

    pub fn lit(&self, val: &'a str, ignore_case: bool) -> Expression<'a> {
        Expression::LitMatcher(self.alloc(LitMatcher { val, ignore_case }))
    }

    pub fn rule_ref(&self, name: &'a str) -> Expression<'a> {
        Expression::RuleRefExpr(self.alloc(RuleRefExpr { name }))
    }
}
