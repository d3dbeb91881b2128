use oxc_allocator::Allocator;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use peg_ast_walk::{
    parser, semantic::undefined_rule_refs, walk, AstBuilder, BackRef, Expression, Printer,
    Visitor, WalkError,
};

fn main() -> Result<(), WalkError> {
    init_logging();

    let alloc = Allocator::default();
    let mut grammar = parser::parse(&alloc);
    println!("before:\n{}", Printer::print(&grammar));

    for name in undefined_rule_refs(&mut grammar) {
        warn!(rule = name, "reference to undefined rule");
    }

    optimize(&mut grammar, AstBuilder::new(&alloc))?;
    println!("after:\n{}", Printer::print(&grammar));
    Ok(())
}

/// Initialize logging. `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,peg_ast_walk=debug"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn optimize<'a>(grammar: &mut Expression<'a>, ast: AstBuilder<'a>) -> Result<(), WalkError> {
    // Each walk collapses one level of nesting
    loop {
        let mut collapse = CollapseSingletons::default();
        walk(&mut collapse, grammar)?;
        if collapse.collapsed == 0 {
            break;
        }
        info!(count = collapse.collapsed, "collapsed single-element groups");
    }

    let mut literals = LiteralToCharClass { ast, rewritten: 0 };
    walk(&mut literals, grammar)?;
    info!(count = literals.rewritten, "rewrote single-character literals");
    Ok(())
}

/// Transformer for `(a)` to `a`, where the group is a choice or sequence of one element.
#[derive(Default)]
struct CollapseSingletons {
    collapsed: usize,
}

impl<'a> Visitor<'a> for CollapseSingletons {
    fn visit(
        &mut self,
        expr: &mut Expression<'a>,
        back_ref: &mut BackRef<'a>,
    ) -> Option<&mut dyn Visitor<'a>> {
        if back_ref.is_root() {
            return Some(self);
        }

        let only = match expr {
            Expression::ChoiceExpr(choice) if choice.alternatives.len() == 1 => {
                choice.alternatives.pop()
            }
            Expression::SeqExpr(seq) if seq.exprs.len() == 1 => seq.exprs.pop(),
            _ => None,
        };
        if let Some(only) = only {
            back_ref.replace(only);
            self.collapsed += 1;
        }
        Some(self)
    }
}

/// Transformer for `"x"` to `[x]`.
struct LiteralToCharClass<'a> {
    ast: AstBuilder<'a>,
    rewritten: usize,
}

impl<'a> Visitor<'a> for LiteralToCharClass<'a> {
    fn visit(
        &mut self,
        expr: &mut Expression<'a>,
        back_ref: &mut BackRef<'a>,
    ) -> Option<&mut dyn Visitor<'a>> {
        let Expression::LitMatcher(lit) = expr else {
            return Some(self);
        };
        if back_ref.is_root() {
            return None;
        }

        let mut chars = lit.val.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let class = match c {
                ']' | '\\' | '^' | '-' => format!("[\\{c}]"),
                c => format!("[{c}]"),
            };
            back_ref.replace(self.ast.char_class(self.ast.str(&class), lit.ignore_case));
            self.rewritten += 1;
        }
        None
    }
}
