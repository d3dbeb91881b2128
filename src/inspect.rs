use crate::{
    ast::Expression,
    walk::{walk, BackRef, Visitor},
};

/// Adapts a predicate into a visitor which never replaces anything.
struct Inspector<F>(F);

impl<'a, F> Visitor<'a> for Inspector<F>
where
    F: FnMut(&Expression<'a>) -> bool,
{
    fn visit(
        &mut self,
        expr: &mut Expression<'a>,
        _back_ref: &mut BackRef<'a>,
    ) -> Option<&mut dyn Visitor<'a>> {
        if (self.0)(&*expr) {
            Some(self)
        } else {
            None
        }
    }
}

/// Read-only pre-order traversal.
///
/// Calls `f` for each node under `root`, starting with `root`. If `f` returns `false`,
/// the node's children are skipped.
pub fn inspect<'a, F>(root: &mut Expression<'a>, f: F)
where
    F: FnMut(&Expression<'a>) -> bool,
{
    if let Err(err) = walk(&mut Inspector(f), root) {
        unreachable!("inspector requested a replacement: {err}");
    }
}

#[cfg(test)]
mod tests {
    use oxc_allocator::Allocator;

    use super::*;
    use crate::{
        ast::{AstBuilder, ExpressionKind},
        walk::tests::label,
    };

    fn fixture<'a>(ast: AstBuilder<'a>) -> Expression<'a> {
        ast.grammar(
            None,
            [
                ast.rule(
                    "Start",
                    ast.choice([
                        ast.seq([ast.lit("a", false), ast.rule_ref("Tail")]),
                        ast.not(ast.any()),
                    ]),
                ),
                ast.rule(
                    "Tail",
                    ast.action(ast.zero_or_more(ast.char_class("[0-9]", false)), "return"),
                ),
            ],
        )
    }

    struct Recorder<'s> {
        seen: &'s mut Vec<String>,
        skip: ExpressionKind,
    }

    impl<'a> Visitor<'a> for Recorder<'_> {
        fn visit(
            &mut self,
            expr: &mut Expression<'a>,
            _back_ref: &mut BackRef<'a>,
        ) -> Option<&mut dyn Visitor<'a>> {
            self.seen.push(label(expr));
            if expr.kind() == self.skip {
                None
            } else {
                Some(self)
            }
        }
    }

    #[test]
    fn matches_equivalent_walk() {
        let alloc = Allocator::default();
        let ast = AstBuilder::new(&alloc);
        let mut root = fixture(ast);

        for skip in [ExpressionKind::SeqExpr, ExpressionKind::Rule, ExpressionKind::Grammar] {
            let mut inspected = vec![];
            inspect(&mut root, |expr| {
                inspected.push(label(expr));
                expr.kind() != skip
            });

            let mut walked = vec![];
            walk(&mut Recorder { seen: &mut walked, skip }, &mut root).unwrap();
            assert_eq!(inspected, walked);
        }
    }

    #[test]
    fn prunes_subtree() {
        let alloc = Allocator::default();
        let ast = AstBuilder::new(&alloc);
        let mut root = fixture(ast);

        let mut seen = vec![];
        inspect(&mut root, |expr| {
            seen.push(label(expr));
            expr.kind() != ExpressionKind::ChoiceExpr
        });
        assert_eq!(
            seen,
            [
                "Grammar",
                "Rule Start",
                "ChoiceExpr",
                "Rule Tail",
                "ActionExpr",
                "ZeroOrMoreExpr",
                "CharClassMatcher [0-9]",
            ]
        );
    }

    #[test]
    fn repeated_inspection_is_stable() {
        let alloc = Allocator::default();
        let ast = AstBuilder::new(&alloc);
        let mut root = fixture(ast);

        let mut first = vec![];
        inspect(&mut root, |expr| {
            first.push(label(expr));
            true
        });
        let mut second = vec![];
        inspect(&mut root, |expr| {
            second.push(label(expr));
            true
        });
        assert_eq!(first.len(), 12);
        assert_eq!(first, second);
    }
}
