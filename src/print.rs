//! Render a grammar AST back to PEG source text.

use crate::ast::Expression;

/// Binding strength, loosest first. A child printed where a tighter level is expected is wrapped
/// in parentheses.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Choice,
    Action,
    Seq,
    Prefix,
    Suffix,
    Primary,
}

fn level(expr: &Expression) -> Level {
    match expr {
        Expression::Grammar(_) | Expression::Rule(_) => Level::Choice,
        // A single-element group prints as its element
        Expression::ChoiceExpr(choice) if choice.alternatives.len() > 1 => Level::Choice,
        Expression::ChoiceExpr(choice) => choice.alternatives.first().map_or(Level::Primary, level),
        Expression::ActionExpr(_) => Level::Action,
        Expression::SeqExpr(seq) if seq.exprs.len() > 1 => Level::Seq,
        Expression::SeqExpr(seq) => seq.exprs.first().map_or(Level::Primary, level),
        Expression::LabeledExpr(_) | Expression::AndExpr(_) | Expression::NotExpr(_) => {
            Level::Prefix
        }
        Expression::OneOrMoreExpr(_)
        | Expression::ZeroOrMoreExpr(_)
        | Expression::ZeroOrOneExpr(_) => Level::Suffix,
        Expression::AndCodeExpr(_)
        | Expression::NotCodeExpr(_)
        | Expression::StateCodeExpr(_)
        | Expression::AnyMatcher(_)
        | Expression::CharClassMatcher(_)
        | Expression::LitMatcher(_)
        | Expression::RuleRefExpr(_) => Level::Primary,
    }
}

pub struct Printer {
    out: String,
}

impl Printer {
    pub fn print(expr: &Expression) -> String {
        let mut printer = Self { out: String::new() };
        printer.print_expr(expr, Level::Choice);
        printer.out
    }

    fn print_expr(&mut self, expr: &Expression, min: Level) {
        if level(expr) < min {
            self.out.push('(');
            self.print_node(expr);
            self.out.push(')');
        } else {
            self.print_node(expr);
        }
    }

    fn print_list(&mut self, exprs: &[Expression], separator: &str, min: Level) {
        for (index, expr) in exprs.iter().enumerate() {
            if index > 0 {
                self.out.push_str(separator);
            }
            self.print_expr(expr, min);
        }
    }

    fn print_code(&mut self, prefix: &str, code: &str) {
        self.out.push_str(prefix);
        self.out.push('{');
        self.out.push_str(code);
        self.out.push('}');
    }

    fn print_node(&mut self, expr: &Expression) {
        match expr {
            Expression::Grammar(grammar) => {
                if let Some(init) = grammar.init {
                    self.print_code("", init);
                    self.out.push_str("\n\n");
                }
                for rule in grammar.rules.iter() {
                    self.print_expr(rule, Level::Choice);
                    self.out.push('\n');
                }
            }
            Expression::Rule(rule) => {
                self.out.push_str(rule.name);
                if let Some(display_name) = rule.display_name {
                    self.out.push_str(&format!(" {display_name:?}"));
                }
                self.out.push_str(" <- ");
                self.print_expr(&rule.expr, Level::Choice);
            }
            Expression::ChoiceExpr(choice) => {
                self.print_list(&choice.alternatives, " / ", Level::Action);
            }
            Expression::SeqExpr(seq) => self.print_list(&seq.exprs, " ", Level::Prefix),
            Expression::ActionExpr(action) => {
                self.print_expr(&action.expr, Level::Seq);
                self.print_code(" ", action.code);
            }
            Expression::LabeledExpr(labeled) => {
                self.out.push_str(labeled.label);
                self.out.push(':');
                self.print_expr(&labeled.expr, Level::Suffix);
            }
            Expression::AndExpr(and) => {
                self.out.push('&');
                self.print_expr(&and.expr, Level::Suffix);
            }
            Expression::NotExpr(not) => {
                self.out.push('!');
                self.print_expr(&not.expr, Level::Suffix);
            }
            Expression::OneOrMoreExpr(repeat) => {
                self.print_expr(&repeat.expr, Level::Primary);
                self.out.push('+');
            }
            Expression::ZeroOrMoreExpr(repeat) => {
                self.print_expr(&repeat.expr, Level::Primary);
                self.out.push('*');
            }
            Expression::ZeroOrOneExpr(optional) => {
                self.print_expr(&optional.expr, Level::Primary);
                self.out.push('?');
            }
            Expression::AndCodeExpr(code) => self.print_code("&", code.code),
            Expression::NotCodeExpr(code) => self.print_code("!", code.code),
            Expression::StateCodeExpr(code) => self.print_code("#", code.code),
            Expression::AnyMatcher(_) => self.out.push('.'),
            Expression::CharClassMatcher(class) => {
                self.out.push_str(class.val);
                if class.ignore_case {
                    self.out.push('i');
                }
            }
            Expression::LitMatcher(lit) => {
                self.out.push_str(&format!("{:?}", lit.val));
                if lit.ignore_case {
                    self.out.push('i');
                }
            }
            Expression::RuleRefExpr(rule_ref) => self.out.push_str(rule_ref.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use oxc_allocator::Allocator;

    use super::*;
    use crate::ast::AstBuilder;

    #[test]
    fn print_grammar() {
        let alloc = Allocator::default();
        let ast = AstBuilder::new(&alloc);
        let grammar = ast.grammar(
            Some(" package main "),
            [
                ast.display_rule(
                    "Start",
                    "start",
                    ast.choice([
                        ast.action(
                            ast.seq([ast.labeled("x", ast.rule_ref("X")), ast.not(ast.any())]),
                            " return x ",
                        ),
                        ast.lit("abc", true),
                    ]),
                ),
                ast.rule(
                    "X",
                    ast.seq([
                        ast.and_code(" ok "),
                        ast.one_or_more(ast.char_class("[a-z]", true)),
                        ast.zero_or_one(ast.seq([ast.lit("-", false), ast.rule_ref("X")])),
                        ast.state_code(" c.state[\"n\"] = 1 "),
                    ]),
                ),
            ],
        );

        assert_eq!(
            Printer::print(&grammar),
            concat!(
                "{ package main }\n",
                "\n",
                "Start \"start\" <- x:X !. { return x } / \"abc\"i\n",
                "X <- &{ ok } [a-z]i+ (\"-\" X)? #{ c.state[\"n\"] = 1 }\n",
            )
        );
    }

    #[test]
    fn parenthesize_by_precedence() {
        let alloc = Allocator::default();
        let ast = AstBuilder::new(&alloc);

        let nested_choice = ast.seq([
            ast.choice([ast.lit("a", false), ast.lit("b", false)]),
            ast.lit("c", false),
        ]);
        assert_eq!(Printer::print(&nested_choice), r#"("a" / "b") "c""#);

        let labeled_repeat = ast.labeled("l", ast.zero_or_more(ast.any()));
        assert_eq!(Printer::print(&labeled_repeat), "l:.*");

        let repeated_lookahead = ast.one_or_more(ast.not(ast.not_code("done")));
        assert_eq!(Printer::print(&repeated_lookahead), "(!!{done})+");

        let action_in_seq = ast.seq([ast.action(ast.any(), "a"), ast.any()]);
        assert_eq!(Printer::print(&action_in_seq), "(. {a}) .");

        let single = ast.zero_or_one(ast.seq([ast.rule_ref("Only")]));
        assert_eq!(Printer::print(&single), "Only?");
    }
}
