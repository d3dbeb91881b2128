use oxc_allocator::Allocator;

use crate::ast::{AstBuilder, Expression};

/// Create AST for this grammar:
///
/// ```text
/// { package greeting }
///
/// Start "start" <- Greeting / Farewell
/// Greeting <- ("hello"i) _ name:Name !. { return name, nil }
/// Name <- ([a-z]+)
/// Farewell <- ("bye" / "ciao") _ Nme? &{ return true, nil }
/// _ <- " "*
/// ```
///
/// Hard-coded here, but these are the steps actual parser would take to create the AST.
/// The parenthesized single elements are kept as one-element sequences/choices, as a parser
/// produces them. `Nme` is deliberately undefined.
pub fn parse(alloc: &Allocator) -> Expression<'_> {
    let ast = AstBuilder::new(alloc);

    // `Greeting / Farewell`
    let start = ast.display_rule(
        "Start",
        "start",
        ast.choice([ast.rule_ref("Greeting"), ast.rule_ref("Farewell")]),
    );

    // `("hello"i) _ name:Name !. { return name, nil }`
    let greeting = ast.rule(
        "Greeting",
        ast.action(
            ast.seq([
                ast.seq([ast.lit("hello", true)]),
                ast.rule_ref("_"),
                ast.labeled("name", ast.rule_ref("Name")),
                ast.not(ast.any()),
            ]),
            " return name, nil ",
        ),
    );

    // `([a-z]+)`
    let name = ast.rule(
        "Name",
        ast.choice([ast.one_or_more(ast.char_class("[a-z]", false))]),
    );

    // `("bye" / "ciao") _ Nme? &{ return true, nil }`
    let farewell = ast.rule(
        "Farewell",
        ast.seq([
            ast.choice([ast.lit("bye", false), ast.lit("ciao", false)]),
            ast.rule_ref("_"),
            ast.zero_or_one(ast.rule_ref("Nme")),
            ast.and_code(" return true, nil "),
        ]),
    );

    // `" "*`
    let whitespace = ast.rule("_", ast.zero_or_more(ast.lit(" ", false)));

    ast.grammar(
        Some(" package greeting "),
        [start, greeting, name, farewell, whitespace],
    )
}
