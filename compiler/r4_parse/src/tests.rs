use super::*;
use pretty_assertions::assert_eq;
use r4_ir::{ExprRange, LevelKind};

fn parse_str(source: &str, interner: &StringInterner) -> Result<ParseOutput, ParseError> {
    let tokens = r4_lexer::lex(source, interner).unwrap();
    parse(&tokens, interner)
}

/// Render the tree as an s-expression.
fn render(source: &str) -> String {
    let interner = StringInterner::new();
    let out = parse_str(source, &interner).unwrap();
    let mut text = String::new();
    sexpr(&out.arena, out.root, &interner, &mut text);
    text
}

fn parse_err(source: &str) -> ParseError {
    let interner = StringInterner::new();
    parse_str(source, &interner).unwrap_err()
}

fn sexpr(arena: &ExprArena, id: ExprId, interner: &StringInterner, out: &mut String) {
    let list = |range: ExprRange, head: &str, out: &mut String| {
        out.push('(');
        out.push_str(head);
        for &item in arena.get_expr_list(range) {
            out.push(' ');
            sexpr(arena, item, interner, out);
        }
        out.push(')');
    };
    match arena.get_expr(id).kind {
        ExprKind::Literal(name) => out.push_str(&format!("{:?}", interner.display(name))),
        ExprKind::Root => out.push('/'),
        ExprKind::ObjectRef { base: None, name } => out.push_str(&interner.display(name)),
        ExprKind::ObjectRef {
            base: Some(base),
            name,
        } => {
            sexpr(arena, base, interner, out);
            if arena.get_expr(base).kind != ExprKind::Root {
                out.push('/');
            }
            out.push_str(&interner.display(name));
        }
        ExprKind::VariableRef { name } => {
            out.push('$');
            out.push_str(&interner.display(name));
        }
        ExprKind::List(range) => list(range, "list", out),
        ExprKind::Sequence(range) => list(range, "seq", out),
        ExprKind::Assign { op, target, source } => {
            out.push_str(&format!("({} ", op.as_symbol()));
            sexpr(arena, target, interner, out);
            out.push(' ');
            sexpr(arena, source, interner, out);
            out.push(')');
        }
        ExprKind::BinaryOp { op, left, right } => {
            out.push_str(&format!("({} ", op.as_symbol()));
            sexpr(arena, left, interner, out);
            out.push(' ');
            sexpr(arena, right, interner, out);
            out.push(')');
        }
        ExprKind::UnaryOp { operand, .. } => {
            out.push_str("(not ");
            sexpr(arena, operand, interner, out);
            out.push(')');
        }
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push_str("(if ");
            sexpr(arena, cond, interner, out);
            out.push(' ');
            sexpr(arena, then_branch, interner, out);
            if let Some(else_branch) = else_branch {
                out.push(' ');
                sexpr(arena, else_branch, interner, out);
            }
            out.push(')');
        }
        ExprKind::Level { kind, body } => {
            let head = match kind {
                LevelKind::Paren => "paren",
                LevelKind::Bracket => "bracket",
                LevelKind::Brace => "brace",
                LevelKind::Statement => "statement",
            };
            out.push_str(&format!("({head} "));
            sexpr(arena, body, interner, out);
            out.push(')');
        }
    }
}

// ─── Structure ─────────────────────────────────────────────────

#[test]
fn quoted_target_becomes_a_rooted_path() {
    assert_eq!(render("\"/tmp/x\" <- \"hello\""), "(<- /tmp/x \"hello\")");
}

#[test]
fn relative_quoted_target() {
    assert_eq!(render("`a//b/` <- x"), "(<- a/b x)");
}

#[test]
fn list_source_in_parens() {
    assert_eq!(render("a <- (b, c)"), "(<- a (paren (list b c)))");
}

#[test]
fn list_binds_looser_than_or() {
    assert_eq!(render("a or b, c"), "(list (or a b) c)");
}

#[test]
fn nested_lists_keep_their_shape() {
    assert_eq!(render("x <- ((a, b), c)"), "(<- x (paren (list (paren (list a b)) c)))");
    assert_eq!(render("x <- (a, (b, c))"), "(<- x (paren (list a (paren (list b c)))))");
}

#[test]
fn sequence_skips_empty_statements() {
    assert_eq!(render("a <- b;; c <- d;"), "(seq (<- a b) (<- c d))");
    assert_eq!(render("a;"), "a");
}

#[test]
fn paths_and_variables() {
    assert_eq!(render("/tmp/x <<- $v/y"), "(<<- /tmp/x $v/y)");
    assert_eq!(render("/"), "/");
}

#[test]
fn string_segments_in_paths() {
    assert_eq!(render("a/`b c` <- x"), "(<- a/b c x)");
}

#[test]
fn link_with_quoted_source() {
    assert_eq!(render("alias -> \"/tmp/x\""), "(-> alias /tmp/x)");
}

#[test]
fn boolean_precedence() {
    assert_eq!(
        render("not a eq b and c or d"),
        "(or (and (not (eq a b)) c) d)"
    );
    assert_eq!(render("not not a"), "(not (not a))");
}

#[test]
fn if_then_else() {
    assert_eq!(
        render("if not (x eq y) then a <- b else a <- c"),
        "(if (not (paren (eq x y))) (<- a b) (<- a c))"
    );
}

#[test]
fn if_binds_tighter_than_sequence() {
    assert_eq!(render("if x then a; b"), "(seq (if x a) b)");
}

#[test]
fn all_three_levels() {
    assert_eq!(
        render("[tmp; {a <- b}]"),
        "(bracket (seq tmp (brace (<- a b))))"
    );
}

#[test]
fn parsing_is_deterministic() {
    let interner = StringInterner::new();
    let source = "{ /a/b <- (`x`, $y); if a ge b then c <<- d else e -> f }";
    let first = parse_str(source, &interner).unwrap();
    let second = parse_str(source, &interner).unwrap();
    assert_eq!(first, second);
}

#[test]
fn spans_cover_the_expression() {
    let interner = StringInterner::new();
    let out = parse_str("  a <- `b`  ", &interner).unwrap();
    assert_eq!(out.arena.get_expr(out.root).span, Span::new(2, 10));
}

#[test]
fn deep_nesting_parses() {
    let depth = 5_000;
    let source = format!("x <- {}a{}", "(".repeat(depth), ")".repeat(depth));
    let interner = StringInterner::new();
    assert!(parse_str(&source, &interner).is_ok());
}

// ─── Syntax errors ─────────────────────────────────────────────

#[test]
fn unexpected_token_reports_state_and_token() {
    let interner = StringInterner::new();
    let err = parse_str("a <- b c", &interner).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.state, ParseState::Statement);
    assert_eq!(err.span, Span::new(7, 8));

    let diag = err.to_diagnostic(&interner);
    assert_eq!(diag.token.as_deref(), Some("c"));
    assert_eq!(diag.parser_state, Some("a statement"));
    assert_eq!(diag.offset(), 7);
}

#[test]
fn missing_source_after_arrow() {
    let err = parse_err("a <-");
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.state, ParseState::Assignment);
    assert_eq!(err.found, Some(TokenKind::Eof));
}

#[test]
fn unclosed_level_points_at_opener() {
    let err = parse_err("x <- [a, b");
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.span, Span::new(5, 6));
    assert_eq!(err.state, ParseState::Level(LevelKind::Bracket));
}

#[test]
fn mismatched_closer() {
    let err = parse_err("(a]");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected `)`, found `]`");
}

#[test]
fn missing_then() {
    let err = parse_err("if a b");
    assert_eq!(err.state, ParseState::If);
    assert_eq!(err.message, "expected `then`, found word `b`");
}

#[test]
fn comparisons_do_not_chain() {
    let err = parse_err("a eq b eq c");
    assert_eq!(err.code, ErrorCode::E1001);
}

#[test]
fn empty_statement() {
    assert_eq!(parse_err("").code, ErrorCode::E1002);
}

#[test]
fn dollar_needs_a_name() {
    let err = parse_err("$ <- a");
    assert_eq!(err.state, ParseState::Variable);
}

// ─── Construction-time checks ──────────────────────────────────

#[test]
fn level_is_not_a_target() {
    let err = parse_err("(a) <- b");
    assert_eq!(err.code, ErrorCode::E1004);
    assert_eq!(err.span, Span::new(0, 3));
}

#[test]
fn empty_quoted_target() {
    assert_eq!(parse_err("`` <- b").code, ErrorCode::E1004);
}

#[test]
fn operators_are_rejected_as_sources() {
    let err = parse_err("a <- (x eq y)");
    assert_eq!(err.code, ErrorCode::E1005);
    assert_eq!(err.state, ParseState::Assignment);
    assert_eq!(parse_err("a <- b, not c").code, ErrorCode::E1005);
}

#[test]
fn non_byte_sources_are_rejected() {
    assert_eq!(parse_err("a <- (b <- c)").code, ErrorCode::E1006);
    assert_eq!(parse_err("a <- (b; c)").code, ErrorCode::E1006);
    assert_eq!(parse_err("a <- [if b then c]").code, ErrorCode::E1006);
}

#[test]
fn operators_cannot_be_compared() {
    let err = parse_err("if (a eq b) eq c then x");
    assert_eq!(err.code, ErrorCode::E1005);
    assert_eq!(err.state, ParseState::Comparison);
    assert_eq!(err.message, "`eq` does not produce bytes");
}

#[test]
fn link_needs_a_name() {
    let err = parse_err("a -> (b, c)");
    assert_eq!(err.code, ErrorCode::E1006);
    assert_eq!(err.message, "`->` needs a name on its right");
}

#[test]
fn check_errors_render_without_token() {
    let interner = StringInterner::new();
    let err = parse_str("a <- (x eq y)", &interner).unwrap_err();
    let diag = err.to_diagnostic(&interner);
    assert_eq!(diag.token, None);
    assert!(diag.help.is_some());
}
