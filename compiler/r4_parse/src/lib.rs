//! Recursive-descent parser for the r4 command language.
//!
//! Turns one statement's [`TokenList`] into an unevaluated expression tree in
//! a fresh [`ExprArena`]. There is no error recovery: the first unexpected
//! token aborts the statement and comes back as a [`ParseError`] carrying the
//! parser state and the token.
//!
//! # Grammar
//!
//! Lowest precedence first:
//!
//! ```text
//! statement := sequence EOF
//! sequence  := assign (';' assign?)*
//! assign    := list (('<-' | '<<-' | '->') list)?
//! list      := or (',' or)*
//! or        := and ('or' and)*
//! and       := not ('and' not)*
//! not       := 'not' not | compare
//! compare   := path (('eq'|'ne'|'lt'|'le'|'gt'|'ge') path)?
//! path      := primary ('/' segment)*
//! segment   := WORD | STRING
//! primary   := '/' segment? | WORD | STRING | '$' segment
//!            | '(' sequence ')' | '[' sequence ']' | '{' sequence '}'
//!            | 'if' or 'then' assign ('else' assign)?
//! ```
//!
//! Assignment operands are checked as they are built: targets must be names
//! (a quoted target is split into a path), `->` needs a name on its right,
//! and `<-`/`<<-` sources and comparison operands must produce bytes.

mod context;
mod cursor;
mod error;
mod grammar;

use r4_ir::{Expr, ExprArena, ExprId, ExprKind, Span, StringInterner, TokenKind, TokenList};
use r4_diagnostic::ErrorCode;

pub use context::ParseState;
pub use cursor::Cursor;
pub use error::ParseError;

use crate::error::token_text;

/// A parsed statement: the arena and the root expression in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutput {
    pub arena: ExprArena,
    pub root: ExprId,
}

/// Parse one statement.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<ParseOutput, ParseError> {
    tracing::trace!(tokens = tokens.len(), "parsing statement");
    let mut parser = Parser::new(tokens, interner);
    let root = parser.parse_statement()?;
    tracing::trace!(exprs = parser.arena.expr_count(), "parsed statement");
    Ok(ParseOutput {
        arena: parser.arena,
        root,
    })
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    arena: ExprArena,
    state: ParseState,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
            arena: ExprArena::with_capacity(tokens.len() * 4),
            state: ParseState::Statement,
        }
    }

    /// Run `f` with `state` as the state reported by errors raised inside it.
    fn in_state<T>(
        &mut self,
        state: ParseState,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = std::mem::replace(&mut self.state, state);
        let result = f(self);
        self.state = saved;
        result
    }

    #[inline]
    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    #[inline]
    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    /// Error at the current token.
    #[cold]
    #[inline(never)]
    fn error_here(&self, code: ErrorCode, message: String) -> ParseError {
        let token = self.cursor.current();
        ParseError::new(code, message, token.span, self.state).with_found(token.kind)
    }

    #[cold]
    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.cursor.current_kind();
        self.error_here(
            ErrorCode::E1001,
            format!("expected {expected}, found {}", describe(found, self.interner)),
        )
    }

    #[cold]
    fn expected_expression(&self) -> ParseError {
        let found = self.cursor.current_kind();
        self.error_here(
            ErrorCode::E1002,
            format!("expected an expression, found {}", describe(found, self.interner)),
        )
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        if self.cursor.check(kind) {
            Ok(self.cursor.advance().span)
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }
}

/// Token description for messages: kind plus text for words and strings.
fn describe(kind: TokenKind, interner: &StringInterner) -> String {
    match kind {
        TokenKind::Word(_) | TokenKind::Str(_) => {
            format!("{} `{}`", kind.display_name(), token_text(kind, interner))
        }
        _ => kind.display_name().to_owned(),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
