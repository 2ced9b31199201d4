//! Paths and primary expressions.

use r4_diagnostic::ErrorCode;
use r4_ir::{ExprId, ExprKind, LevelKind, Name, Span, TokenKind};
use r4_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseState, Parser};

impl Parser<'_> {
    /// `path := primary ('/' segment)*`
    ///
    /// Only names continue into a path; `"a"/b` stops after the string.
    pub(super) fn parse_path(&mut self) -> Result<ExprId, ParseError> {
        let mut base = self.parse_primary()?;
        while self.arena.get_expr(base).kind.is_name() && self.cursor.eat(TokenKind::Slash) {
            let (name, span) = self.in_state(ParseState::Path, Self::parse_segment)?;
            let span = self.span_of(base).merge(span);
            base = self.alloc(
                ExprKind::ObjectRef {
                    base: Some(base),
                    name,
                },
                span,
            );
        }
        Ok(base)
    }

    /// `segment := WORD | STRING`
    fn parse_segment(&mut self) -> Result<(Name, Span), ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Word(name) | TokenKind::Str(name) => {
                Ok((name, self.cursor.advance().span))
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_primary_inner())
    }

    fn parse_primary_inner(&mut self) -> Result<ExprId, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Slash => {
                let span = self.cursor.advance().span;
                let root = self.alloc(ExprKind::Root, span);
                match self.cursor.current_kind() {
                    TokenKind::Word(name) | TokenKind::Str(name) => {
                        let end = self.cursor.advance().span;
                        Ok(self.alloc(
                            ExprKind::ObjectRef {
                                base: Some(root),
                                name,
                            },
                            span.merge(end),
                        ))
                    }
                    _ => Ok(root),
                }
            }
            TokenKind::Word(name) => {
                let span = self.cursor.advance().span;
                Ok(self.alloc(ExprKind::ObjectRef { base: None, name }, span))
            }
            TokenKind::Str(name) => {
                let span = self.cursor.advance().span;
                Ok(self.alloc(ExprKind::Literal(name), span))
            }
            TokenKind::Dollar => {
                let start = self.cursor.advance().span;
                let (name, end) = self.in_state(ParseState::Variable, Self::parse_segment)?;
                Ok(self.alloc(ExprKind::VariableRef { name }, start.merge(end)))
            }
            TokenKind::LParen => self.parse_level(LevelKind::Paren),
            TokenKind::LBracket => self.parse_level(LevelKind::Bracket),
            TokenKind::LBrace => self.parse_level(LevelKind::Brace),
            TokenKind::If => self.parse_if(),
            _ => Err(self.expected_expression()),
        }
    }

    /// `'(' sequence ')'` and its `[ ]` and `{ }` siblings.
    fn parse_level(&mut self, kind: LevelKind) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance().span;
        let closer = match kind {
            LevelKind::Bracket => TokenKind::RBracket,
            LevelKind::Brace => TokenKind::RBrace,
            LevelKind::Paren | LevelKind::Statement => TokenKind::RParen,
        };

        self.in_state(ParseState::Level(kind), |p| {
            let body = p.parse_sequence()?;
            if p.cursor.check(closer) {
                let close = p.cursor.advance().span;
                return Ok(p.alloc(ExprKind::Level { kind, body }, open.merge(close)));
            }
            if p.cursor.is_at_end() {
                let (opening, _) = kind.delimiters();
                return Err(ParseError::new(
                    ErrorCode::E1003,
                    format!("unclosed `{opening}`"),
                    open,
                    p.state,
                )
                .with_found(TokenKind::Eof));
            }
            Err(p.unexpected(closer.display_name()))
        })
    }

    /// `'if' or 'then' assign ('else' assign)?`
    fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        self.in_state(ParseState::If, |p| {
            let cond = p.parse_or()?;
            p.expect(TokenKind::Then)?;
            let then_branch = p.parse_assign()?;
            let else_branch = if p.cursor.eat(TokenKind::Else) {
                Some(p.parse_assign()?)
            } else {
                None
            };
            let last = else_branch.unwrap_or(then_branch);
            let span = start.merge(p.span_of(last));
            Ok(p.alloc(
                ExprKind::If {
                    cond,
                    then_branch,
                    else_branch,
                },
                span,
            ))
        })
    }
}
