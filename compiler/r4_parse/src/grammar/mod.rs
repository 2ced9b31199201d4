//! Grammar rules.
//!
//! - `mod.rs`: statement, sequence, assignment, list
//! - `operators.rs`: `or`, `and`, `not`, comparisons
//! - `primary.rs`: paths, names, strings, levels, `if`
//! - `checks.rs`: assignment target and source checks

mod checks;
mod operators;
mod primary;

use r4_diagnostic::ErrorCode;
use r4_ir::{AssignOp, ExprArena, ExprId, ExprKind, TokenKind};

use crate::{ParseError, ParseState, Parser};

impl Parser<'_> {
    /// `statement := sequence EOF`
    pub(crate) fn parse_statement(&mut self) -> Result<ExprId, ParseError> {
        self.in_state(ParseState::Statement, |p| {
            let root = p.parse_sequence()?;
            if p.cursor.is_at_end() {
                Ok(root)
            } else {
                Err(p.unexpected("`;` or end of input"))
            }
        })
    }

    /// `sequence := assign (';' assign?)*`
    ///
    /// Empty statements between semicolons are skipped. A single statement
    /// is returned as is, without a `Sequence` node.
    pub(crate) fn parse_sequence(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_assign()?;
        if !self.cursor.check(TokenKind::Semicolon) {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.cursor.eat(TokenKind::Semicolon) {
            if self.at_sequence_end() {
                continue;
            }
            if items.len() >= ExprArena::MAX_LIST_LEN {
                return Err(self.too_many("statements"));
            }
            let item = self.in_state(ParseState::Sequence, Self::parse_assign)?;
            items.push(item);
        }

        if items.len() == 1 {
            return Ok(first);
        }
        let span = self.span_of(first).merge(self.cursor.previous_span());
        let range = self.arena.alloc_expr_list(items);
        Ok(self.alloc(ExprKind::Sequence(range), span))
    }

    fn at_sequence_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    /// `assign := list (('<-' | '<<-' | '->') list)?`
    pub(crate) fn parse_assign(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_list()?;
        let op = match self.cursor.current_kind() {
            TokenKind::Assign => AssignOp::Replace,
            TokenKind::Append => AssignOp::Append,
            TokenKind::Link => AssignOp::Link,
            _ => return Ok(left),
        };
        self.cursor.advance();

        self.in_state(ParseState::Assignment, |p| {
            let right = p.parse_list()?;
            let target = p.check_target(left)?;
            let source = if op.pumps() {
                p.check_pump_source(right)?;
                right
            } else {
                p.check_link_source(right)?
            };
            let span = p.span_of(left).merge(p.span_of(right));
            Ok(p.alloc(ExprKind::Assign { op, target, source }, span))
        })
    }

    /// `list := or (',' or)*`
    fn parse_list(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_or()?;
        if !self.cursor.check(TokenKind::Comma) {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.cursor.eat(TokenKind::Comma) {
            if items.len() >= ExprArena::MAX_LIST_LEN {
                return Err(self.too_many("list elements"));
            }
            let item = self.in_state(ParseState::List, Self::parse_or)?;
            items.push(item);
        }

        let span = self.span_of(first).merge(self.cursor.previous_span());
        let range = self.arena.alloc_expr_list(items);
        Ok(self.alloc(ExprKind::List(range), span))
    }

    #[cold]
    fn too_many(&self, what: &str) -> ParseError {
        self.error_here(
            ErrorCode::E1007,
            format!("more than {} {what}", ExprArena::MAX_LIST_LEN),
        )
    }
}
