//! Boolean connectives and comparisons.

use r4_ir::{BinaryOp, ExprId, ExprKind, TokenKind, UnaryOp};
use r4_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseState, Parser};

impl Parser<'_> {
    /// `or := and ('or' and)*`
    pub(super) fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_and()?;
        while self.cursor.eat(TokenKind::Or) {
            let right = self.in_state(ParseState::Condition, Self::parse_and)?;
            left = self.binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    /// `and := not ('and' not)*`
    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_not()?;
        while self.cursor.eat(TokenKind::And) {
            let right = self.in_state(ParseState::Condition, Self::parse_not)?;
            left = self.binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    /// `not := 'not' not | compare`
    fn parse_not(&mut self) -> Result<ExprId, ParseError> {
        if !self.cursor.check(TokenKind::Not) {
            return self.parse_compare();
        }
        let start = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| {
            self.in_state(ParseState::Condition, Self::parse_not)
        })?;
        let span = start.merge(self.span_of(operand));
        Ok(self.alloc(
            ExprKind::UnaryOp {
                op: UnaryOp::Not,
                operand,
            },
            span,
        ))
    }

    /// `compare := path (cmpop path)?`
    ///
    /// Comparisons do not chain: `a eq b eq c` is a syntax error. Both
    /// operands must produce bytes, so `(a eq b) eq c` is rejected too.
    fn parse_compare(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_path()?;
        let Some(op) = comparison_op(self.cursor.current_kind()) else {
            return Ok(left);
        };
        self.cursor.advance();
        self.in_state(ParseState::Comparison, |p| {
            let right = p.parse_path()?;
            p.check_pump_source(left)?;
            p.check_pump_source(right)?;
            Ok(p.binary(op, left, right))
        })
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).merge(self.span_of(right));
        self.alloc(ExprKind::BinaryOp { op, left, right }, span)
    }
}

fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::Ne => Some(BinaryOp::Ne),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Le => Some(BinaryOp::Le),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::Ge => Some(BinaryOp::Ge),
        _ => None,
    }
}
