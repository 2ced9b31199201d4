//! Operand checks, applied when `Assign` and comparison nodes are built.

use r4_diagnostic::ErrorCode;
use r4_ir::{ExprId, ExprKind, Name, Span};
use r4_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// A target must be a name; a quoted target becomes a path.
    pub(super) fn check_target(&mut self, target: ExprId) -> Result<ExprId, ParseError> {
        let expr = *self.arena.get_expr(target);
        match expr.kind {
            kind if kind.is_name() => Ok(target),
            ExprKind::Literal(text) => self.path_from_string(text, expr.span),
            _ => Err(self.check_error(
                ErrorCode::E1004,
                "cannot assign to this expression".to_owned(),
                expr.span,
            )),
        }
    }

    /// The right-hand side of `->` must be a name or a quoted path.
    pub(super) fn check_link_source(&mut self, source: ExprId) -> Result<ExprId, ParseError> {
        let expr = *self.arena.get_expr(source);
        match expr.kind {
            kind if kind.is_name() => Ok(source),
            ExprKind::Literal(text) => self.path_from_string(text, expr.span),
            _ => Err(self.check_error(
                ErrorCode::E1006,
                "`->` needs a name on its right".to_owned(),
                expr.span,
            )),
        }
    }

    /// Pump sources and comparison operands must produce bytes: strings,
    /// names, and lists or levels made of them.
    pub(super) fn check_pump_source(&self, source: ExprId) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| {
            let expr = self.arena.get_expr(source);
            match expr.kind {
                ExprKind::Literal(_)
                | ExprKind::Root
                | ExprKind::ObjectRef { .. }
                | ExprKind::VariableRef { .. } => Ok(()),
                ExprKind::List(range) => self
                    .arena
                    .get_expr_list(range)
                    .iter()
                    .try_for_each(|&item| self.check_pump_source(item)),
                ExprKind::Level { body, .. } => self.check_pump_source(body),
                ExprKind::BinaryOp { op, .. } => Err(self.check_error(
                    ErrorCode::E1005,
                    format!("`{}` does not produce bytes", op.as_symbol()),
                    expr.span,
                )),
                ExprKind::UnaryOp { .. } => Err(self.check_error(
                    ErrorCode::E1005,
                    "`not` does not produce bytes".to_owned(),
                    expr.span,
                )),
                ExprKind::If { .. } => Err(self.check_error(
                    ErrorCode::E1006,
                    "`if` does not produce bytes".to_owned(),
                    expr.span,
                )),
                ExprKind::Assign { .. } => Err(self.check_error(
                    ErrorCode::E1006,
                    "an assignment does not produce bytes".to_owned(),
                    expr.span,
                )),
                ExprKind::Sequence(_) => Err(self.check_error(
                    ErrorCode::E1006,
                    "a sequence does not produce bytes".to_owned(),
                    expr.span,
                )),
            }
        })
    }

    /// Split a quoted path on `/`. A leading `/` anchors it at the root;
    /// empty segments are skipped.
    fn path_from_string(&mut self, text: Name, span: Span) -> Result<ExprId, ParseError> {
        let bytes = self.interner.lookup(text);
        let mut base = if bytes.first() == Some(&b'/') {
            Some(self.alloc(ExprKind::Root, span))
        } else {
            None
        };
        for segment in bytes.split(|&b| b == b'/').filter(|s| !s.is_empty()) {
            let name = self.interner.intern(segment);
            base = Some(self.alloc(ExprKind::ObjectRef { base, name }, span));
        }
        base.ok_or_else(|| {
            self.check_error(ErrorCode::E1004, "empty path".to_owned(), span)
        })
    }

    #[cold]
    fn check_error(&self, code: ErrorCode, message: String, span: Span) -> ParseError {
        ParseError::new(code, message, span, self.state)
    }
}
