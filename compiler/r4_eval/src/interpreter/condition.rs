//! Condition evaluation.
//!
//! Comparisons read both operands in full and compare the bytes
//! lexicographically. Objects are read straight through the resolver; no
//! tube is involved. A comparison with an operand that cannot be read does
//! not hold, whatever its operator.

use std::cmp::Ordering;
use std::io::Read;

use r4_diagnostic::Diagnostic;
use r4_ir::{BinaryOp, ExprId, ExprKind};
use r4_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors;
use crate::table::ValueKind;
use crate::Resolver;

impl<R: Resolver> Interpreter<'_, R> {
    /// Whether the condition `id` holds.
    ///
    /// A bare name holds when it is bound to something other than `Empty`;
    /// a string or list holds when it has bytes. Assignments and sequences
    /// are executed and hold when every assignment succeeded.
    pub(super) fn eval_condition(&mut self, id: ExprId) -> Result<bool, Diagnostic> {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.get_expr(id);
            match expr.kind {
                ExprKind::BinaryOp {
                    op: BinaryOp::And,
                    left,
                    right,
                } => Ok(self.eval_condition(left)? && self.eval_condition(right)?),
                ExprKind::BinaryOp {
                    op: BinaryOp::Or,
                    left,
                    right,
                } => Ok(self.eval_condition(left)? || self.eval_condition(right)?),
                ExprKind::BinaryOp { op, left, right } => {
                    let left = self.content(left)?;
                    let right = self.content(right)?;
                    let (Some(left), Some(right)) = (left, right) else {
                        tracing::debug!(op = op.as_symbol(), "unreadable operand");
                        return Ok(false);
                    };
                    let holds = compare(op, &left, &right);
                    tracing::trace!(op = op.as_symbol(), holds, "compare");
                    Ok(holds)
                }
                ExprKind::UnaryOp { operand, .. } => Ok(!self.eval_condition(operand)?),
                ExprKind::Level { kind, body } => {
                    self.with_level(kind, |this| this.eval_condition(body))
                }
                ExprKind::If {
                    cond,
                    then_branch,
                    else_branch,
                } => {
                    if self.eval_condition(cond)? {
                        self.eval_condition(then_branch)
                    } else {
                        match else_branch {
                            Some(else_branch) => self.eval_condition(else_branch),
                            None => Ok(false),
                        }
                    }
                }
                ExprKind::Root | ExprKind::ObjectRef { .. } | ExprKind::VariableRef { .. } => {
                    let named = self.eval_name(id)?;
                    let var = self.follow_links(named).unwrap_or(named);
                    Ok(matches!(
                        self.scope.table().kind_of(var),
                        Some(ValueKind::Resolved(_) | ValueKind::Temporary(_))
                    ))
                }
                ExprKind::Literal(text) => Ok(!self.interner.lookup(text).is_empty()),
                ExprKind::List(_) => Ok(self.content(id)?.is_some_and(|bytes| !bytes.is_empty())),
                ExprKind::Assign { .. } | ExprKind::Sequence(_) => Ok(self.exec(id)?.is_ok()),
            }
        })
    }

    /// The full byte content of a source expression, or `None` when some
    /// object in it could not be read.
    fn content(&mut self, id: ExprId) -> Result<Option<Vec<u8>>, Diagnostic> {
        let mut out = Vec::new();
        let complete = self.collect_content(id, &mut out)?;
        Ok(complete.then_some(out))
    }

    /// Append the content of `id` to `out`. `false` stops at the first
    /// object that could not be read.
    fn collect_content(&mut self, id: ExprId, out: &mut Vec<u8>) -> Result<bool, Diagnostic> {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.get_expr(id);
            match expr.kind {
                ExprKind::Literal(text) => out.extend_from_slice(self.interner.lookup(text)),
                ExprKind::Root | ExprKind::ObjectRef { .. } | ExprKind::VariableRef { .. } => {
                    let named = self.eval_name(id)?;
                    let var = self.follow_links(named).unwrap_or(named);
                    match self.scope.table().kind_of(var) {
                        Some(ValueKind::Resolved(handle)) => {
                            let read = self
                                .resolver
                                .open_read(handle)
                                .and_then(|mut reader| reader.read_to_end(out));
                            if let Err(err) = read {
                                tracing::warn!(%err, "reading comparison operand failed");
                                return Ok(false);
                            }
                        }
                        Some(ValueKind::Temporary(bytes)) => out.extend_from_slice(bytes),
                        Some(ValueKind::Empty) | None => {}
                    }
                }
                ExprKind::List(items) => {
                    let arena = self.arena;
                    for &item in arena.get_expr_list(items) {
                        if !self.collect_content(item, out)? {
                            return Ok(false);
                        }
                    }
                }
                ExprKind::Level { kind, body } => {
                    return self.with_level(kind, |this| this.collect_content(body, out));
                }
                _ => return Err(errors::not_a_source("an operator", expr.span)),
            }
            Ok(true)
        })
    }
}

fn compare(op: BinaryOp, left: &[u8], right: &[u8]) -> bool {
    let ordering = left.cmp(right);
    match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::Ne => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Le => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::Ge => ordering != Ordering::Less,
        BinaryOp::And | BinaryOp::Or => false,
    }
}
