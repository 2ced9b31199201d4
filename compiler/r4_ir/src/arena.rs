//! Arena allocation for the flat AST.
//!
//! One arena holds the whole tree of one statement. Nodes are never freed
//! individually: the evaluator drops the arena once the statement's level
//! has been left.

use crate::{Expr, ExprId, ExprRange};

/// Contiguous storage for all expressions of one statement.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,

    /// Flattened expression lists (List elements, Sequence statements).
    expr_lists: Vec<ExprId>,
}

impl ExprArena {
    /// Maximum number of elements in one list or sequence.
    pub const MAX_LIST_LEN: usize = u16::MAX as usize;

    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 expression per 4 bytes of statement text.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 4;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 2),
        }
    }

    /// Allocate expression, return ID.
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "statement text is bounded by u32 spans, so node count fits"
    )]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get number of expressions.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate expression list, return range.
    ///
    /// Callers keep lists under [`Self::MAX_LIST_LEN`]; the parser reports an
    /// error before reaching it.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "list length is checked against MAX_LIST_LEN by the parser"
    )]
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(exprs);
        let len = self.expr_lists.len() - start;
        debug_assert!(len <= Self::MAX_LIST_LEN, "expression list too long");
        ExprRange::new(start as u32, len as u16)
    }

    /// Get expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.start as usize..range.end()]
    }
}

#[cfg(test)]
mod tests;
