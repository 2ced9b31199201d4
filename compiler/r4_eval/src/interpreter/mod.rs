//! Statement execution.
//!
//! An [`Interpreter`] borrows the session's state for one statement and
//! walks its tree. Assignments that move bytes go through the tube
//! (`tube.rs`); conditions are evaluated without it (`condition.rs`).

mod condition;
mod scope_guard;
mod tube;

use r4_diagnostic::Diagnostic;
use r4_ir::{AssignOp, ExprArena, ExprId, ExprKind, ExprRange, LevelKind, Name, StringInterner};
use r4_stack::ensure_sufficient_stack;

use crate::errors;
use crate::scope::Scope;
use crate::table::VarId;
use crate::{Resolver, SessionConfig, SessionStats, Status};

/// Names of the variables every assignment records on its target.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ResultNames {
    /// `_result`: decimal status.
    pub result: Name,
    /// `_length`: decimal byte count.
    pub length: Name,
}

impl ResultNames {
    pub fn new(interner: &StringInterner) -> Self {
        ResultNames {
            result: interner.intern(b"_result"),
            length: interner.intern(b"_length"),
        }
    }
}

/// Tree walker for one statement.
pub(crate) struct Interpreter<'a, R: Resolver> {
    pub resolver: &'a mut R,
    pub scope: &'a mut Scope<R::Handle>,
    pub interner: &'a StringInterner,
    pub arena: &'a ExprArena,
    pub config: &'a SessionConfig,
    /// The tube's transfer buffer, reused by every pump.
    pub buffer: &'a mut [u8],
    pub stats: &'a mut SessionStats,
    pub names: ResultNames,
}

impl<'a, R: Resolver> Interpreter<'a, R> {
    /// Run `root` inside a fresh statement level.
    pub fn run_statement(&mut self, root: ExprId) -> Result<(), Diagnostic> {
        let status = self.with_level(LevelKind::Statement, |this| this.exec(root))?;
        tracing::trace!(%status, "statement done");
        Ok(())
    }

    /// Run `f` inside a level of `kind`, leaving it on every path.
    pub fn with_level<T>(
        &mut self,
        kind: LevelKind,
        f: impl FnOnce(&mut Self) -> Result<T, Diagnostic>,
    ) -> Result<T, Diagnostic> {
        let mut scoped = self.scoped_level(kind);
        let result = f(&mut *scoped);
        let left = scoped.leave();
        let value = result?;
        left?;
        Ok(value)
    }

    /// Execute a statement. The status is the first failed assignment's,
    /// or `Ok`.
    pub fn exec(&mut self, id: ExprId) -> Result<Status, Diagnostic> {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.get_expr(id);
            match expr.kind {
                ExprKind::Sequence(items) | ExprKind::List(items) => self.exec_items(items),
                ExprKind::Level { kind, body } => self.with_level(kind, |this| this.exec(body)),
                ExprKind::Assign {
                    op: AssignOp::Link,
                    target,
                    source,
                } => self.exec_link(target, source),
                ExprKind::Assign { op, target, source } => self.exec_pump(op, target, source),
                ExprKind::If {
                    cond,
                    then_branch,
                    else_branch,
                } => {
                    if self.eval_condition(cond)? {
                        self.exec(then_branch)
                    } else if let Some(else_branch) = else_branch {
                        self.exec(else_branch)
                    } else {
                        Ok(Status::Ok)
                    }
                }
                ExprKind::Root | ExprKind::ObjectRef { .. } | ExprKind::VariableRef { .. } => {
                    let var = self.eval_name(id)?;
                    self.scope.navigate(var);
                    Ok(Status::Ok)
                }
                ExprKind::BinaryOp { .. } | ExprKind::UnaryOp { .. } => {
                    self.eval_condition(id)?;
                    Ok(Status::Ok)
                }
                ExprKind::Literal(_) => Ok(Status::Ok),
            }
        })
    }

    fn exec_items(&mut self, items: ExprRange) -> Result<Status, Diagnostic> {
        let arena = self.arena;
        let stops = self.scope.current().kind.stops_on_failure();
        let mut status = Status::Ok;
        for &item in arena.get_expr_list(items) {
            let item_status = self.exec(item)?;
            if item_status.is_ok() {
                continue;
            }
            if status.is_ok() {
                status = item_status;
            }
            if stops {
                tracing::debug!(%item_status, "stopping level at failed assignment");
                break;
            }
        }
        Ok(status)
    }

    /// `target -> source`: make `target` an alias of `source`.
    fn exec_link(&mut self, target: ExprId, source: ExprId) -> Result<Status, Diagnostic> {
        let target = self.eval_name(target)?;
        let source = self.eval_name(source)?;
        let status = self.scope.link(target, source);
        if !status.is_ok() {
            tracing::debug!(?target, ?source, "refusing link that closes a cycle");
        }
        self.scope.set_child_temporary(
            &mut *self.resolver,
            target,
            self.names.result,
            status.to_string().into_bytes(),
        );
        Ok(status)
    }

    /// The variable a name expression denotes, looked up from the current
    /// level.
    pub fn eval_name(&mut self, id: ExprId) -> Result<VarId, Diagnostic> {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.get_expr(id);
            match expr.kind {
                ExprKind::Root => Ok(self.scope.root()),
                ExprKind::ObjectRef { base, name } => {
                    let parent = match base {
                        Some(base) => self.eval_name(base)?,
                        None => self.scope.working(),
                    };
                    Ok(self.lookup(parent, name))
                }
                ExprKind::VariableRef { name } => {
                    let parent = self.scope.session_root();
                    Ok(self.lookup(parent, name))
                }
                _ => Err(errors::not_a_name(expr.span)),
            }
        })
    }

    #[inline]
    fn lookup(&mut self, parent: VarId, name: Name) -> VarId {
        self.scope
            .lookup_or_create(&mut *self.resolver, self.interner, parent, name)
    }

    /// Follow `->` links from `var`, bounded by the configured depth. The
    /// variable reached is bound again if an earlier level released it.
    fn follow_links(&mut self, var: VarId) -> Result<VarId, Status> {
        let target = self.scope.follow_links(var, self.config.max_alias_depth)?;
        if target != var {
            self.scope
                .ensure_bound(&mut *self.resolver, self.interner, target);
        }
        Ok(target)
    }
}
