//! RAII guard for evaluation levels.
//!
//! [`LevelGuard`] enters a level when created and leaves it when dropped,
//! so an early `?` return or a panic inside a level cannot leave the level
//! stack unbalanced. The normal path calls [`LevelGuard::leave`] to see
//! the result of leaving.

use std::ops::{Deref, DerefMut};

use r4_diagnostic::Diagnostic;
use r4_ir::LevelKind;

use super::Interpreter;
use crate::Resolver;

/// Holds `&mut Interpreter` while a level is entered; derefs to it.
pub(crate) struct LevelGuard<'guard, 'interp, R: Resolver> {
    interpreter: &'guard mut Interpreter<'interp, R>,
    kind: LevelKind,
    left: bool,
}

impl<R: Resolver> LevelGuard<'_, '_, R> {
    /// Leave the level now, reporting a tag mismatch instead of logging it.
    pub fn leave(mut self) -> Result<(), Diagnostic> {
        self.left = true;
        let interpreter = &mut *self.interpreter;
        interpreter
            .scope
            .leave_level(self.kind, &mut *interpreter.resolver)
    }
}

impl<R: Resolver> Drop for LevelGuard<'_, '_, R> {
    fn drop(&mut self) {
        if self.left {
            return;
        }
        let interpreter = &mut *self.interpreter;
        if let Err(err) = interpreter
            .scope
            .leave_level(self.kind, &mut *interpreter.resolver)
        {
            tracing::error!(%err, "failed to leave level while unwinding");
        }
    }
}

impl<'interp, R: Resolver> Deref for LevelGuard<'_, 'interp, R> {
    type Target = Interpreter<'interp, R>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl<R: Resolver> DerefMut for LevelGuard<'_, '_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'interp, R: Resolver> Interpreter<'interp, R> {
    /// Enter a level of `kind`; it is left when the guard goes away.
    pub fn scoped_level(&mut self, kind: LevelKind) -> LevelGuard<'_, 'interp, R> {
        self.scope.enter_level(kind);
        LevelGuard {
            interpreter: self,
            kind,
            left: false,
        }
    }
}
