//! Levels and name lookup.
//!
//! A [`Scope`] is a stack of levels over the session's [`VariableTable`].
//! Each level remembers the values looked up inside it and drops its
//! references, newest first, when it is left. Lookups bind a variable on
//! first use by asking the [`Resolver`]; a value whose last reference goes
//! away is released and its variable unbound, so the next lookup asks
//! again.

use std::fmt;
use std::io;

use r4_diagnostic::Diagnostic;
use r4_ir::{LevelKind, Name, StringInterner};

use crate::errors;
use crate::table::{ValueId, ValueKind, VarId, Variable, VariableTable};
use crate::{Resolver, Status};

/// One entry of the level stack.
#[derive(Clone, Debug)]
pub struct ScopeLevel {
    pub kind: LevelKind,
    /// Where the level started.
    pub cursor: VarId,
    /// Where relative names resolve; moved by navigation.
    pub working: VarId,
    /// Values referenced in this level, in push order.
    pushed: Vec<ValueId>,
}

impl ScopeLevel {
    fn new(kind: LevelKind, cursor: VarId) -> Self {
        ScopeLevel {
            kind,
            cursor,
            working: cursor,
            pushed: Vec::new(),
        }
    }
}

/// Variable table plus level stack.
pub struct Scope<H> {
    table: VariableTable<H>,
    /// The session-wide level; never left.
    base: ScopeLevel,
    levels: Vec<ScopeLevel>,
    root: VarId,
    session_root: VarId,
}

impl<H: fmt::Debug> Scope<H> {
    /// Bind `/` to the resolver's root and start the base level at its cwd.
    pub fn new<R>(resolver: &mut R, interner: &StringInterner) -> io::Result<Self>
    where
        R: Resolver<Handle = H>,
    {
        let mut table = VariableTable::new();
        let root = table.add_root(interner.intern(b"/"));
        let session_root = table.add_root(interner.intern(b"$"));
        let cwd = table.add_root(interner.intern(b"."));

        let root_handle = resolver.root()?;
        let cwd_handle = match resolver.cwd() {
            Ok(handle) => handle,
            Err(err) => {
                resolver.release(root_handle);
                return Err(err);
            }
        };
        table.bind(root, ValueKind::Resolved(root_handle), 0, true);
        table.bind(cwd, ValueKind::Resolved(cwd_handle), 0, true);
        table.bind(session_root, ValueKind::Temporary(Vec::new()), 0, true);

        Ok(Scope {
            table,
            base: ScopeLevel::new(LevelKind::Statement, cwd),
            levels: Vec::new(),
            root,
            session_root,
        })
    }

    /// The variable bound to `/`.
    #[inline]
    pub fn root(&self) -> VarId {
        self.root
    }

    /// Parent of every `$name` variable.
    #[inline]
    pub fn session_root(&self) -> VarId {
        self.session_root
    }

    #[inline]
    pub fn table(&self) -> &VariableTable<H> {
        &self.table
    }

    /// Levels above the base level.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn current(&self) -> &ScopeLevel {
        self.levels.last().unwrap_or(&self.base)
    }

    fn current_mut(&mut self) -> &mut ScopeLevel {
        match self.levels.last_mut() {
            Some(level) => level,
            None => &mut self.base,
        }
    }

    /// Where relative names currently resolve.
    #[inline]
    pub fn working(&self) -> VarId {
        self.current().working
    }

    /// Move the current level's working cursor.
    pub fn navigate(&mut self, var: VarId) {
        tracing::trace!(?var, "navigate");
        self.current_mut().working = var;
    }

    pub fn enter_level(&mut self, kind: LevelKind) {
        let working = self.working();
        tracing::trace!(?kind, depth = self.levels.len() + 1, "enter level");
        self.levels.push(ScopeLevel::new(kind, working));
    }

    /// Leave the innermost level, which must be of `kind`.
    ///
    /// Every value referenced inside it is dropped, newest first. For
    /// `Statement` and `Paren` levels the working cursor flows back to the
    /// parent.
    pub fn leave_level<R>(&mut self, kind: LevelKind, resolver: &mut R) -> Result<(), Diagnostic>
    where
        R: Resolver<Handle = H>,
    {
        let innermost = match self.levels.last() {
            Some(level) => level.kind,
            None => return Err(errors::no_level_to_leave(kind)),
        };
        if innermost != kind {
            return Err(errors::level_mismatch(kind, innermost));
        }
        let Some(level) = self.levels.pop() else {
            return Err(errors::no_level_to_leave(kind));
        };
        tracing::trace!(?kind, values = level.pushed.len(), "leave level");

        let mut first_error = None;
        for &id in level.pushed.iter().rev() {
            if let Err(err) = self.pop_value(id, resolver) {
                first_error.get_or_insert(err);
            }
        }
        if kind.propagates_cursor() {
            self.current_mut().working = level.working;
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Record a reference to `id` in the current level.
    fn push_value(&mut self, id: ValueId) {
        self.current_mut().pushed.push(id);
    }

    fn pop_value<R>(&mut self, id: ValueId, resolver: &mut R) -> Result<(), Diagnostic>
    where
        R: Resolver<Handle = H>,
    {
        if let Some(handle) = self.table.unref(id).map_err(errors::dangling_value)? {
            resolver.release(handle);
        }
        Ok(())
    }

    /// The variable `name` under `parent`, referenced from the current level.
    ///
    /// An unbound variable is looked up through the resolver when its parent
    /// holds an object; otherwise, or when the lookup fails, it is bound to
    /// `Empty`. Lookup failure is never an error.
    pub fn lookup_or_create<R>(
        &mut self,
        resolver: &mut R,
        interner: &StringInterner,
        parent: VarId,
        name: Name,
    ) -> VarId
    where
        R: Resolver<Handle = H>,
    {
        self.ensure_bound(resolver, interner, parent);
        let var = self.table.find_or_insert(parent, name);
        match self.table.var(var).value {
            Some(id) => {
                if let Some(value) = self.table.value_mut(id) {
                    value.refcount += 1;
                }
                self.push_value(id);
            }
            None => self.bind_looked_up(resolver, interner, var),
        }
        var
    }

    /// Re-bind `var` and any unbound ancestors, outermost first.
    pub fn ensure_bound<R>(&mut self, resolver: &mut R, interner: &StringInterner, var: VarId)
    where
        R: Resolver<Handle = H>,
    {
        let mut unbound = Vec::new();
        let mut next = Some(var);
        while let Some(id) = next {
            if self.table.var(id).value.is_some() {
                break;
            }
            unbound.push(id);
            next = self.table.var(id).parent;
        }
        for id in unbound.into_iter().rev() {
            self.bind_looked_up(resolver, interner, id);
        }
    }

    fn bind_looked_up<R>(&mut self, resolver: &mut R, interner: &StringInterner, var: VarId)
    where
        R: Resolver<Handle = H>,
    {
        let Variable { parent, name, .. } = *self.table.var(var);
        let kind = match parent.and_then(|p| self.table.kind_of(p)) {
            Some(ValueKind::Resolved(handle)) => match resolver.resolve(handle, interner.lookup(name)) {
                Ok(Some(found)) => ValueKind::Resolved(found),
                Ok(None) => ValueKind::Empty,
                Err(err) => {
                    tracing::debug!(name = %interner.display(name), %err, "lookup failed");
                    ValueKind::Empty
                }
            },
            _ => ValueKind::Empty,
        };
        let id = self.table.bind(var, kind, 1, false);
        self.push_value(id);
    }

    /// Follow `->` links from `var`, at most `max_depth` of them.
    pub fn follow_links(&self, var: VarId, max_depth: usize) -> Result<VarId, Status> {
        let mut current = var;
        for _ in 0..=max_depth {
            match self.table.var(current).associated {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
        Err(Status::Loop)
    }

    /// Make `target` an alias of `source`, unless that closes a cycle.
    pub fn link(&mut self, target: VarId, source: VarId) -> Status {
        let mut next = Some(source);
        while let Some(id) = next {
            if id == target {
                return Status::Loop;
            }
            next = self.table.var(id).associated;
        }
        self.table.var_mut(target).associated = Some(source);
        Status::Ok
    }

    /// Store `bytes` as the temporary value of `var`.
    pub fn set_temporary<R>(&mut self, resolver: &mut R, var: VarId, bytes: Vec<u8>)
    where
        R: Resolver<Handle = H>,
    {
        if let Some(old) = self.table.set_temporary(var, bytes) {
            resolver.release(old);
        }
    }

    /// Store `bytes` in the child `name` of `parent`, creating it unresolved.
    pub fn set_child_temporary<R>(&mut self, resolver: &mut R, parent: VarId, name: Name, bytes: Vec<u8>)
    where
        R: Resolver<Handle = H>,
    {
        let var = self.table.find_or_insert(parent, name);
        self.set_temporary(resolver, var, bytes);
    }

    /// Bind `var`, currently `Empty`, to a freshly created object.
    pub fn set_resolved(&mut self, var: VarId, handle: H) {
        match self.table.var(var).value.and_then(|id| self.table.value_mut(id)) {
            Some(value) => value.kind = ValueKind::Resolved(handle),
            None => {
                let id = self.table.bind(var, ValueKind::Resolved(handle), 1, false);
                self.push_value(id);
            }
        }
    }

    /// The child `name` of `parent`, if it was ever created. Never resolves.
    pub fn find_child(&self, parent: VarId, name: Name) -> Option<VarId> {
        self.table.find(parent, name)
    }

    /// The base level's starting cursor.
    pub fn cwd(&self) -> VarId {
        self.base.cursor
    }

    /// Leave every level and release every handle.
    pub fn release_all<R>(&mut self, resolver: &mut R)
    where
        R: Resolver<Handle = H>,
    {
        self.levels.clear();
        self.base.pushed.clear();
        for handle in self.table.drain_handles() {
            resolver.release(handle);
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
