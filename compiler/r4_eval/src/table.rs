//! Variable table and value slab.
//!
//! Variables live for the whole session and are unique per `(parent, name)`.
//! Values are reference counted slots bound to at most one variable. Links
//! between variables (`parent`, `associated`) and from variables to values
//! are plain indices; nothing here owns anything else.

use std::fmt;

use r4_ir::Name;
use rustc_hash::FxHashMap;

/// Index of a [`Variable`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct VarId(u32);

impl VarId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

/// Index of a [`Value`] slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ValueId(u32);

impl ValueId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueId({})", self.0)
    }
}

/// A named slot in the namespace tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// `None` only for the roots.
    pub parent: Option<VarId>,
    pub name: Name,
    /// Set by `->`: assignments to this variable go to the linked one.
    pub associated: Option<VarId>,
    pub value: Option<ValueId>,
}

/// What a variable is bound to.
#[derive(Debug, PartialEq, Eq)]
pub enum ValueKind<H> {
    /// Looked up, nothing there.
    Empty,
    /// An object of the resolver.
    Resolved(H),
    /// Bytes held by the session.
    Temporary(Vec<u8>),
}

#[derive(Debug)]
pub struct Value<H> {
    pub kind: ValueKind<H>,
    pub refcount: u32,
    pub owner: VarId,
    /// Pinned values survive a refcount of zero.
    pub pinned: bool,
}

/// Storage for variables and values.
pub struct VariableTable<H> {
    vars: Vec<Variable>,
    index: FxHashMap<(VarId, Name), VarId>,
    values: Vec<Option<Value<H>>>,
    free: Vec<ValueId>,
}

impl<H> Default for VariableTable<H> {
    fn default() -> Self {
        VariableTable {
            vars: Vec::new(),
            index: FxHashMap::default(),
            values: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<H: fmt::Debug> VariableTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless variable. Roots are not reachable through [`Self::find`].
    pub fn add_root(&mut self, name: Name) -> VarId {
        self.push_var(Variable {
            parent: None,
            name,
            associated: None,
            value: None,
        })
    }

    pub fn find(&self, parent: VarId, name: Name) -> Option<VarId> {
        self.index.get(&(parent, name)).copied()
    }

    /// The variable for `(parent, name)`, created unbound when missing.
    pub fn find_or_insert(&mut self, parent: VarId, name: Name) -> VarId {
        if let Some(id) = self.find(parent, name) {
            return id;
        }
        let id = self.push_var(Variable {
            parent: Some(parent),
            name,
            associated: None,
            value: None,
        });
        self.index.insert((parent, name), id);
        id
    }

    #[inline]
    pub fn var(&self, id: VarId) -> &Variable {
        &self.vars[id.index()]
    }

    #[inline]
    pub fn var_mut(&mut self, id: VarId) -> &mut Variable {
        &mut self.vars[id.index()]
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn value(&self, id: ValueId) -> Option<&Value<H>> {
        self.values.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn value_mut(&mut self, id: ValueId) -> Option<&mut Value<H>> {
        self.values.get_mut(id.index())?.as_mut()
    }

    /// The value bound to `var`, if any.
    pub fn value_of(&self, var: VarId) -> Option<&Value<H>> {
        self.value(self.var(var).value?)
    }

    /// The kind of the value bound to `var`, if any.
    pub fn kind_of(&self, var: VarId) -> Option<&ValueKind<H>> {
        self.value_of(var).map(|value| &value.kind)
    }

    /// Number of occupied value slots.
    pub fn live_values(&self) -> usize {
        self.values.len() - self.free.len()
    }

    /// Bind the unbound `var` to a fresh value.
    pub fn bind(&mut self, var: VarId, kind: ValueKind<H>, refcount: u32, pinned: bool) -> ValueId {
        debug_assert!(self.var(var).value.is_none(), "{var:?} is already bound");
        let value = Value {
            kind,
            refcount,
            owner: var,
            pinned,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.values[id.index()] = Some(value);
                id
            }
            None => {
                let id = ValueId(next_index(self.values.len()));
                self.values.push(Some(value));
                id
            }
        };
        self.var_mut(var).value = Some(id);
        id
    }

    /// Store `bytes` as the pinned temporary value of `var`, in place when
    /// it is bound. Returns the handle the value held before, if any.
    pub fn set_temporary(&mut self, var: VarId, bytes: Vec<u8>) -> Option<H> {
        let bound = self.var(var).value;
        match bound.and_then(|id| self.value_mut(id)) {
            Some(value) => {
                value.pinned = true;
                match std::mem::replace(&mut value.kind, ValueKind::Temporary(bytes)) {
                    ValueKind::Resolved(handle) => Some(handle),
                    ValueKind::Empty | ValueKind::Temporary(_) => None,
                }
            }
            None => {
                self.var_mut(var).value = None;
                self.bind(var, ValueKind::Temporary(bytes), 0, true);
                None
            }
        }
    }

    /// Drop one reference to `id`.
    ///
    /// When that was the last reference to an unpinned value, the slot is
    /// freed, its variable unbound, and its handle (if any) handed back for
    /// release. `Err` means `id` does not name a live value.
    pub fn unref(&mut self, id: ValueId) -> Result<Option<H>, ValueId> {
        let value = self.value_mut(id).ok_or(id)?;
        value.refcount = value.refcount.saturating_sub(1);
        if value.refcount > 0 || value.pinned {
            return Ok(None);
        }
        let value = self.values[id.index()].take().ok_or(id)?;
        self.free.push(id);
        self.var_mut(value.owner).value = None;
        match value.kind {
            ValueKind::Resolved(handle) => Ok(Some(handle)),
            ValueKind::Empty | ValueKind::Temporary(_) => Ok(None),
        }
    }

    /// Free every value and hand back all handles, leaving every variable
    /// unbound.
    pub fn drain_handles(&mut self) -> Vec<H> {
        for var in &mut self.vars {
            var.value = None;
        }
        self.free.clear();
        self.values
            .drain(..)
            .flatten()
            .filter_map(|value| match value.kind {
                ValueKind::Resolved(handle) => Some(handle),
                ValueKind::Empty | ValueKind::Temporary(_) => None,
            })
            .collect()
    }

    fn push_var(&mut self, var: Variable) -> VarId {
        let id = VarId(next_index(self.vars.len()));
        self.vars.push(var);
        id
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a session cannot hold 2^32 variables or values"
)]
#[inline]
fn next_index(len: usize) -> u32 {
    len as u32
}
