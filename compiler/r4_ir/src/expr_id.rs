//! Indices into a statement's [`ExprArena`](crate::ExprArena).

use std::fmt;

/// A node of the statement's tree. Four bytes; children are stored as
/// these, never as boxes.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// The items of a `List` or `Sequence`: a window into the arena's flat
/// list storage.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(C)]
pub struct ExprRange {
    pub start: u32,
    pub len: u16,
}

impl ExprRange {
    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        ExprRange { start, len }
    }

    /// One past the last item.
    #[inline]
    pub const fn end(self) -> usize {
        self.start as usize + self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprRange({}..{})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_end_covers_its_items() {
        let range = ExprRange::new(3, 2);
        assert_eq!(range.end(), 5);
        assert_eq!(format!("{range:?}"), "ExprRange(3..5)");
    }

    #[test]
    fn ids_stay_small() {
        assert_eq!(std::mem::size_of::<ExprId>(), 4);
        assert_eq!(std::mem::size_of::<ExprRange>(), 8);
    }
}
