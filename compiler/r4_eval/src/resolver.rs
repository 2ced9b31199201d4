//! The namespace behind the language.

use std::fmt;
use std::io;

/// Maps names to objects and moves their bytes.
///
/// The evaluator never touches storage itself: every lookup, open, and
/// release goes through this trait. Handles are owned by the variable table
/// and come back through [`Resolver::release`] once the last level that
/// referenced them is left.
pub trait Resolver {
    type Handle: fmt::Debug;
    type Reader: io::Read;
    type Writer: io::Write;

    /// The namespace root, bound to `/`.
    fn root(&mut self) -> io::Result<Self::Handle>;

    /// Where relative names start.
    fn cwd(&mut self) -> io::Result<Self::Handle>;

    /// Look up `name` under `parent`. `Ok(None)` means there is no such object.
    fn resolve(&mut self, parent: &Self::Handle, name: &[u8]) -> io::Result<Option<Self::Handle>>;

    /// Create an empty object `name` under `parent`.
    fn create(&mut self, parent: &Self::Handle, name: &[u8]) -> io::Result<Self::Handle>;

    fn open_read(&mut self, handle: &Self::Handle) -> io::Result<Self::Reader>;

    fn open_write_truncate(&mut self, handle: &Self::Handle) -> io::Result<Self::Writer>;

    fn open_append(&mut self, handle: &Self::Handle) -> io::Result<Self::Writer>;

    /// Close a writer. With `end`, the object is cut to that length first.
    fn finish_write(&mut self, writer: Self::Writer, end: Option<u64>) -> io::Result<()>;

    /// Whether two handles lead to the same object. A pump whose source is
    /// its own target reads what the target held before the pump opened it.
    fn same_object(&self, a: &Self::Handle, b: &Self::Handle) -> bool;

    fn release(&mut self, handle: Self::Handle);
}
