//! In-memory namespace.
//!
//! A tree of directories and files behind the [`Resolver`] trait, used by
//! tests and embedders that have no storage of their own. It can be told to
//! fail: opens of chosen objects, or every write past a byte budget, so the
//! evaluator's failure paths are reachable without a real disk.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::Resolver;

type Bytes = Rc<RefCell<Vec<u8>>>;

const ROOT: usize = 0;

#[derive(Debug)]
enum Node {
    Dir(BTreeMap<Vec<u8>, usize>),
    File(Bytes),
}

/// A handle into a [`MemoryResolver`]. Owned, never cloned.
#[derive(Debug, PartialEq, Eq)]
pub struct MemHandle(usize);

/// In-memory [`Resolver`] with fault injection.
#[derive(Debug)]
pub struct MemoryResolver {
    nodes: Vec<Node>,
    cwd: usize,
    /// Handles given out and not yet released.
    live: usize,
    failing_opens: FxHashSet<usize>,
    write_budget: Rc<Cell<Option<usize>>>,
}

impl Default for MemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResolver {
    /// An empty namespace: just the root directory, which is also the cwd.
    pub fn new() -> Self {
        MemoryResolver {
            nodes: vec![Node::Dir(BTreeMap::new())],
            cwd: ROOT,
            live: 0,
            failing_opens: FxHashSet::default(),
            write_budget: Rc::new(Cell::new(None)),
        }
    }

    /// Create the directory `path` and any missing parents.
    pub fn mkdir(&mut self, path: &str) -> io::Result<()> {
        self.mkdir_all(path).map(|_| ())
    }

    /// Create or overwrite the file at `path`, creating parent directories.
    pub fn write_file(&mut self, path: &str, contents: &[u8]) -> io::Result<()> {
        let (dir, name) = split_last(path)?;
        let parent = self.mkdir_all(dir)?;
        if let Some(id) = self.child(parent, name) {
            let Node::File(bytes) = &self.nodes[id] else {
                return Err(io::Error::other("is a directory"));
            };
            *bytes.borrow_mut() = contents.to_vec();
            return Ok(());
        }
        self.insert(parent, name, Node::File(Rc::new(RefCell::new(contents.to_vec()))))
            .map(|_| ())
    }

    /// Contents of the file at `path`.
    pub fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        match &self.nodes[self.find(path)?] {
            Node::File(bytes) => Some(bytes.borrow().clone()),
            Node::Dir(_) => None,
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Make `path`, which must be a directory, the start of relative names.
    pub fn set_cwd(&mut self, path: &str) -> io::Result<()> {
        let id = self.find(path).ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        if !matches!(self.nodes[id], Node::Dir(_)) {
            return Err(io::Error::other("not a directory"));
        }
        self.cwd = id;
        Ok(())
    }

    /// Make every later open of `path` fail.
    pub fn fail_open(&mut self, path: &str) -> io::Result<()> {
        let id = self.find(path).ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        self.failing_opens.insert(id);
        Ok(())
    }

    /// Let `bytes` more bytes be written, then fail every write.
    pub fn fail_writes_after(&mut self, bytes: usize) {
        self.write_budget.set(Some(bytes));
    }

    /// Handles given out and not yet released.
    pub fn live_handles(&self) -> usize {
        self.live
    }

    fn find(&self, path: &str) -> Option<usize> {
        segments(path).try_fold(ROOT, |dir, name| self.child(dir, name))
    }

    fn child(&self, dir: usize, name: &[u8]) -> Option<usize> {
        match self.nodes.get(dir)? {
            Node::Dir(children) => children.get(name).copied(),
            Node::File(_) => None,
        }
    }

    fn mkdir_all(&mut self, path: &str) -> io::Result<usize> {
        let mut dir = ROOT;
        for name in segments(path) {
            dir = match self.child(dir, name) {
                Some(id) => id,
                None => self.insert(dir, name, Node::Dir(BTreeMap::new()))?,
            };
        }
        Ok(dir)
    }

    fn insert(&mut self, parent: usize, name: &[u8], node: Node) -> io::Result<usize> {
        let id = self.nodes.len();
        match self.nodes.get_mut(parent) {
            Some(Node::Dir(children)) => {
                children.insert(name.to_vec(), id);
            }
            Some(Node::File(_)) => return Err(io::Error::other("not a directory")),
            None => return Err(io::Error::from(io::ErrorKind::NotFound)),
        }
        self.nodes.push(node);
        Ok(id)
    }

    fn handle(&mut self, id: usize) -> MemHandle {
        self.live += 1;
        MemHandle(id)
    }

    /// The bytes of a file that may be opened.
    fn file(&self, handle: &MemHandle) -> io::Result<Bytes> {
        if self.failing_opens.contains(&handle.0) {
            return Err(io::Error::other("injected open failure"));
        }
        match self.nodes.get(handle.0) {
            Some(Node::File(bytes)) => Ok(Rc::clone(bytes)),
            Some(Node::Dir(_)) => Err(io::Error::other("is a directory")),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn writer(&self, bytes: Bytes) -> MemWriter {
        MemWriter {
            bytes,
            budget: Rc::clone(&self.write_budget),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &[u8]> {
    path.as_bytes().split(|&b| b == b'/').filter(|s| !s.is_empty())
}

fn split_last(path: &str) -> io::Result<(&str, &[u8])> {
    let trimmed = path.trim_end_matches('/');
    let (dir, name) = trimmed.rsplit_once('/').unwrap_or(("", trimmed));
    if name.is_empty() {
        return Err(io::Error::from(io::ErrorKind::InvalidInput));
    }
    Ok((dir, name.as_bytes()))
}

impl Resolver for MemoryResolver {
    type Handle = MemHandle;
    type Reader = MemReader;
    type Writer = MemWriter;

    fn root(&mut self) -> io::Result<MemHandle> {
        Ok(self.handle(ROOT))
    }

    fn cwd(&mut self) -> io::Result<MemHandle> {
        Ok(self.handle(self.cwd))
    }

    fn resolve(&mut self, parent: &MemHandle, name: &[u8]) -> io::Result<Option<MemHandle>> {
        Ok(self.child(parent.0, name).map(|id| self.handle(id)))
    }

    fn create(&mut self, parent: &MemHandle, name: &[u8]) -> io::Result<MemHandle> {
        if name.is_empty() {
            return Err(io::Error::from(io::ErrorKind::InvalidInput));
        }
        if self.child(parent.0, name).is_some() {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        let id = self.insert(parent.0, name, Node::File(Rc::default()))?;
        Ok(self.handle(id))
    }

    fn open_read(&mut self, handle: &MemHandle) -> io::Result<MemReader> {
        Ok(MemReader {
            bytes: self.file(handle)?,
            pos: 0,
        })
    }

    fn open_write_truncate(&mut self, handle: &MemHandle) -> io::Result<MemWriter> {
        let bytes = self.file(handle)?;
        bytes.borrow_mut().clear();
        Ok(self.writer(bytes))
    }

    fn open_append(&mut self, handle: &MemHandle) -> io::Result<MemWriter> {
        let bytes = self.file(handle)?;
        Ok(self.writer(bytes))
    }

    fn finish_write(&mut self, writer: MemWriter, end: Option<u64>) -> io::Result<()> {
        if let Some(end) = end {
            let end = usize::try_from(end).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
            writer.bytes.borrow_mut().truncate(end);
        }
        Ok(())
    }

    fn same_object(&self, a: &MemHandle, b: &MemHandle) -> bool {
        a.0 == b.0
    }

    fn release(&mut self, handle: MemHandle) {
        tracing::trace!(?handle, "release");
        self.live = self.live.saturating_sub(1);
    }
}

/// Reads a file's live contents from the start.
#[derive(Debug)]
pub struct MemReader {
    bytes: Bytes,
    pos: usize,
}

impl io::Read for MemReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes = self.bytes.borrow();
        let rest = bytes.get(self.pos..).unwrap_or_default();
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// Appends to a file, honoring the resolver's write budget.
#[derive(Debug)]
pub struct MemWriter {
    bytes: Bytes,
    budget: Rc<Cell<Option<usize>>>,
}

impl io::Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = match self.budget.get() {
            Some(0) if !buf.is_empty() => return Err(io::Error::other("injected write failure")),
            Some(left) => {
                let n = left.min(buf.len());
                self.budget.set(Some(left - n));
                n
            }
            None => buf.len(),
        };
        self.bytes.borrow_mut().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
