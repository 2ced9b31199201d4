//! A [`Resolver`] over `std::fs`.

use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use r4_eval::Resolver;

/// Resolves names against a directory tree on disk.
///
/// Handles are paths. `/` is bound to `root` and relative names start at
/// `cwd`. Names containing `/` or NUL, and the names `.` and `..`, never
/// resolve. Symbolic links are followed like any shell follows them, so a
/// link inside `root` may lead to an object outside it.
#[derive(Debug)]
pub struct FsResolver {
    root: PathBuf,
    cwd: PathBuf,
    live: usize,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        FsResolver {
            root: root.into(),
            cwd: cwd.into(),
            live: 0,
        }
    }

    /// Rooted at `dir`, with relative names starting there too.
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        FsResolver::new(dir.clone(), dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// Handles given out and not yet released.
    pub fn live_handles(&self) -> usize {
        self.live
    }

    fn hand_out(&mut self, path: PathBuf) -> PathBuf {
        self.live += 1;
        path
    }
}

/// Check that `name` is a single path component.
fn component(name: &[u8]) -> io::Result<&OsStr> {
    if name.is_empty() || name == b"." || name == b".." || name.iter().any(|&b| b == b'/' || b == 0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{}` is not a file name", String::from_utf8_lossy(name)),
        ));
    }
    os_str(name)
}

#[cfg(unix)]
fn os_str(name: &[u8]) -> io::Result<&OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Ok(OsStr::from_bytes(name))
}

#[cfg(not(unix))]
fn os_str(name: &[u8]) -> io::Result<&OsStr> {
    std::str::from_utf8(name)
        .map(OsStr::new)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

impl Resolver for FsResolver {
    type Handle = PathBuf;
    type Reader = File;
    type Writer = File;

    fn root(&mut self) -> io::Result<PathBuf> {
        if !self.root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", self.root.display()),
            ));
        }
        Ok(self.hand_out(self.root.clone()))
    }

    fn cwd(&mut self) -> io::Result<PathBuf> {
        Ok(self.hand_out(self.cwd.clone()))
    }

    fn resolve(&mut self, parent: &PathBuf, name: &[u8]) -> io::Result<Option<PathBuf>> {
        let path = parent.join(component(name)?);
        match path.symlink_metadata() {
            Ok(_) => {
                tracing::trace!(path = %path.display(), "resolved");
                Ok(Some(self.hand_out(path)))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn create(&mut self, parent: &PathBuf, name: &[u8]) -> io::Result<PathBuf> {
        let path = parent.join(component(name)?);
        OpenOptions::new().write(true).create_new(true).open(&path)?;
        tracing::debug!(path = %path.display(), "created");
        Ok(self.hand_out(path))
    }

    fn open_read(&mut self, handle: &PathBuf) -> io::Result<File> {
        File::open(handle)
    }

    fn open_write_truncate(&mut self, handle: &PathBuf) -> io::Result<File> {
        OpenOptions::new().write(true).truncate(true).open(handle)
    }

    fn open_append(&mut self, handle: &PathBuf) -> io::Result<File> {
        OpenOptions::new().append(true).open(handle)
    }

    fn finish_write(&mut self, mut writer: File, end: Option<u64>) -> io::Result<()> {
        if let Some(end) = end {
            writer.set_len(end)?;
        }
        writer.flush()
    }

    fn same_object(&self, a: &PathBuf, b: &PathBuf) -> bool {
        a == b || same_file(a, b)
    }

    fn release(&mut self, handle: PathBuf) {
        self.live = self.live.saturating_sub(1);
        tracing::trace!(path = %handle.display(), "released");
    }
}

/// Same device and inode, so hard and symbolic links compare equal.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
