use std::fs;
use std::io::Read;

use pretty_assertions::assert_eq;
use r4_eval::{Session, SessionConfig};
use tempfile::tempdir;

use super::*;

#[test]
fn resolve_finds_existing_entries_only() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"x").unwrap();
    let mut fs = FsResolver::rooted_at(dir.path());
    let root = fs.root().unwrap();

    assert_eq!(fs.resolve(&root, b"a").unwrap(), Some(dir.path().join("a")));
    assert_eq!(fs.resolve(&root, b"missing").unwrap(), None);
}

#[test]
fn dot_names_never_resolve() {
    let dir = tempdir().unwrap();
    let mut fs = FsResolver::rooted_at(dir.path());
    let root = fs.root().unwrap();

    for name in [&b".."[..], b".", b"a/b", b"a\0b", b""] {
        let err = fs.resolve(&root, name).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}

#[test]
fn create_refuses_to_clobber() {
    let dir = tempdir().unwrap();
    let mut fs = FsResolver::rooted_at(dir.path());
    let root = fs.root().unwrap();

    let made = fs.create(&root, b"new").unwrap();
    assert!(made.is_file());
    let err = fs.create(&root, b"new").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
}

#[test]
fn finish_write_cuts_to_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("f");
    fs::write(&path, b"0123456789").unwrap();
    let mut fs = FsResolver::rooted_at(dir.path());

    let mut writer = fs.open_append(&path).unwrap();
    writer.write_all(b"ab").unwrap();
    fs.finish_write(writer, None).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"0123456789ab");

    let writer = fs.open_append(&path).unwrap();
    fs.finish_write(writer, Some(4)).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"0123");
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let mut fs = FsResolver::rooted_at(dir.path().join("nowhere"));
    assert_eq!(fs.root().unwrap_err().kind(), io::ErrorKind::NotFound);
}

#[test]
fn session_pumps_between_files() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("tmp")).unwrap();
    fs::write(dir.path().join("b"), b"bee").unwrap();
    fs::write(dir.path().join("c"), b"sea").unwrap();

    let mut session =
        Session::new(FsResolver::rooted_at(dir.path()), SessionConfig::default()).unwrap();
    session.evaluate("\"/tmp/x\" <- (b, `-`, c)").unwrap();
    session.evaluate("/tmp/x <<- \"!\"").unwrap();

    assert_eq!(fs::read(dir.path().join("tmp/x")).unwrap(), b"bee-sea!");
    assert_eq!(session.read_variable("/tmp/x/_result").unwrap(), b"0");
    assert_eq!(session.read_variable("/tmp/x/_length").unwrap(), b"1");
}

#[test]
fn replace_shrinks_a_longer_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("f"), b"a long old body").unwrap();

    let mut session =
        Session::new(FsResolver::rooted_at(dir.path()), SessionConfig::default()).unwrap();
    session.evaluate("f <- `new`").unwrap();

    assert_eq!(fs::read(dir.path().join("f")).unwrap(), b"new");
}

#[cfg(unix)]
#[test]
fn symlinks_are_followed_out_of_the_root() {
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("secret"), b"beyond").unwrap();
    let dir = tempdir().unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("out")).unwrap();

    let mut fs = FsResolver::rooted_at(dir.path());
    let root = fs.root().unwrap();
    let out = fs.resolve(&root, b"out").unwrap().unwrap();
    let secret = fs.resolve(&out, b"secret").unwrap().unwrap();

    let mut bytes = Vec::new();
    fs.open_read(&secret).unwrap().read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, b"beyond");
    assert!(fs.same_object(&secret, &outside.path().join("secret")));
}

#[test]
fn same_object_compares_files_not_paths() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"x").unwrap();
    fs::write(dir.path().join("b"), b"x").unwrap();
    fs::hard_link(dir.path().join("a"), dir.path().join("hard")).unwrap();
    let fs = FsResolver::rooted_at(dir.path());

    let a = dir.path().join("a");
    assert!(fs.same_object(&a, &a));
    assert!(fs.same_object(&a, &dir.path().join("hard")));
    assert!(!fs.same_object(&a, &dir.path().join("b")));
    assert!(!fs.same_object(&a, &dir.path().join("missing")));
}

#[test]
fn pumping_a_file_into_itself_reads_the_old_contents() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("c"), b"333").unwrap();
    fs::write(dir.path().join("a"), b"1").unwrap();

    let mut session =
        Session::new(FsResolver::rooted_at(dir.path()), SessionConfig::default()).unwrap();
    session.evaluate("c <<- c").unwrap();
    assert_eq!(fs::read(dir.path().join("c")).unwrap(), b"333333");
    session.evaluate("c <- c").unwrap();
    assert_eq!(fs::read(dir.path().join("c")).unwrap(), b"333333");
    session.evaluate("c <- (a, c)").unwrap();
    assert_eq!(fs::read(dir.path().join("c")).unwrap(), b"1333333");
    assert_eq!(session.read_variable("c/_length").unwrap(), b"7");
}
