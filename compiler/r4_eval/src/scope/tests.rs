use pretty_assertions::assert_eq;
use r4_diagnostic::ErrorCode;

use super::*;
use crate::memory::MemHandle;
use crate::MemoryResolver;

struct Fixture {
    fs: MemoryResolver,
    interner: StringInterner,
    scope: Scope<MemHandle>,
}

impl Fixture {
    fn new() -> Self {
        let mut fs = MemoryResolver::new();
        fs.write_file("/tmp/x", b"hello").unwrap();
        fs.mkdir("/home").unwrap();
        let interner = StringInterner::new();
        let scope = Scope::new(&mut fs, &interner).unwrap();
        Fixture {
            fs,
            interner,
            scope,
        }
    }

    fn lookup(&mut self, parent: VarId, name: &str) -> VarId {
        let name = self.interner.intern(name.as_bytes());
        self.scope
            .lookup_or_create(&mut self.fs, &self.interner, parent, name)
    }

    fn leave(&mut self, kind: LevelKind) -> Result<(), Diagnostic> {
        self.scope.leave_level(kind, &mut self.fs)
    }

    fn is_resolved(&self, var: VarId) -> bool {
        matches!(self.scope.table().kind_of(var), Some(ValueKind::Resolved(_)))
    }
}

#[test]
fn new_scope_holds_root_and_cwd() {
    let f = Fixture::new();
    assert_eq!(f.fs.live_handles(), 2);
    assert_eq!(f.scope.depth(), 0);
    assert_eq!(f.scope.working(), f.scope.cwd());
    assert!(f.is_resolved(f.scope.root()));
}

#[test]
fn lookup_resolves_under_objects() {
    let mut f = Fixture::new();
    f.scope.enter_level(LevelKind::Statement);
    let root = f.scope.root();
    let tmp = f.lookup(root, "tmp");
    let x = f.lookup(tmp, "x");
    let y = f.lookup(tmp, "y");
    assert!(f.is_resolved(x));
    assert_eq!(f.scope.table().kind_of(y), Some(&ValueKind::Empty));
    assert_eq!(f.fs.live_handles(), 4);

    f.leave(LevelKind::Statement).unwrap();
    assert_eq!(f.fs.live_handles(), 2);
    assert_eq!(f.scope.table().var(x).value, None);
    assert_eq!(f.scope.table().var(y).value, None);
}

#[test]
fn repeated_lookup_shares_the_value() {
    let mut f = Fixture::new();
    let root = f.scope.root();
    f.scope.enter_level(LevelKind::Statement);
    let tmp = f.lookup(root, "tmp");
    f.scope.enter_level(LevelKind::Paren);
    assert_eq!(f.lookup(root, "tmp"), tmp);
    assert_eq!(f.scope.table().value_of(tmp).unwrap().refcount, 2);

    f.leave(LevelKind::Paren).unwrap();
    assert!(f.is_resolved(tmp));
    f.leave(LevelKind::Statement).unwrap();
    assert!(!f.is_resolved(tmp));
    assert_eq!(f.fs.live_handles(), 2);
}

#[test]
fn unbound_parents_are_looked_up_again() {
    let mut f = Fixture::new();
    let root = f.scope.root();
    f.scope.enter_level(LevelKind::Statement);
    let tmp = f.lookup(root, "tmp");
    f.leave(LevelKind::Statement).unwrap();

    f.scope.enter_level(LevelKind::Statement);
    let x = f.lookup(tmp, "x");
    assert!(f.is_resolved(tmp));
    assert!(f.is_resolved(x));
    f.leave(LevelKind::Statement).unwrap();
    assert_eq!(f.fs.live_handles(), 2);
}

#[test]
fn session_variables_are_never_resolved() {
    let mut f = Fixture::new();
    let session = f.scope.session_root();
    f.scope.enter_level(LevelKind::Statement);
    let v = f.lookup(session, "tmp");
    assert_eq!(f.scope.table().kind_of(v), Some(&ValueKind::Empty));
    assert_eq!(f.fs.live_handles(), 2);

    f.scope.set_temporary(&mut f.fs, v, b"kept".to_vec());
    f.leave(LevelKind::Statement).unwrap();
    assert_eq!(
        f.scope.table().kind_of(v),
        Some(&ValueKind::Temporary(b"kept".to_vec()))
    );
}

#[test]
fn paren_propagates_the_cursor() {
    let mut f = Fixture::new();
    let root = f.scope.root();
    f.scope.enter_level(LevelKind::Statement);
    f.scope.enter_level(LevelKind::Paren);
    let home = f.lookup(root, "home");
    f.scope.navigate(home);
    f.leave(LevelKind::Paren).unwrap();
    assert_eq!(f.scope.working(), home);
    f.leave(LevelKind::Statement).unwrap();
    assert_eq!(f.scope.working(), home);
}

#[test]
fn bracket_and_brace_isolate_the_cursor() {
    let mut f = Fixture::new();
    let root = f.scope.root();
    let start = f.scope.working();
    for kind in [LevelKind::Bracket, LevelKind::Brace] {
        f.scope.enter_level(kind);
        assert_eq!(f.scope.current().cursor, start);
        let home = f.lookup(root, "home");
        f.scope.navigate(home);
        f.leave(kind).unwrap();
        assert_eq!(f.scope.working(), start);
    }
}

#[test]
fn mismatched_leave_is_internal() {
    let mut f = Fixture::new();
    f.scope.enter_level(LevelKind::Paren);
    let err = f.leave(LevelKind::Brace).unwrap_err();
    assert_eq!(err.code, ErrorCode::E9001);
    assert_eq!(f.scope.depth(), 1);
    f.leave(LevelKind::Paren).unwrap();
    assert_eq!(f.leave(LevelKind::Statement).unwrap_err().code, ErrorCode::E9001);
}

#[test]
fn links_refuse_cycles() {
    let mut f = Fixture::new();
    let session = f.scope.session_root();
    f.scope.enter_level(LevelKind::Statement);
    let a = f.lookup(session, "a");
    let b = f.lookup(session, "b");
    let c = f.lookup(session, "c");
    assert_eq!(f.scope.link(a, b), Status::Ok);
    assert_eq!(f.scope.link(b, c), Status::Ok);
    assert_eq!(f.scope.link(c, a), Status::Loop);
    assert_eq!(f.scope.link(a, a), Status::Loop);
    assert_eq!(f.scope.follow_links(a, 8), Ok(c));
    assert_eq!(f.scope.follow_links(a, 1), Err(Status::Loop));
}

#[test]
fn release_all_returns_every_handle() {
    let mut f = Fixture::new();
    let root = f.scope.root();
    f.scope.enter_level(LevelKind::Statement);
    f.lookup(root, "tmp");
    f.scope.release_all(&mut f.fs);
    assert_eq!(f.fs.live_handles(), 0);
}
