use super::*;
use crate::{ExprKind, Name, Span};
use pretty_assertions::assert_eq;

fn literal(arena: &mut ExprArena, raw: u32) -> ExprId {
    arena.alloc_expr(Expr::new(ExprKind::Literal(Name::from_raw(raw)), Span::DUMMY))
}

#[test]
fn test_alloc_and_get() {
    let mut arena = ExprArena::new();
    let a = literal(&mut arena, 1);
    let b = literal(&mut arena, 2);

    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.expr_count(), 2);
    assert_eq!(
        arena.get_expr(b).kind,
        ExprKind::Literal(Name::from_raw(2))
    );
}

#[test]
fn test_expr_lists_are_contiguous() {
    let mut arena = ExprArena::new();
    let ids: Vec<_> = (0..3).map(|i| literal(&mut arena, i)).collect();

    let first = arena.alloc_expr_list(ids[..2].iter().copied());
    let second = arena.alloc_expr_list([ids[2]]);

    assert_eq!(arena.get_expr_list(first), &ids[..2]);
    assert_eq!(arena.get_expr_list(second), &ids[2..]);
    assert_eq!(second.start, 2);
}

#[test]
fn test_empty_list() {
    let mut arena = ExprArena::new();
    let empty = arena.alloc_expr_list(std::iter::empty());
    assert_eq!(empty.len, 0);
    assert!(arena.get_expr_list(empty).is_empty());
}
