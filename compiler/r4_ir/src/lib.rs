//! r4 IR - words, tokens, and expression trees
//!
//! This crate contains the core data structures shared by every phase of the
//! r4 command language:
//! - Spans for source locations
//! - Names for interned words (byte strings, not necessarily UTF-8)
//! - Tokens and `TokenList` for lexer output
//! - Expression nodes and the per-statement `ExprArena`
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: lexeme text → `Name(u32)`
//! - **Flatten Everything**: No `Box<Expr>`, use `ExprId(u32)` indices
//! - **Bulk Free**: one arena per statement, dropped as a whole

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod span;
mod token;

pub use arena::ExprArena;
pub use ast::{AssignOp, BinaryOp, Expr, ExprKind, LevelKind, UnaryOp};
pub use expr_id::{ExprId, ExprRange};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
