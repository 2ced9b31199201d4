//! Table-driven scanner for the r4 command language.
//!
//! Produces `(RawTag, len)` pairs over a byte slice. Keyword lookup, escape
//! decoding, and interning are left to the cooking layer in `r4_lexer`.
//!
//! # Design
//!
//! Every input byte maps to a [`CharClass`] through a 256-entry table. A
//! 2-D table indexed by `[state][class]` says what to do next: consume the
//! byte and move to another state, emit a token ending before the byte,
//! consume the byte and emit, or fail. Errors come back as error tags rather
//! than `Result::Err`, so a scanner never stops mid-stream.

mod class;
mod scanner;
mod table;
mod tag;

pub use class::{classify, CharClass};
pub use scanner::RawScanner;
pub use table::{action, Action, State};
pub use tag::{RawTag, RawToken};
