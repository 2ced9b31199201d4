//! Diagnostic reporting for the r4 command language.
//!
//! A statement either runs to completion or fails with exactly one
//! [`Diagnostic`]:
//! - Error code for searchability
//! - Category (lex, syntax, I/O, internal)
//! - Byte offset into the statement text
//! - For syntax errors, the parser state and the offending token
//!
//! Rendering is separate: [`emitter::TerminalEmitter`] prints a diagnostic
//! with the offending line and a caret.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Category, Diagnostic};
pub use error_code::ErrorCode;
