//! Diagnostic constructors for the evaluator.
//!
//! Internal errors mean a scope or table invariant broke; they abort the
//! statement. I/O diagnostics are only logged: the failure itself is
//! recorded in the target's `_result`.

use std::io;

use r4_diagnostic::{Diagnostic, ErrorCode};
use r4_ir::{LevelKind, Span};

use crate::table::ValueId;

#[cold]
pub fn level_mismatch(leaving: LevelKind, innermost: LevelKind) -> Diagnostic {
    Diagnostic::new(
        ErrorCode::E9001,
        format!("leaving a {leaving:?} level while a {innermost:?} level is innermost"),
        Span::DUMMY,
    )
}

#[cold]
pub fn no_level_to_leave(leaving: LevelKind) -> Diagnostic {
    Diagnostic::new(
        ErrorCode::E9001,
        format!("leaving a {leaving:?} level, but only the base level is left"),
        Span::DUMMY,
    )
}

#[cold]
pub fn dangling_value(id: ValueId) -> Diagnostic {
    Diagnostic::new(
        ErrorCode::E9002,
        format!("{id:?} is not a live value"),
        Span::DUMMY,
    )
}

#[cold]
pub fn not_a_name(span: Span) -> Diagnostic {
    Diagnostic::new(ErrorCode::E9003, "expected a name", span)
}

#[cold]
pub fn not_a_source(what: &str, span: Span) -> Diagnostic {
    Diagnostic::new(
        ErrorCode::E9003,
        format!("{what} reached the tube as a source"),
        span,
    )
}

#[cold]
pub fn open_failed(err: &io::Error, span: Span) -> Diagnostic {
    Diagnostic::new(
        ErrorCode::E5001,
        format!("could not open the target: {err}"),
        span,
    )
}

#[cold]
pub fn pump_failed(err: &io::Error, written: u64, span: Span) -> Diagnostic {
    Diagnostic::new(
        ErrorCode::E5002,
        format!("pump aborted after {written} bytes: {err}"),
        span,
    )
}
