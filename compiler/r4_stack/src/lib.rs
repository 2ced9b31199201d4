//! Stack growth for deeply nested statements.
//!
//! The parser and the evaluator both recurse once per nesting level, so a
//! statement such as `((((...a...))))` can be arbitrarily deep. Wrapping each
//! recursive step in [`ensure_sufficient_stack`] moves the work onto a
//! freshly allocated segment when the current one runs low.
//!
//! On `wasm32` the call is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated segment.
const SEGMENT: usize = 512 * 1024;

/// Run `f`, first growing the stack if fewer than `RED_ZONE` bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
