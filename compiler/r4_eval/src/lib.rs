//! r4 evaluator: scope manager and tube.
//!
//! Runs statements of the r4 command language against a namespace reached
//! through the [`Resolver`] trait.
//!
//! # Architecture
//!
//! - [`VariableTable`]: session-long variables keyed by `(parent, name)`,
//!   plus a slab of reference-counted values
//! - `Scope`: the level stack over the table; each level drops the values
//!   it referenced when it is left
//! - `Interpreter`: walks one statement; assignments stream bytes through
//!   the tube one buffer at a time
//! - [`Session`]: lexes, parses, and runs statements, owning everything that
//!   outlives one of them
//!
//! [`MemoryResolver`] is an in-memory namespace for tests and embedding.

mod config;
pub mod errors;
mod interpreter;
mod memory;
mod resolver;
mod scope;
mod session;
mod status;
pub mod table;

pub use config::{SessionConfig, BUFFER_SIZE_ENV, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_ALIAS_DEPTH};
pub use memory::{MemHandle, MemReader, MemWriter, MemoryResolver};
pub use resolver::Resolver;
pub use session::{Session, SessionStats};
pub use status::Status;
pub use table::{ValueKind, VarId, VariableTable};
