//! The `r4` command-line runner.
//!
//! Binds the evaluator to the real filesystem through [`FsResolver`], reads
//! statements from `-e` flags, a script file, or standard input, and renders
//! diagnostics with the terminal emitter.

mod fs_resolver;
mod options;
mod runner;

use std::sync::Once;

pub use fs_resolver::FsResolver;
pub use options::{parse_args, Command, Input, Options, UsageError};
pub use runner::{repl, run_script, RunSummary};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=r4_eval=debug`.
/// Output is an indented span tree on stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
                .with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
        }
    });
}
