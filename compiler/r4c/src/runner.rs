//! Feeding statements to a session.
//!
//! One line is one statement. Blank lines are skipped. A failing statement
//! is reported and the next one runs anyway.

use std::io::{self, BufRead, Write};

use r4_diagnostic::emitter::TerminalEmitter;
use r4_eval::{Resolver, Session};

/// Outcome of a batch of statements.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub statements: usize,
    /// Statements that ended in a diagnostic.
    pub failures: usize,
}

impl RunSummary {
    pub fn is_success(self) -> bool {
        self.failures == 0
    }

    fn merge(&mut self, other: RunSummary) {
        self.statements += other.statements;
        self.failures += other.failures;
    }
}

/// Run every line of `source`. Diagnostics name `origin:line`.
pub fn run_script<R: Resolver, W: Write>(
    session: &mut Session<R>,
    source: &str,
    origin: &str,
    emitter: &mut TerminalEmitter<W>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for (index, line) in source.lines().enumerate() {
        summary.merge(run_line(session, line, &format!("{origin}:{}", index + 1), emitter));
    }
    emitter.flush();
    summary
}

fn run_line<R: Resolver, W: Write>(
    session: &mut Session<R>,
    line: &str,
    origin: &str,
    emitter: &mut TerminalEmitter<W>,
) -> RunSummary {
    if line.trim().is_empty() {
        return RunSummary::default();
    }
    match session.evaluate(line) {
        Ok(()) => RunSummary {
            statements: 1,
            failures: 0,
        },
        Err(diag) => {
            emitter.set_source(line);
            emitter.set_origin(origin);
            emitter.emit(&diag);
            RunSummary {
                statements: 1,
                failures: 1,
            }
        }
    }
}

/// Read-eval loop. The prompt shows the working cursor.
///
/// Ends at end of input; a read error ends it with that error.
pub fn repl<R: Resolver, I: BufRead, P: Write, W: Write>(
    session: &mut Session<R>,
    mut input: I,
    mut prompt: P,
    emitter: &mut TerminalEmitter<W>,
) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut line = String::new();
    for number in 1.. {
        write!(prompt, "{}> ", session.working_path())?;
        prompt.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(prompt)?;
            break;
        }
        let text = line.trim_end_matches(['\n', '\r']);
        summary.merge(run_line(session, text, &format!("<stdin>:{number}"), emitter));
        emitter.flush();
    }
    Ok(summary)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
