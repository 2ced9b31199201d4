//! r4 command runner

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use r4_diagnostic::emitter::TerminalEmitter;
use r4_diagnostic::ErrorCode;
use r4_eval::{Session, SessionConfig};
use r4c::{parse_args, repl, run_script, Command, FsResolver, Input, Options, RunSummary};

fn main() -> ExitCode {
    r4c::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args) {
        Ok(Command::Run(options)) => run(&options),
        Ok(Command::Explain(code)) => explain(&code),
        Ok(Command::Help) => {
            print_usage();
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("r4 {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            ExitCode::from(2)
        }
    }
}

fn run(options: &Options) -> ExitCode {
    let resolver = match resolver_for(options) {
        Ok(resolver) => resolver,
        Err(err) => {
            eprintln!("error: cannot find the working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut config = SessionConfig::from_env();
    if let Some(size) = options.buffer_size {
        config = config.with_buffer_size(size);
    }
    let mut session = match Session::new(resolver, config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: cannot open the namespace root: {err}");
            return ExitCode::FAILURE;
        }
    };

    let is_tty = io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(options.color, is_tty);
    let mut summary = RunSummary::default();

    for (index, statement) in options.statements.iter().enumerate() {
        let origin = format!("-e #{}", index + 1);
        let outcome = run_script(&mut session, statement, &origin, &mut emitter);
        summary.statements += outcome.statements;
        summary.failures += outcome.failures;
    }

    let outcome = match &options.input {
        Input::None => Ok(RunSummary::default()),
        Input::File(path) => match std::fs::read_to_string(path) {
            Ok(source) => Ok(run_script(
                &mut session,
                &source,
                &path.display().to_string(),
                &mut emitter,
            )),
            Err(err) => {
                eprintln!("error: cannot read {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        Input::Stdin if io::stdin().is_terminal() => {
            repl(&mut session, io::stdin().lock(), io::stdout(), &mut emitter)
        }
        Input::Stdin => match io::read_to_string(io::stdin()) {
            Ok(source) => Ok(run_script(&mut session, &source, "<stdin>", &mut emitter)),
            Err(err) => Err(err),
        },
    };
    match outcome {
        Ok(outcome) => {
            summary.statements += outcome.statements;
            summary.failures += outcome.failures;
        }
        Err(err) => {
            eprintln!("error: reading standard input: {err}");
            return ExitCode::FAILURE;
        }
    }

    if options.stats {
        let stats = session.stats();
        eprintln!(
            "statements: {} ({} failed), pumps: {} ({} failed), bytes: {}",
            stats.statements,
            stats.failed_statements,
            stats.pumps,
            stats.failed_pumps,
            stats.bytes_pumped
        );
    }

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// With `--root`, relative names start at the root too; otherwise `/` is
/// the filesystem root and relative names start at the process cwd.
fn resolver_for(options: &Options) -> io::Result<FsResolver> {
    match &options.root {
        Some(dir) => Ok(FsResolver::rooted_at(dir.clone())),
        None => Ok(FsResolver::new(PathBuf::from("/"), std::env::current_dir()?)),
    }
}

fn explain(text: &str) -> ExitCode {
    let Some(code) = ErrorCode::parse(text) else {
        eprintln!("Unknown error code: {text}");
        eprintln!();
        eprintln!("Codes look like E0001 (lex), E1001 (syntax), E5001 (I/O), E9001 (internal).");
        return ExitCode::FAILURE;
    };
    println!("{code}: {} ({})", code.description(), code.category());
    ExitCode::SUCCESS
}

fn print_usage() {
    println!("r4: run namespace statements");
    println!();
    println!("Usage: r4 [options] [FILE | -]");
    println!();
    println!("Statements are read one per line from FILE, or from standard input");
    println!("when no FILE and no -e is given. A terminal gets an interactive prompt.");
    println!();
    println!("Options:");
    println!("  -e <statement>       Run a statement first (repeatable)");
    println!("  --root=<dir>         Directory bound to `/` (default: the filesystem root)");
    println!("  --buffer-size=<n>    Bytes moved per pump step (default: 4096, env R4_BUFFER_SIZE)");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!("  --stats              Print session counters at exit");
    println!("  --explain <code>     Explain an error code (e.g., E1004)");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Examples:");
    println!("  r4 -e '\"/tmp/x\" <- \"hello\"'");
    println!("  r4 -e 'a <- (b, c)' --root=/srv/data");
    println!("  r4 script.r4");
    println!("  RUST_LOG=r4_eval=debug r4 script.r4");
}
