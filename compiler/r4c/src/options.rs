//! Command-line flags.

use std::fmt;
use std::path::PathBuf;

use r4_diagnostic::emitter::ColorMode;

/// Where statements come from after the `-e` ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Only the `-e` statements.
    None,
    /// Standard input; a REPL when it is a terminal.
    Stdin,
    File(PathBuf),
}

/// What to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Explain(String),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Directory bound to `/`. Relative names start at the process
    /// working directory unless this is given.
    pub root: Option<PathBuf>,
    pub buffer_size: Option<usize>,
    pub statements: Vec<String>,
    pub input: Input,
    pub color: ColorMode,
    /// Print session counters to stderr at exit.
    pub stats: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            root: None,
            buffer_size: None,
            statements: Vec::new(),
            input: Input::Stdin,
            color: ColorMode::Auto,
            stats: false,
        }
    }
}

/// A flag the runner does not understand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

/// Parse arguments, not including the program name.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut options = Options::default();
    let mut file = None;
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" | "help" => return Ok(Command::Help),
            "-V" | "--version" | "version" => return Ok(Command::Version),
            "--explain" | "explain" => {
                let code = args
                    .get(i + 1)
                    .ok_or_else(|| UsageError("--explain needs an error code".to_owned()))?;
                return Ok(Command::Explain(code.clone()));
            }
            "-e" => {
                let statement = args
                    .get(i + 1)
                    .ok_or_else(|| UsageError("-e needs a statement".to_owned()))?;
                options.statements.push(statement.clone());
                i += 1;
            }
            "--stats" => options.stats = true,
            "-" => set_file(&mut file, Input::Stdin)?,
            _ => {
                if let Some(dir) = arg.strip_prefix("--root=") {
                    options.root = Some(PathBuf::from(dir));
                } else if let Some(size) = arg.strip_prefix("--buffer-size=") {
                    options.buffer_size = Some(parse_buffer_size(size)?);
                } else if let Some(mode) = arg.strip_prefix("--color=") {
                    options.color = parse_color(mode)?;
                } else if arg.starts_with('-') {
                    return Err(UsageError(format!("unknown option `{arg}`")));
                } else {
                    set_file(&mut file, Input::File(PathBuf::from(arg)))?;
                }
            }
        }
        i += 1;
    }
    options.input = match file {
        Some(input) => input,
        None if options.statements.is_empty() => Input::Stdin,
        None => Input::None,
    };
    Ok(Command::Run(options))
}

fn set_file(slot: &mut Option<Input>, input: Input) -> Result<(), UsageError> {
    if slot.is_some() {
        return Err(UsageError("only one script can be given".to_owned()));
    }
    *slot = Some(input);
    Ok(())
}

fn parse_buffer_size(text: &str) -> Result<usize, UsageError> {
    match text.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(UsageError(format!(
            "--buffer-size needs a positive number, got `{text}`"
        ))),
    }
}

fn parse_color(text: &str) -> Result<ColorMode, UsageError> {
    match text {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err(UsageError(format!(
            "--color is one of auto, always, never; got `{text}`"
        ))),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
