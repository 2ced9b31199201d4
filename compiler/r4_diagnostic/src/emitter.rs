//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::Diagnostic;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<String>,
    origin: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            origin: None,
        }
    }

    /// Attach the statement text so diagnostics can show a snippet.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_owned());
        self
    }

    /// Replace the statement text (one emitter serves a whole REPL session).
    pub fn set_source(&mut self, source: &str) {
        self.source = Some(source.to_owned());
    }

    /// Name of where the statement came from (`script.r4:3`, `<stdin>`).
    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.origin = Some(origin.into());
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    /// Emit a single diagnostic.
    pub fn emit(&mut self, diag: &Diagnostic) {
        self.write_colored(&format!("error[{}]", diag.code), colors::ERROR);
        let _ = writeln!(self.writer, ": {}", diag.message);

        let location = match &self.origin {
            Some(origin) => format!("{origin}, offset {}", diag.offset()),
            None => format!("offset {}", diag.offset()),
        };
        self.write_colored("  --> ", colors::SECONDARY);
        let _ = writeln!(self.writer, "{location}");

        if let Some((line_no, line, column)) = self.locate(diag.offset() as usize) {
            let gutter = line_no.to_string();
            let pad = " ".repeat(gutter.len());
            let width = (diag.span.len() as usize).clamp(1, line.len().saturating_sub(column).max(1));
            self.write_colored(&format!("{pad} |"), colors::SECONDARY);
            let _ = writeln!(self.writer);
            self.write_colored(&format!("{gutter} | "), colors::SECONDARY);
            let _ = writeln!(self.writer, "{line}");
            self.write_colored(&format!("{pad} | "), colors::SECONDARY);
            let marker = format!("{}{}", " ".repeat(column), "^".repeat(width));
            self.write_colored(&marker, colors::ERROR);
            let _ = writeln!(self.writer);
        }

        if let (Some(state), Some(token)) = (diag.parser_state, diag.token.as_deref()) {
            let _ = writeln!(self.writer, "  = note: found `{token}` while parsing {state}");
        }
        if let Some(help) = &diag.help {
            self.write_colored("  = help", colors::HELP);
            let _ = writeln!(self.writer, ": {help}");
        }
    }

    /// Find the 1-based line number, line text, and column of `offset`.
    fn locate(&self, offset: usize) -> Option<(usize, String, usize)> {
        let source = self.source.as_deref()?;
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[offset..]
            .find('\n')
            .map_or(source.len(), |i| offset + i);
        let line_no = source[..line_start].matches('\n').count() + 1;
        Some((line_no, source[line_start..line_end].to_owned(), offset - line_start))
    }

    /// Flush any buffered output.
    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}
