use std::fmt;

use r4_ir::Span;

use crate::ErrorCode;

/// Broad class of a statement failure.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Category {
    /// Bad escape or no valid scanner transition.
    Lex,
    /// Unexpected token in some parser state.
    Syntax,
    /// Open, read, or write failure during a pump.
    Io,
    /// Scope or stack invariant violated: a bug, not bad input.
    Internal,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lex => write!(f, "lex error"),
            Category::Syntax => write!(f, "syntax error"),
            Category::Io => write!(f, "I/O error"),
            Category::Internal => write!(f, "internal error"),
        }
    }
}

/// A statement failure, with everything a front end needs to render it.
///
/// Offsets are byte offsets into the text passed to `evaluate`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub category: Category,
    pub message: String,
    /// Where it went wrong.
    pub span: Span,
    /// For syntax errors: what the parser was working on.
    pub parser_state: Option<&'static str>,
    /// For syntax errors: the offending token, as written.
    pub token: Option<String>,
    /// Optional hint on how to fix it.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic; the category is derived from the code.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            code,
            category: code.category(),
            message: message.into(),
            span,
            parser_state: None,
            token: None,
            help: None,
        }
    }

    /// Byte offset into the statement text.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.span.start
    }

    #[must_use]
    pub fn with_parser_state(mut self, state: &'static str) -> Self {
        self.parser_state = Some(state);
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_syntax(&self) -> bool {
        self.category == Category::Syntax
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] at offset {}: {}",
            self.category,
            self.code,
            self.offset(),
            self.message
        )?;
        if let Some(state) = self.parser_state {
            write!(f, " (while parsing {state})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
