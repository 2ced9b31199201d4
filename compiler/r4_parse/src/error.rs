//! Parse error type.

use std::fmt;

use r4_diagnostic::{Diagnostic, ErrorCode};
use r4_ir::{Span, StringInterner, TokenKind};

use crate::ParseState;

/// A syntax error: what went wrong, where, and in which parser state.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub state: ParseState,
    /// The offending token, when the error is about one.
    pub found: Option<TokenKind>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span, state: ParseState) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            state,
            found: None,
        }
    }

    #[must_use]
    pub fn with_found(mut self, found: TokenKind) -> Self {
        self.found = Some(found);
        self
    }

    fn help(&self) -> Option<&'static str> {
        match self.code {
            ErrorCode::E1004 => Some("assign to a name, a path, or a quoted path such as \"/tmp/x\""),
            ErrorCode::E1005 => Some("operators only make sense as conditions"),
            ErrorCode::E1006 => Some("a source must be a string, a name, or a list of them"),
            _ => None,
        }
    }

    /// Convert to a diagnostic; `interner` spells out word and string tokens.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let mut diag = Diagnostic::new(self.code, self.message.clone(), self.span)
            .with_parser_state(self.state.description());
        if let Some(found) = self.found {
            diag = diag.with_token(token_text(found, interner));
        }
        if let Some(help) = self.help() {
            diag = diag.with_help(help);
        }
        diag
    }
}

/// A token as the user wrote it, modulo escapes.
pub(crate) fn token_text(kind: TokenKind, interner: &StringInterner) -> String {
    match kind {
        TokenKind::Word(name) => interner.display(name).into_owned(),
        TokenKind::Str(name) => format!("\"{}\"", interner.display(name)),
        TokenKind::Eof => "end of input".to_owned(),
        other => other.display_name().trim_matches('`').to_owned(),
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} while parsing {}", self.message, self.state.description())
    }
}

impl std::error::Error for ParseError {}
