//! Lexer errors.

use std::fmt;

use r4_diagnostic::{Diagnostic, ErrorCode};
use r4_ir::Span;

/// A lexer error: where it happened and what went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing quote. The span starts at the opening one.
    UnterminatedString { quote: u8 },
    /// Control byte or NUL in the statement text.
    InvalidByte { byte: u8 },
    /// No transition for the byte after `first` (a lone `<`, `-`, or `>`).
    UnexpectedChar { first: u8 },
    /// Backslash as the last byte of input.
    DanglingBackslash,
    /// `\x` followed by an odd or zero number of hex digits.
    OddHexEscape { digits: usize },
    /// Statement text longer than `u32::MAX` bytes.
    TooLarge { len: usize },
}

impl LexError {
    #[cold]
    pub fn unterminated_string(span: Span, quote: u8) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnterminatedString { quote },
        }
    }

    #[cold]
    pub fn invalid_byte(span: Span, byte: u8) -> Self {
        LexError {
            span,
            kind: LexErrorKind::InvalidByte { byte },
        }
    }

    #[cold]
    pub fn unexpected_char(span: Span, first: u8) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnexpectedChar { first },
        }
    }

    #[cold]
    pub fn dangling_backslash(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::DanglingBackslash,
        }
    }

    #[cold]
    pub fn odd_hex_escape(span: Span, digits: usize) -> Self {
        LexError {
            span,
            kind: LexErrorKind::OddHexEscape { digits },
        }
    }

    #[cold]
    pub fn too_large(len: usize) -> Self {
        LexError {
            span: Span::point(0),
            kind: LexErrorKind::TooLarge { len },
        }
    }

    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => ErrorCode::E0001,
            LexErrorKind::InvalidByte { .. } => ErrorCode::E0002,
            LexErrorKind::UnexpectedChar { .. } => ErrorCode::E0003,
            LexErrorKind::OddHexEscape { .. } => ErrorCode::E0004,
            LexErrorKind::DanglingBackslash => ErrorCode::E0005,
            LexErrorKind::TooLarge { .. } => ErrorCode::E0006,
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self.kind {
            LexErrorKind::UnterminatedString { quote: b'`' } => Some("add a closing `` ` ``"),
            LexErrorKind::UnterminatedString { .. } => Some("add a closing `\"`"),
            LexErrorKind::UnexpectedChar { first: b'-' } => {
                Some("a word cannot start with `-`; write `\\-` to keep it")
            }
            LexErrorKind::UnexpectedChar { first: b'<' } => {
                Some("assignments are written `<-` (replace) or `<<-` (append)")
            }
            LexErrorKind::OddHexEscape { .. } => Some("write each byte as two hex digits, e.g. `\\x0a`"),
            _ => None,
        }
    }

    /// Convert to a diagnostic for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), self.to_string(), self.span);
        match self.help() {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnterminatedString { quote } => {
                write!(f, "unterminated string starting with `{}`", char::from(*quote))
            }
            LexErrorKind::InvalidByte { byte } => write!(f, "invalid byte 0x{byte:02x}"),
            LexErrorKind::UnexpectedChar { first: b'>' } => write!(f, "unexpected `>`"),
            LexErrorKind::UnexpectedChar { first: b'-' } => write!(f, "expected `->` after `-`"),
            LexErrorKind::UnexpectedChar { first } => {
                write!(f, "unexpected character after `{}`", char::from(*first))
            }
            LexErrorKind::DanglingBackslash => write!(f, "backslash at end of input"),
            LexErrorKind::OddHexEscape { digits } => {
                write!(f, "`\\x` escape with {digits} hex digits")
            }
            LexErrorKind::TooLarge { len } => write!(f, "statement is {len} bytes long"),
        }
    }
}

impl std::error::Error for LexError {}
