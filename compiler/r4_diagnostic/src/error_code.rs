use std::fmt;

use crate::Category;

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E5xxx: I/O errors during a pump
/// - E9xxx: Internal errors (scope or stack invariant violated)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid byte in source
    E0002,
    /// No transition for this character
    E0003,
    /// Odd-length or empty `\x` escape
    E0004,
    /// Backslash at end of input
    E0005,
    /// Statement text longer than a span can address
    E0006,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed level
    E1003,
    /// Invalid assignment target
    E1004,
    /// Operator used as a pump source
    E1005,
    /// Invalid pump source
    E1006,
    /// Too many elements in a list or sequence
    E1007,

    // I/O Errors (E5xxx)
    /// Opening the sink failed
    E5001,
    /// Read or write failed mid-pump
    E5002,

    // Internal Errors (E9xxx)
    /// Level tag mismatch
    E9001,
    /// Value or variable table invariant violated
    E9002,
    /// Expression reached an evaluator path that cannot handle it
    E9003,
}

impl ErrorCode {
    /// Get the string representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
        }
    }

    /// The diagnostic category this code belongs to.
    pub fn category(&self) -> Category {
        match self.as_str().as_bytes()[1] {
            b'0' => Category::Lex,
            b'1' => Category::Syntax,
            b'5' => Category::Io,
            _ => Category::Internal,
        }
    }

    /// One-line description, used by `r4 --explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string",
            ErrorCode::E0002 => "invalid byte in statement text",
            ErrorCode::E0003 => "unexpected character",
            ErrorCode::E0004 => "`\\x` escape needs an even, non-zero number of hex digits",
            ErrorCode::E0005 => "backslash at end of input",
            ErrorCode::E0006 => "statement text is too large",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected an expression",
            ErrorCode::E1003 => "unclosed level",
            ErrorCode::E1004 => "invalid assignment target",
            ErrorCode::E1005 => "operators cannot be pumped into a target",
            ErrorCode::E1006 => "this expression does not produce bytes",
            ErrorCode::E1007 => "too many elements",
            ErrorCode::E5001 => "could not open the assignment target",
            ErrorCode::E5002 => "I/O failure while pumping",
            ErrorCode::E9001 => "level tag mismatch",
            ErrorCode::E9002 => "variable table invariant violated",
            ErrorCode::E9003 => "expression cannot be evaluated here",
        }
    }

    /// Parse a code from text such as `E1004`.
    pub fn parse(text: &str) -> Option<ErrorCode> {
        ALL.iter().copied().find(|code| code.as_str() == text)
    }
}

const ALL: [ErrorCode; 18] = [
    ErrorCode::E0001,
    ErrorCode::E0002,
    ErrorCode::E0003,
    ErrorCode::E0004,
    ErrorCode::E0005,
    ErrorCode::E0006,
    ErrorCode::E1001,
    ErrorCode::E1002,
    ErrorCode::E1003,
    ErrorCode::E1004,
    ErrorCode::E1005,
    ErrorCode::E1006,
    ErrorCode::E1007,
    ErrorCode::E5001,
    ErrorCode::E5002,
    ErrorCode::E9001,
    ErrorCode::E9002,
    ErrorCode::E9003,
];

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
