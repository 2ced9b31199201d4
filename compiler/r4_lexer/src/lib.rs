//! Lexer for the r4 command language.
//!
//! Runs the table-driven [`RawScanner`] and cooks its `(RawTag, len)` pairs
//! into a [`TokenList`]: blanks are dropped, quotes stripped, keywords
//! resolved, escapes decoded, and every word interned.
//!
//! ```text
//! text → RawScanner → (RawTag, len) → TokenCooker → Token
//! ```
//!
//! The first error aborts the statement; there is no recovery.

mod cooker;
mod escape;
mod keywords;
mod lex_error;

use r4_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use r4_lexer_core::RawScanner;

use crate::cooker::TokenCooker;

pub use lex_error::{LexError, LexErrorKind};

/// Lex one statement.
///
/// On success the returned list always ends with `TokenKind::Eof`.
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    let bytes = source.as_bytes();
    if u32::try_from(bytes.len()).is_err() {
        return Err(LexError::too_large(bytes.len()));
    }

    let mut scanner = RawScanner::new(bytes);
    let cooker = TokenCooker::new(bytes, interner);
    let mut tokens = TokenList::with_capacity(bytes.len() / 4 + 1);
    let mut offset = 0u32;

    loop {
        let raw = scanner.next_token();
        let span = Span::new(offset, offset + raw.len);
        offset += raw.len;

        let Some(kind) = cooker.cook(raw.tag, span)? else {
            continue;
        };
        tokens.push(Token::new(kind, span));
        if kind == TokenKind::Eof {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
