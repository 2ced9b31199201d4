//! Token cooking layer.
//!
//! Turns one raw token into a [`TokenKind`]:
//! - **Punctuation**: direct 1:1 mapping
//! - **Words**: keyword lookup, then escape decoding and interning
//! - **Strings**: quotes stripped, escape decoding and interning
//! - **Error tags**: converted to a [`LexError`]

use r4_ir::{Span, StringInterner, TokenKind};
use r4_lexer_core::RawTag;

use crate::escape::decode;
use crate::keywords;
use crate::lex_error::LexError;

/// Cooks raw tokens into parser-ready `TokenKind` values.
///
/// Stateless with respect to individual tokens: each `cook()` call is
/// independent.
pub(crate) struct TokenCooker<'src> {
    source: &'src [u8],
    interner: &'src StringInterner,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(source: &'src [u8], interner: &'src StringInterner) -> Self {
        TokenCooker { source, interner }
    }

    /// Cook the raw token covering `span`. Returns `None` for trivia.
    pub(crate) fn cook(&self, tag: RawTag, span: Span) -> Result<Option<TokenKind>, LexError> {
        let kind = match tag {
            RawTag::Whitespace => return Ok(None),

            RawTag::Word => self.cook_word(span)?,
            RawTag::DqString | RawTag::BtString => self.cook_string(span)?,

            RawTag::Semicolon => TokenKind::Semicolon,
            RawTag::Comma => TokenKind::Comma,
            RawTag::Slash => TokenKind::Slash,
            RawTag::Assign => TokenKind::Assign,
            RawTag::Append => TokenKind::Append,
            RawTag::Link => TokenKind::Link,
            RawTag::Dollar => TokenKind::Dollar,
            RawTag::LeftParen => TokenKind::LParen,
            RawTag::RightParen => TokenKind::RParen,
            RawTag::LeftBracket => TokenKind::LBracket,
            RawTag::RightBracket => TokenKind::RBracket,
            RawTag::LeftBrace => TokenKind::LBrace,
            RawTag::RightBrace => TokenKind::RBrace,
            RawTag::Eof => TokenKind::Eof,

            RawTag::InvalidByte => return Err(LexError::invalid_byte(span, self.first_byte(span))),
            RawTag::UnterminatedString => {
                return Err(LexError::unterminated_string(span, self.first_byte(span)))
            }
            RawTag::UnexpectedChar => {
                return Err(LexError::unexpected_char(span, self.first_byte(span)))
            }
            RawTag::DanglingBackslash => {
                return Err(LexError::dangling_backslash(Span::new(
                    span.end.saturating_sub(1),
                    span.end,
                )))
            }
        };
        Ok(Some(kind))
    }

    fn cook_word(&self, span: Span) -> Result<TokenKind, LexError> {
        let text = self.slice(span);
        if let Some(keyword) = keywords::lookup(text) {
            return Ok(keyword);
        }
        let bytes = decode(text, span.start)?;
        Ok(TokenKind::Word(self.interner.intern(&bytes)))
    }

    fn cook_string(&self, span: Span) -> Result<TokenKind, LexError> {
        let text = self.slice(span);
        // Raw string tokens always include both quotes
        let body = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
        let bytes = decode(body, span.start + 1)?;
        Ok(TokenKind::Str(self.interner.intern(&bytes)))
    }

    #[inline]
    fn slice(&self, span: Span) -> &'src [u8] {
        &self.source[span.to_range()]
    }

    #[inline]
    fn first_byte(&self, span: Span) -> u8 {
        self.source.get(span.start as usize).copied().unwrap_or(0)
    }
}
