//! Keyword resolution.
//!
//! The table is sorted by bytes and searched with a binary search. Only
//! words written without escapes are looked up, so `\if` is a plain word.

use r4_ir::TokenKind;

const KEYWORDS: [(&[u8], TokenKind); 12] = [
    (b"and", TokenKind::And),
    (b"else", TokenKind::Else),
    (b"eq", TokenKind::Eq),
    (b"ge", TokenKind::Ge),
    (b"gt", TokenKind::Gt),
    (b"if", TokenKind::If),
    (b"le", TokenKind::Le),
    (b"lt", TokenKind::Lt),
    (b"ne", TokenKind::Ne),
    (b"not", TokenKind::Not),
    (b"or", TokenKind::Or),
    (b"then", TokenKind::Then),
];

/// Look up a reserved keyword by its raw bytes.
#[inline]
pub(crate) fn lookup(word: &[u8]) -> Option<TokenKind> {
    // All keywords are 2-4 bytes
    if !(2..=4).contains(&word.len()) {
        return None;
    }
    KEYWORDS
        .binary_search_by(|(keyword, _)| (*keyword).cmp(word))
        .ok()
        .map(|index| KEYWORDS[index].1)
}
