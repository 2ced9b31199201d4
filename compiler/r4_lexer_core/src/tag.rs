//! Raw token tags.

/// Kind of a raw token.
///
/// Discriminants are grouped: lexemes, punctuation, trivia, errors, control.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum RawTag {
    // Lexemes: 0-15
    /// Word, possibly a keyword; escapes not yet decoded.
    Word = 0,
    /// `"..."` including both quotes.
    DqString = 1,
    /// `` `...` `` including both backticks.
    BtString = 2,

    // Punctuation: 32-63
    Semicolon = 32,
    Comma = 33,
    Slash = 34,
    /// `<-`
    Assign = 35,
    /// `<<-`
    Append = 36,
    /// `->`
    Link = 37,
    Dollar = 38,
    LeftParen = 39,
    RightParen = 40,
    LeftBracket = 41,
    RightBracket = 42,
    LeftBrace = 43,
    RightBrace = 44,

    // Trivia: 112-127
    /// Blanks and newlines.
    Whitespace = 112,

    // Errors: 240-254
    /// Control byte or other byte with no class of its own.
    InvalidByte = 240,
    /// String reached end of input before its closing quote.
    UnterminatedString = 241,
    /// Backslash as the last byte of input.
    DanglingBackslash = 242,
    /// A byte with no transition from the current state (e.g. a lone `<`).
    UnexpectedChar = 243,

    // Control: 255
    Eof = 255,
}

impl RawTag {
    /// Fixed spelling for punctuation tags.
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            RawTag::Semicolon => Some(";"),
            RawTag::Comma => Some(","),
            RawTag::Slash => Some("/"),
            RawTag::Assign => Some("<-"),
            RawTag::Append => Some("<<-"),
            RawTag::Link => Some("->"),
            RawTag::Dollar => Some("$"),
            RawTag::LeftParen => Some("("),
            RawTag::RightParen => Some(")"),
            RawTag::LeftBracket => Some("["),
            RawTag::RightBracket => Some("]"),
            RawTag::LeftBrace => Some("{"),
            RawTag::RightBrace => Some("}"),
            _ => None,
        }
    }

    /// Whether this tag reports a scanning error.
    pub const fn is_error(self) -> bool {
        (self as u8) >= 240 && (self as u8) < 255
    }

    /// Whether the cooking layer drops this tag.
    pub const fn is_trivia(self) -> bool {
        matches!(self, RawTag::Whitespace)
    }
}

/// A raw token: tag plus byte length. Position is implied by the sum of
/// previous lengths.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}
