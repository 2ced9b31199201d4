//! Byte classification.

/// Character class of an input byte.
///
/// The transition table has one column per class, so adding a class means
/// adding a column to every state in [`crate::table`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum CharClass {
    /// Space, tab, carriage return.
    Blank,
    Newline,
    Letter,
    Digit,
    /// Punctuation allowed inside words: `_ . ~ + % @ # : = ! ? * ^ & ' |`.
    WordPunct,
    /// `-`: continues a word, or starts `->`.
    Minus,
    /// Bytes >= 0x80: UTF-8 continuation and lead bytes, kept in words.
    High,
    Backslash,
    DoubleQuote,
    Backtick,
    Slash,
    Semicolon,
    Comma,
    Less,
    Greater,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Dollar,
    /// Control bytes and NUL.
    Invalid,
    /// Past the last byte.
    Eof,
}

impl CharClass {
    /// Number of classes (columns of the transition table).
    pub const COUNT: usize = CharClass::Eof as usize + 1;
}

/// Classification of every byte value.
static CLASS_TABLE: [CharClass; 256] = build_class_table();

const fn build_class_table() -> [CharClass; 256] {
    let mut table = [CharClass::Invalid; 256];
    let mut b = 0usize;
    while b < 256 {
        #[expect(clippy::cast_possible_truncation, reason = "b < 256")]
        let byte = b as u8;
        table[b] = match byte {
            b' ' | b'\t' | b'\r' => CharClass::Blank,
            b'\n' => CharClass::Newline,
            b'a'..=b'z' | b'A'..=b'Z' => CharClass::Letter,
            b'0'..=b'9' => CharClass::Digit,
            b'_' | b'.' | b'~' | b'+' | b'%' | b'@' | b'#' | b':' | b'=' | b'!' | b'?'
            | b'*' | b'^' | b'&' | b'\'' | b'|' => CharClass::WordPunct,
            b'-' => CharClass::Minus,
            0x80..=0xff => CharClass::High,
            b'\\' => CharClass::Backslash,
            b'"' => CharClass::DoubleQuote,
            b'`' => CharClass::Backtick,
            b'/' => CharClass::Slash,
            b';' => CharClass::Semicolon,
            b',' => CharClass::Comma,
            b'<' => CharClass::Less,
            b'>' => CharClass::Greater,
            b'(' => CharClass::LeftParen,
            b')' => CharClass::RightParen,
            b'[' => CharClass::LeftBracket,
            b']' => CharClass::RightBracket,
            b'{' => CharClass::LeftBrace,
            b'}' => CharClass::RightBrace,
            b'$' => CharClass::Dollar,
            _ => CharClass::Invalid,
        };
        b += 1;
    }
    table
}

/// Class of the byte at `pos`, or [`CharClass::Eof`] past the end.
#[inline]
pub fn classify(source: &[u8], pos: usize) -> CharClass {
    match source.get(pos) {
        Some(&byte) => CLASS_TABLE[byte as usize],
        None => CharClass::Eof,
    }
}
