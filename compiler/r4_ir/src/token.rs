//! Cooked tokens produced by the lexer.

use std::fmt;

use crate::{Name, Span};

/// Token kinds of the command language.
///
/// `Word` and `Str` carry the interned, escape-decoded text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// A bare word: a name component.
    Word(Name),
    /// A quoted string: `"..."` or `` `...` ``.
    Str(Name),

    // Keywords (sorted table lives in the lexer)
    And,
    Else,
    Eq,
    Ge,
    Gt,
    If,
    Le,
    Lt,
    Ne,
    Not,
    Or,
    Then,

    // Punctuation
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `/`
    Slash,
    /// `<-`
    Assign,
    /// `<<-`
    Append,
    /// `->`
    Link,
    /// `$`
    Dollar,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Source-level spelling used in diagnostics.
    pub const fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Word(_) => "word",
            TokenKind::Str(_) => "string",
            TokenKind::And => "`and`",
            TokenKind::Else => "`else`",
            TokenKind::Eq => "`eq`",
            TokenKind::Ge => "`ge`",
            TokenKind::Gt => "`gt`",
            TokenKind::If => "`if`",
            TokenKind::Le => "`le`",
            TokenKind::Lt => "`lt`",
            TokenKind::Ne => "`ne`",
            TokenKind::Not => "`not`",
            TokenKind::Or => "`or`",
            TokenKind::Then => "`then`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Slash => "`/`",
            TokenKind::Assign => "`<-`",
            TokenKind::Append => "`<<-`",
            TokenKind::Link => "`->`",
            TokenKind::Dollar => "`$`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Eof => "end of input",
        }
    }

    /// Whether two kinds have the same variant, ignoring payloads.
    #[inline]
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lexer output for one statement.
///
/// Invariant once built by the lexer: the last token is always `Eof`.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create a new token list with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Append a token.
    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Number of tokens, including the trailing `Eof`.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Iterate over tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token kinds only, for tests and debug output.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
