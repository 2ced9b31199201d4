//! Token cursor for navigating the token stream.

use r4_ir::{Span, Token, TokenKind, TokenList};

/// Cursor over one statement's tokens.
///
/// Invariant: the list ends with `Eof` and the position never moves past
/// it, so [`Cursor::current`] is always in bounds.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            matches!(tokens.iter().last(), Some(t) if t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the token before the current one.
    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => Span::DUMMY,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Check the current token's variant, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind().same_kind(&kind)
    }

    /// Consume the current token. Stays put on `Eof`.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given variant.
    #[inline]
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(kinds: &[TokenKind]) -> TokenList {
        let mut list = TokenList::new();
        for (i, &kind) in kinds.iter().enumerate() {
            let at = u32::try_from(i).unwrap_or(u32::MAX);
            list.push(Token::new(kind, Span::new(at, at + 1)));
        }
        list
    }

    #[test]
    fn advance_stops_at_eof() {
        let list = tokens(&[TokenKind::Semicolon, TokenKind::Eof]);
        let mut cursor = Cursor::new(&list);
        assert!(cursor.eat(TokenKind::Semicolon));
        assert!(cursor.is_at_end());
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn previous_span_at_start_is_dummy() {
        let list = tokens(&[TokenKind::Eof]);
        let cursor = Cursor::new(&list);
        assert_eq!(cursor.previous_span(), Span::DUMMY);
    }

    #[test]
    fn eat_leaves_mismatch_in_place() {
        let list = tokens(&[TokenKind::Comma, TokenKind::Eof]);
        let mut cursor = Cursor::new(&list);
        assert!(!cursor.eat(TokenKind::Semicolon));
        assert_eq!(cursor.current_kind(), TokenKind::Comma);
    }
}
