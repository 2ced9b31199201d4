//! The table-driven raw scanner.

use crate::class::classify;
use crate::table::{action, Action, State};
use crate::tag::{RawTag, RawToken};

/// Scanner producing one raw token per call.
///
/// Returns `RawTag::Eof` with `len == 0` when the source is exhausted;
/// subsequent calls keep returning `Eof`.
pub struct RawScanner<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> RawScanner<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        RawScanner { source, pos: 0 }
    }

    /// Byte offset of the next token.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Produce the next raw token.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.pos;
        let mut state = State::Start;
        loop {
            match action(state, classify(self.source, self.pos)) {
                Action::Goto(next) => {
                    self.pos += 1;
                    state = next;
                }
                Action::Emit(tag) | Action::Fail(tag) => return self.token(tag, start),
                Action::Take(tag) => {
                    self.pos += 1;
                    return self.token(tag, start);
                }
            }
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "statement text is limited to u32::MAX bytes by the lexer"
    )]
    fn token(&self, tag: RawTag, start: usize) -> RawToken {
        RawToken {
            tag,
            len: (self.pos - start) as u32,
        }
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    /// Yields tokens up to, not including, `Eof`.
    fn next(&mut self) -> Option<RawToken> {
        let token = self.next_token();
        (token.tag != RawTag::Eof).then_some(token)
    }
}
