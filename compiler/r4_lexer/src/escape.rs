//! Escape decoding for words and string bodies.
//!
//! `\x` followed by an even, non-zero run of hex digits decodes to those
//! bytes. Any other backslash is dropped and the byte after it kept as is.

use std::borrow::Cow;

use memchr::memchr;
use r4_ir::Span;

use crate::lex_error::LexError;

/// Decode `body`, which starts at byte `base` of the statement.
///
/// Fast path: a body with no backslash is returned borrowed.
pub(crate) fn decode(body: &[u8], base: u32) -> Result<Cow<'_, [u8]>, LexError> {
    let Some(first) = memchr(b'\\', body) else {
        return Ok(Cow::Borrowed(body));
    };

    let mut out = Vec::with_capacity(body.len());
    out.extend_from_slice(&body[..first]);
    let mut pos = first;

    while pos < body.len() {
        // body[pos] is a backslash here
        match body.get(pos + 1) {
            Some(b'x') => {
                let run = &body[pos + 2..];
                let digits = run.iter().take_while(|b| b.is_ascii_hexdigit()).count();
                if digits == 0 || digits % 2 != 0 {
                    return Err(LexError::odd_hex_escape(
                        span(base, pos, pos + 2 + digits),
                        digits,
                    ));
                }
                out.extend(
                    run[..digits]
                        .chunks_exact(2)
                        .map(|pair| (hex_value(pair[0]) << 4) | hex_value(pair[1])),
                );
                pos += 2 + digits;
            }
            Some(&next) => {
                out.push(next);
                pos += 2;
            }
            None => return Err(LexError::dangling_backslash(span(base, pos, pos + 1))),
        }

        match memchr(b'\\', &body[pos..]) {
            Some(rel) => {
                out.extend_from_slice(&body[pos..pos + rel]);
                pos += rel;
            }
            None => {
                out.extend_from_slice(&body[pos..]);
                break;
            }
        }
    }

    Ok(Cow::Owned(out))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the lexer rejects statements longer than u32::MAX bytes"
)]
fn span(base: u32, start: usize, end: usize) -> Span {
    Span::new(base + start as u32, base + end as u32)
}

const fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
