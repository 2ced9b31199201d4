use super::*;
use crate::LexErrorKind;
use pretty_assertions::assert_eq;

fn decoded(body: &[u8]) -> Vec<u8> {
    decode(body, 0).unwrap().into_owned()
}

#[test]
fn plain_body_is_borrowed() {
    assert!(matches!(decode(b"hello", 0), Ok(Cow::Borrowed(b"hello"))));
}

#[test]
fn hex_pairs_become_bytes() {
    assert_eq!(decoded(b"\\x41\\x42"), b"AB");
    assert_eq!(decoded(b"a\\x0aFF"), b"a\nFF");
    assert_eq!(decoded(b"\\xdeadBEEF"), vec![0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn hex_run_stops_at_non_digit() {
    assert_eq!(decoded(b"\\x41g"), b"Ag");
}

#[test]
fn other_escapes_keep_next_byte() {
    assert_eq!(decoded(b"a\\ b"), b"a b");
    assert_eq!(decoded(b"\\n"), b"n");
    assert_eq!(decoded(b"\\\\"), b"\\");
    assert_eq!(decoded(b"\\\""), b"\"");
}

#[test]
fn odd_hex_run_is_an_error() {
    let err = decode(b"ab\\x414", 10).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::OddHexEscape { digits: 3 });
    assert_eq!(err.span, Span::new(12, 17));
}

#[test]
fn empty_hex_run_is_an_error() {
    let err = decode(b"\\xzz", 0).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::OddHexEscape { digits: 0 });
    assert_eq!(err.span, Span::new(0, 2));
}

#[test]
fn trailing_backslash_is_dangling() {
    let err = decode(b"ab\\", 4).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::DanglingBackslash);
    assert_eq!(err.span, Span::new(6, 7));
}
