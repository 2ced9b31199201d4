use super::*;
use pretty_assertions::assert_eq;
use r4_diagnostic::{Category, ErrorCode};

fn kinds(source: &str, interner: &StringInterner) -> Vec<TokenKind> {
    lex(source, interner).unwrap().kinds()
}

#[test]
fn empty_input_is_just_eof() {
    let interner = StringInterner::new();
    let tokens = lex("", &interner).unwrap();
    assert_eq!(tokens.kinds(), vec![TokenKind::Eof]);
    assert_eq!(tokens[0].span, Span::new(0, 0));
}

#[test]
fn assignment_statement() {
    let interner = StringInterner::new();
    let tmp = interner.intern(b"/tmp/x");
    let hello = interner.intern(b"hello");
    assert_eq!(
        kinds("\"/tmp/x\" <- \"hello\"", &interner),
        vec![
            TokenKind::Str(tmp),
            TokenKind::Assign,
            TokenKind::Str(hello),
            TokenKind::Eof
        ]
    );
}

#[test]
fn spans_point_into_source() {
    let interner = StringInterner::new();
    let tokens = lex("ab <<- `c`", &interner).unwrap();
    let spans: Vec<_> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 2),
            Span::new(3, 6),
            Span::new(7, 10),
            Span::new(10, 10)
        ]
    );
}

#[test]
fn keywords_resolve_but_strings_do_not() {
    let interner = StringInterner::new();
    let if_word = interner.intern(b"if");
    assert_eq!(
        kinds("if not a eq `if` then b", &interner),
        vec![
            TokenKind::If,
            TokenKind::Not,
            TokenKind::Word(interner.intern(b"a")),
            TokenKind::Eq,
            TokenKind::Str(if_word),
            TokenKind::Then,
            TokenKind::Word(interner.intern(b"b")),
            TokenKind::Eof
        ]
    );
}

#[test]
fn escaped_keyword_is_a_word() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("\\if", &interner),
        vec![TokenKind::Word(interner.intern(b"if")), TokenKind::Eof]
    );
}

#[test]
fn equal_texts_share_a_name() {
    let interner = StringInterner::new();
    let tokens = lex("abc `abc` \"a\\x62c\" a\\bc", &interner).unwrap();
    let names: Vec<_> = tokens
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::Word(name) | TokenKind::Str(name) => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(names.len(), 4);
    assert!(names.iter().all(|&n| n == names[0]));
}

#[test]
fn hex_escape_yields_raw_bytes() {
    let interner = StringInterner::new();
    let tokens = lex("`\\xff\\x00`", &interner).unwrap();
    let TokenKind::Str(name) = tokens[0].kind else {
        panic!("expected a string, got {:?}", tokens[0].kind);
    };
    assert_eq!(interner.lookup(name), &[0xff, 0x00]);
}

#[test]
fn path_tokens() {
    let interner = StringInterner::new();
    let tmp = interner.intern(b"tmp");
    let x = interner.intern(b"x");
    assert_eq!(
        kinds("/tmp/x -> $v", &interner),
        vec![
            TokenKind::Slash,
            TokenKind::Word(tmp),
            TokenKind::Slash,
            TokenKind::Word(x),
            TokenKind::Link,
            TokenKind::Dollar,
            TokenKind::Word(interner.intern(b"v")),
            TokenKind::Eof
        ]
    );
}

// ─── Errors ────────────────────────────────────────────────────

#[test]
fn unterminated_backtick_points_at_opening_quote() {
    let interner = StringInterner::new();
    let err = lex("`abc", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString { quote: b'`' });
    assert_eq!(err.span.start, 0);

    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E0001);
    assert_eq!(diag.category, Category::Lex);
    assert_eq!(diag.offset(), 0);
}

#[test]
fn unterminated_string_later_in_statement() {
    let interner = StringInterner::new();
    let err = lex("a <- \"abc", &interner).unwrap_err();
    assert_eq!(err.span.start, 5);
}

#[test]
fn odd_hex_escape_in_string() {
    let interner = StringInterner::new();
    let err = lex("x <- `\\x4`", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::OddHexEscape { digits: 1 });
    assert_eq!(err.span, Span::new(6, 9));
    assert_eq!(err.code(), ErrorCode::E0004);
}

#[test]
fn dangling_backslash() {
    let interner = StringInterner::new();
    let err = lex("abc\\", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::DanglingBackslash);
    assert_eq!(err.span, Span::new(3, 4));
}

#[test]
fn lone_less_than() {
    let interner = StringInterner::new();
    let err = lex("a < b", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar { first: b'<' });
    assert_eq!(err.span.start, 2);
    assert!(err.to_diagnostic().help.is_some());
}

#[test]
fn leading_dash_is_rejected() {
    let interner = StringInterner::new();
    let err = lex("-x", &interner).unwrap_err();
    assert_eq!(err.to_string(), "expected `->` after `-`");
}

#[test]
fn control_byte() {
    let interner = StringInterner::new();
    let err = lex("a\u{7}b", &interner).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidByte { byte: 7 });
    assert_eq!(err.span, Span::new(1, 2));
}

mod proptest_lexer {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn plain_words_roundtrip(words in proptest::collection::vec("[a-z_.][a-z0-9_.-]{0,8}", 1..6)) {
            let interner = StringInterner::new();
            let source = words.join(" ");
            let tokens = lex(&source, &interner).unwrap();
            prop_assert_eq!(tokens.len(), words.len() + 1);
            for (token, word) in tokens.iter().zip(&words) {
                let text = match token.kind {
                    TokenKind::Word(name) => interner.lookup(name),
                    // keywords such as `eq` or `or` may be generated
                    _ => continue,
                };
                prop_assert_eq!(text, word.as_bytes());
            }
        }

        #[test]
        fn lexing_twice_is_identical(source in "[a-z $;,/()\\[\\]{}`\"<-]{0,32}") {
            let interner = StringInterner::new();
            let first = lex(&source, &interner);
            let second = lex(&source, &interner);
            prop_assert_eq!(first, second);
        }
    }
}
