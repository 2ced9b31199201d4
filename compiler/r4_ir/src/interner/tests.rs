use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let hello = interner.intern(b"hello");
    let world = interner.intern(b"world");
    let hello2 = interner.intern(b"hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.lookup(hello), b"hello");
    assert_eq!(interner.lookup(world), b"world");
}

#[test]
fn test_empty_word() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(b""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), b"");
    assert_eq!(interner.len(), 1);
}

#[test]
fn test_non_utf8_bytes() {
    let interner = StringInterner::new();
    let raw = interner.intern(&[0xff, 0x00, 0x41]);
    assert_eq!(interner.lookup(raw), &[0xff, 0x00, 0x41]);
    assert_eq!(interner.display(raw), "\u{fffd}\u{0}A");
}

#[test]
fn test_same_length_different_bytes() {
    let interner = StringInterner::new();
    let ab = interner.intern(b"ab");
    let ba = interner.intern(b"ba");
    assert_ne!(ab, ba);
}

#[test]
fn test_len_counts_distinct_words() {
    let interner = StringInterner::new();
    interner.intern_str("a");
    interner.intern_str("b");
    interner.intern_str("a");
    assert_eq!(interner.len(), 3);
}

mod proptest_interning {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn byte_equal_texts_share_a_name(word in proptest::collection::vec(any::<u8>(), 0..32)) {
            let interner = StringInterner::new();
            let first = interner.intern(&word);
            let copy = word.clone();
            let second = interner.intern(&copy);
            prop_assert_eq!(first, second);
            prop_assert_eq!(interner.lookup(first), word.as_slice());
        }

        #[test]
        fn distinct_texts_get_distinct_names(
            a in proptest::collection::vec(any::<u8>(), 0..16),
            b in proptest::collection::vec(any::<u8>(), 0..16),
        ) {
            let interner = StringInterner::new();
            let na = interner.intern(&a);
            let nb = interner.intern(&b);
            prop_assert_eq!(na == nb, a == b);
        }
    }
}
