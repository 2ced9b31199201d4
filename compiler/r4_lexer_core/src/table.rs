//! The scanner's transition table.
//!
//! `TABLE[state][class]` gives the [`Action`] for the byte under the cursor.
//! Invariant: no state has a `Goto` on [`CharClass::Eof`], so the scanner
//! never advances past the end of input.

use crate::class::CharClass;
use crate::tag::RawTag;

/// Scanner state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum State {
    Start,
    Blank,
    Word,
    /// After a backslash inside a word.
    WordEscape,
    /// Inside `"..."`.
    DqString,
    /// After a backslash inside `"..."`.
    DqEscape,
    /// Inside `` `...` ``.
    BtString,
    /// After a backslash inside `` `...` ``.
    BtEscape,
    /// After `<`.
    Less,
    /// After `<<`.
    LessLess,
    /// After a leading `-`.
    Minus,
}

impl State {
    /// Number of states (rows of the transition table).
    pub const COUNT: usize = State::Minus as usize + 1;
}

/// What to do with the byte under the cursor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Action {
    /// Consume the byte, move to the state.
    Goto(State),
    /// Emit a token ending before the byte.
    Emit(RawTag),
    /// Consume the byte, then emit a token ending after it.
    Take(RawTag),
    /// Stop with an error token covering what was consumed.
    Fail(RawTag),
}

const COLS: usize = CharClass::COUNT;
const ROWS: usize = State::COUNT;

static TABLE: [[Action; COLS]; ROWS] = build_table();

/// Look up the action for `(state, class)`.
#[inline]
pub fn action(state: State, class: CharClass) -> Action {
    TABLE[state as usize][class as usize]
}

/// Fill one row: `default` everywhere, then the overrides.
const fn row(default: Action, overrides: &[(CharClass, Action)]) -> [Action; COLS] {
    let mut out = [default; COLS];
    let mut i = 0;
    while i < overrides.len() {
        out[overrides[i].0 as usize] = overrides[i].1;
        i += 1;
    }
    out
}

/// Classes that continue a word once it has started.
const WORD_CONTINUE: [CharClass; 5] = [
    CharClass::Letter,
    CharClass::Digit,
    CharClass::WordPunct,
    CharClass::Minus,
    CharClass::High,
];

const fn word_row() -> [Action; COLS] {
    let mut out = row(
        Action::Emit(RawTag::Word),
        &[(CharClass::Backslash, Action::Goto(State::WordEscape))],
    );
    let mut i = 0;
    while i < WORD_CONTINUE.len() {
        out[WORD_CONTINUE[i] as usize] = Action::Goto(State::Word);
        i += 1;
    }
    out
}

const fn string_row(this: State, escape: State, close: CharClass, tag: RawTag) -> [Action; COLS] {
    row(
        Action::Goto(this),
        &[
            (close, Action::Take(tag)),
            (CharClass::Backslash, Action::Goto(escape)),
            (CharClass::Eof, Action::Fail(RawTag::UnterminatedString)),
        ],
    )
}

const fn escape_row(back_to: State, at_eof: RawTag) -> [Action; COLS] {
    row(Action::Goto(back_to), &[(CharClass::Eof, Action::Fail(at_eof))])
}

const fn build_table() -> [[Action; COLS]; ROWS] {
    let mut table = [[Action::Fail(RawTag::UnexpectedChar); COLS]; ROWS];

    table[State::Start as usize] = row(
        Action::Take(RawTag::InvalidByte),
        &[
            (CharClass::Blank, Action::Goto(State::Blank)),
            (CharClass::Newline, Action::Goto(State::Blank)),
            (CharClass::Letter, Action::Goto(State::Word)),
            (CharClass::Digit, Action::Goto(State::Word)),
            (CharClass::WordPunct, Action::Goto(State::Word)),
            (CharClass::High, Action::Goto(State::Word)),
            (CharClass::Backslash, Action::Goto(State::WordEscape)),
            (CharClass::Minus, Action::Goto(State::Minus)),
            (CharClass::DoubleQuote, Action::Goto(State::DqString)),
            (CharClass::Backtick, Action::Goto(State::BtString)),
            (CharClass::Less, Action::Goto(State::Less)),
            (CharClass::Greater, Action::Take(RawTag::UnexpectedChar)),
            (CharClass::Slash, Action::Take(RawTag::Slash)),
            (CharClass::Semicolon, Action::Take(RawTag::Semicolon)),
            (CharClass::Comma, Action::Take(RawTag::Comma)),
            (CharClass::Dollar, Action::Take(RawTag::Dollar)),
            (CharClass::LeftParen, Action::Take(RawTag::LeftParen)),
            (CharClass::RightParen, Action::Take(RawTag::RightParen)),
            (CharClass::LeftBracket, Action::Take(RawTag::LeftBracket)),
            (CharClass::RightBracket, Action::Take(RawTag::RightBracket)),
            (CharClass::LeftBrace, Action::Take(RawTag::LeftBrace)),
            (CharClass::RightBrace, Action::Take(RawTag::RightBrace)),
            (CharClass::Eof, Action::Emit(RawTag::Eof)),
        ],
    );

    table[State::Blank as usize] = row(
        Action::Emit(RawTag::Whitespace),
        &[
            (CharClass::Blank, Action::Goto(State::Blank)),
            (CharClass::Newline, Action::Goto(State::Blank)),
        ],
    );

    table[State::Word as usize] = word_row();
    table[State::WordEscape as usize] = escape_row(State::Word, RawTag::DanglingBackslash);

    table[State::DqString as usize] = string_row(
        State::DqString,
        State::DqEscape,
        CharClass::DoubleQuote,
        RawTag::DqString,
    );
    table[State::DqEscape as usize] = escape_row(State::DqString, RawTag::UnterminatedString);

    table[State::BtString as usize] = string_row(
        State::BtString,
        State::BtEscape,
        CharClass::Backtick,
        RawTag::BtString,
    );
    table[State::BtEscape as usize] = escape_row(State::BtString, RawTag::UnterminatedString);

    table[State::Less as usize] = row(
        Action::Fail(RawTag::UnexpectedChar),
        &[
            (CharClass::Minus, Action::Take(RawTag::Assign)),
            (CharClass::Less, Action::Goto(State::LessLess)),
        ],
    );

    table[State::LessLess as usize] = row(
        Action::Fail(RawTag::UnexpectedChar),
        &[(CharClass::Minus, Action::Take(RawTag::Append))],
    );

    table[State::Minus as usize] = row(
        Action::Fail(RawTag::UnexpectedChar),
        &[(CharClass::Greater, Action::Take(RawTag::Link))],
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [State; State::COUNT] = [
        State::Start,
        State::Blank,
        State::Word,
        State::WordEscape,
        State::DqString,
        State::DqEscape,
        State::BtString,
        State::BtEscape,
        State::Less,
        State::LessLess,
        State::Minus,
    ];

    #[test]
    fn no_state_advances_past_eof() {
        for state in ALL_STATES {
            assert!(
                !matches!(action(state, CharClass::Eof), Action::Goto(_)),
                "{state:?} consumes at end of input"
            );
        }
    }

    #[test]
    fn start_never_fails_without_consuming() {
        // A Fail/Emit from Start with nothing consumed would loop forever,
        // except Emit(Eof), which is the terminal token.
        let classes = [
            CharClass::Blank,
            CharClass::Letter,
            CharClass::Greater,
            CharClass::Invalid,
            CharClass::Dollar,
        ];
        for class in classes {
            let act = action(State::Start, class);
            assert!(matches!(act, Action::Goto(_) | Action::Take(_)), "{class:?}: {act:?}");
        }
        assert_eq!(action(State::Start, CharClass::Eof), Action::Emit(RawTag::Eof));
    }

    #[test]
    fn arrows() {
        assert_eq!(action(State::Less, CharClass::Minus), Action::Take(RawTag::Assign));
        assert_eq!(action(State::Less, CharClass::Less), Action::Goto(State::LessLess));
        assert_eq!(action(State::LessLess, CharClass::Minus), Action::Take(RawTag::Append));
        assert_eq!(action(State::Minus, CharClass::Greater), Action::Take(RawTag::Link));
        assert_eq!(
            action(State::Less, CharClass::Letter),
            Action::Fail(RawTag::UnexpectedChar)
        );
    }

    #[test]
    fn words_keep_dashes() {
        assert_eq!(action(State::Word, CharClass::Minus), Action::Goto(State::Word));
        assert_eq!(action(State::Word, CharClass::Blank), Action::Emit(RawTag::Word));
    }
}
