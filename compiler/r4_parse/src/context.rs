//! Parser states for "while parsing X" messages.

use r4_ir::LevelKind;

/// What the parser was working on when it hit a problem.
///
/// A syntax error is reported as `(state, token)`; the state is the
/// innermost one entered through `Parser::in_state`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseState {
    /// Top level: a sequence followed by end of input.
    Statement,
    /// After `;`.
    Sequence,
    /// Right-hand side of `<-`, `<<-`, or `->`.
    Assignment,
    /// After `,`.
    List,
    /// After `and`, `or`, or `not`.
    Condition,
    /// Right-hand side of `eq`, `ne`, `lt`, `le`, `gt`, `ge`.
    Comparison,
    /// After `/`.
    Path,
    /// After `$`.
    Variable,
    /// Inside `( )`, `[ ]`, or `{ }`.
    Level(LevelKind),
    /// Inside `if ... then ... else ...`.
    If,
}

impl ParseState {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Statement => "a statement",
            Self::Sequence => "a sequence",
            Self::Assignment => "an assignment",
            Self::List => "a list",
            Self::Condition => "a condition",
            Self::Comparison => "a comparison",
            Self::Path => "a path",
            Self::Variable => "a variable name",
            Self::Level(LevelKind::Paren) => "a `( )` level",
            Self::Level(LevelKind::Bracket) => "a `[ ]` level",
            Self::Level(LevelKind::Brace) => "a `{ }` level",
            Self::Level(LevelKind::Statement) => "a statement level",
            Self::If => "an if",
        }
    }
}
