//! Expression tree of the command language.
//!
//! All children are indices into the statement's [`ExprArena`](crate::ExprArena),
//! never boxes. The tree is unevaluated: lookups and pumping happen only
//! when the evaluator walks it.

use std::fmt;

use crate::{ExprId, ExprRange, Name, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Quoted string: its bytes are the value.
    Literal(Name),

    /// `/` at the start of a path: the namespace root.
    Root,

    /// A namespace name. `base: None` resolves against the current level's
    /// working cursor; otherwise against the object `base` denotes (`a/b`).
    ObjectRef { base: Option<ExprId>, name: Name },

    /// `$name`: a session variable holding temporary bytes.
    VariableRef { name: Name },

    /// `a, b, c`: concatenation of the elements' bytes.
    List(ExprRange),

    /// `a; b; c`: statements executed in order.
    Sequence(ExprRange),

    /// `target <- source`, `target <<- source`, `target -> source`.
    Assign {
        op: AssignOp,
        target: ExprId,
        source: ExprId,
    },

    /// `a eq b`, `a and b`, ...
    BinaryOp {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `not a`
    UnaryOp { op: UnaryOp, operand: ExprId },

    /// `if cond then a else b`
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },

    /// A bracketed level: `( )`, `[ ]`, `{ }`.
    Level { kind: LevelKind, body: ExprId },
}

impl ExprKind {
    /// Whether this node denotes a name (a valid assignment target).
    pub const fn is_name(&self) -> bool {
        matches!(
            self,
            ExprKind::Root | ExprKind::ObjectRef { .. } | ExprKind::VariableRef { .. }
        )
    }

    /// Whether this node is an operator (only meaningful as a condition).
    pub const fn is_operator(&self) -> bool {
        matches!(self, ExprKind::BinaryOp { .. } | ExprKind::UnaryOp { .. })
    }
}

/// Assignment operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    /// `<-`: truncate the target, then pump.
    Replace,
    /// `<<-`: pump onto the end of the target.
    Append,
    /// `->`: make the target an alias of the source name.
    Link,
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            AssignOp::Replace => "<-",
            AssignOp::Append => "<<-",
            AssignOp::Link => "->",
        }
    }

    /// Whether this assignment moves bytes through the tube.
    pub const fn pumps(self) -> bool {
        matches!(self, AssignOp::Replace | AssignOp::Append)
    }
}

/// Binary operators: byte-wise comparison and boolean connectives.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the source-level keyword for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Check if this is a comparison operator.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `not`
    Not,
}

/// Kinds of evaluation levels.
///
/// `Statement` is the implicit level around each statement; the other three
/// come from the bracket pairs of the language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LevelKind {
    /// Implicit level wrapping one statement.
    Statement,
    /// `( )`: grouping; the working cursor flows back to the parent.
    Paren,
    /// `[ ]`: isolated; the parent's working cursor is left untouched.
    Bracket,
    /// `{ }`: isolated, and stops at the first failed assignment.
    Brace,
}

impl LevelKind {
    /// Whether leaving this level copies its working cursor to the parent.
    pub const fn propagates_cursor(self) -> bool {
        matches!(self, LevelKind::Statement | LevelKind::Paren)
    }

    /// Whether a failed assignment stops the rest of this level.
    pub const fn stops_on_failure(self) -> bool {
        matches!(self, LevelKind::Brace)
    }

    pub const fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            LevelKind::Statement => ("", ""),
            LevelKind::Paren => ("(", ")"),
            LevelKind::Bracket => ("[", "]"),
            LevelKind::Brace => ("{", "}"),
        }
    }
}
