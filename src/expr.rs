use serde::Serialize;

use crate::token::Token;

/// Identity of a name-bearing expression node.
///
/// Two textually identical references in different places get different ids,
/// so the resolver can record a binding distance for each occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ExprId(pub usize);

impl ExprId {
    pub fn next(self) -> ExprId {
        ExprId(self.0 + 1)
    }
}

/// A literal constant that appears directly in the source code.
///
/// The parser converts the token payload at parse time so the AST does not
/// keep the literal token around.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    Number(f64),
    Str(String),
    True,
    False,
    Nil,
}

/// Expression node.  Every consumer matches exhaustively over this enum.
#[derive(Debug, Clone, Serialize)]
pub enum Expr {
    Literal(LiteralValue),

    /// `!right` or `-right`
    Unary {
        operator: Token,
        right: Box<Expr>,
    },

    /// Arithmetic, comparison and equality operators.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Grouping(Box<Expr>),

    Variable {
        id: ExprId,
        name: Token,
    },

    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        /// The closing `)`, kept for error locations.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// `object.name`
    Get {
        object: Box<Expr>,
        name: Token,
    },

    /// `object.name = value`
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    /// `super.method`
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },

    This {
        id: ExprId,
        keyword: Token,
    },
}
