use std::rc::Rc;

use serde::Serialize;

use crate::expr::Expr;
use crate::token::Token;

/// A named function or method: `name(params) { body }`.
///
/// Shared behind an `Rc` because every closure created from it (and every
/// method bound to an instance) points back at the same declaration.
#[derive(Debug, Serialize)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// Statement node.  `for` loops never appear here: the parser lowers them to
/// `Block` + `While`.
#[derive(Debug, Clone, Serialize)]
pub enum Stmt {
    Expression(Expr),

    Print(Expr),

    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    Function(Rc<FunctionDecl>),

    Return {
        keyword: Token,
        value: Option<Expr>,
    },

    Class {
        name: Token,
        /// Always an `Expr::Variable` when present.
        superclass: Option<Expr>,
        methods: Vec<Rc<FunctionDecl>>,
    },
}
