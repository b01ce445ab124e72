//! Statement nodes

use super::expressions::Expression;
use super::types::CodeTypeRef;

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub exception_type: CodeTypeRef,
    /// Variable name; `None` catches without binding
    pub variable: Option<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assign {
        left: Expression,
        right: Expression,
    },
    Condition {
        condition: Expression,
        then_branch: Vec<Statement>,
        else_branch: Vec<Statement>,
    },
    /// `for (init; test; increment) { body }`
    Iteration {
        init: Option<Box<Statement>>,
        test: Option<Expression>,
        increment: Option<Box<Statement>>,
        body: Vec<Statement>,
    },
    TryCatchFinally {
        try_block: Vec<Statement>,
        catches: Vec<CatchClause>,
        finally_block: Vec<Statement>,
    },
    Return(Option<Expression>),
    Throw(Option<Expression>),
    VariableDecl {
        ty: CodeTypeRef,
        name: String,
        init: Option<Expression>,
    },
    Comment {
        text: String,
        is_doc: bool,
    },
    Snippet(String),
    Labeled {
        label: String,
        statement: Option<Box<Statement>>,
    },
    Goto(String),
    Expression(Expression),
}

impl Statement {
    pub fn comment(text: impl Into<String>) -> Self {
        Statement::Comment {
            text: text.into(),
            is_doc: false,
        }
    }

    pub fn ret(expr: Expression) -> Self {
        Statement::Return(Some(expr))
    }

    pub fn throw(expr: Expression) -> Self {
        Statement::Throw(Some(expr))
    }
}
