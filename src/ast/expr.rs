//! The expression AST: the sum type the thirteen-level precedence climber
//! in `src/parser/expr.rs` builds.

use super::common::{ColumnIdent, TypeLiteral};
use super::query::Select;

/// A literal value. `Boolean`/`Unknown`/`Null` are also the only literal
/// forms `IsExpression` accepts on its right-hand side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Integer(i64),
    Decimal(f64),
    String(String),
    True,
    False,
    Unknown,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryMathOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    GtEq,
    LtEq,
    Like,
}

/// One of the three `?`-introduced placeholder forms. The plain form
/// leaves both fields free; the range (`?[...)`.) and set (`?{...}`)
/// forms reuse this same shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    pub name: Option<String>,
    pub type_hint: Option<TypeLiteral>,
}

/// The expression sum type. Per the position-recording rule, only
/// `Literal` and `Column` carry a source offset — every other variant's
/// position is recoverable from its operands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    Literal { value: Literal, offset: usize },
    Column { ident: ColumnIdent, offset: usize },
    FunctionCall {
        name: String,
        distinct: Option<super::common::SetQuantifier>,
        args: Vec<Expression>,
    },
    Cast {
        expr: Box<Expression>,
        type_literal: TypeLiteral,
    },
    CaseWhen {
        scrutinee: Option<Box<Expression>>,
        cases: Vec<(Expression, Expression)>,
        else_branch: Option<Box<Expression>>,
    },
    SubSelect(Box<Select>),
    Parenthesized(Box<Expression>),
    Placeholder(Placeholder),
    UnaryMath {
        op: UnaryMathOp,
        operand: Box<Expression>,
    },
    Math {
        left: Box<Expression>,
        op: MathOp,
        right: Box<Expression>,
    },
    Comparison {
        left: Box<Expression>,
        op: ComparisonOp,
        right: Box<Expression>,
    },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    Exists(Box<Select>),
    Is {
        value: Box<Expression>,
        negated: bool,
        literal: Literal,
    },
    IsBetween {
        value: Box<Expression>,
        negated: bool,
        low: Box<Expression>,
        high: Box<Expression>,
    },
    IsBetween0 {
        value: Box<Expression>,
        negated: bool,
        placeholder: Placeholder,
    },
    IsIn {
        value: Box<Expression>,
        negated: bool,
        values: Vec<Expression>,
    },
    IsIn0 {
        value: Box<Expression>,
        negated: bool,
        placeholder: Placeholder,
    },
}
