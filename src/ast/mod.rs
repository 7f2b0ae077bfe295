//! Typed abstract syntax tree produced by [`crate::parse_statement`].

mod common;
mod expr;
mod query;

pub use common::{ColumnIdent, Either, SetQuantifier, TableIdent, TypeLiteral};
pub use expr::{ComparisonOp, Expression, Literal, MathOp, Placeholder, UnaryMathOp};
pub use query::{
    Group, GroupingSet, JoinKind, Projection, ProjectionKind, Relation, RelationKind, Select,
    SelectKind, SimpleSelect, SortExpression, SortOrder, Statement,
};
