//! The statement-level AST: projections, relations, grouping and the
//! `Select`/`UnionSelect` envelope.

use super::common::{Either, SetQuantifier, TableIdent};
use super::expr::Expression;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionKind {
    AllColumns,
    AllTableColumns(TableIdent),
    Expression {
        expr: Expression,
        alias: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    pub kind: ProjectionKind,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationKind {
    SingleTable {
        table: TableIdent,
        alias: Option<String>,
    },
    SubSelect {
        select: Box<Select>,
        alias: String,
    },
    Join {
        left: Box<Relation>,
        kind: JoinKind,
        right: Box<Relation>,
        on: Option<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    pub kind: RelationKind,
    pub offset: usize,
}

/// A parenthesized list of expressions (possibly empty) participating
/// in `GROUPING SETS` / `ROLLUP` / `CUBE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupingSet(pub Vec<Expression>);

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Group {
    ByExpression(Expression),
    ByGroupingSets(Vec<GroupingSet>),
    ByRollup(Vec<Either<Expression, GroupingSet>>),
    ByCube(Vec<Either<Expression, GroupingSet>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortExpression {
    pub expression: Expression,
    pub order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleSelect {
    pub distinct: Option<SetQuantifier>,
    pub projections: Vec<Projection>,
    pub relations: Vec<Relation>,
    pub where_clause: Option<Expression>,
    pub group_by: Vec<Group>,
    pub order_by: Vec<SortExpression>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectKind {
    Simple(SimpleSelect),
    Union {
        left: Box<Select>,
        quantifier: Option<SetQuantifier>,
        right: Box<Select>,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Select {
    pub kind: SelectKind,
    pub offset: usize,
}

/// The public contract returns `Statement`; today it is exactly `Select`.
/// A future DML extension would widen this to an enum over statement
/// kinds.
pub type Statement = Select;
