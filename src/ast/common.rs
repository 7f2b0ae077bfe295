//! Shared leaf types referenced from both expressions and clauses.

/// A table name, optionally schema-qualified (`schema.table`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableIdent {
    pub name: String,
    pub schema: Option<String>,
}

/// A column reference, optionally table-qualified.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnIdent {
    pub name: String,
    pub table: Option<TableIdent>,
}

/// The `DISTINCT` / `ALL` modifier shared by `SELECT`, `UNION` and
/// aggregate-function argument lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetQuantifier {
    Distinct,
    All,
}

/// One of Table C's eight `CAST`/placeholder type keywords. `timestamp`
/// and `datetime` both lex to the same `Timestamp` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeLiteral {
    Timestamp,
    Date,
    Boolean,
    Varchar,
    Integer,
    Numeric,
    Decimal,
    Real,
}

impl TypeLiteral {
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "timestamp" | "datetime" => TypeLiteral::Timestamp,
            "date" => TypeLiteral::Date,
            "boolean" => TypeLiteral::Boolean,
            "varchar" => TypeLiteral::Varchar,
            "integer" => TypeLiteral::Integer,
            "numeric" => TypeLiteral::Numeric,
            "decimal" => TypeLiteral::Decimal,
            "real" => TypeLiteral::Real,
            _ => return None,
        })
    }
}

/// Disambiguates the two shapes `ROLLUP`/`CUBE` items can take: a bare
/// expression (`Left`) or a parenthesized grouping set (`Right`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}
