//! A syntactic parser for the SQL-99 `SELECT` query dialect.
//!
//! [`parse_statement`] is the entire public surface: it turns a SQL
//! source string into a typed [`ast::Statement`] or a [`ParsingError`]
//! carrying a message and the character offset of the failure. The
//! parser is purely syntactic — it does not resolve identifiers, infer
//! types, or validate anything beyond grammar shape.

pub mod ast;
mod error;
mod lexer;
mod parser;
mod token;

pub use error::ParsingError;

use parser::Parser;

/// Parses a single SQL-99 `SELECT` statement (optionally a `UNION`
/// chain), with an optional trailing `;`.
pub fn parse_statement(sql: &str) -> Result<ast::Statement, ParsingError> {
    let span = tracing::info_span!("parse_statement", len = sql.len());
    let _enter = span.enter();

    let result = lexer::tokenize(sql)
        .map_err(ParsingError::from)
        .and_then(|tokens| Parser::new(tokens).parse_program().map_err(ParsingError::from));

    if let Err(err) = &result {
        tracing::debug!(message = %err.message, offset = err.offset, "parse_statement failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{Literal, ProjectionKind, RelationKind, SelectKind};

    #[test]
    fn parses_select_star() {
        let stmt = parse_statement("SELECT * FROM t").unwrap();
        let SelectKind::Simple(simple) = &stmt.kind else {
            panic!("expected a simple select");
        };
        assert_eq!(simple.projections.len(), 1);
        assert_eq!(simple.projections[0].kind, ProjectionKind::AllColumns);
        assert_eq!(simple.relations.len(), 1);
        match &simple.relations[0].kind {
            RelationKind::SingleTable { table, alias } => {
                assert_eq!(table.name, "t");
                assert_eq!(table.schema, None);
                assert_eq!(*alias, None);
            }
            other => panic!("unexpected relation: {other:?}"),
        }
    }

    #[test]
    fn trailing_semicolon_is_optional_and_does_not_change_the_ast() {
        let a = parse_statement("SELECT 1").unwrap();
        let b = parse_statement("SELECT 1;").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn surrounding_whitespace_and_comments_do_not_change_the_ast() {
        let a = parse_statement("SELECT 1 FROM t").unwrap();
        let b = parse_statement("  SELECT   1 /* x */ FROM -- y\n t  \n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn keyword_case_is_insensitive() {
        let a = parse_statement("select * from t").unwrap();
        let b = parse_statement("SeLeCt * FrOm t").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn select_from_missing_projection_reports_expected_message() {
        let err = parse_statement("SELECT FROM t").unwrap_err();
        assert_eq!(err.message, "*, table or expression expected");
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn select_a_from_missing_relation_reports_expected_message() {
        let err = parse_statement("SELECT a FROM").unwrap_err();
        assert_eq!(err.message, "table, join or subselect expected");
    }

    #[test]
    fn unclosed_string_literal_is_reported() {
        let err = parse_statement("SELECT 'abc").unwrap_err();
        assert_eq!(err.message, "unclosed string literal");
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn trailing_input_after_a_full_statement_is_reported() {
        let err = parse_statement("SELECT a; SELECT b").unwrap_err();
        assert_eq!(err.message, "end of statement expected");
    }

    #[test]
    fn union_chain_is_left_associated() {
        let stmt = parse_statement("SELECT 1 UNION ALL SELECT 2 UNION SELECT 3").unwrap();
        let SelectKind::Union { left, quantifier, right } = &stmt.kind else {
            panic!("expected a union");
        };
        assert_eq!(*quantifier, None);
        let SelectKind::Simple(right_simple) = &right.kind else {
            panic!("expected the right side to be a simple select");
        };
        assert_eq!(literal_int(&right_simple.projections[0]), 3);

        let SelectKind::Union {
            quantifier: inner_quantifier,
            ..
        } = &left.kind
        else {
            panic!("expected the left side to itself be a union");
        };
        assert_eq!(*inner_quantifier, Some(ast::SetQuantifier::All));
    }

    fn literal_int(projection: &ast::Projection) -> i64 {
        match &projection.kind {
            ProjectionKind::Expression {
                expr: ast::Expression::Literal {
                    value: Literal::Integer(n),
                    ..
                },
                ..
            } => *n,
            other => panic!("unexpected projection: {other:?}"),
        }
    }
}
