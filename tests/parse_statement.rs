//! End-to-end tests driving the public `parse_statement` entry point
//! against complete statements, matching the scenarios a caller would
//! actually feed the parser.

use pretty_assertions::assert_eq;
use sql99_parser::ast::{
    ComparisonOp, Either, Expression, Group, GroupingSet, JoinKind, Literal, ProjectionKind,
    RelationKind, SelectKind, SetQuantifier,
};
use sql99_parser::parse_statement;

fn simple(stmt: &sql99_parser::ast::Statement) -> &sql99_parser::ast::SimpleSelect {
    match &stmt.kind {
        SelectKind::Simple(s) => s,
        SelectKind::Union { .. } => panic!("expected a simple select, got a union"),
    }
}

#[test]
fn qualified_projections_with_aliases_and_where() {
    let stmt = parse_statement(r#"select a, b as x, c "y" from s.t t1 where a > 1"#).unwrap();
    let s = simple(&stmt);
    assert_eq!(s.projections.len(), 3);

    match &s.projections[1].kind {
        ProjectionKind::Expression { alias, .. } => assert_eq!(alias.as_deref(), Some("x")),
        other => panic!("unexpected: {other:?}"),
    }
    match &s.projections[2].kind {
        ProjectionKind::Expression { alias, .. } => assert_eq!(alias.as_deref(), Some("y")),
        other => panic!("unexpected: {other:?}"),
    }

    assert_eq!(s.relations.len(), 1);
    match &s.relations[0].kind {
        RelationKind::SingleTable { table, alias } => {
            assert_eq!(table.name, "t");
            assert_eq!(table.schema.as_deref(), Some("s"));
            assert_eq!(alias.as_deref(), Some("t1"));
        }
        other => panic!("unexpected: {other:?}"),
    }

    match s.where_clause.as_ref().unwrap() {
        Expression::Comparison { op, right, .. } => {
            assert_eq!(*op, ComparisonOp::Gt);
            match right.as_ref() {
                Expression::Literal {
                    value: Literal::Integer(1),
                    ..
                } => {}
                other => panic!("unexpected rhs: {other:?}"),
            }
        }
        other => panic!("unexpected where clause: {other:?}"),
    }
}

#[test]
fn count_distinct_with_rollup_grouping() {
    let stmt =
        parse_statement("SELECT COUNT(DISTINCT x) FROM t GROUP BY ROLLUP(a, (b, c))").unwrap();
    let s = simple(&stmt);
    match &s.projections[0].kind {
        ProjectionKind::Expression {
            expr: Expression::FunctionCall { name, distinct, args },
            ..
        } => {
            assert_eq!(name, "count");
            assert_eq!(*distinct, Some(SetQuantifier::Distinct));
            assert_eq!(args.len(), 1);
        }
        other => panic!("unexpected: {other:?}"),
    }

    assert_eq!(s.group_by.len(), 1);
    match &s.group_by[0] {
        Group::ByRollup(items) => {
            assert_eq!(items.len(), 2);
            assert!(matches!(items[0], Either::Left(Expression::Column { .. })));
            match &items[1] {
                Either::Right(GroupingSet(exprs)) => assert_eq!(exprs.len(), 2),
                other => panic!("unexpected: {other:?}"),
            }
        }
        other => panic!("unexpected group: {other:?}"),
    }
}

#[test]
fn left_outer_join_with_is_not_null() {
    let stmt = parse_statement(
        "SELECT a FROM t1 LEFT OUTER JOIN t2 ON t1.k = t2.k WHERE a IS NOT NULL",
    )
    .unwrap();
    let s = simple(&stmt);
    match &s.relations[0].kind {
        RelationKind::Join { kind, on, .. } => {
            assert_eq!(*kind, JoinKind::Left);
            assert!(on.is_some());
        }
        other => panic!("unexpected: {other:?}"),
    }
    match s.where_clause.as_ref().unwrap() {
        Expression::Is { negated, literal, .. } => {
            assert!(*negated);
            assert_eq!(*literal, Literal::Null);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn plain_placeholder_in_a_cast() {
    let stmt = parse_statement("SELECT CAST(? AS integer) FROM t").unwrap();
    let s = simple(&stmt);
    match &s.projections[0].kind {
        ProjectionKind::Expression {
            expr: Expression::Cast { expr, .. },
            ..
        } => {
            assert!(matches!(expr.as_ref(), Expression::Placeholder(p) if p.name.is_none()));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn range_and_set_placeholders_combine_via_and() {
    let stmt =
        parse_statement("SELECT 1 FROM t WHERE x BETWEEN ?[lo:integer) AND y IN ?{ids}").unwrap();
    let s = simple(&stmt);
    match s.where_clause.as_ref().unwrap() {
        Expression::And(left, right) => {
            match left.as_ref() {
                Expression::IsBetween0 { negated, placeholder, .. } => {
                    assert!(!negated);
                    assert_eq!(placeholder.name.as_deref(), Some("lo"));
                    assert_eq!(
                        placeholder.type_hint,
                        Some(sql99_parser::ast::TypeLiteral::Integer)
                    );
                }
                other => panic!("unexpected left operand: {other:?}"),
            }
            match right.as_ref() {
                Expression::IsIn0 { negated, placeholder, .. } => {
                    assert!(!negated);
                    assert_eq!(placeholder.name.as_deref(), Some("ids"));
                }
                other => panic!("unexpected right operand: {other:?}"),
            }
        }
        other => panic!("unexpected where clause: {other:?}"),
    }
}

#[test]
fn precedence_of_math_is_standard() {
    let stmt = parse_statement("SELECT 1 + 2 * 3").unwrap();
    let s = simple(&stmt);
    match &s.projections[0].kind {
        ProjectionKind::Expression {
            expr: Expression::Math { op, right, .. },
            ..
        } => {
            assert_eq!(*op, sql99_parser::ast::MathOp::Add);
            assert!(matches!(right.as_ref(), Expression::Math { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn not_binds_tighter_than_and_or_but_looser_than_comparison() {
    let stmt = parse_statement("SELECT 1 FROM t WHERE NOT a = b").unwrap();
    let s = simple(&stmt);
    match s.where_clause.as_ref().unwrap() {
        Expression::Not(inner) => {
            assert!(matches!(inner.as_ref(), Expression::Comparison { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn between_is_a_single_postfix_not_and_with_between() {
    let stmt = parse_statement("SELECT 1 FROM t WHERE a BETWEEN b AND c").unwrap();
    let s = simple(&stmt);
    assert!(matches!(
        s.where_clause.as_ref().unwrap(),
        Expression::IsBetween { .. }
    ));
}

#[test]
fn trailing_is_after_between_attaches_to_the_whole_between() {
    let stmt = parse_statement("SELECT 1 FROM t WHERE a BETWEEN b AND c IS NULL").unwrap();
    let s = simple(&stmt);
    match s.where_clause.as_ref().unwrap() {
        Expression::Is { value, negated, literal } => {
            assert!(!negated);
            assert_eq!(*literal, Literal::Null);
            assert!(matches!(value.as_ref(), Expression::IsBetween { .. }));
        }
        other => panic!("unexpected where clause: {other:?}"),
    }
}

#[test]
fn in_without_opening_paren_reports_the_furthest_error() {
    let err = parse_statement("SELECT 1 FROM t WHERE a IN 5").unwrap_err();
    assert_eq!(err.message, "( expected");
    assert_eq!(err.offset, 27);
}

#[test]
fn error_illegal_character_reports_offset() {
    let err = parse_statement("SELECT a @ b FROM t").unwrap_err();
    assert_eq!(err.message, "illegal character");
    assert_eq!(err.offset, 9);
}
