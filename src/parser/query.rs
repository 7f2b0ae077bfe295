//! Statement and clause grammar: projections, `FROM`/joins, `WHERE`,
//! `GROUP BY` (incl. `GROUPING SETS`/`ROLLUP`/`CUBE`), `ORDER BY` and the
//! iterative `UNION` fold.

use super::Parser;
use crate::ast::{
    Either, Expression, Group, GroupingSet, JoinKind, Projection, ProjectionKind, Relation,
    RelationKind, Select, SelectKind, SetQuantifier, SimpleSelect, SortExpression, SortOrder,
    TableIdent,
};
use crate::error::SyntaxError;
use crate::token::TokenKind;

impl Parser {
    /// The memoized top-level entry point is [`Parser::parse_expr`]; this
    /// is the equivalent for statements. `UNION` chains fold left to
    /// right rather than recursing, so arbitrarily long chains run in
    /// linear stack depth.
    pub(crate) fn parse_select(&self, pos: usize) -> Result<(Select, usize), SyntaxError> {
        let offset = self.offset(pos);
        let (first, mut next) = self.parse_simple_select(pos)?;
        let mut select = Select {
            kind: SelectKind::Simple(first),
            offset,
        };
        loop {
            if !self.at_keyword(next, "union") {
                break;
            }
            let mut p = next + 1;
            let quantifier = if self.at_keyword(p, "all") {
                p += 1;
                Some(SetQuantifier::All)
            } else if self.at_keyword(p, "distinct") {
                p += 1;
                Some(SetQuantifier::Distinct)
            } else {
                None
            };
            let right_offset = self.offset(p);
            let (right_simple, next2) = self.parse_simple_select(p)?;
            let right = Select {
                kind: SelectKind::Simple(right_simple),
                offset: right_offset,
            };
            select = Select {
                kind: SelectKind::Union {
                    left: Box::new(select),
                    quantifier,
                    right: Box::new(right),
                },
                offset,
            };
            next = next2;
        }
        Ok((select, next))
    }

    fn parse_simple_select(&self, pos: usize) -> Result<(SimpleSelect, usize), SyntaxError> {
        let pos = self.expect_text(pos, "select")?;
        let (distinct, pos) = if self.at_keyword(pos, "distinct") {
            (Some(SetQuantifier::Distinct), pos + 1)
        } else if self.at_keyword(pos, "all") {
            (Some(SetQuantifier::All), pos + 1)
        } else {
            (None, pos)
        };

        let (projections, pos) = self.parse_projection_list(pos)?;

        let (relations, pos) = if self.at_keyword(pos, "from") {
            let from_pos = pos + 1;
            self.parse_relation_list(from_pos).map_err(|e| {
                if e.offset == self.offset(from_pos) {
                    SyntaxError::new("table, join or subselect expected", e.offset)
                } else {
                    e
                }
            })?
        } else {
            (Vec::new(), pos)
        };

        let (where_clause, pos) = if self.at_keyword(pos, "where") {
            let (expr, next) = self.parse_expr(pos + 1)?;
            (Some(expr), next)
        } else {
            (None, pos)
        };

        let (group_by, pos) = if self.at_keyword(pos, "group") {
            let next = self.expect_text(pos + 1, "by")?;
            self.parse_group_list(next)?
        } else {
            (Vec::new(), pos)
        };

        let (order_by, pos) = if self.at_keyword(pos, "order") {
            let next = self.expect_text(pos + 1, "by")?;
            self.parse_sort_list(next)?
        } else {
            (Vec::new(), pos)
        };

        Ok((
            SimpleSelect {
                distinct,
                projections,
                relations,
                where_clause,
                group_by,
                order_by,
            },
            pos,
        ))
    }

    // ---- projections ----------------------------------------------------

    fn parse_projection_list(&self, pos: usize) -> Result<(Vec<Projection>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_projection(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next, n) = self.parse_projection(pos + 1)?;
            items.push(next);
            pos = n;
        }
        Ok((items, pos))
    }

    fn parse_projection(&self, pos: usize) -> Result<(Projection, usize), SyntaxError> {
        let offset = self.offset(pos);
        if self.at_delim(pos, "*") {
            return Ok((
                Projection {
                    kind: ProjectionKind::AllColumns,
                    offset,
                },
                pos + 1,
            ));
        }
        if let Some((table, next)) = self.try_all_table_columns(pos) {
            return Ok((
                Projection {
                    kind: ProjectionKind::AllTableColumns(table),
                    offset,
                },
                next,
            ));
        }
        match self.parse_expr(pos) {
            Ok((expr, next)) => {
                let (alias, next2) = self.try_alias(next);
                Ok((
                    Projection {
                        kind: ProjectionKind::Expression { expr, alias },
                        offset,
                    },
                    next2,
                ))
            }
            Err(e) if e.offset == offset => {
                Err(SyntaxError::new("*, table or expression expected", offset))
            }
            Err(e) => Err(e),
        }
    }

    /// Peeks for `ident '.' '*'` or `ident '.' ident '.' '*'` without
    /// committing if the shape doesn't match — a plain expression
    /// projection may itself begin with a dotted identifier.
    fn try_all_table_columns(&self, pos: usize) -> Option<(TableIdent, usize)> {
        if self.token(pos).kind != TokenKind::Identifier {
            return None;
        }
        let first = self.token(pos).text.clone();
        let mut p = pos + 1;
        if !self.at_delim(p, ".") {
            return None;
        }
        p += 1;
        if self.at_delim(p, "*") {
            return Some((
                TableIdent {
                    name: first,
                    schema: None,
                },
                p + 1,
            ));
        }
        if self.token(p).kind == TokenKind::Identifier {
            let second = self.token(p).text.clone();
            let p2 = p + 1;
            if self.at_delim(p2, ".") && self.at_delim(p2 + 1, "*") {
                return Some((
                    TableIdent {
                        name: second,
                        schema: Some(first),
                    },
                    p2 + 2,
                ));
            }
        }
        None
    }

    // ---- FROM / joins -----------------------------------------------------

    fn parse_relation_list(&self, pos: usize) -> Result<(Vec<Relation>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_relation_with_joins(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next, n) = self.parse_relation_with_joins(pos + 1)?;
            items.push(next);
            pos = n;
        }
        Ok((items, pos))
    }

    fn parse_relation_with_joins(&self, pos: usize) -> Result<(Relation, usize), SyntaxError> {
        let start_offset = self.offset(pos);
        let (mut left, mut pos) = self.parse_relation_atom(pos)?;
        loop {
            let Some((kind, after_kw)) = self.try_join_kind(pos) else {
                break;
            };
            let (right, after_right) = self.parse_relation_atom(after_kw)?;
            let (on, next) = if self.at_keyword(after_right, "on") {
                let (expr, n) = self.parse_expr(after_right + 1)?;
                (Some(expr), n)
            } else {
                (None, after_right)
            };
            left = Relation {
                kind: RelationKind::Join {
                    left: Box::new(left),
                    kind,
                    right: Box::new(right),
                    on,
                },
                offset: start_offset,
            };
            pos = next;
        }
        Ok((left, pos))
    }

    fn try_join_kind(&self, pos: usize) -> Option<(JoinKind, usize)> {
        if self.at_keyword(pos, "inner") && self.at_keyword(pos + 1, "join") {
            return Some((JoinKind::Inner, pos + 2));
        }
        if self.at_keyword(pos, "join") {
            return Some((JoinKind::Inner, pos + 1));
        }
        if self.at_keyword(pos, "left") {
            let mut p = pos + 1;
            if self.at_keyword(p, "outer") {
                p += 1;
            }
            if self.at_keyword(p, "join") {
                return Some((JoinKind::Left, p + 1));
            }
            return None;
        }
        if self.at_keyword(pos, "right") {
            let mut p = pos + 1;
            if self.at_keyword(p, "outer") {
                p += 1;
            }
            if self.at_keyword(p, "join") {
                return Some((JoinKind::Right, p + 1));
            }
            return None;
        }
        None
    }

    fn parse_relation_atom(&self, pos: usize) -> Result<(Relation, usize), SyntaxError> {
        let offset = self.offset(pos);
        if self.at_delim(pos, "(") {
            let after_open = pos + 1;
            if self.at_keyword(after_open, "select") {
                if let Ok((select, next)) = self.parse_select(after_open) {
                    if let Ok(next) = self.expect_text(next, ")") {
                        let (alias, next2) = self.try_alias(next);
                        let alias = alias.ok_or_else(|| {
                            SyntaxError::new("identifier expected", self.offset(next))
                        })?;
                        return Ok((
                            Relation {
                                kind: RelationKind::SubSelect {
                                    select: Box::new(select),
                                    alias,
                                },
                                offset,
                            },
                            next2,
                        ));
                    }
                }
            }
            return Err(SyntaxError::new("table, join or subselect expected", offset));
        }
        let (table, next) = self
            .parse_table_ident(pos)
            .map_err(|_| SyntaxError::new("table, join or subselect expected", offset))?;
        let (alias, next2) = self.try_alias(next);
        Ok((
            Relation {
                kind: RelationKind::SingleTable { table, alias },
                offset,
            },
            next2,
        ))
    }

    fn parse_table_ident(&self, pos: usize) -> Result<(TableIdent, usize), SyntaxError> {
        let (first, next) = self.ident(pos)?;
        if self.at_delim(next, ".") && self.token(next + 1).kind == TokenKind::Identifier {
            let (second, next2) = self.ident(next + 1)?;
            Ok((
                TableIdent {
                    name: second,
                    schema: Some(first),
                },
                next2,
            ))
        } else {
            Ok((
                TableIdent {
                    name: first,
                    schema: None,
                },
                next,
            ))
        }
    }

    // ---- GROUP BY -----------------------------------------------------

    fn parse_group_list(&self, pos: usize) -> Result<(Vec<Group>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_group(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next, n) = self.parse_group(pos + 1)?;
            items.push(next);
            pos = n;
        }
        Ok((items, pos))
    }

    fn parse_group(&self, pos: usize) -> Result<(Group, usize), SyntaxError> {
        if self.at_keyword(pos, "grouping") {
            let next = self.expect_text(pos + 1, "sets")?;
            let next = self.expect_text(next, "(")?;
            let (sets, next) = self.parse_grouping_set_list(next)?;
            let next = self.expect_text(next, ")")?;
            return Ok((Group::ByGroupingSets(sets), next));
        }
        if self.at_keyword(pos, "rollup") {
            let next = self.expect_text(pos + 1, "(")?;
            let (items, next) = self.parse_either_list(next)?;
            let next = self.expect_text(next, ")")?;
            return Ok((Group::ByRollup(items), next));
        }
        if self.at_keyword(pos, "cube") {
            let next = self.expect_text(pos + 1, "(")?;
            let (items, next) = self.parse_either_list(next)?;
            let next = self.expect_text(next, ")")?;
            return Ok((Group::ByCube(items), next));
        }
        let (expr, next) = self.parse_expr(pos)?;
        Ok((Group::ByExpression(expr), next))
    }

    fn parse_grouping_set_list(
        &self,
        pos: usize,
    ) -> Result<(Vec<GroupingSet>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_grouping_set(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next, n) = self.parse_grouping_set(pos + 1)?;
            items.push(next);
            pos = n;
        }
        Ok((items, pos))
    }

    fn parse_grouping_set(&self, pos: usize) -> Result<(GroupingSet, usize), SyntaxError> {
        let pos = self.expect_text(pos, "(")?;
        if self.at_delim(pos, ")") {
            return Ok((GroupingSet(Vec::new()), pos + 1));
        }
        let (exprs, next) = self.parse_expr_comma_list(pos)?;
        let next = self.expect_text(next, ")")?;
        Ok((GroupingSet(exprs), next))
    }

    /// `ROLLUP`/`CUBE` items disambiguate a bare expression from a
    /// grouping set purely by whether the item opens with `(` — an
    /// expression that happens to itself be parenthesized is read as a
    /// (possibly singleton) grouping set instead, matching how the
    /// source grammar's `groupingSetOrExpr` alternative is ordered.
    fn parse_either_list(
        &self,
        pos: usize,
    ) -> Result<(Vec<Either<Expression, GroupingSet>>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_either_item(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next, n) = self.parse_either_item(pos + 1)?;
            items.push(next);
            pos = n;
        }
        Ok((items, pos))
    }

    fn parse_either_item(
        &self,
        pos: usize,
    ) -> Result<(Either<Expression, GroupingSet>, usize), SyntaxError> {
        if self.at_delim(pos, "(") {
            let (set, next) = self.parse_grouping_set(pos)?;
            Ok((Either::Right(set), next))
        } else {
            let (expr, next) = self.parse_expr(pos)?;
            Ok((Either::Left(expr), next))
        }
    }

    fn parse_expr_comma_list(&self, pos: usize) -> Result<(Vec<Expression>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_expr(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next, n) = self.parse_expr(pos + 1)?;
            items.push(next);
            pos = n;
        }
        Ok((items, pos))
    }

    // ---- ORDER BY -----------------------------------------------------

    fn parse_sort_list(&self, pos: usize) -> Result<(Vec<SortExpression>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_sort_expr(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next, n) = self.parse_sort_expr(pos + 1)?;
            items.push(next);
            pos = n;
        }
        Ok((items, pos))
    }

    fn parse_sort_expr(&self, pos: usize) -> Result<(SortExpression, usize), SyntaxError> {
        let (expr, next) = self.parse_expr(pos)?;
        let (order, next2) = if self.at_keyword(next, "asc") {
            (Some(SortOrder::Asc), next + 1)
        } else if self.at_keyword(next, "desc") {
            (Some(SortOrder::Desc), next + 1)
        } else {
            (None, next)
        };
        Ok((
            SortExpression {
                expression: expr,
                order,
            },
            next2,
        ))
    }
}
