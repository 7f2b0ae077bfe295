//! The expression precedence climber, tightest to loosest:
//! `simpleExpr → unary → multiply → add → postfix (is/in0/in/between0/
//! between, a single chainable suffix loop) → comparator → exists → not
//! → and → or`.

use super::{ExprResult, Level, Parser};
use crate::ast::{
    ColumnIdent, ComparisonOp, Expression, Literal, MathOp, Placeholder, SetQuantifier,
    TableIdent, TypeLiteral, UnaryMathOp,
};
use crate::error::SyntaxError;
use crate::token::TokenKind;

impl Parser {
    /// The memoized top-level entry point every clause parser calls.
    pub(crate) fn parse_expr(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Or, Self::parse_or)
    }

    fn parse_or(&self, pos: usize) -> ExprResult {
        let (mut left, mut pos) = self.parse_and(pos)?;
        while self.at_keyword(pos, "or") {
            let (right, next) = self.parse_and(pos + 1)?;
            left = Expression::Or(Box::new(left), Box::new(right));
            pos = next;
        }
        Ok((left, pos))
    }

    fn parse_and(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::And, |this, pos| {
            let (mut left, mut pos) = this.parse_not(pos)?;
            while this.at_keyword(pos, "and") {
                let (right, next) = this.parse_not(pos + 1)?;
                left = Expression::And(Box::new(left), Box::new(right));
                pos = next;
            }
            Ok((left, pos))
        })
    }

    /// Right-recursive so `NOT NOT x` parses as `Not(Not(x))`.
    fn parse_not(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Not, |this, pos| {
            if this.at_keyword(pos, "not") {
                let (inner, next) = this.parse_not(pos + 1)?;
                Ok((Expression::Not(Box::new(inner)), next))
            } else {
                this.parse_exists(pos)
            }
        })
    }

    fn parse_exists(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Exists, |this, pos| {
            if this.at_keyword(pos, "exists") {
                let next = this.expect_text(pos + 1, "(")?;
                let (select, next) = this.parse_select(next)?;
                let next = this.expect_text(next, ")")?;
                Ok((Expression::Exists(Box::new(select)), next))
            } else {
                this.parse_comparator(pos)
            }
        })
    }

    fn parse_comparator(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Comparator, |this, pos| {
            let (mut left, mut pos) = this.parse_postfix(pos)?;
            while let Some((op, op_len)) = this.try_comparison_op(pos) {
                let (right, next) = this.parse_postfix(pos + op_len)?;
                left = Expression::Comparison {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                };
                pos = next;
            }
            Ok((left, pos))
        })
    }

    fn try_comparison_op(&self, pos: usize) -> Option<(ComparisonOp, usize)> {
        if self.at_keyword(pos, "like") {
            return Some((ComparisonOp::Like, 1));
        }
        const OPS: &[(&str, ComparisonOp)] = &[
            ("<>", ComparisonOp::NotEq),
            (">=", ComparisonOp::GtEq),
            ("<=", ComparisonOp::LtEq),
            ("=", ComparisonOp::Eq),
            ("<", ComparisonOp::Lt),
            (">", ComparisonOp::Gt),
        ];
        for (text, op) in OPS {
            if self.at_delim(pos, text) {
                return Some((*op, 1));
            }
        }
        None
    }

    /// `IS`, `IN` and `BETWEEN` are all postfix suffixes on a single
    /// accumulated operand, tried in that order at every position, and
    /// chainable: each successful suffix becomes the base the next
    /// suffix attaches to, so `a BETWEEN b AND c IS NULL` reads as
    /// `(a BETWEEN b AND c) IS NULL` rather than attaching `IS NULL` to
    /// `c` alone. Their `low`/`high`/value-list operands are parsed one
    /// level tighter (`add`), not through this loop, so a suffix after
    /// `high` is always read as applying to the completed `BETWEEN`.
    fn parse_postfix(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Postfix, |this, pos| {
            let (mut left, mut pos) = this.parse_add(pos)?;
            loop {
                if let Some((negated, next)) = this.peek_is_keyword(pos) {
                    let (literal, after) = this.parse_is_literal(next)?;
                    left = Expression::Is {
                        value: Box::new(left),
                        negated,
                        literal,
                    };
                    pos = after;
                    continue;
                }
                if let Some((negated, after_in)) = this.peek_in_keyword(pos) {
                    if this.at_delim(after_in, "?") && this.at_delim(after_in + 1, "{") {
                        let (placeholder, next) = this.parse_set_placeholder(after_in)?;
                        left = Expression::IsIn0 {
                            value: Box::new(left),
                            negated,
                            placeholder,
                        };
                        pos = next;
                        continue;
                    }
                    let after_paren = this.expect_text(after_in, "(")?;
                    let (values, after_values) = this.parse_expr_list(after_paren)?;
                    let after_close = this.expect_text(after_values, ")")?;
                    left = Expression::IsIn {
                        value: Box::new(left),
                        negated,
                        values,
                    };
                    pos = after_close;
                    continue;
                }
                if let Some((negated, after_between)) = this.peek_between_keyword(pos) {
                    if this.at_delim(after_between, "?") && this.at_delim(after_between + 1, "[") {
                        let (placeholder, next) = this.parse_range_placeholder(after_between)?;
                        left = Expression::IsBetween0 {
                            value: Box::new(left),
                            negated,
                            placeholder,
                        };
                        pos = next;
                        continue;
                    }
                    let (low, after_low) = this.parse_add(after_between)?;
                    let after_and = this.expect_text(after_low, "and")?;
                    let (high, after_high) = this.parse_add(after_and)?;
                    left = Expression::IsBetween {
                        value: Box::new(left),
                        negated,
                        low: Box::new(low),
                        high: Box::new(high),
                    };
                    pos = after_high;
                    continue;
                }
                break;
            }
            Ok((left, pos))
        })
    }

    /// Returns `(negated, position after the IS keyword)` if the token at
    /// `pos` begins an `IS [NOT]` sequence.
    fn peek_is_keyword(&self, pos: usize) -> Option<(bool, usize)> {
        if !self.at_keyword(pos, "is") {
            return None;
        }
        let mut next = pos + 1;
        let negated = if self.at_keyword(next, "not") {
            next += 1;
            true
        } else {
            false
        };
        Some((negated, next))
    }

    fn parse_is_literal(&self, pos: usize) -> Result<(Literal, usize), SyntaxError> {
        if self.at_keyword(pos, "true") {
            return Ok((Literal::True, pos + 1));
        }
        if self.at_keyword(pos, "false") {
            return Ok((Literal::False, pos + 1));
        }
        if self.at_keyword(pos, "unknown") {
            return Ok((Literal::Unknown, pos + 1));
        }
        if self.at_keyword(pos, "null") {
            return Ok((Literal::Null, pos + 1));
        }
        Err(SyntaxError::new("expression expected", self.offset(pos)))
    }

    /// Returns `(negated, position after the IN keyword)` if the token at
    /// `pos` begins a `[NOT] IN` sequence.
    fn peek_in_keyword(&self, pos: usize) -> Option<(bool, usize)> {
        if self.at_keyword(pos, "not") && self.at_keyword(pos + 1, "in") {
            return Some((true, pos + 2));
        }
        if self.at_keyword(pos, "in") {
            return Some((false, pos + 1));
        }
        None
    }

    /// Parses `?{ name? (":" typeLiteral)? }`. `pos` must point at the `?`.
    fn parse_set_placeholder(&self, pos: usize) -> Result<(Placeholder, usize), SyntaxError> {
        let pos = self.expect_text(pos, "?")?;
        let pos = self.expect_text(pos, "{")?;
        let (placeholder, pos) = self.parse_placeholder_body(pos)?;
        let pos = self.expect_text(pos, "}")?;
        Ok((placeholder, pos))
    }

    /// Returns `(negated, position after the BETWEEN keyword)` if the
    /// token at `pos` begins a `[NOT] BETWEEN` sequence.
    fn peek_between_keyword(&self, pos: usize) -> Option<(bool, usize)> {
        if self.at_keyword(pos, "not") && self.at_keyword(pos + 1, "between") {
            return Some((true, pos + 2));
        }
        if self.at_keyword(pos, "between") {
            return Some((false, pos + 1));
        }
        None
    }

    /// Parses `?[ name? (":" typeLiteral)? )`. `pos` must point at the `?`.
    fn parse_range_placeholder(&self, pos: usize) -> Result<(Placeholder, usize), SyntaxError> {
        let pos = self.expect_text(pos, "?")?;
        let pos = self.expect_text(pos, "[")?;
        let (placeholder, pos) = self.parse_placeholder_body(pos)?;
        let pos = self.expect_text(pos, ")")?;
        Ok((placeholder, pos))
    }

    fn parse_add(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Add, |this, pos| {
            let (mut left, mut pos) = this.parse_multiply(pos)?;
            loop {
                let op = if this.at_delim(pos, "+") {
                    MathOp::Add
                } else if this.at_delim(pos, "-") {
                    MathOp::Sub
                } else {
                    break;
                };
                let (right, next) = this.parse_multiply(pos + 1)?;
                left = Expression::Math {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                };
                pos = next;
            }
            Ok((left, pos))
        })
    }

    fn parse_multiply(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Multiply, |this, pos| {
            let (mut left, mut pos) = this.parse_unary(pos)?;
            loop {
                let op = if this.at_delim(pos, "*") {
                    MathOp::Mul
                } else if this.at_delim(pos, "/") {
                    MathOp::Div
                } else {
                    break;
                };
                let (right, next) = this.parse_unary(pos + 1)?;
                left = Expression::Math {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                };
                pos = next;
            }
            Ok((left, pos))
        })
    }

    fn parse_unary(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::Unary, |this, pos| {
            let op = if this.at_delim(pos, "+") {
                Some(UnaryMathOp::Plus)
            } else if this.at_delim(pos, "-") {
                Some(UnaryMathOp::Minus)
            } else {
                None
            };
            match op {
                Some(op) => {
                    let (operand, next) = this.parse_unary(pos + 1)?;
                    Ok((
                        Expression::UnaryMath {
                            op,
                            operand: Box::new(operand),
                        },
                        next,
                    ))
                }
                None => this.parse_simple_expr(pos),
            }
        })
    }

    fn parse_simple_expr(&self, pos: usize) -> ExprResult {
        self.memoized(pos, Level::SimpleExpr, |this, pos| {
            let t = this.token_at(pos);
            match t.kind {
                TokenKind::IntegerLit => {
                    let value: i64 = t.text.parse().map_err(|_| {
                        SyntaxError::new("Invalid expression", this.offset(pos))
                    })?;
                    Ok((
                        Expression::Literal {
                            value: Literal::Integer(value),
                            offset: this.offset(pos),
                        },
                        pos + 1,
                    ))
                }
                TokenKind::DecimalLit => {
                    let value: f64 = t.text.parse().map_err(|_| {
                        SyntaxError::new("Invalid expression", this.offset(pos))
                    })?;
                    Ok((
                        Expression::Literal {
                            value: Literal::Decimal(value),
                            offset: this.offset(pos),
                        },
                        pos + 1,
                    ))
                }
                TokenKind::StringLit => Ok((
                    Expression::Literal {
                        value: Literal::String(t.text.clone()),
                        offset: this.offset(pos),
                    },
                    pos + 1,
                )),
                TokenKind::Keyword if t.text == "true" => Ok((
                    Expression::Literal {
                        value: Literal::True,
                        offset: this.offset(pos),
                    },
                    pos + 1,
                )),
                TokenKind::Keyword if t.text == "false" => Ok((
                    Expression::Literal {
                        value: Literal::False,
                        offset: this.offset(pos),
                    },
                    pos + 1,
                )),
                TokenKind::Keyword if t.text == "unknown" => Ok((
                    Expression::Literal {
                        value: Literal::Unknown,
                        offset: this.offset(pos),
                    },
                    pos + 1,
                )),
                TokenKind::Keyword if t.text == "null" => Ok((
                    Expression::Literal {
                        value: Literal::Null,
                        offset: this.offset(pos),
                    },
                    pos + 1,
                )),
                TokenKind::Keyword if t.text == "cast" => this.parse_cast(pos),
                TokenKind::Keyword if t.text == "case" => this.parse_case_when(pos),
                TokenKind::Delimiter if t.text == "?" => this.parse_placeholder_expr(pos),
                TokenKind::Delimiter if t.text == "(" => this.parse_parenthesized(pos),
                TokenKind::Identifier | TokenKind::Keyword
                    if this.at_delim(pos + 1, "(") =>
                {
                    this.parse_function_call(pos)
                }
                TokenKind::Identifier => this.parse_column(pos),
                _ => Err(SyntaxError::new("expression expected", this.offset(pos))),
            }
        })
    }

    fn token_at(&self, pos: usize) -> crate::token::Token {
        // Cloned so callers can match on an owned value without holding
        // a borrow across the `this.offset(pos)` calls in each arm.
        self.token(pos).clone()
    }

    fn parse_parenthesized(&self, pos: usize) -> ExprResult {
        let after_open = pos + 1;
        if self.at_keyword(after_open, "select") {
            if let Ok((select, next)) = self.parse_select(after_open) {
                if let Ok(next) = self.expect_text(next, ")") {
                    return Ok((Expression::SubSelect(Box::new(select)), next));
                }
            }
        }
        let (inner, next) = self.parse_expr(after_open)?;
        let next = self.expect_text(next, ")")?;
        Ok((Expression::Parenthesized(Box::new(inner)), next))
    }

    fn parse_placeholder_expr(&self, pos: usize) -> ExprResult {
        let pos = self.expect_text(pos, "?")?;
        let (placeholder, pos) = self.parse_placeholder_body(pos)?;
        Ok((Expression::Placeholder(placeholder), pos))
    }

    /// Parses the shared `name? (":" typeLiteral)?` body common to all
    /// three placeholder forms.
    fn parse_placeholder_body(&self, pos: usize) -> Result<(Placeholder, usize), SyntaxError> {
        let (name, pos) = match self.ident(pos) {
            Ok((name, next)) => (Some(name), next),
            Err(_) => (None, pos),
        };
        let (type_hint, pos) = if self.at_delim(pos, ":") {
            let next = pos + 1;
            let (word, next) = self.ident_or_keyword(next)?;
            let type_literal = TypeLiteral::from_keyword(&word)
                .ok_or_else(|| SyntaxError::new("type expected", self.offset(next - 1)))?;
            (Some(type_literal), next)
        } else {
            (None, pos)
        };
        Ok((Placeholder { name, type_hint }, pos))
    }

    fn parse_cast(&self, pos: usize) -> ExprResult {
        let pos = self.expect_text(pos, "cast")?;
        let pos = self.expect_text(pos, "(")?;
        let (expr, pos) = self.parse_expr(pos)?;
        let pos = self.expect_text(pos, "as")?;
        let (word, pos) = self.ident_or_keyword(pos)?;
        let type_literal = TypeLiteral::from_keyword(&word)
            .ok_or_else(|| SyntaxError::new("type expected", self.offset(pos - 1)))?;
        let pos = self.expect_text(pos, ")")?;
        Ok((
            Expression::Cast {
                expr: Box::new(expr),
                type_literal,
            },
            pos,
        ))
    }

    fn parse_case_when(&self, pos: usize) -> ExprResult {
        let pos = self.expect_text(pos, "case")?;
        let (scrutinee, mut pos) = if self.at_keyword(pos, "when") {
            (None, pos)
        } else {
            let (expr, next) = self.parse_expr(pos)?;
            (Some(Box::new(expr)), next)
        };

        let mut cases = Vec::new();
        loop {
            pos = self.expect_text(pos, "when")?;
            let (condition, next) = self.parse_expr(pos)?;
            let next = self.expect_text(next, "then")?;
            let (result, next) = self.parse_expr(next)?;
            cases.push((condition, result));
            pos = next;
            if !self.at_keyword(pos, "when") {
                break;
            }
        }

        let (else_branch, pos) = if self.at_keyword(pos, "else") {
            let (expr, next) = self.parse_expr(pos + 1)?;
            (Some(Box::new(expr)), next)
        } else {
            (None, pos)
        };
        let pos = self.expect_text(pos, "end")?;

        Ok((
            Expression::CaseWhen {
                scrutinee,
                cases,
                else_branch,
            },
            pos,
        ))
    }

    fn parse_function_call(&self, pos: usize) -> ExprResult {
        let (name, pos) = self.ident_or_keyword(pos)?;
        let name = name.to_lowercase();
        let pos = self.expect_text(pos, "(")?;
        let (distinct, pos) = if self.at_keyword(pos, "distinct") {
            (Some(SetQuantifier::Distinct), pos + 1)
        } else if self.at_keyword(pos, "all") {
            (Some(SetQuantifier::All), pos + 1)
        } else {
            (None, pos)
        };
        let (args, pos) = if self.at_delim(pos, ")") {
            (Vec::new(), pos)
        } else {
            self.parse_expr_list(pos)?
        };
        let pos = self.expect_text(pos, ")")?;
        Ok((
            Expression::FunctionCall {
                name,
                distinct,
                args,
            },
            pos,
        ))
    }

    fn parse_expr_list(&self, pos: usize) -> Result<(Vec<Expression>, usize), SyntaxError> {
        let (first, mut pos) = self.parse_expr(pos)?;
        let mut items = vec![first];
        while self.at_delim(pos, ",") {
            let (next_item, next) = self.parse_expr(pos + 1)?;
            items.push(next_item);
            pos = next;
        }
        Ok((items, pos))
    }

    /// A column reference: up to three dot-separated identifiers,
    /// interpreted right-to-left as `column`, `table.column` or
    /// `schema.table.column`.
    fn parse_column(&self, pos: usize) -> ExprResult {
        let offset = self.offset(pos);
        let (segments, next) = self.parse_dotted_idents(pos)?;
        let ident = Self::segments_to_column(segments);
        Ok((Expression::Column { ident, offset }, next))
    }

    fn parse_dotted_idents(&self, pos: usize) -> Result<(Vec<String>, usize), SyntaxError> {
        let (first, mut pos) = self.ident(pos)?;
        let mut segments = vec![first];
        while self.at_delim(pos, ".") && self.token(pos + 1).kind == TokenKind::Identifier {
            let (next_ident, next) = self.ident(pos + 1)?;
            segments.push(next_ident);
            pos = next;
        }
        Ok((segments, pos))
    }

    fn segments_to_column(mut segments: Vec<String>) -> ColumnIdent {
        let name = segments.pop().expect("at least one identifier segment");
        let table = match (segments.pop(), segments.pop()) {
            (Some(table), Some(schema)) => Some(TableIdent {
                name: table,
                schema: Some(schema),
            }),
            (Some(table), None) => Some(TableIdent {
                name: table,
                schema: None,
            }),
            (None, _) => None,
        };
        ColumnIdent { name, table }
    }
}
