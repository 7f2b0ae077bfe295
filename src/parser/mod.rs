//! Recursive-descent parser over a token slice. Token-level helpers and
//! the memoization table live here; the grammar itself is split across
//! `expr` (the precedence climber) and `query` (statement and clause
//! parsers).

mod expr;
mod query;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::ast::Expression;
use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};

/// One of the expression precedence levels, used as half of the memo
/// table key. `Or` is the loosest (top-level `expr`). `Postfix` covers
/// the whole chainable `IS`/`IN`/`BETWEEN` suffix loop as one level,
/// since those suffixes attach to each other's result rather than
/// nesting like ordinary binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Level {
    SimpleExpr,
    Unary,
    Multiply,
    Add,
    Postfix,
    Comparator,
    Exists,
    Not,
    And,
    Or,
}

type ExprResult = Result<(Expression, usize), SyntaxError>;

pub(crate) struct Parser {
    tokens: Vec<Token>,
    memo: RefCell<HashMap<(usize, Level), ExprResult>>,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            memo: RefCell::new(HashMap::new()),
        }
    }

    fn token(&self, pos: usize) -> &Token {
        &self.tokens[pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn offset(&self, pos: usize) -> usize {
        self.token(pos).offset
    }

    fn at_keyword(&self, pos: usize, kw: &str) -> bool {
        let t = self.token(pos);
        t.kind == TokenKind::Keyword && t.text == kw
    }

    fn at_delim(&self, pos: usize, d: &str) -> bool {
        let t = self.token(pos);
        t.kind == TokenKind::Delimiter && t.text == d
    }

    fn at_eof(&self, pos: usize) -> bool {
        self.token(pos).kind == TokenKind::Eof
    }

    /// Consumes a specific keyword or delimiter by textual equality.
    /// `text` must be present in the keyword or delimiter tables —
    /// calling this with anything else is a programmer error.
    fn expect_text(&self, pos: usize, text: &str) -> Result<usize, SyntaxError> {
        let is_kw = crate::token::is_keyword(text);
        let is_delim = crate::token::is_delimiter(text);
        debug_assert!(
            is_kw || is_delim,
            "expect_text called with neither a keyword nor a delimiter: {text}"
        );
        let matches = if is_kw {
            self.at_keyword(pos, text)
        } else {
            self.at_delim(pos, text)
        };
        if matches {
            Ok(pos + 1)
        } else {
            Err(SyntaxError::new(format!("{text} expected"), self.offset(pos)))
        }
    }

    fn ident(&self, pos: usize) -> Result<(String, usize), SyntaxError> {
        let t = self.token(pos);
        if t.kind == TokenKind::Identifier {
            Ok((t.text.clone(), pos + 1))
        } else {
            Err(SyntaxError::new("identifier expected", self.offset(pos)))
        }
    }

    fn ident_or_keyword(&self, pos: usize) -> Result<(String, usize), SyntaxError> {
        let t = self.token(pos);
        match t.kind {
            TokenKind::Identifier | TokenKind::Keyword => Ok((t.text.clone(), pos + 1)),
            _ => Err(SyntaxError::new("identifier expected", self.offset(pos))),
        }
    }

    /// Parses an alias: `AS`-optional, a bare identifier or a single
    /// quoted string literal whose content becomes the alias text. Only
    /// commits past a leading `AS` if an alias token actually follows,
    /// so a stray `AS` before e.g. `FROM` is left for the caller to
    /// reject rather than silently swallowed.
    fn try_alias(&self, pos: usize) -> (Option<String>, usize) {
        let after_as = if self.at_keyword(pos, "as") { pos + 1 } else { pos };
        let t = self.token(after_as);
        match t.kind {
            TokenKind::Identifier | TokenKind::StringLit => {
                (Some(t.text.clone()), after_as + 1)
            }
            _ => (None, pos),
        }
    }

    fn memoized(
        &self,
        pos: usize,
        level: Level,
        f: impl FnOnce(&Self, usize) -> ExprResult,
    ) -> ExprResult {
        if let Some(cached) = self.memo.borrow().get(&(pos, level)) {
            return cached.clone();
        }
        let result = f(self, pos);
        self.memo.borrow_mut().insert((pos, level), result.clone());
        result
    }

    pub(crate) fn parse_program(&self) -> Result<crate::ast::Statement, SyntaxError> {
        let (select, mut pos) = self.parse_select(0)?;
        if self.at_delim(pos, ";") {
            pos += 1;
        }
        if !self.at_eof(pos) {
            return Err(SyntaxError::new("end of input expected", self.offset(pos)));
        }
        Ok(select)
    }
}
