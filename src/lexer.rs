//! Character-level scanner turning source text into a positioned token
//! stream. See [`tokenize`].

use crate::error::LexError;
use crate::token::{is_keyword, DELIMITERS, Token, TokenKind};

/// Tokenizes `input`, skipping whitespace, block comments (`/* ... */`,
/// non-nesting) and line comments (`-- ...`). The returned vector always
/// ends with a single [`TokenKind::Eof`] token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    /// Byte offset into `input`, used for slicing.
    byte_pos: usize,
    /// Character offset, used for reported positions.
    char_pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            byte_pos: 0,
            char_pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.byte_pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.byte_pos += c.len_utf8();
        self.char_pos += 1;
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('-') if self.rest().starts_with("--") => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('/') if self.rest().starts_with("/*") => {
                    self.bump();
                    self.bump();
                    loop {
                        if self.rest().starts_with("*/") {
                            self.bump();
                            self.bump();
                            break;
                        }
                        if self.peek_char().is_none() {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();
        let start = self.char_pos;

        let Some(c) = self.peek_char() else {
            return Ok(Token::new(TokenKind::Eof, "", start));
        };

        if c.is_alphabetic() {
            return Ok(self.lex_ident_or_keyword(start));
        }
        if c.is_ascii_digit() {
            if let Some(tok) = self.try_lex_decimal(start) {
                return Ok(tok);
            }
            return Ok(self.lex_integer(start));
        }
        if c == '\'' {
            return self.lex_quoted(start, '\'', TokenKind::StringLit);
        }
        if c == '"' {
            return self.lex_quoted(start, '"', TokenKind::Identifier);
        }
        if let Some(tok) = self.try_lex_delimiter(start) {
            return Ok(tok);
        }

        tracing::trace!(char = %c, offset = start, "illegal character");
        Err(LexError::IllegalCharacter { offset: start })
    }

    fn lex_ident_or_keyword(&mut self, start: usize) -> Token {
        let mut text = String::new();
        text.push(self.bump().expect("checked by caller"));
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        let lower = text.to_lowercase();
        if is_keyword(&lower) {
            Token::new(TokenKind::Keyword, lower, start)
        } else {
            Token::new(TokenKind::Identifier, text, start)
        }
    }

    /// Tries `digit+ '.' digit+`. Must run before [`Self::lex_integer`] so
    /// `3.14` lexes as one decimal, not `3`, `.`, `14`.
    fn try_lex_decimal(&mut self, start: usize) -> Option<Token> {
        let bytes = self.rest().as_bytes();
        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == 0 || i >= bytes.len() || bytes[i] != b'.' {
            return None;
        }
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == i + 1 {
            return None;
        }
        let text = &self.rest()[..j];
        let token = Token::new(TokenKind::DecimalLit, text, start);
        for _ in 0..j {
            self.bump();
        }
        Some(token)
    }

    fn lex_integer(&mut self, start: usize) -> Token {
        let bytes = self.rest().as_bytes();
        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let text = self.rest()[..i].to_string();
        for _ in 0..i {
            self.bump();
        }
        Token::new(TokenKind::IntegerLit, text, start)
    }

    /// Shared implementation for single- and double-quoted literals: the
    /// spec gives double-quoted identifiers the same unclosed-quote rule
    /// as single-quoted strings.
    fn lex_quoted(
        &mut self,
        start: usize,
        quote: char,
        kind: TokenKind,
    ) -> Result<Token, LexError> {
        self.bump();
        let content_start = self.byte_pos;
        loop {
            match self.peek_char() {
                None => return Err(LexError::UnclosedStringLiteral { offset: start }),
                Some('\n') => return Err(LexError::UnclosedStringLiteral { offset: start }),
                Some(c) if c == quote => {
                    let content = self.input[content_start..self.byte_pos].to_string();
                    self.bump();
                    return Ok(Token::new(kind, content, start));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn try_lex_delimiter(&mut self, start: usize) -> Option<Token> {
        for d in DELIMITERS {
            if self.rest().starts_with(d) {
                let text = *d;
                for _ in 0..text.chars().count() {
                    self.bump();
                }
                return Some(Token::new(TokenKind::Delimiter, text, start));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_keyword_case_insensitively() {
        let tokens = tokenize("SeLeCt").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, "select");
    }

    #[test]
    fn lexes_identifier() {
        let tokens = tokenize("foo_bar1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "foo_bar1");
    }

    #[test]
    fn lexes_decimal_before_integer() {
        let tokens = tokenize("3.14").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::DecimalLit);
        assert_eq!(tokens[0].text, "3.14");
    }

    #[test]
    fn lexes_plain_integer() {
        let tokens = tokenize("42").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntegerLit);
        assert_eq!(tokens[0].text, "42");
    }

    #[test]
    fn lexes_string_literal() {
        let tokens = tokenize("'hello'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLit);
        assert_eq!(tokens[0].text, "hello");
    }

    #[test]
    fn unclosed_string_literal_errors() {
        let err = tokenize("'abc").unwrap_err();
        assert_eq!(err, LexError::UnclosedStringLiteral { offset: 0 });
    }

    #[test]
    fn unclosed_quoted_identifier_errors() {
        let err = tokenize("\"abc").unwrap_err();
        assert_eq!(err, LexError::UnclosedStringLiteral { offset: 0 });
    }

    #[test]
    fn lexes_quoted_identifier() {
        let tokens = tokenize("\"My Col\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "My Col");
    }

    #[test]
    fn longest_match_delimiters() {
        assert_eq!(kinds("<>"), vec![TokenKind::Delimiter, TokenKind::Eof]);
        let tokens = tokenize("<>").unwrap();
        assert_eq!(tokens[0].text, "<>");

        let tokens = tokenize("<=").unwrap();
        assert_eq!(tokens[0].text, "<=");

        let tokens = tokenize("< =").unwrap();
        assert_eq!(tokens[0].text, "<");
        assert_eq!(tokens[1].text, "=");
    }

    #[test]
    fn skips_line_and_block_comments() {
        let tokens = tokenize("a -- comment\n/* block */ b").unwrap();
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].text, "b");
    }

    #[test]
    fn illegal_character_errors_with_offset() {
        let err = tokenize("a @ b").unwrap_err();
        assert_eq!(err, LexError::IllegalCharacter { offset: 2 });
    }

    #[test]
    fn offsets_are_character_based() {
        let tokens = tokenize("select a").unwrap();
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 7);
    }
}
