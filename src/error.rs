//! Layered error types: lexical errors, internal parse errors carrying a
//! raw offset, and the public error returned to callers.

use thiserror::Error;

/// Failures raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("illegal character at position {offset}")]
    IllegalCharacter { offset: usize },

    #[error("unclosed string literal starting at position {offset}")]
    UnclosedStringLiteral { offset: usize },
}

impl LexError {
    pub(crate) fn offset(&self) -> usize {
        match self {
            LexError::IllegalCharacter { offset } => *offset,
            LexError::UnclosedStringLiteral { offset } => *offset,
        }
    }
}

/// Failures raised while walking the token stream. Carries a human
/// readable message and the offset of the offending token, mirroring how
/// grammar functions report failure throughout `src/parser`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {offset}")]
pub struct SyntaxError {
    pub message: String,
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// The single error type the public API exposes. Internal lexical and
/// syntactic failures are both folded into this shape so callers never
/// need to match on which stage failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{message} at position {offset}")]
pub struct ParsingError {
    pub message: String,
    pub offset: usize,
}

impl From<LexError> for ParsingError {
    fn from(err: LexError) -> Self {
        let offset = err.offset();
        let message = match err {
            LexError::IllegalCharacter { .. } => "illegal character",
            LexError::UnclosedStringLiteral { .. } => "unclosed string literal",
        };
        ParsingError {
            message: message.to_string(),
            offset,
        }
    }
}

impl From<SyntaxError> for ParsingError {
    fn from(err: SyntaxError) -> Self {
        // The grammar reports the top-level trailing-input check as "end
        // of input expected"; the public message speaks in terms of SQL
        // statements instead.
        let message = if err.message == "end of input expected" {
            "end of statement expected".to_string()
        } else {
            err.message
        };
        ParsingError {
            message,
            offset: err.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_converts_with_offset_preserved() {
        let err: ParsingError = LexError::IllegalCharacter { offset: 4 }.into();
        assert_eq!(err.message, "illegal character");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn unclosed_string_literal_converts_to_bare_message() {
        let err: ParsingError = LexError::UnclosedStringLiteral { offset: 7 }.into();
        assert_eq!(err.message, "unclosed string literal");
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn syntax_error_rewrites_end_of_input_message() {
        let err: ParsingError =
            SyntaxError::new("end of input expected", 10).into();
        assert_eq!(err.message, "end of statement expected");
        assert_eq!(err.offset, 10);
    }

    #[test]
    fn syntax_error_preserves_other_messages() {
        let err: ParsingError = SyntaxError::new("expected keyword 'from'", 3).into();
        assert_eq!(err.message, "expected keyword 'from'");
    }
}
