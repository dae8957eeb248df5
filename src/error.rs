//! Engine error taxonomy
//!
//! Every failure in the request pipeline is one of four kinds: lexing and
//! parsing produce `Parse`, the validator accumulates `Validation`, the
//! executor raises `Execution`, and schema construction raises
//! `TypeSystem`. Errors are plain values; only non-null propagation in the
//! executor treats them as early returns.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Source position of a token or error, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Pipeline error, tagged by stage.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphQLError {
    #[error("Syntax error at {position}: {message}")]
    Parse {
        message: String,
        position: SourcePosition,
    },
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    Execution { message: String },
    #[error("{message}")]
    TypeSystem { message: String },
}

impl GraphQLError {
    pub fn parse(message: impl Into<String>, position: SourcePosition) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    pub fn type_system(message: impl Into<String>) -> Self {
        Self::TypeSystem {
            message: message.into(),
        }
    }

    /// Position the error originated at, when one was recorded.
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            Self::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }
}

pub type GraphQLResult<T> = Result<T, GraphQLError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_carry_position() {
        let err = GraphQLError::parse("unexpected token", SourcePosition::new(3, 7));
        assert_eq!(err.position(), Some(SourcePosition::new(3, 7)));
        assert_eq!(err.to_string(), "Syntax error at 3:7: unexpected token");
    }

    #[test]
    fn non_parse_errors_have_no_position() {
        assert_eq!(GraphQLError::execution("boom").position(), None);
        assert_eq!(GraphQLError::validation("bad").to_string(), "bad");
    }
}
