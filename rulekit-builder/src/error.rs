use thiserror::Error;

use crate::token::{BuilderMode, TokenId};

/// Rejected builder mutations. A rejected mutation leaves the list untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("{kind} tokens are not available in {mode} mode")]
    UnsupportedToken {
        kind: &'static str,
        mode: BuilderMode,
    },
    #[error("token {0} does not exist")]
    UnknownToken(TokenId),
    #[error("token {id} is a {actual} token, expected {expected}")]
    WrongTokenKind {
        id: TokenId,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Failures turning a token list into an expression string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    #[error("expression is empty")]
    EmptyExpression,
    #[error("field token {0} has no field selected")]
    UnselectedField(TokenId),
    #[error("constant token {id} is not a number: {raw:?}")]
    NonNumericLiteral { id: TokenId, raw: String },
    #[error("value token {id} contains a quote or backslash: {raw:?}")]
    UnquotableValue { id: TokenId, raw: String },
}

/// Local checks that block a submission before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error("weight is required")]
    MissingWeight,
    #[error("weight must be an integer: {0:?}")]
    InvalidWeight(String),
    #[error("variable name is required")]
    EmptyName,
}

/// Failure parsing a palette spec such as `op:>=`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenParseError {
    #[error("unknown token type: {0}")]
    UnknownType(String),
    #[error("{kind} token requires an argument")]
    MissingArgument { kind: String },
    #[error("invalid {kind} token argument: {value}")]
    InvalidArgument { kind: String, value: String },
}
