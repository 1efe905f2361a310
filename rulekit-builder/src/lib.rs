//! Token-based builder for rule conditions and variable formulas.
//!
//! Users assemble an expression by appending typed tokens (field references,
//! values, operators, logic words and parentheses). The builder keeps a live
//! preview and flattens the list into the expression string consumed by the
//! allocation rule engine. Nothing here performs I/O; see `rulekit-client`
//! for the REST side.

mod builder;
mod error;
mod field;
mod form;
mod preview;
mod serializer;
mod token;

pub use builder::{BuilderCommand, ExpressionBuilder};
pub use error::{BuilderError, SerializationError, TokenParseError, ValidationError};
pub use field::{
    static_fields, suggested_values, Field, FieldListener, FieldRegistry, VARIABLE_LABEL_SUFFIX,
};
pub use form::{parse_weight, prepare_rule, prepare_variable, RuleDraft, VariableDraft};
pub use preview::{render, EMPTY_PREVIEW};
pub use serializer::{is_numeric, serialize};
pub use token::{BuilderMode, LogicOp, Operator, Paren, Token, TokenId, TokenKind};
