//! rulekit: build allocation rules and derived variables from tokens.
//!
//! The workspace is split by concern:
//!
//! * `rulekit-core`: errors, configuration and logging bootstrap
//! * `rulekit-builder`: field registry, token lists, preview and serializer
//! * `rulekit-client`: REST client for the rules API
//! * `rulekit-cli`: the `rulekit` terminal front end
//!
//! This crate re-exports the commonly used symbols and adds [`Workbench`],
//! which wires one registry to a rule builder and a formula builder.

pub mod workbench;

pub use rulekit_builder::{
    render, serialize, BuilderCommand, BuilderError, BuilderMode, ExpressionBuilder, Field,
    FieldRegistry, Operator, SerializationError, Token, TokenId, TokenKind, ValidationError,
};
pub use rulekit_client::{ApiError, RuleRecord, RuleUpdate, RulesApiClient, SubmitError};
pub use rulekit_core::{ClientConfig, Environment};
pub use workbench::{SharedBuilder, Workbench};
