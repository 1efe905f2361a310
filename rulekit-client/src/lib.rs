//! Client side of the allocation rules API.
//!
//! [`RulesApiClient`] wraps the REST contract (`/rules`, `/rules/{id}`,
//! `/rules/variables`). The functions in [`sync`] combine it with the
//! builder crate: merging server variables into a field registry and
//! submitting validated rules and variables.

mod client;
mod error;
pub mod sync;
mod types;

pub use client::RulesApiClient;
pub use error::{ApiError, SubmitError, GENERIC_ERROR_MESSAGE};
pub use sync::{fetch_dynamic_fields, submit_rule, submit_variable};
pub use types::{CreateRuleRequest, CreateVariableRequest, RuleRecord, RuleUpdate, VariableRecord};
