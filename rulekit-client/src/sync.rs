use rulekit_builder::{prepare_rule, prepare_variable, ExpressionBuilder, FieldRegistry};
use tracing::{info, warn};

use crate::client::RulesApiClient;
use crate::error::SubmitError;
use crate::types::VariableRecord;

/// Fetches the server variables and merges them into `registry`.
///
/// Failures are logged and leave the registry untouched; the builders stay
/// usable with the fields already known. Returns the fetched records.
pub async fn fetch_dynamic_fields(
    client: &RulesApiClient,
    registry: &mut FieldRegistry,
) -> Vec<VariableRecord> {
    match client.list_variables().await {
        Ok(variables) => {
            let added = registry.resync(variables.iter().map(|variable| variable.name.as_str()));
            info!(fetched = variables.len(), added, "synchronised dynamic fields");
            variables
        }
        Err(err) => {
            warn!(error = %err, "failed to fetch dynamic fields");
            Vec::new()
        }
    }
}

/// Validates the rule form locally and posts it. Returns the submitted
/// condition.
pub async fn submit_rule(
    client: &RulesApiClient,
    builder: &ExpressionBuilder,
    weight: Option<&str>,
) -> Result<String, SubmitError> {
    let draft = prepare_rule(builder, weight)?;
    client.create_rule(&draft.condition, draft.weight).await?;
    info!(condition = %draft.condition, weight = draft.weight, "rule created");
    Ok(draft.condition)
}

/// Validates the variable form locally and posts it. Returns the submitted
/// formula.
pub async fn submit_variable(
    client: &RulesApiClient,
    builder: &ExpressionBuilder,
    name: &str,
    description: Option<&str>,
) -> Result<String, SubmitError> {
    let draft = prepare_variable(builder, name, description)?;
    client
        .create_variable(&draft.name, &draft.formula, draft.description.as_deref())
        .await?;
    info!(name = %draft.name, formula = %draft.formula, "variable created");
    Ok(draft.formula)
}
