use serde::{Deserialize, Serialize};

use crate::builder::ExpressionBuilder;
use crate::error::ValidationError;

/// Rule ready for submission: non-empty condition and an integer weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub condition: String,
    pub weight: i64,
}

/// Variable ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDraft {
    pub name: String,
    pub formula: String,
    pub description: Option<String>,
}

/// Checks the rule form: the condition must serialize and the weight must
/// be an integer.
pub fn prepare_rule(
    builder: &ExpressionBuilder,
    weight: Option<&str>,
) -> Result<RuleDraft, ValidationError> {
    let condition = builder.serialize()?;
    let weight = parse_weight(weight)?;
    Ok(RuleDraft { condition, weight })
}

/// Checks the variable form: a name and a serializable formula are required.
/// A blank description is sent as `None`.
pub fn prepare_variable(
    builder: &ExpressionBuilder,
    name: &str,
    description: Option<&str>,
) -> Result<VariableDraft, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let formula = builder.serialize()?;
    let description = description
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    Ok(VariableDraft {
        name: name.to_string(),
        formula,
        description,
    })
}

/// Parses a weight typed by the user.
pub fn parse_weight(raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::MissingWeight);
    }
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidWeight(raw.to_string()))
}
