use serde::{Deserialize, Serialize};

/// Stored allocation rule as returned by `GET /rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub rule_id: String,
    pub condition: String,
    pub weight: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Stored derived variable as returned by `GET /rules/variables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRecord {
    #[serde(default)]
    pub variable_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRuleRequest {
    pub condition: String,
    pub weight: i64,
    pub is_active: bool,
}

/// Body of `POST /rules/variables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateVariableRequest {
    pub name: String,
    pub formula: String,
    pub description: Option<String>,
}

/// Partial body of `PUT /rules/{id}`. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl RuleUpdate {
    pub fn weight(weight: i64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::default()
        }
    }

    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.is_active.is_none()
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
