use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::types::{
    CreateRuleRequest, CreateVariableRequest, ErrorBody, RuleRecord, RuleUpdate, VariableRecord,
};

/// Typed HTTP client for the allocation rules API.
///
/// Calls are never retried; a failed call is reported to the caller, which
/// may simply issue it again.
#[derive(Clone, Debug)]
pub struct RulesApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RulesApiClient {
    /// Creates a new client bound to the provided base URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let url = rulekit_core::config::parse_api_url(base_url).map_err(|err| match err {
            rulekit_core::ConfigError::InvalidUrl { url, source } => {
                ApiError::InvalidUrl { url, source }
            }
            other => ApiError::Network(other.to_string()),
        })?;
        Ok(Self::with_url(url))
    }

    /// Creates a client from an already validated base URL.
    pub fn with_url(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /rules`
    pub async fn list_rules(&self) -> Result<Vec<RuleRecord>, ApiError> {
        let response = self.send::<()>(Method::GET, self.endpoint("rules")?, None).await?;
        decode(response).await
    }

    /// `GET /rules/variables`
    pub async fn list_variables(&self) -> Result<Vec<VariableRecord>, ApiError> {
        let response = self.send::<()>(Method::GET, self.endpoint("rules/variables")?, None).await?;
        decode(response).await
    }

    /// `POST /rules` with the rule marked active.
    pub async fn create_rule(&self, condition: &str, weight: i64) -> Result<(), ApiError> {
        let body = CreateRuleRequest {
            condition: condition.to_string(),
            weight,
            is_active: true,
        };
        self.send(Method::POST, self.endpoint("rules")?, Some(&body)).await?;
        Ok(())
    }

    /// `POST /rules/variables`
    pub async fn create_variable(
        &self,
        name: &str,
        formula: &str,
        description: Option<&str>,
    ) -> Result<(), ApiError> {
        let body = CreateVariableRequest {
            name: name.to_string(),
            formula: formula.to_string(),
            description: description.map(str::to_string),
        };
        self.send(Method::POST, self.endpoint("rules/variables")?, Some(&body)).await?;
        Ok(())
    }

    /// `PUT /rules/{id}` with only the fields set in `update`.
    pub async fn update_rule(&self, rule_id: &str, update: &RuleUpdate) -> Result<(), ApiError> {
        let url = self.rule_endpoint(rule_id)?;
        self.send(Method::PUT, url, Some(update)).await?;
        Ok(())
    }

    /// `DELETE /rules/{id}`
    pub async fn delete_rule(&self, rule_id: &str) -> Result<(), ApiError> {
        let url = self.rule_endpoint(rule_id)?;
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|source| ApiError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }

    /// `rules/{id}` with the id percent-encoded as a single path segment.
    fn rule_endpoint(&self, rule_id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint("rules")?;
        let display = url.to_string();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: display,
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .push(rule_id);
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        debug!(%method, %url, "calling rules API");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Builds an [`ApiError::Status`] from the body's `detail`, if any.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|err| err.detail)
        .and_then(|detail| match detail {
            Value::String(text) if !text.trim().is_empty() => Some(text),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

    debug!(%status, %message, "rules API rejected request");
    ApiError::Status { status, message }
}
