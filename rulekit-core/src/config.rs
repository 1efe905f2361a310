use std::env;
use std::path::Path;

use url::Url;

use crate::errors::ConfigError;

/// Base URL used when no API url is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime environment used by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Settings shared by the client, the workbench and the CLI.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub log_level: String,
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API url is valid"),
            log_level: "info".to_string(),
            environment: Environment::Development,
        }
    }
}

impl ClientConfig {
    /// Loads `.env` (when present) and then the `RULEKIT_` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix("RULEKIT_")
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `RULEKIT_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let api_url = match env::var(key("API_URL")) {
            Ok(raw) if !raw.trim().is_empty() => parse_api_url(raw.trim())?,
            _ => parse_api_url(DEFAULT_API_URL)?,
        };

        let log_level = env::var(key("LOG")).unwrap_or_else(|_| "info".to_string());
        let environment = env::var(key("ENV"))
            .map(|raw| Environment::from_str(&raw))
            .unwrap_or_default();

        Ok(Self {
            api_url,
            log_level,
            environment,
        })
    }

    /// Reads an explicit env file into the process environment without
    /// overriding variables that are already set.
    pub fn load_env_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|err| ConfigError::EnvFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Replaces the API url, validating it first.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(raw)?;
        Ok(self)
    }

    /// Whether the process is running in production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

/// Parses a base URL and normalises it to end with `/` so relative joins
/// keep any path prefix (e.g. `http://host/api/`).
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    if !url.path().ends_with('/') {
        let mut path = url.path().trim_end_matches('/').to_string();
        path.push('/');
        url.set_path(&path);
    }

    Ok(url)
}
