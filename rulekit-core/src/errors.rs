use thiserror::Error;

/// Result type used across the rulekit core crate.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Canonical error representation for process bootstrap.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to read env file {path}: {message}")]
    EnvFile { path: String, message: String },
}
