use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing embedding provider API key (set {var})")]
    MissingApiKey { var: &'static str },

    #[error("endpoint URL is not absolute: {value}")]
    InvalidEndpointUrl { value: String },

    #[error("invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}
