use thiserror::Error;

/// Errors raised while loading configuration or the brand registry.
///
/// These are the only core errors that propagate to callers; the ingestion
/// and analytics paths are designed to degrade rather than fail.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brand registry at {path}: {source}")]
    RegistryIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brand registry: {0}")]
    RegistryParse(#[from] serde_yaml::Error),

    #[error("validation failed: {0}")]
    Validation(String),
}
