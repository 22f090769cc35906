use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Filter profile name is required and must not be empty")]
    MissingFilterProfile,

    #[error("Invalid API endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Unsupported content MIME type: {0} (only text/plain is supported)")]
    UnsupportedMimeType(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
