use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::expression;

/// The only content type the plain-text redaction path supports.
pub const MIME_TEXT_PLAIN: &str = "text/plain";

/// Immutable per-stage settings, validated before a stage starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfiguration {
    /// Name of the filter profile the service applies. Required. May be a
    /// late-binding expression such as `${philter.profile}`.
    pub filter_profile: String,

    /// Base URL of the Philter API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Accept any TLS certificate and hostname when talking to the API.
    /// Supports self-signed development deployments; never enable this
    /// against a production endpoint.
    #[serde(default)]
    pub disable_certificate_validation: bool,

    /// MIME type of the payload. Only `text/plain` is supported; may be a
    /// late-binding expression resolved per item.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

impl Default for StageConfiguration {
    fn default() -> Self {
        Self {
            filter_profile: String::new(),
            endpoint: default_endpoint(),
            disable_certificate_validation: false,
            mime_type: default_mime_type(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:8080/".to_string()
}

fn default_mime_type() -> String {
    MIME_TEXT_PLAIN.to_string()
}

impl StageConfiguration {
    pub fn new(filter_profile: impl Into<String>) -> Self {
        Self {
            filter_profile: filter_profile.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_disable_certificate_validation(mut self, disable: bool) -> Self {
        self.disable_certificate_validation = disable;
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Enforce configure-time rules. Errors here are fatal: a stage must
    /// not start with an invalid configuration.
    pub fn validate(&self) -> Result<()> {
        if self.filter_profile.trim().is_empty() {
            return Err(ConfigError::MissingFilterProfile);
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint {
                url: self.endpoint.clone(),
                reason: "endpoint must start with http:// or https://".to_string(),
            });
        }

        // A literal MIME type is checked here, matching the original
        // allowable-values behavior. A late-bound expression is resolved per
        // item and falls through to the plain-text path with a warning.
        if !expression::is_expression(&self.mime_type)
            && !self.mime_type.eq_ignore_ascii_case(MIME_TEXT_PLAIN)
        {
            return Err(ConfigError::UnsupportedMimeType(self.mime_type.clone()));
        }

        Ok(())
    }
}
