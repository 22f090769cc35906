use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use philter_client::{ClientError, PhilterClient};
use philter_core::config::MIME_TEXT_PLAIN;
use philter_core::error::ConfigError;
use philter_core::{
    expression, Outcome, PipelineStage, StageConfiguration, WorkItem, ATTRIBUTE_CONTEXT,
    ATTRIBUTE_DOCUMENT_ID,
};

/// Configuration snapshot plus the client built from it. Replaced as a unit
/// on reconfiguration so a request never mixes old and new settings.
struct Scheduled {
    config: StageConfiguration,
    client: Arc<PhilterClient>,
}

/// Pipeline stage that sends each work item's text through the Philter API.
///
/// The stage holds one shared client per configuration. `process` takes
/// `&self` and clones the client handle before calling out, so hosts may
/// invoke it concurrently from any number of tasks; reconfiguration swaps
/// the handle without waiting for in-flight requests.
pub struct RedactionStage {
    scheduled: RwLock<Scheduled>,
}

impl RedactionStage {
    /// Validate the configuration and build the stage's client.
    ///
    /// Errors here are fatal: the stage never starts half-configured.
    pub fn new(config: StageConfiguration) -> Result<Self, ConfigError> {
        let scheduled = Self::schedule(config)?;
        Ok(Self {
            scheduled: RwLock::new(scheduled),
        })
    }

    /// Replace the stage's configuration and client.
    ///
    /// In-flight requests keep the client they started with; there is no
    /// quiescence barrier.
    pub async fn reconfigure(&self, config: StageConfiguration) -> Result<(), ConfigError> {
        let scheduled = Self::schedule(config)?;
        *self.scheduled.write().await = scheduled;
        Ok(())
    }

    fn schedule(config: StageConfiguration) -> Result<Scheduled, ConfigError> {
        config.validate()?;

        if config.disable_certificate_validation {
            warn!("certificate validation is disabled for the Philter API");
        }

        let client = PhilterClient::builder(config.endpoint.as_str())
            .accept_invalid_certs(config.disable_certificate_validation)
            .build()
            .map_err(|e| match e {
                ClientError::InvalidEndpoint { url, reason } => {
                    ConfigError::InvalidEndpoint { url, reason }
                }
                other => ConfigError::Client(other.to_string()),
            })?;

        info!(endpoint = %config.endpoint, profile = %config.filter_profile, "scheduled redaction stage");

        Ok(Scheduled {
            config,
            client: Arc::new(client),
        })
    }

    async fn run(&self, mut original: WorkItem) -> Outcome {
        // Snapshot the current schedule; the lock is not held across I/O.
        let (client, profile_template, mime_template) = {
            let scheduled = self.scheduled.read().await;
            (
                Arc::clone(&scheduled.client),
                scheduled.config.filter_profile.clone(),
                scheduled.config.mime_type.clone(),
            )
        };

        // The payload must be decodable text; binary content is an
        // item-level failure, not a stage fault.
        let text = match std::str::from_utf8(&original.payload) {
            Ok(text) => text.to_string(),
            Err(e) => {
                error!(item = %original.id, error = %e, "work item payload is not valid UTF-8");
                original.penalize();
                return Outcome::Failure { original };
            }
        };

        // Late-bind per-item property values against the item's attributes.
        let filter_profile = expression::resolve(&profile_template, &original.attributes);
        let mime_type = expression::resolve(&mime_template, &original.attributes);

        if !mime_type.eq_ignore_ascii_case(MIME_TEXT_PLAIN) {
            // Known looseness carried over from the original behavior: any
            // other resolved value still takes the plain-text path.
            warn!(item = %original.id, mime_type = %mime_type, "unsupported MIME type, treating content as text/plain");
        }

        let context = original.attribute(ATTRIBUTE_CONTEXT);
        let document_id = original.attribute(ATTRIBUTE_DOCUMENT_ID);

        debug!(item = %original.id, profile = %filter_profile, "filtering work item");

        match client
            .filter(context, document_id, &filter_profile, &text)
            .await
        {
            Ok(result) => {
                // Derived copy keeps the original's attributes (context
                // included); only the payload and document id change.
                let mut redacted = original.derive_child();
                redacted.payload = result.filtered_text.into_bytes();
                redacted.put_attribute(ATTRIBUTE_DOCUMENT_ID, result.document_id);
                Outcome::Redacted { redacted, original }
            }
            Err(e) => {
                error!(item = %original.id, error = %e, "unable to filter work item content");
                original.penalize();
                Outcome::Failure { original }
            }
        }
    }
}

#[async_trait]
impl PipelineStage for RedactionStage {
    async fn process(&self, item: WorkItem) -> Outcome {
        self.run(item).await
    }

    fn name(&self) -> &'static str {
        "philter_redaction"
    }
}
