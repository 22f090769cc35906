use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// Fixed request timeout applied to connect and total request time.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Bounds on the idle connection pool kept between requests.
const MAX_IDLE_CONNECTIONS: usize = 10;
const KEEP_ALIVE_SECS: u64 = 30;

/// Response header carrying the document id the service assigned.
const DOCUMENT_ID_HEADER: &str = "x-document-id";

/// The redaction service's answer for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub filtered_text: String,
    pub document_id: String,
}

/// HTTP client bound to one Philter API endpoint.
///
/// The underlying reqwest client pools connections and is safe for
/// concurrent use; share one instance by `Arc` across tasks.
pub struct PhilterClient {
    endpoint: Url,
    http: reqwest::Client,
}

pub struct PhilterClientBuilder {
    endpoint: String,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl PhilterClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accept any TLS certificate chain and hostname.
    ///
    /// This disables all certificate validation for requests made by the
    /// built client. It exists so self-signed development deployments of
    /// the service can be reached; never enable it in production.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<PhilterClient> {
        let mut endpoint = Url::parse(&self.endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        match endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::InvalidEndpoint {
                    url: self.endpoint.clone(),
                    reason: format!("unsupported scheme: {}", other),
                });
            }
        }

        // Joining request paths later requires a trailing slash.
        if !endpoint.path().ends_with('/') {
            endpoint.set_path(&format!("{}/", endpoint.path()));
        }

        if self.accept_invalid_certs {
            warn!(
                endpoint = %endpoint,
                "TLS certificate validation is disabled for the Philter API client"
            );
        }

        let http = reqwest::Client::builder()
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
            .pool_idle_timeout(Duration::from_secs(KEEP_ALIVE_SECS))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()?;

        Ok(PhilterClient { endpoint, http })
    }
}

impl PhilterClient {
    pub fn builder(endpoint: impl Into<String>) -> PhilterClientBuilder {
        PhilterClientBuilder::new(endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one document through the service's filter endpoint.
    ///
    /// Absent context and document id are sent as empty query values; the
    /// service assigns a document id in that case and returns it in the
    /// `x-document-id` response header.
    pub async fn filter(
        &self,
        context: Option<&str>,
        document_id: Option<&str>,
        filter_profile: &str,
        text: &str,
    ) -> Result<FilterResult> {
        let url = self
            .endpoint
            .join("api/filter")
            .map_err(|e| ClientError::InvalidEndpoint {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })?;

        debug!(profile = filter_profile, url = %url, "sending filter request");

        let response = self
            .http
            .post(url)
            .query(&[
                ("c", context.unwrap_or_default()),
                ("d", document_id.unwrap_or_default()),
                ("p", filter_profile),
            ])
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(256).collect(),
            });
        }

        let assigned_id = response
            .headers()
            .get(DOCUMENT_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| document_id.unwrap_or_default().to_string());

        let filtered_text = response.text().await?;

        Ok(FilterResult {
            filtered_text,
            document_id: assigned_id,
        })
    }
}
