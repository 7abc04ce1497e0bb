//! Client for dispatching verification requests

use crate::{
    config::Config,
    error::{
        Error,
        Result,
    },
    request::VerificationRequest,
    result::{
        BatchResult,
        VerificationResult,
    },
};
use reqwest::header::{
    CONTENT_TYPE,
    HeaderValue,
};
use serde_json::Value;
use url::Url;

/// Credential header expected by the verification service.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for the prescription verification API.
///
/// Every [`verify`](VerifyClient::verify) invocation issues exactly one
/// HTTP POST; there are no hidden retries and no shared state between
/// calls, so a failed call never affects the next one. Business-level
/// invalidity (`valid: false` in a 2xx payload) is returned as data, not
/// as an error.
#[derive(Debug)]
pub struct VerifyClient {
    http: reqwest::Client,
    endpoint: Url,
    config: Config,
}

impl VerifyClient {
    /// Create a new client from a validated configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint)?;

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    /// The endpoint this client POSTs to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// The current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one verification request and return the raw JSON payload.
    ///
    /// Fails with [`Error::MissingCredential`] before any network I/O
    /// when no API key is configured. Non-2xx statuses classify per
    /// [`Error::from_status`]; network and timeout failures surface as
    /// [`Error::Transport`]. The 2xx payload is forwarded opaquely, its
    /// schema is not validated here.
    pub async fn verify(&self, request: &VerificationRequest) -> Result<Value> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingCredential)?;

        let api_key = HeaderValue::from_str(api_key).map_err(|_| {
            Error::Config("API key contains characters not allowed in a header".to_string())
        })?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::from_status(status.as_u16(), body))
    }

    /// Verify a single token or URL and decode the result record.
    pub async fn verify_single(&self, request: &VerificationRequest) -> Result<VerificationResult> {
        let payload = self.verify(request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Verify a batch and decode the result list, accepting both the
    /// `{"results": [...]}` shape and the legacy bare-object shape.
    pub async fn verify_batch(&self, request: &VerificationRequest) -> Result<BatchResult> {
        let payload = self.verify(request).await?;
        BatchResult::from_payload(payload)
    }
}
