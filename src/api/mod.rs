//! Request layer for the GreenAudit backend.
//!
//! All operations share one core: build the endpoint URL from the configured
//! base, attach `Authorization: Bearer <token>` only when a token is supplied,
//! send the JSON body, and decode the response envelope
//! `{success: bool, message?: string, ...payload}` regardless of HTTP status.
//! The server encodes business failures in the body, so callers branch on the
//! decoded outcome, never on status codes.
//!
//! Transport failures (DNS, refused connection, timeout) and malformed
//! responses are indistinguishable to callers: both collapse into
//! [`ApiOutcome::Failure`] with a generic message. The underlying error is
//! logged at debug level and never propagated.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Method, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{Instrument, debug, info_span};
use url::Url;

pub mod audits;
pub mod auth;
pub mod types;

pub use audits::AuditKind;

/// Message surfaced for any transport or parse failure.
pub const NETWORK_ERROR: &str = "Network error";

const FAILURE_FALLBACK: &str = "Request failed";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Validates and normalizes the API base URL, e.g. `http://localhost:5000/api`.
    /// # Errors
    /// Returns an error if the URL cannot be parsed or uses a scheme other than http(s).
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).context("Error parsing base URL")?;

        let scheme = url.scheme();
        if !matches!(scheme, "http" | "https") {
            return Err(anyhow!(
                "Error parsing base URL: unsupported scheme {scheme}"
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Outcome of a single API operation.
///
/// Server-reported failures carry the server's `message` verbatim; transport
/// and parse failures carry [`NETWORK_ERROR`]. The message is display text,
/// not machine-parseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure { message: String },
}

impl<T> ApiOutcome<T> {
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Maps the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Success(value) => ApiOutcome::Success(f(value)),
            Self::Failure { message } => ApiOutcome::Failure { message },
        }
    }

    /// Converts the outcome into a `Result`, turning failures into errors.
    /// # Errors
    /// Returns the failure message as an error.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { message } => Err(anyhow!(message)),
        }
    }
}

/// Stateless HTTP client for the GreenAudit API.
///
/// Holds no session state; callers supply tokens per request and decide what
/// to persist from the results.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Shared request core for every operation.
    ///
    /// `token: None` omits the `Authorization` header entirely; an
    /// empty-string bearer header is never sent.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> ApiOutcome<T> {
        let url = self.endpoint_url(path);

        let span = info_span!(
            "api.request",
            http.method = %method,
            url = %url
        );

        match self
            .send(method, &url, token, body)
            .instrument(span)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!("request failed: {err:#}");
                ApiOutcome::failure(NETWORK_ERROR)
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<ApiOutcome<T>> {
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;

        // The envelope is read regardless of status code; 4xx bodies still
        // carry {success: false, message}.
        let envelope: Value = response.json().await?;

        if envelope
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            let payload = serde_json::from_value(envelope)?;
            Ok(ApiOutcome::Success(payload))
        } else {
            let message = envelope
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(FAILURE_FALLBACK)
                .to_string();
            Ok(ApiOutcome::Failure { message })
        }
    }
}
