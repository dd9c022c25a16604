//! Request and response types exchanged with a [`Transport`].

use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use super::error::TransportError;

/// Connect timeout for JSON-RPC and navigation calls.
pub const EXCHANGE_CONNECT_TIMEOUT: Duration = Duration::from_millis(3050);

/// Read timeout for JSON-RPC and navigation calls.
pub const EXCHANGE_READ_TIMEOUT: Duration = Duration::from_secs(12);

/// Which timeouts a request is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeoutPolicy {
    /// 3.05s connect, 12s read.
    Exchange,
    /// Whatever the transport uses by default.
    TransportDefault,
}

impl TimeoutPolicy {
    /// Connect timeout, if the policy sets one.
    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        match self {
            Self::Exchange => Some(EXCHANGE_CONNECT_TIMEOUT),
            Self::TransportDefault => None,
        }
    }

    /// Read timeout, if the policy sets one.
    #[must_use]
    pub const fn read_timeout(&self) -> Option<Duration> {
        match self {
            Self::Exchange => Some(EXCHANGE_READ_TIMEOUT),
            Self::TransportDefault => None,
        }
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP verb.
    pub method: Method,
    /// Target URL.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
    /// Timeout policy.
    pub timeouts: TimeoutPolicy,
    /// Whether to present the session's TLS client certificate.
    pub client_cert: bool,
}

impl HttpRequest {
    /// Returns the body as UTF-8 text, if present and valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// The untouched response as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Final URL of the response.
    pub url: String,
}

impl RawResponse {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
            url: String::new(),
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Returns the body as lossy UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Sends requests to the exchange.
///
/// The session holds a default implementation; calls may be given another
/// one explicitly.
pub trait Transport: Send + Sync {
    /// Performs exactly one HTTP round-trip.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}
