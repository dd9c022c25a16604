//! Parsed call responses.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::transport::RawResponse;

/// A successful (HTTP 200) call.
#[derive(Debug, Clone)]
pub struct CallResponse {
    /// Decoded JSON body.
    pub body: Value,
    /// The response as received, kept for diagnostics.
    pub raw: RawResponse,
    /// Instant taken immediately before the request was sent.
    pub sent_at: DateTime<Utc>,
}

impl CallResponse {
    /// Splits the response into `(body, raw, sent_at)`.
    #[must_use]
    pub fn into_parts(self) -> (Value, RawResponse, DateTime<Utc>) {
        (self.body, self.raw, self.sent_at)
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}
