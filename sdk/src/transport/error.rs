//! Transport error types.

/// Failure to complete an HTTP round-trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Could not establish a connection to the endpoint.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not complete within its timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Any other failure while sending or receiving.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The transport could not be built.
    #[error("transport setup failed: {0}")]
    Setup(String),
}

impl TransportError {
    /// Returns true if the failure happened while connecting.
    #[must_use]
    pub const fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_builder() {
            Self::Setup(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Connect("dns error".to_string());
        assert_eq!(err.to_string(), "connection failed: dns error");

        let err = TransportError::Timeout("read".to_string());
        assert_eq!(err.to_string(), "request timed out: read");
    }

    #[test]
    fn test_is_connect() {
        assert!(TransportError::Connect("refused".to_string()).is_connect());
        assert!(!TransportError::Timeout("read".to_string()).is_connect());
        assert!(!TransportError::Request("reset".to_string()).is_connect());
        assert!(!TransportError::Setup("tls".to_string()).is_connect());
    }

    #[test]
    fn test_setup_error_display() {
        let err = TransportError::Setup("invalid identity".to_string());
        assert_eq!(err.to_string(), "transport setup failed: invalid identity");
    }
}
