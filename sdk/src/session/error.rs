//! Session configuration errors.

use crate::exchange::RegionError;
use crate::transport::TransportError;

/// Errors raised while building or updating a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("missing configuration: {0}")]
    Missing(String),

    /// A setting has an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// A credential cannot be sent as an HTTP header.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// The client certificate could not be located or loaded.
    #[error("certificate error: {0}")]
    Certificate(String),

    /// Unknown exchange region.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// The default transport could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
