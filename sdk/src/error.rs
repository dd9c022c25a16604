//! SDK error types.
//!
//! Every failure of a call surfaces as a [`CallError`] carrying enough
//! context to diagnose it: the method, the parameters and, where one was
//! received, the raw response.

use std::fmt;

use serde_json::Value;

use crate::exchange::RegionError;
use crate::session::TransactionCountError;
use crate::transport::{RawResponse, TransportError};

/// Detail marker attached to connection failures.
pub const CONNECTION_ERROR: &str = "ConnectionError";

/// Failure category of a call family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// JSON-RPC and navigation calls.
    Api,
    /// Login.
    Login,
    /// Session keep-alive.
    KeepAlive,
    /// Logout.
    Logout,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Api => "API",
            Self::Login => "login",
            Self::KeepAlive => "keep-alive",
            Self::Logout => "logout",
        };
        f.write_str(label)
    }
}

/// Call errors.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The transport could not connect.
    #[error("API error calling {}: ConnectionError", method_label(.method))]
    Connection {
        /// Call parameters.
        params: Option<Value>,
        /// Call method.
        method: Option<String>,
        /// Underlying failure.
        source: TransportError,
    },

    /// Any other transport failure.
    #[error("API error calling {}: {source}", method_label(.method))]
    Transport {
        /// Call parameters.
        params: Option<Value>,
        /// Call method.
        method: Option<String>,
        /// Underlying failure.
        source: TransportError,
    },

    /// The exchange answered with a status other than 200.
    #[error("{kind} error calling {}: HTTP {}", method_label(.method), .response.status)]
    Status {
        /// Failure category of the call.
        kind: ErrorKind,
        /// The response as received.
        response: RawResponse,
        /// Call parameters.
        params: Option<Value>,
        /// Call method.
        method: Option<String>,
    },

    /// A 200 response whose body is not JSON.
    #[error(
        "{kind} error calling {}: response body is not valid JSON: {source}",
        method_label(.method)
    )]
    Decode {
        /// Failure category of the call.
        kind: ErrorKind,
        /// The response as received.
        response: RawResponse,
        /// Call parameters.
        params: Option<Value>,
        /// Call method.
        method: Option<String>,
        /// Decoder failure.
        source: serde_json::Error,
    },

    /// The request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The exchange or endpoint could not be resolved.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// The session's hourly transaction limit would be exceeded.
    #[error(transparent)]
    TooManyTransactions(#[from] TransactionCountError),
}

fn method_label(method: &Option<String>) -> &str {
    method.as_deref().unwrap_or("<no method>")
}

impl CallError {
    /// Returns the failure category.
    ///
    /// Transport and connection failures are always [`ErrorKind::Api`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { kind, .. } | Self::Decode { kind, .. } => *kind,
            _ => ErrorKind::Api,
        }
    }

    /// Returns the raw response, if one was received.
    #[must_use]
    pub const fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Status { response, .. } | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the call parameters, if the error carries them.
    #[must_use]
    pub const fn params(&self) -> Option<&Value> {
        match self {
            Self::Connection { params, .. }
            | Self::Transport { params, .. }
            | Self::Status { params, .. }
            | Self::Decode { params, .. } => params.as_ref(),
            _ => None,
        }
    }

    /// Returns the call method, if the error carries one.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Connection { method, .. }
            | Self::Transport { method, .. }
            | Self::Status { method, .. }
            | Self::Decode { method, .. } => method.as_deref(),
            _ => None,
        }
    }

    /// Returns the transport failure detail: [`CONNECTION_ERROR`] for
    /// connection failures, the underlying message for other transport
    /// failures.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Connection { .. } => Some(CONNECTION_ERROR.to_string()),
            Self::Transport { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}
