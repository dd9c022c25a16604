//! Per-endpoint call profiles.
//!
//! Each call type maps to one [`CallProfile`] record describing how its
//! request is built and how its failures are reported. The generic call
//! operation branches on the record, never on the call type itself.

use reqwest::Method;

use crate::error::ErrorKind;
use crate::exchange::CallType;
use crate::transport::TimeoutPolicy;

/// How the request body is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    /// JSON-RPC 2.0 envelope around method and params.
    JsonRpc,
    /// Form-encoded username and password, read from the session.
    Credentials,
    /// No body.
    Empty,
}

/// Which of the session's header sets is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSet {
    /// `request_headers`.
    Request,
    /// `login_headers`.
    Login,
    /// `keep_alive_headers`.
    KeepAlive,
}

/// HTTP verb of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// GET.
    Get,
    /// POST.
    Post,
}

impl Verb {
    /// Returns the reqwest method.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
        }
    }
}

/// How one call type is sent and how its failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallProfile {
    /// Key into the URL tables.
    pub call_type: CallType,
    /// Error kind of non-200 responses.
    pub error_kind: ErrorKind,
    /// Request body.
    pub body: Body,
    /// HTTP verb.
    pub verb: Verb,
    /// Header set.
    pub headers: HeaderSet,
    /// Whether order placement methods are checked against the session's
    /// transaction limit.
    pub transaction_check: bool,
    /// Timeout policy.
    pub timeouts: TimeoutPolicy,
    /// Whether the TLS client certificate is presented.
    pub client_cert: bool,
    /// Whether connection failures are reported as
    /// [`CallError::Connection`](crate::CallError::Connection) rather than
    /// as generic transport failures.
    pub connection_marker: bool,
    /// Whether transport failures carry the method name.
    pub reports_method: bool,
}

impl CallProfile {
    const fn json_rpc(call_type: CallType) -> Self {
        Self {
            call_type,
            error_kind: ErrorKind::Api,
            body: Body::JsonRpc,
            verb: Verb::Post,
            headers: HeaderSet::Request,
            transaction_check: true,
            timeouts: TimeoutPolicy::Exchange,
            client_cert: false,
            connection_marker: true,
            reports_method: true,
        }
    }

    const fn identity(call_type: CallType, error_kind: ErrorKind, body: Body, verb: Verb) -> Self {
        Self {
            call_type,
            error_kind,
            body,
            verb,
            headers: match call_type {
                CallType::Login => HeaderSet::Login,
                _ => HeaderSet::KeepAlive,
            },
            transaction_check: false,
            timeouts: TimeoutPolicy::TransportDefault,
            client_cert: true,
            connection_marker: false,
            reports_method: true,
        }
    }

    /// Returns the profile of a call type.
    #[must_use]
    pub const fn of(call_type: CallType) -> Self {
        match call_type {
            CallType::Login => {
                Self::identity(CallType::Login, ErrorKind::Login, Body::Credentials, Verb::Post)
            }
            CallType::KeepAlive => {
                Self::identity(CallType::KeepAlive, ErrorKind::KeepAlive, Body::Empty, Verb::Post)
            }
            CallType::Logout => {
                Self::identity(CallType::Logout, ErrorKind::Logout, Body::Empty, Verb::Get)
            }
            CallType::Betting | CallType::Account | CallType::Scores => Self::json_rpc(call_type),
            CallType::Navigation => Self {
                call_type: CallType::Navigation,
                error_kind: ErrorKind::Api,
                body: Body::Empty,
                verb: Verb::Get,
                headers: HeaderSet::Request,
                transaction_check: false,
                timeouts: TimeoutPolicy::Exchange,
                client_cert: false,
                connection_marker: false,
                reports_method: false,
            },
        }
    }
}
