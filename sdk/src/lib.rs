//! Betfair SDK - Rust client library for the Betfair exchange APIs.
//!
//! This crate sends single calls to the exchange's identity, JSON-RPC and
//! navigation endpoints on behalf of a long-lived [`Session`].
//!
//! # Call Types
//!
//! - Login, keep-alive and logout against the identity service
//! - Betting, account and scores JSON-RPC requests
//! - Navigation menu download
//!
//! # Example
//!
//! ```rust,ignore
//! use betfair_sdk::{ExchangeCall, Session, SessionConfig};
//! use serde_json::json;
//!
//! let session = Session::new(SessionConfig::from_env()?)?;
//! let call = ExchangeCall::betting(
//!     &session,
//!     "SportsAPING/v1.0/listEventTypes",
//!     json!({"filter": {}}),
//!     None,
//! )?;
//! let (body, raw, sent_at) = call.call(&session).await?.into_parts();
//! ```

pub mod call;
pub mod error;
pub mod exchange;
pub mod session;
pub mod transport;

pub use call::{CallProfile, CallResponse, ExchangeCall};
pub use error::{CallError, ErrorKind};
pub use exchange::{CallType, Exchange, RegionError, UrlTable};
pub use session::{ConfigError, Session, SessionConfig};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
