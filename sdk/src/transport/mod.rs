//! HTTP transport seam.
//!
//! Calls build an [`HttpRequest`] and hand it to a [`Transport`], which
//! performs one round-trip and returns the [`RawResponse`] untouched. The
//! default implementation is [`ReqwestTransport`].

pub mod client;
pub mod error;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ReqwestTransport;
pub use error::TransportError;
pub use http::{
    HttpRequest, RawResponse, TimeoutPolicy, Transport, EXCHANGE_CONNECT_TIMEOUT,
    EXCHANGE_READ_TIMEOUT,
};
