//! Exchange calls.
//!
//! An [`ExchangeCall`] pairs a call type with its method, parameters and
//! resolved endpoint. Sending it performs one HTTP round-trip shaped by the
//! call type's [`CallProfile`] and yields a [`CallResponse`].

pub mod profile;
pub mod request;
pub mod response;

pub use profile::{Body, CallProfile, HeaderSet, Verb};
pub use request::{ExchangeCall, PLACE_ORDERS, REPLACE_ORDERS};
pub use response::CallResponse;
