//! Exchange regions and endpoint resolution.
//!
//! Every call resolves its target URL from an (exchange, call type) pair.
//! The UK exchange and the session endpoints use the primary table; the
//! Australian exchange has its own table for the JSON-RPC families and the
//! navigation menu.

pub mod region;
pub mod urls;

pub use region::{Exchange, RegionError};
pub use urls::{resolve_url, CallType, UrlTable};
