//! Session context.
//!
//! A [`Session`] holds everything a call needs but does not own: credentials,
//! the endpoint tables, the header sets, the transport and the hourly
//! transaction counter.
//!
//! # Example
//!
//! ```rust,ignore
//! use betfair_sdk::session::{Session, SessionConfig};
//!
//! let config = SessionConfig::new("username", "password", "app-key")
//!     .with_certs("/etc/betfair/certs");
//! let session = Session::new(config)?;
//! ```

pub mod config;
pub mod context;
pub mod counter;
pub mod error;

pub use config::{ClientCertificate, SessionConfig};
pub use context::Session;
pub use counter::{TransactionCountError, TransactionCounter, DEFAULT_TRANSACTION_LIMIT};
pub use error::ConfigError;
