//! Exchange regions.
//!
//! Betfair runs separate market jurisdictions, each with its own endpoint
//! table.

use std::fmt;
use std::str::FromStr;

use super::urls::CallType;

/// A market jurisdiction with its own endpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Exchange {
    /// The primary (UK) exchange.
    #[default]
    Uk,
    /// The Australian exchange.
    Aus,
}

impl Exchange {
    /// Returns the region code used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uk => "UK",
            Self::Aus => "AUS",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UK" => Ok(Self::Uk),
            "AUS" => Ok(Self::Aus),
            other => Err(RegionError::UnknownExchange(other.to_string())),
        }
    }
}

/// Failure to map an (exchange, call type) pair onto an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// The exchange code is not a known region.
    #[error("unrecognized exchange: {0}")]
    UnknownExchange(String),

    /// The region's URL table has no entry for the call type.
    #[error("no {call_type} endpoint configured for exchange {exchange}")]
    MissingEndpoint {
        /// Region whose table was consulted.
        exchange: Exchange,
        /// Requested call type.
        call_type: CallType,
    },
}
