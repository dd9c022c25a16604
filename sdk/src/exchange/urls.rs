//! Endpoint tables and URL resolution.

use std::collections::HashMap;
use std::fmt;

use super::region::{Exchange, RegionError};

/// Primary identity endpoint for certificate logins.
pub const LOGIN_URL: &str = "https://identitysso-cert.betfair.com/api/certlogin";

/// Primary session keep-alive endpoint.
pub const KEEP_ALIVE_URL: &str = "https://identitysso.betfair.com/api/keepAlive";

/// Primary logout endpoint.
pub const LOGOUT_URL: &str = "https://identitysso.betfair.com/api/logout";

/// Primary betting JSON-RPC endpoint.
pub const BETTING_URL: &str = "https://api.betfair.com/exchange/betting/json-rpc/v1";

/// Primary account JSON-RPC endpoint.
pub const ACCOUNT_URL: &str = "https://api.betfair.com/exchange/account/json-rpc/v1";

/// Primary scores JSON-RPC endpoint.
pub const SCORES_URL: &str = "https://api.betfair.com/exchange/scores/json-rpc/v1";

/// Navigation menu resource.
pub const NAVIGATION_URL: &str =
    "https://api.betfair.com/exchange/betting/rest/v1/en/navigation/menu.json";

/// Australian betting JSON-RPC endpoint.
pub const AUS_BETTING_URL: &str = "https://api-au.betfair.com/exchange/betting/json-rpc/v1";

/// Australian account JSON-RPC endpoint.
pub const AUS_ACCOUNT_URL: &str = "https://api-au.betfair.com/exchange/account/json-rpc/v1";

/// Australian navigation menu resource.
pub const AUS_NAVIGATION_URL: &str =
    "https://api-au.betfair.com/exchange/betting/rest/v1/en/navigation/menu.json";

/// Logical endpoint family, used as the key into a region's URL table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallType {
    /// Certificate login.
    Login,
    /// Session keep-alive.
    KeepAlive,
    /// Session logout.
    Logout,
    /// Betting JSON-RPC.
    Betting,
    /// Account JSON-RPC.
    Account,
    /// Scores JSON-RPC.
    Scores,
    /// Navigation menu.
    Navigation,
}

impl CallType {
    /// All call types, in table order.
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::KeepAlive,
        Self::Logout,
        Self::Betting,
        Self::Account,
        Self::Scores,
        Self::Navigation,
    ];

    /// Returns the table key for this call type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::KeepAlive => "keep_alive",
            Self::Logout => "logout",
            Self::Betting => "betting",
            Self::Account => "account",
            Self::Scores => "scores",
            Self::Navigation => "NAVIGATION",
        }
    }

    /// Returns true if this call type always uses the primary table,
    /// whatever the exchange.
    #[must_use]
    pub const fn is_region_agnostic(&self) -> bool {
        matches!(self, Self::Login | Self::KeepAlive | Self::Logout)
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint URLs keyed by call type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlTable {
    entries: HashMap<CallType, String>,
}

impl UrlTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The public primary (UK) endpoint table.
    #[must_use]
    pub fn primary() -> Self {
        Self::new()
            .with(CallType::Login, LOGIN_URL)
            .with(CallType::KeepAlive, KEEP_ALIVE_URL)
            .with(CallType::Logout, LOGOUT_URL)
            .with(CallType::Betting, BETTING_URL)
            .with(CallType::Account, ACCOUNT_URL)
            .with(CallType::Scores, SCORES_URL)
            .with(CallType::Navigation, NAVIGATION_URL)
    }

    /// The public Australian endpoint table.
    #[must_use]
    pub fn aus() -> Self {
        Self::new()
            .with(CallType::Betting, AUS_BETTING_URL)
            .with(CallType::Account, AUS_ACCOUNT_URL)
            .with(CallType::Navigation, AUS_NAVIGATION_URL)
    }

    /// Sets the URL for a call type.
    #[must_use]
    pub fn with(mut self, call_type: CallType, url: impl Into<String>) -> Self {
        self.entries.insert(call_type, url.into());
        self
    }

    /// Returns the URL for a call type, if configured.
    #[must_use]
    pub fn get(&self, call_type: CallType) -> Option<&str> {
        self.entries.get(&call_type).map(String::as_str)
    }

    /// Iterates over the configured entries.
    pub fn iter(&self) -> impl Iterator<Item = (CallType, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Resolves the endpoint for a call type on the given exchange.
///
/// Region-agnostic call types and the UK exchange read from `primary`; the
/// Australian exchange reads from `aus`.
///
/// # Errors
///
/// Returns [`RegionError::MissingEndpoint`] if the selected table has no
/// entry for the call type.
pub fn resolve_url<'a>(
    exchange: Exchange,
    call_type: CallType,
    primary: &'a UrlTable,
    aus: &'a UrlTable,
) -> Result<&'a str, RegionError> {
    let table = match exchange {
        _ if call_type.is_region_agnostic() => primary,
        Exchange::Uk => primary,
        Exchange::Aus => aus,
    };

    table
        .get(call_type)
        .ok_or(RegionError::MissingEndpoint { exchange, call_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_table_covers_every_call_type() {
        let primary = UrlTable::primary();
        for call_type in CallType::ALL {
            assert!(primary.get(call_type).is_some(), "missing {call_type}");
        }
    }

    #[test]
    fn test_resolve_uk() {
        let (primary, aus) = (UrlTable::primary(), UrlTable::aus());
        for call_type in CallType::ALL {
            let url = resolve_url(Exchange::Uk, call_type, &primary, &aus);
            assert_eq!(url, Ok(primary.get(call_type).unwrap_or_default()));
        }
    }

    #[test]
    fn test_resolve_aus_json_rpc() {
        let (primary, aus) = (UrlTable::primary(), UrlTable::aus());
        assert_eq!(
            resolve_url(Exchange::Aus, CallType::Betting, &primary, &aus),
            Ok(AUS_BETTING_URL)
        );
        assert_eq!(
            resolve_url(Exchange::Aus, CallType::Account, &primary, &aus),
            Ok(AUS_ACCOUNT_URL)
        );
    }

    #[test]
    fn test_session_endpoints_ignore_region() {
        let (primary, aus) = (UrlTable::primary(), UrlTable::aus());
        assert_eq!(
            resolve_url(Exchange::Aus, CallType::Login, &primary, &aus),
            Ok(LOGIN_URL)
        );
        assert_eq!(
            resolve_url(Exchange::Aus, CallType::KeepAlive, &primary, &aus),
            Ok(KEEP_ALIVE_URL)
        );
        assert_eq!(
            resolve_url(Exchange::Aus, CallType::Logout, &primary, &aus),
            Ok(LOGOUT_URL)
        );
    }

    #[test]
    fn test_navigation_follows_region() {
        let (primary, aus) = (UrlTable::primary(), UrlTable::aus());
        assert!(!CallType::Navigation.is_region_agnostic());
        assert_eq!(
            resolve_url(Exchange::Uk, CallType::Navigation, &primary, &aus),
            Ok(NAVIGATION_URL)
        );
        assert_eq!(
            resolve_url(Exchange::Aus, CallType::Navigation, &primary, &aus),
            Ok(AUS_NAVIGATION_URL)
        );
    }

    #[test]
    fn test_resolve_aus_missing_entry() {
        let (primary, aus) = (UrlTable::primary(), UrlTable::aus());
        assert_eq!(
            resolve_url(Exchange::Aus, CallType::Scores, &primary, &aus),
            Err(RegionError::MissingEndpoint {
                exchange: Exchange::Aus,
                call_type: CallType::Scores,
            })
        );
    }

    #[test]
    fn test_custom_table_entries() {
        let primary = UrlTable::new().with(CallType::Betting, "https://betting.test/rpc");
        let aus = UrlTable::new();
        assert_eq!(
            resolve_url(Exchange::Uk, CallType::Betting, &primary, &aus),
            Ok("https://betting.test/rpc")
        );
        assert!(resolve_url(Exchange::Uk, CallType::Account, &primary, &aus).is_err());
    }

    #[test]
    fn test_call_type_keys() {
        assert_eq!(CallType::KeepAlive.as_str(), "keep_alive");
        assert_eq!(CallType::Navigation.as_str(), "NAVIGATION");
    }
}
