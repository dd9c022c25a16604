//! The long-lived session context shared by every call.

use std::fmt;

use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::info;

use super::config::{ClientCertificate, SessionConfig};
use super::counter::{TransactionCountError, TransactionCounter};
use super::error::ConfigError;
use crate::exchange::{resolve_url, CallType, Exchange, RegionError, UrlTable};
use crate::transport::ReqwestTransport;

const X_APPLICATION: &str = "x-application";
const X_AUTHENTICATION: &str = "x-authentication";

const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Credentials, endpoint tables, headers, transport and transaction counter
/// shared across calls.
///
/// The session outlives every call made through it. Calls read from it; the
/// only state they change is the transaction counter, through
/// [`Session::check_transaction_count`].
pub struct Session<T = ReqwestTransport> {
    config: SessionConfig,
    app_key: HeaderValue,
    session_token: Option<HeaderValue>,
    transport: T,
    transactions: Mutex<TransactionCounter>,
}

impl Session<ReqwestTransport> {
    /// Creates a session using the default reqwest transport.
    ///
    /// If a certificate directory is configured, its certificate is loaded
    /// and presented on login, keep-alive and logout calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the certificate
    /// cannot be loaded, or the transport cannot be built.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let identity = match config.certs {
            Some(ref dir) => Some(ClientCertificate::from_dir(dir)?.load_identity()?),
            None => None,
        };
        let transport = ReqwestTransport::new(identity)?;

        Self::with_transport(config, transport)
    }
}

impl<T> Session<T> {
    /// Creates a session with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_transport(config: SessionConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;

        let app_key = HeaderValue::from_str(&config.app_key)
            .map_err(|_| ConfigError::InvalidHeader("X-Application"))?;
        let transactions = Mutex::new(TransactionCounter::new(config.transaction_limit));

        Ok(Self {
            config,
            app_key,
            session_token: None,
            transport,
            transactions,
        })
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the default exchange region.
    #[must_use]
    pub const fn exchange(&self) -> Exchange {
        self.config.exchange
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.config.username
    }

    /// Returns the account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.config.password
    }

    /// Returns the default transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the primary endpoint table.
    #[must_use]
    pub const fn urls(&self) -> &UrlTable {
        &self.config.urls
    }

    /// Returns the Australian endpoint table.
    #[must_use]
    pub const fn urls_aus(&self) -> &UrlTable {
        &self.config.urls_aus
    }

    /// Resolves the endpoint for a call type on `exchange`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected table has no entry for the call type.
    pub fn resolve_url(&self, exchange: Exchange, call_type: CallType) -> Result<&str, RegionError> {
        resolve_url(exchange, call_type, self.urls(), self.urls_aus())
    }

    /// Returns the current session token, if logged in.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_ref().and_then(|v| v.to_str().ok())
    }

    /// Returns true if a session token is held.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session_token.is_some()
    }

    /// Stores the session token returned by login or keep-alive.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be sent as a header.
    pub fn set_session_token(&mut self, token: &str) -> Result<(), ConfigError> {
        let mut value = HeaderValue::from_str(token)
            .map_err(|_| ConfigError::InvalidHeader("X-Authentication"))?;
        value.set_sensitive(true);
        self.session_token = Some(value);
        info!("Session token updated");
        Ok(())
    }

    /// Forgets the session token, typically after logout.
    pub fn clear_session_token(&mut self) {
        if self.session_token.take().is_some() {
            info!("Session token cleared");
        }
    }

    /// Headers for JSON-RPC and navigation calls.
    #[must_use]
    pub fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(X_APPLICATION, self.app_key.clone());
        if let Some(ref token) = self.session_token {
            headers.insert(X_AUTHENTICATION, token.clone());
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers
    }

    /// Headers for the login call.
    #[must_use]
    pub fn login_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(X_APPLICATION, self.app_key.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
        headers
    }

    /// Headers for keep-alive and logout calls.
    #[must_use]
    pub fn keep_alive_headers(&self) -> HeaderMap {
        let mut headers = self.login_headers();
        if let Some(ref token) = self.session_token {
            headers.insert(X_AUTHENTICATION, token.clone());
        }
        headers
    }

    /// Records `count` order instructions against the hourly limit.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionCountError::TooManyTransactions`] if the limit
    /// would be exceeded.
    pub fn check_transaction_count(&self, count: usize) -> Result<(), TransactionCountError> {
        self.transactions.lock().increment_and_check(count).map(|_| ())
    }

    /// Instructions recorded in the current hour.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.lock().count()
    }
}

impl<T> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.config.username)
            .field("exchange", &self.config.exchange)
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::urls::{AUS_BETTING_URL, LOGIN_URL};
    use crate::transport::mock::MockTransport;

    fn session() -> Session<MockTransport> {
        Session::with_transport(SessionConfig::new("user", "pass", "app-key"), MockTransport::new())
            .expect("session")
    }

    #[test]
    fn test_session_rejects_invalid_config() {
        let result = Session::with_transport(SessionConfig::new("", "pass", "key"), MockTransport::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_session_rejects_unprintable_app_key() {
        let result = Session::with_transport(
            SessionConfig::new("user", "pass", "bad\nkey"),
            MockTransport::new(),
        );
        assert_eq!(result.err(), Some(ConfigError::InvalidHeader("X-Application")));
    }

    #[test]
    fn test_request_headers_without_token() {
        let headers = session().request_headers();
        assert_eq!(headers["x-application"], "app-key");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers.get("x-authentication").is_none());
    }

    #[test]
    fn test_request_headers_with_token() {
        let mut session = session();
        session.set_session_token("token-123").expect("token");

        let headers = session.request_headers();
        assert_eq!(headers["x-authentication"], "token-123");
        assert!(headers["x-authentication"].is_sensitive());
    }

    #[test]
    fn test_login_headers() {
        let mut session = session();
        session.set_session_token("token-123").expect("token");

        let headers = session.login_headers();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers["x-application"], "app-key");
        assert_eq!(headers[CONTENT_TYPE], "application/x-www-form-urlencoded");
        assert!(headers.get("x-authentication").is_none());
    }

    #[test]
    fn test_keep_alive_headers() {
        let mut session = session();
        session.set_session_token("token-123").expect("token");

        let headers = session.keep_alive_headers();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/x-www-form-urlencoded");
        assert_eq!(headers["x-authentication"], "token-123");
    }

    #[test]
    fn test_header_sets_are_built_fresh() {
        let session = session();

        let mut first = session.request_headers();
        first.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let second = session.request_headers();
        assert_eq!(second[CONTENT_TYPE], "application/json");
        assert_eq!(session.login_headers()[ACCEPT], "application/json");
    }

    #[test]
    fn test_session_token_lifecycle() {
        let mut session = session();
        assert!(!session.is_logged_in());

        session.set_session_token("abc").expect("token");
        assert_eq!(session.session_token(), Some("abc"));

        session.clear_session_token();
        assert!(session.session_token().is_none());
    }

    #[test]
    fn test_set_session_token_rejects_invalid_value() {
        let mut session = session();
        assert!(session.set_session_token("bad\r\ntoken").is_err());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_transaction_count_uses_configured_limit() {
        let session = Session::with_transport(
            SessionConfig::new("user", "pass", "key").with_transaction_limit(3),
            MockTransport::new(),
        )
        .expect("session");

        assert!(session.check_transaction_count(2).is_ok());
        assert_eq!(session.transaction_count(), 2);
        assert!(session.check_transaction_count(2).is_err());
        assert_eq!(session.transaction_count(), 2);
    }

    #[test]
    fn test_resolve_url() {
        let session = session();
        assert_eq!(session.resolve_url(Exchange::Aus, CallType::Login), Ok(LOGIN_URL));
        assert_eq!(
            session.resolve_url(Exchange::Aus, CallType::Betting),
            Ok(AUS_BETTING_URL)
        );
    }

    #[test]
    fn test_session_debug_hides_credentials() {
        let debug = format!("{:?}", session());
        assert!(debug.contains("user"));
        assert!(!debug.contains("pass"));
        assert!(!debug.contains("app-key"));
    }
}
