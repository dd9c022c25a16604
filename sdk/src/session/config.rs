//! Session configuration.
//!
//! Credentials, region, endpoint tables and certificate location for a
//! [`Session`](super::Session).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Identity;

use super::counter::DEFAULT_TRANSACTION_LIMIT;
use super::error::ConfigError;
use crate::exchange::{Exchange, UrlTable};

/// Environment variable holding the account username.
pub const ENV_USERNAME: &str = "BETFAIR_USERNAME";

/// Environment variable holding the account password.
pub const ENV_PASSWORD: &str = "BETFAIR_PASSWORD";

/// Environment variable holding the application key.
pub const ENV_APP_KEY: &str = "BETFAIR_APP_KEY";

/// Environment variable selecting the exchange region.
pub const ENV_EXCHANGE: &str = "BETFAIR_EXCHANGE";

/// Environment variable pointing at the certificate directory.
pub const ENV_CERTS: &str = "BETFAIR_CERTS";

/// Environment variable overriding the hourly transaction limit.
pub const ENV_TRANSACTION_LIMIT: &str = "BETFAIR_TRANSACTION_LIMIT";

/// Session configuration.
#[derive(Clone)]
pub struct SessionConfig {
    /// Account username.
    pub username: String,

    /// Account password.
    pub password: String,

    /// Application key sent as `X-Application`.
    pub app_key: String,

    /// Default exchange region.
    pub exchange: Exchange,

    /// Directory holding the client certificate (`.crt`) and key (`.key`).
    pub certs: Option<PathBuf>,

    /// Primary endpoint table.
    pub urls: UrlTable,

    /// Australian endpoint table.
    pub urls_aus: UrlTable,

    /// Maximum order instructions per hour.
    pub transaction_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            app_key: String::new(),
            exchange: Exchange::default(),
            certs: None,
            urls: UrlTable::primary(),
            urls_aus: UrlTable::aus(),
            transaction_limit: DEFAULT_TRANSACTION_LIMIT,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("app_key", &self.app_key)
            .field("exchange", &self.exchange)
            .field("certs", &self.certs)
            .field("transaction_limit", &self.transaction_limit)
            .finish_non_exhaustive()
    }
}

impl SessionConfig {
    /// Creates a configuration with the given credentials and default
    /// endpoints.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            app_key: app_key.into(),
            ..Default::default()
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| lookup(key).ok_or_else(|| ConfigError::Missing(key.to_string()));

        let mut config = Self::new(
            require(ENV_USERNAME)?,
            require(ENV_PASSWORD)?,
            require(ENV_APP_KEY)?,
        );

        if let Some(exchange) = lookup(ENV_EXCHANGE) {
            config.exchange = exchange.parse()?;
        }
        if let Some(certs) = lookup(ENV_CERTS) {
            config.certs = Some(PathBuf::from(certs));
        }
        if let Some(limit) = lookup(ENV_TRANSACTION_LIMIT) {
            config.transaction_limit = limit.parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_TRANSACTION_LIMIT} must be a number"))
            })?;
        }

        Ok(config)
    }

    /// Sets the default exchange region.
    #[must_use]
    pub fn with_exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = exchange;
        self
    }

    /// Sets the certificate directory.
    #[must_use]
    pub fn with_certs(mut self, certs: impl Into<PathBuf>) -> Self {
        self.certs = Some(certs.into());
        self
    }

    /// Replaces the primary endpoint table.
    #[must_use]
    pub fn with_urls(mut self, urls: UrlTable) -> Self {
        self.urls = urls;
        self
    }

    /// Replaces the Australian endpoint table.
    #[must_use]
    pub fn with_aus_urls(mut self, urls: UrlTable) -> Self {
        self.urls_aus = urls;
        self
    }

    /// Sets the hourly transaction limit.
    #[must_use]
    pub fn with_transaction_limit(mut self, limit: usize) -> Self {
        self.transaction_limit = limit;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::Invalid("username cannot be empty".to_string()));
        }

        if self.app_key.is_empty() {
            return Err(ConfigError::Invalid("app_key cannot be empty".to_string()));
        }

        if self.transaction_limit == 0 {
            return Err(ConfigError::Invalid(
                "transaction_limit must be positive".to_string(),
            ));
        }

        for (call_type, url) in self.urls.iter().chain(self.urls_aus.iter()) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{call_type} url must start with http:// or https://"
                )));
            }
        }

        Ok(())
    }
}

/// Location of a TLS client certificate and its private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCertificate {
    /// PEM certificate file.
    pub cert: PathBuf,
    /// PEM private key file.
    pub key: PathBuf,
}

impl ClientCertificate {
    /// Finds the certificate and key in `dir`: the first `.crt` and `.key`
    /// files in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or lacks either
    /// file.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| ConfigError::Certificate(format!("{}: {}", dir.display(), e)))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        files.sort();

        let find = |extension: &str| {
            files
                .iter()
                .find(|p| p.extension().is_some_and(|ext| ext == extension))
                .cloned()
                .ok_or_else(|| {
                    ConfigError::Certificate(format!(
                        "no .{extension} file in {}",
                        dir.display()
                    ))
                })
        };

        Ok(Self {
            cert: find("crt")?,
            key: find("key")?,
        })
    }

    /// Reads both files into a reqwest identity.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or the PEM data is
    /// invalid.
    pub fn load_identity(&self) -> Result<Identity, ConfigError> {
        let read = |path: &Path| {
            fs::read(path)
                .map_err(|e| ConfigError::Certificate(format!("{}: {}", path.display(), e)))
        };

        let mut pem = read(&self.cert)?;
        pem.push(b'\n');
        pem.extend(read(&self.key)?);

        Identity::from_pem(&pem).map_err(|e| ConfigError::Certificate(e.to_string()))
    }
}
