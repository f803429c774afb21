//! Environment-derived configuration.
//!
//! The environment is read exactly once, by [`Config::from_env`]. Everything
//! downstream receives the resulting [`Config`] by reference.

use std::{fmt, time::Duration};

use crate::error::Error;

/// Tapis V3 gateway hostname, without scheme.
pub const HOST_VAR: &str = "TAPIS_V3_HOST";
/// Service-account username.
pub const USERNAME_VAR: &str = "VDJ_SERVICE_ACCOUNT";
/// Service-account password.
pub const PASSWORD_VAR: &str = "VDJ_SERVICE_ACCOUNT_SECRET";
/// Meta database name.
pub const DB_VAR: &str = "MONGODB_DB";
/// Optional long-lived service-account token.
pub const SERVICE_TOKEN_VAR: &str = "VDJ_SERVICE_ACCOUNT_JWT";
/// Optional request timeout in seconds.
pub const TIMEOUT_VAR: &str = "TAPIS_HTTP_TIMEOUT_SECS";

/// Request timeout used when [`TIMEOUT_VAR`] is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection and account settings for one run.
#[derive(Clone)]
pub struct Config {
    /// Gateway hostname, e.g. `vdjserver.tapis.io`.
    pub host: String,
    pub username: String,
    pub password: String,
    /// Meta database used as the first path segment under `/v3/meta`.
    pub db: String,
    /// When set, used as the access token instead of logging in.
    pub service_token: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Required variables that are unset or empty are reported in the order
    /// host, username, password, database. Values are kept verbatim.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(Error::MissingEnv(name))
        };

        let host = required(HOST_VAR)?;
        let username = required(USERNAME_VAR)?;
        let password = required(PASSWORD_VAR)?;
        let db = required(DB_VAR)?;
        let service_token = lookup(SERVICE_TOKEN_VAR).filter(|v| !v.is_empty());

        let timeout = match lookup(TIMEOUT_VAR).filter(|v| !v.is_empty()) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => parse_timeout(&raw)?,
        };

        Ok(Self {
            host,
            username,
            password,
            db,
            service_token,
            timeout,
        })
    }

    /// Base URL of the gateway, `https://<host>`.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, Error> {
    let secs: u64 = raw.trim().parse().map_err(|_| Error::InvalidEnv {
        name: TIMEOUT_VAR,
        reason: format!("expected a number of seconds, got {raw:?}"),
    })?;
    if secs == 0 {
        return Err(Error::InvalidEnv {
            name: TIMEOUT_VAR,
            reason: "timeout must be greater than zero".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("db", &self.db)
            .field(
                "service_token",
                &self.service_token.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}
