//! Tapis V3 client: token acquisition and the Meta API connection.

use std::{fmt, time::Duration};

use serde::Deserialize;
use tracing::{debug, info};

use crate::{config::Config, error::Error};

mod inspect;
mod token;

pub use inspect::Inspect;
pub use token::{TapisToken, login};

/// Header carrying the bearer token on every Tapis request.
pub const TOKEN_HEADER: &str = "X-Tapis-Token";

/// Opaque bearer token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Authenticated connection to one Meta database.
#[derive(Debug, Clone)]
pub struct MetaClient {
    http: reqwest::Client,
    base_url: String,
    db: String,
    token: AccessToken,
}

impl MetaClient {
    /// Wrap an already-authenticated HTTP client.
    ///
    /// `base_url` is the gateway root, e.g. `https://vdjserver.tapis.io`.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        db: impl Into<String>,
        token: AccessToken,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            db: db.into(),
            token,
        }
    }

    /// `<base>/v3/meta/<db>`
    pub fn collections_url(&self) -> String {
        format!("{}/v3/meta/{}", self.base_url, self.db)
    }

    /// `<base>/v3/meta/<db>/<collection>/_indexes`
    pub fn indexes_url(&self, collection: &str) -> String {
        format!("{}/{collection}/_indexes", self.collections_url())
    }
}

/// Build the HTTP client used for the whole run.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Authenticate against the gateway named in `config` and return a client
/// bound to its Meta database.
pub async fn connect(config: &Config) -> Result<MetaClient, Error> {
    connect_to(&config.base_url(), config).await
}

/// Like [`connect`], but against an explicit gateway root.
///
/// A configured long-lived service token is used as-is; otherwise the
/// service-account credentials are exchanged for a fresh token.
pub async fn connect_to(base_url: &str, config: &Config) -> Result<MetaClient, Error> {
    let http = http_client(config.timeout)?;

    let token = match &config.service_token {
        Some(jwt) => {
            info!("using long-lived service account token");
            AccessToken::new(jwt.clone())
        }
        None => {
            let token = login(&http, base_url, &config.username, &config.password).await?;
            info!(username = %config.username, "obtained Tapis access token");
            debug!(
                expires_in = ?token.expires_in,
                expires_at = ?token.expires_at,
                jti = ?token.jti,
                "token metadata"
            );
            token.access_token
        }
    };

    Ok(MetaClient::new(http, base_url, config.db.clone(), token))
}
