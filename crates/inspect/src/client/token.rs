//! Password-grant token exchange against `/v3/oauth2/tokens`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{client::AccessToken, error::Error};

/// Token issued by the Tapis OAuth2 service.
#[derive(Debug, Clone, Deserialize)]
pub struct TapisToken {
    pub access_token: AccessToken,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub jti: Option<String>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
    grant_type: &'static str,
}

/// Standard Tapis response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<TokenResult>,
}

#[derive(Debug, Deserialize)]
struct TokenResult {
    access_token: TapisToken,
}

/// Exchange service-account credentials for an access token.
///
/// Any non-2xx status, a non-`success` envelope or an empty token is an
/// [`Error::Auth`].
pub async fn login(
    http: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<TapisToken, Error> {
    let url = format!("{}/v3/oauth2/tokens", base_url.trim_end_matches('/'));
    debug!(%url, "requesting access token");

    let resp = http
        .post(&url)
        .json(&TokenRequest {
            username,
            password,
            grant_type: "password",
        })
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(Error::Auth(format!(
            "token endpoint returned {status}: {body}"
        )));
    }

    let envelope: Envelope = serde_json::from_str(&body)
        .map_err(|e| Error::Auth(format!("malformed token response: {e}")))?;
    if envelope.status != "success" {
        return Err(Error::Auth(
            envelope
                .message
                .unwrap_or_else(|| format!("token response status {}", envelope.status)),
        ));
    }

    envelope
        .result
        .map(|r| r.access_token)
        .filter(|t| !t.access_token.is_empty())
        .ok_or_else(|| Error::Auth("token response did not contain an access token".into()))
}
