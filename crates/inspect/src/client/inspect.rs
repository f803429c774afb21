//! [`Inspect`] trait for reading Meta database metadata.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::{
    client::{MetaClient, TOKEN_HEADER},
    error::Error,
};

/// Read-only metadata queries against a Meta database.
pub trait Inspect {
    /// List the collections of the database.
    fn list_collections(&self) -> impl Future<Output = Result<Value, Error>> + Send;

    /// List the index definitions of one collection.
    fn list_indexes(&self, collection: &str)
    -> impl Future<Output = Result<Value, Error>> + Send;
}

impl MetaClient {
    async fn get_json(&self, url: String) -> Result<Value, Error> {
        debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(TOKEN_HEADER, self.token.as_str())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(%url, error = %e, "failed to read error response body");
                    String::new()
                }
            };
            return Err(Error::Remote { status, url, body });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Inspect for MetaClient {
    async fn list_collections(&self) -> Result<Value, Error> {
        self.get_json(self.collections_url()).await
    }

    async fn list_indexes(&self, collection: &str) -> Result<Value, Error> {
        self.get_json(self.indexes_url(collection)).await
    }
}
