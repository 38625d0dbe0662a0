//! HTTP client for the store proxies
//!
//! Each call is a single POST with a JSON body. The raw response is validated
//! here: transport failures and non-2xx statuses become errors before any body
//! is interpreted.

use crate::config::Config;
use crate::error::{IngestError, Result};
use crate::store::types::*;
use crate::store::RemoteStore;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Longest slice of an error response body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Store proxy client
pub struct StoreClient {
    client: Client,
    write_endpoint: Url,
    read_endpoint: Url,
}

impl StoreClient {
    /// Create a client for the endpoints and timeout in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| IngestError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            write_endpoint: config.write_endpoint.clone(),
            read_endpoint: config.read_endpoint.clone(),
        })
    }

    async fn post_json<B, R>(&self, url: &Url, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| IngestError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "Store proxy responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| IngestError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            IngestError::unexpected(format!("invalid response body from {}: {}", url, e))
        })
    }
}

#[async_trait]
impl RemoteStore for StoreClient {
    async fn read(
        &self,
        table: Table,
        filters: &[Filter],
        order_by: &[OrderBy],
    ) -> Result<ReadResponse> {
        let request = ReadRequest {
            table,
            filters,
            order_by,
        };
        debug!(%table, filters = filters.len(), "Reading from store");

        self.post_json(&self.read_endpoint, &request).await
    }

    async fn write(
        &self,
        table: Table,
        operation: WriteOperation,
        data: &Value,
    ) -> Result<WriteResponse> {
        let request = WriteRequest {
            table,
            operation,
            data,
        };
        debug!(%table, ?operation, "Writing to store");

        self.post_json(&self.write_endpoint, &request).await
    }
}
