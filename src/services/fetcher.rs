// src/services/fetcher.rs

//! Resource fetcher.
//!
//! Performs a single GET against a catalog URL and decodes the body as JSON.
//! HTTP status and decode problems are logged and reported as `Ok(None)` so
//! callers can drop the resource; transport failures are returned as errors.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::Result;

/// Source of catalog resources.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch `url` as JSON.
    ///
    /// - `Ok(Some(_))`: 2xx response with a JSON body
    /// - `Ok(None)`: non-2xx status or undecodable body (already logged)
    /// - `Err(_)`: the request itself failed
    async fn fetch(&self, url: &str) -> Result<Option<Value>>;
}

/// `ResourceFetcher` backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Value>> {
        let response = self.client.get(url).send().await?;

        if let Err(error) = response.error_for_status_ref() {
            log::error!("Failed to fetch data from: {}. Error: {}", url, error);
            return Ok(None);
        }

        let body = response.bytes().await?;
        match serde_json::from_slice(&body) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                log::error!("Failed to decode JSON from: {}. Error: {}", url, error);
                Ok(None)
            }
        }
    }
}
