//! Catalog API client.
//!
//! # Data Source
//! - Request: `GET <endpoint>/<resource>?offset=<n>[&format=<id|normal>][&group=<id>]`
//! - Auth: basic auth, API key as the username and an empty password
//! - Response: JSON object whose top-level key matches the resource name and
//!   holds the page's records (or bare integer ids with `format=id`)

use crate::errors::{DataIntegrityError, Result, TransportError};
use crate::logger;
use crate::source::rate_limiter::RateLimiter;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// One page request against the catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the page starting at `offset` (in records) and returns the
    /// parsed body. No retries are attempted.
    async fn fetch_page(
        &self,
        resource_path: &str,
        offset: usize,
        query: &[(String, String)],
    ) -> Result<Value>;
}

/// HTTP implementation of [`CatalogSource`].
#[derive(Clone)]
pub struct SourceClient {
    client: Client,
    endpoint: String,
    api_key: String,
    limiter: Arc<RateLimiter>,
}

impl SourceClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        limiter: Arc<RateLimiter>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| TransportError::Request {
                target: "catalog client".to_string(),
                source,
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            limiter,
        })
    }

    /// `<endpoint>/<resource_path>` without doubled slashes.
    pub fn resource_url(&self, resource_path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            resource_path.trim_start_matches('/')
        )
    }

    async fn get_json(
        &self,
        url: &str,
        offset: usize,
        query: &[(String, String)],
    ) -> Result<Value> {
        logger::debug(&format!("calling {} offset={} {:?}", url, offset, query));

        let response = self
            .client
            .get(url)
            .basic_auth(&self.api_key, Some(""))
            .query(&[("offset", offset.to_string())])
            .query(query)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                target: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                target: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                target: url.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|source| {
            TransportError::Decode {
                target: url.to_string(),
                source,
            }
            .into()
        })
    }
}

#[async_trait]
impl CatalogSource for SourceClient {
    async fn fetch_page(
        &self,
        resource_path: &str,
        offset: usize,
        query: &[(String, String)],
    ) -> Result<Value> {
        let url = self.resource_url(resource_path);
        self.limiter
            .run(|| self.get_json(&url, offset, query))
            .await
    }
}

/// Takes the record list stored under `key` out of a response body.
///
/// A body without the key (or with a non-list value there) is reported
/// rather than read as an empty page, and is left untouched so the caller
/// can log it.
pub fn extract_records(
    resource: &str,
    key: &str,
    body: &mut Value,
) -> std::result::Result<Vec<Value>, DataIntegrityError> {
    match body.get_mut(key) {
        Some(Value::Array(records)) => Ok(std::mem::take(records)),
        _ => Err(DataIntegrityError::MissingKey {
            resource: resource.to_string(),
            key: key.to_string(),
        }),
    }
}
