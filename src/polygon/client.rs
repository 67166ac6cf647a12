use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::{Error, Result};
use crate::models::DateRange;

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";
pub const DEMO_API_KEY: &str = "demo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatesRequest {
    pub symbol: String,
    pub range: DateRange,
}

impl AggregatesRequest {
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
        }
    }

    /// Daily bars path, without the credential.
    pub fn path(&self) -> String {
        format!(
            "/v2/aggs/ticker/{}/range/1/day/{}/{}?adjusted=true",
            self.symbol,
            self.range.from_param(),
            self.range.to_param()
        )
    }
}

/// Where daily aggregate bars come from. Returns the raw response body so
/// that transport and decoding failures stay distinguishable.
#[async_trait]
pub trait AggregatesSource: Send + Sync {
    async fn fetch_aggregates(&self, request: &AggregatesRequest) -> Result<String>;

    fn api_key(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct PolygonClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PolygonClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn aggregates_url(&self, request: &AggregatesRequest) -> String {
        format!("{}{}&apiKey={}", self.base_url, request.path(), self.api_key)
    }
}

#[async_trait]
impl AggregatesSource for PolygonClient {
    async fn fetch_aggregates(&self, request: &AggregatesRequest) -> Result<String> {
        debug!("GET {}{}&apiKey=***", self.base_url, request.path());

        let response = self
            .client
            .get(self.aggregates_url(request))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::ClientRequest {
                status_code: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }
}
