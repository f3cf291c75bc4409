use crate::api::error::FetchError;
use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Status code and decoded JSON body of one listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Value,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Anything that can answer a listing query.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Run one query. Non-2xx statuses are returned as responses, not errors.
    async fn fetch(&self, query: &str) -> Result<FetchResponse, FetchError>;
}

/// HTTP client for `GET {base}/v1/transactions`.
pub struct TransactionFetcher {
    http_client: HttpClient,
    endpoint: Url,
}

impl TransactionFetcher {
    const TRANSACTIONS_PATH: &'static str = "v1/transactions";

    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let endpoint = Self::endpoint_for(&config.api_domain)?;
        info!(
            "Initializing transaction fetcher with endpoint: {}, timeout: {:?}",
            endpoint, config.request_timeout
        );

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // `Url::join` would drop the last path segment of a base without a trailing slash.
    fn endpoint_for(base: &Url) -> Result<Url, FetchError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(Self::TRANSACTIONS_PATH)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base, e)))
    }

    /// Full request URL for a query string (no leading `?`).
    pub fn url_for(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        url
    }
}

#[async_trait]
impl TransactionSource for TransactionFetcher {
    async fn fetch(&self, query: &str) -> Result<FetchResponse, FetchError> {
        let url = self.url_for(query);
        debug!("GET {}", url);

        let response = self.http_client.get(url).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = serde_json::from_slice::<Value>(&bytes).map_err(|source| {
            warn!("Response with status {} is not valid JSON", status);
            FetchError::Decode { status, source }
        })?;

        debug!("Received status {} ({} bytes)", status, bytes.len());
        Ok(FetchResponse { status, body })
    }
}
