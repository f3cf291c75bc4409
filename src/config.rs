// Configuration for the viewer, read from the environment (and `.env`):
// - API base URL
// - request timeout
// - transaction link prefix for rendered hashes

use dotenv::dotenv;
use reqwest::Url;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid URL in {var}: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("Invalid number in {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_domain: Url,
    /// `None` disables the timeout.
    pub request_timeout: Option<Duration>,
    pub explorer_tx_url: String,
}

impl Config {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_EXPLORER_TX_URL: &'static str = "https://etherscan.io/tx/";

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let api_domain = env::var("API_DOMAIN").map_err(|_| ConfigError::MissingVar("API_DOMAIN"))?;
        let timeout_secs = env::var("REQUEST_TIMEOUT_SECS").ok();
        let explorer_tx_url = env::var("EXPLORER_TX_URL")
            .unwrap_or_else(|_| Self::DEFAULT_EXPLORER_TX_URL.to_string());

        Self::from_parts(&api_domain, timeout_secs.as_deref(), explorer_tx_url)
    }

    /// Build a config from raw values, applying the same validation as `from_env`.
    pub fn from_parts(
        api_domain: &str,
        timeout_secs: Option<&str>,
        explorer_tx_url: String,
    ) -> Result<Self, ConfigError> {
        let api_domain = Url::parse(api_domain.trim()).map_err(|_| ConfigError::InvalidUrl {
            var: "API_DOMAIN",
            value: api_domain.to_string(),
        })?;
        if api_domain.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                var: "API_DOMAIN",
                value: api_domain.to_string(),
            });
        }

        let timeout_secs = match timeout_secs {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                var: "REQUEST_TIMEOUT_SECS",
                value: raw.to_string(),
            })?,
            None => Self::DEFAULT_TIMEOUT_SECS,
        };
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            api_domain,
            request_timeout,
            explorer_tx_url,
        })
    }

    /// Config pointing at a local base URL, without reading the environment.
    pub fn for_base_url(api_domain: Url) -> Self {
        Self {
            api_domain,
            request_timeout: Some(Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS)),
            explorer_tx_url: Self::DEFAULT_EXPLORER_TX_URL.to_string(),
        }
    }
}
