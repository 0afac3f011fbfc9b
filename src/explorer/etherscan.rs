use anyhow::Result;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::ExplorerError;

pub mod balance_api;
pub mod transfer_api;

pub const ENDPOINT: &str = "https://api.etherscan.io/api";

/// Envelope shared by every etherscan-style `module=account` response.
#[derive(Deserialize, Clone, Debug)]
pub struct EtherscanResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: Value,
}

impl EtherscanResponse {
    pub fn parse(body: &str) -> Result<Self, ExplorerError> {
        let value: Value = serde_json::from_str(body)?;
        if value.get("result").is_none() {
            return Err(ExplorerError::Malformed(format!(
                "no result field in response: {}",
                truncate(body, 200)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    fn api_error(&self) -> ExplorerError {
        ExplorerError::Api {
            message: self.message.clone(),
            detail: match &self.result {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Etherscan {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl Etherscan {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, endpoint, api_key)
    }

    pub fn with_client(client: Client, endpoint: &str, api_key: &str) -> Result<Self> {
        Url::parse(endpoint)?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, params: &[(&str, &str)]) -> Result<Url, ExplorerError> {
        let params = params
            .iter()
            .copied()
            .chain([("apikey", self.api_key.as_str())]);
        Url::parse_with_params(&self.endpoint, params)
            .map_err(|e| ExplorerError::InvalidUrl(format!("{}: {}", self.endpoint, e)))
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<EtherscanResponse, ExplorerError> {
        let url = self.url(params)?;
        debug!(
            "GET {}{} {:?}",
            url.host_str().unwrap_or_default(),
            url.path(),
            params
        );

        let r = match self.client.get(url).send().await?.error_for_status() {
            Ok(r) => r,
            Err(err) => {
                return Err(match err.status() {
                    Some(status) => ExplorerError::Status(status),
                    None => ExplorerError::Http(err),
                })
            }
        };
        let body = r.text().await?;
        EtherscanResponse::parse(&body)
    }
}

impl super::Explorer for Etherscan {}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
