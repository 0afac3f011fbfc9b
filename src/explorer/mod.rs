use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

use crate::retry::Retryable;

pub mod etherscan;
pub mod simulation;

/// One token transfer event as listed by the explorer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub token_symbol: String,
    pub contract_address: String,
    #[serde(deserialize_with = "deserialize_token_decimal")]
    pub token_decimal: u32,
}

impl TokenTransfer {
    pub fn new(symbol: &str, contract: &str, decimals: u32) -> Self {
        Self {
            token_symbol: symbol.to_string(),
            contract_address: contract.to_string(),
            token_decimal: decimals,
        }
    }
}

// explorers send decimals as a string, empty for some broken tokens
fn deserialize_token_decimal<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) if s.trim().is_empty() => Ok(0),
        Raw::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid token decimal {s:?}: {e}"))),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExplorerError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error("API error: {message} ({detail})")]
    Api { message: String, detail: String },
    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Invalid request URL {0}")]
    InvalidUrl(String),
}

impl Retryable for ExplorerError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            ExplorerError::Http(_) | ExplorerError::Status(_) | ExplorerError::Api { .. }
        )
    }
}

pub trait Explorer {}

pub trait ExplorerTransferApi {
    /// Full token transfer history of `address`, oldest first.
    async fn get_token_transfers(&self, address: &str)
        -> Result<Vec<TokenTransfer>, ExplorerError>;
}

pub trait ExplorerBalanceApi {
    /// Current raw integer balance of `address` for `contract`, as a digit string.
    async fn get_token_balance(&self, contract: &str, address: &str)
        -> Result<String, ExplorerError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_transfer_from_json() {
        let json = json!({
            "blockNumber": "4730207",
            "hash": "0xe8c208398bd5ae8e4c237658580db56a2a94dfa0ca382c99b776fa6e7d31d5b4",
            "from": "0x642ae78fafbb8032da552d619ad43f1d81e4dd7c",
            "contractAddress": "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2",
            "to": "0x4e83362442b8d1bec281594cea3050c8eb01311c",
            "value": "5901522149285533025181",
            "tokenName": "Maker",
            "tokenSymbol": "MKR",
            "tokenDecimal": "18",
        });
        let transfer: TokenTransfer = serde_json::from_value(json).unwrap();
        assert_eq!(transfer.token_symbol, "MKR");
        assert_eq!(
            transfer.contract_address,
            "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2"
        );
        assert_eq!(transfer.token_decimal, 18);
    }

    #[test]
    fn test_transfer_empty_decimal() {
        let json = json!({
            "contractAddress": "0x01",
            "tokenSymbol": "",
            "tokenDecimal": "",
        });
        let transfer: TokenTransfer = serde_json::from_value(json).unwrap();
        assert_eq!(transfer.token_decimal, 0);
    }

    #[test]
    fn test_transfer_missing_field() {
        let json = json!({
            "tokenSymbol": "USDC",
            "tokenDecimal": "6",
        });
        assert!(serde_json::from_value::<TokenTransfer>(json).is_err());
    }

    #[test]
    fn test_error_is_transient() {
        assert!(ExplorerError::Status(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(ExplorerError::Api {
            message: "NOTOK".to_string(),
            detail: "Max rate limit reached".to_string(),
        }
        .is_transient());
        assert!(!ExplorerError::Malformed("missing result".to_string()).is_transient());
        assert!(!ExplorerError::InvalidUrl("api".to_string()).is_transient());
    }
}
