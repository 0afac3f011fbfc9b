use serde_json::Value;
use tracing::debug;

use super::{Etherscan, EtherscanResponse};
use crate::explorer::{ExplorerError, ExplorerTransferApi, TokenTransfer};

const START_BLOCK: &str = "0";
const END_BLOCK: &str = "999999999";

impl EtherscanResponse {
    pub fn into_transfers(self) -> Result<Vec<TokenTransfer>, ExplorerError> {
        match self.result {
            // "No transactions found" comes back as status 0 with an empty list
            Value::Array(_) => serde_json::from_value(self.result)
                .map_err(|e| ExplorerError::Malformed(format!("token transfer record: {e}"))),
            Value::String(_) if !self.is_ok() => Err(self.api_error()),
            other => Err(ExplorerError::Malformed(format!(
                "expected a list of transfers, got {other}"
            ))),
        }
    }
}

impl ExplorerTransferApi for Etherscan {
    async fn get_token_transfers(
        &self,
        address: &str,
    ) -> Result<Vec<TokenTransfer>, ExplorerError> {
        let params = [
            ("module", "account"),
            ("action", "tokentx"),
            ("address", address),
            ("startblock", START_BLOCK),
            ("endblock", END_BLOCK),
            ("sort", "asc"),
        ];
        let transfers = self.get(&params).await?.into_transfers()?;
        debug!("{} token transfers for {}", transfers.len(), address);
        Ok(transfers)
    }
}
