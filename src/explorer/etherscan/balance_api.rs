use serde_json::Value;

use super::{Etherscan, EtherscanResponse};
use crate::explorer::{ExplorerBalanceApi, ExplorerError};

impl EtherscanResponse {
    pub fn into_balance(self) -> Result<String, ExplorerError> {
        let raw = match &self.result {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) if n.is_u64() => n.to_string(),
            other => {
                return Err(ExplorerError::Malformed(format!(
                    "expected a balance string, got {other}"
                )))
            }
        };
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            return Ok(raw);
        }
        if self.is_ok() {
            Err(ExplorerError::Malformed(format!("invalid balance {raw:?}")))
        } else {
            Err(self.api_error())
        }
    }
}

impl ExplorerBalanceApi for Etherscan {
    async fn get_token_balance(&self, contract: &str, address: &str) -> Result<String, ExplorerError> {
        let params = [
            ("module", "account"),
            ("action", "tokenbalance"),
            ("contractaddress", contract),
            ("address", address),
            ("tag", "latest"),
        ];
        self.get(&params).await?.into_balance()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: Value) -> EtherscanResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_balance_from_json() {
        let res = response(json!({
            "status": "1",
            "message": "OK",
            "result": "135499"
        }));
        assert_eq!(res.into_balance().unwrap(), "135499");
    }

    #[test]
    fn test_balance_too_large_for_u64() {
        let res = response(json!({
            "status": "1",
            "message": "OK",
            "result": "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        }));
        assert!(res.into_balance().is_ok());
    }

    #[test]
    fn test_balance_in_band_error() {
        let res = response(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Invalid API Key"
        }));
        assert!(matches!(
            res.into_balance(),
            Err(ExplorerError::Api { .. })
        ));
    }

    #[test]
    fn test_balance_not_a_number() {
        let res = response(json!({
            "status": "1",
            "message": "OK",
            "result": "-12"
        }));
        assert!(matches!(
            res.into_balance(),
            Err(ExplorerError::Malformed(_))
        ));

        let res = response(json!({
            "status": "1",
            "message": "OK",
            "result": ["12"]
        }));
        assert!(matches!(
            res.into_balance(),
            Err(ExplorerError::Malformed(_))
        ));
    }
}
