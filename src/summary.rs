use rust_decimal::Decimal;
use serde::Serialize;
use strum::{Display, EnumString};

/// One line of the final report.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Holding {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Contract", skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
}

impl Holding {
    pub fn new(symbol: &str, amount: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            contract: None,
            amount: amount.normalize(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortBy {
    /// Alphabetically by symbol.
    Symbol,
    /// Ascending amount.
    #[default]
    Amount,
}

pub fn sort_holdings(holdings: &mut [Holding], sort_by: SortBy) {
    match sort_by {
        SortBy::Symbol => holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
        SortBy::Amount => holdings.sort_by(|a, b| a.amount.cmp(&b.amount)),
    }
}
