//! Wire types for the price feed response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level feed response. Other fields the feed sends are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesResponse {
    #[serde(rename = "Prices")]
    pub prices: Vec<PriceEntry>,
}

/// One price slot as the feed sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub reading_date: DateTime<Utc>,
    pub price: f64,
}
