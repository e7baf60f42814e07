use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{"results": [...]}` envelope of every endpoint, records kept raw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub results: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub rarity: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceRecord {
    pub product_id: String,
    pub sub_type: String,
    pub printing: String,
    /// Prices as written upstream: JSON numbers in their literal form,
    /// numeric strings verbatim.
    pub market_price: Option<String>,
    pub low_price: Option<String>,
    pub high_price: Option<String>,
    pub last_updated: Option<String>,
}

/// One CSV line: a price record plus what its product contributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedRow {
    pub product_id: String,
    pub name: String,
    pub sub_type: String,
    pub rarity: String,
    pub printing: String,
    pub market_price: Option<String>,
    pub low_price: Option<String>,
    pub high_price: Option<String>,
    pub last_updated: Option<String>,
}
