//! Best-effort extraction of typed records from raw API JSON.
//!
//! Missing keys, nulls and odd types all map to defaults here, so the join
//! never has to look at a `Value`.

use serde_json::Value;

use crate::models::{PriceRecord, Product};

const UPDATED_AT: &str = "updatedAt";
const UPDATED_AT_FALLBACK: &str = "dateUpdated";

pub fn parse_product(record: &Value) -> Product {
    Product {
        product_id: text(record, "productId"),
        name: text(record, "name"),
        rarity: rarity(record),
    }
}

pub fn parse_price(record: &Value) -> PriceRecord {
    PriceRecord {
        product_id: text(record, "productId"),
        sub_type: text(record, "subTypeName"),
        printing: text(record, "printing"),
        market_price: price(record, "marketPrice"),
        low_price: price(record, "lowPrice"),
        high_price: price(record, "highPrice"),
        last_updated: non_empty(record, UPDATED_AT).or_else(|| non_empty(record, UPDATED_AT_FALLBACK)),
    }
}

pub fn parse_products(records: &[Value]) -> Vec<Product> {
    records.iter().map(parse_product).collect()
}

pub fn parse_prices(records: &[Value]) -> Vec<PriceRecord> {
    records.iter().map(parse_price).collect()
}

/// Field as text: strings verbatim, other scalars in their JSON form, null or absent as "".
fn text(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn non_empty(record: &Value, key: &str) -> Option<String> {
    Some(text(record, key)).filter(|s| !s.is_empty())
}

// Null, bools and containers are no price at all; zero is still a price.
fn price(record: &Value, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

// tcgcsv keeps rarity in `extendedData: [{"name": "Rarity", "value": ...}]`.
fn rarity(record: &Value) -> String {
    if let Some(top) = non_empty(record, "rarity") {
        return top;
    }
    record
        .get("extendedData")
        .and_then(Value::as_array)
        .and_then(|entries| {
            entries.iter().find(|entry| {
                entry
                    .get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.eq_ignore_ascii_case("rarity"))
            })
        })
        .map(|entry| text(entry, "value"))
        .unwrap_or_default()
}
