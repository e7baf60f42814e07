use std::collections::HashMap;

use serde_json::Value;

use crate::models::{JoinedRow, PriceRecord, Product};
use crate::parser;

pub const HEADER: &str =
    "productId,name,subType,rarity,printing,marketPrice,lowPrice,highPrice,lastUpdated";

/// Product id → product. A repeated id keeps the last record.
pub fn build_lookup(products: &[Product]) -> HashMap<&str, &Product> {
    products
        .iter()
        .map(|p| (p.product_id.as_str(), p))
        .collect()
}

/// One row per price record, in input order. Unknown product ids get empty
/// name and rarity.
pub fn join(products: &[Product], prices: &[PriceRecord]) -> Vec<JoinedRow> {
    let lookup = build_lookup(products);

    prices
        .iter()
        .map(|price| {
            let product = lookup.get(price.product_id.as_str());
            JoinedRow {
                product_id: price.product_id.clone(),
                name: product.map(|p| p.name.clone()).unwrap_or_default(),
                sub_type: price.sub_type.clone(),
                rarity: product.map(|p| p.rarity.clone()).unwrap_or_default(),
                printing: price.printing.clone(),
                market_price: price.market_price.clone(),
                low_price: price.low_price.clone(),
                high_price: price.high_price.clone(),
                last_updated: price.last_updated.clone(),
            }
        })
        .collect()
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"')
}

pub fn escape(field: &str) -> String {
    if needs_quotes(field) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn price(value: Option<&str>) -> String {
    escape(value.unwrap_or_default())
}

pub fn to_csv_line(row: &JoinedRow) -> String {
    [
        escape(&row.product_id),
        escape(&row.name),
        escape(&row.sub_type),
        escape(&row.rarity),
        escape(&row.printing),
        price(row.market_price.as_deref()),
        price(row.low_price.as_deref()),
        price(row.high_price.as_deref()),
        escape(row.last_updated.as_deref().unwrap_or_default()),
    ]
    .join(",")
}

/// Header plus one line per row, newline-separated, no trailing newline.
pub fn to_csv(rows: &[JoinedRow]) -> String {
    std::iter::once(HEADER.to_string())
        .chain(rows.iter().map(to_csv_line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw product and price records straight to CSV text.
pub fn normalize(products: &[Value], prices: &[Value]) -> String {
    let products = parser::parse_products(products);
    let prices = parser::parse_prices(prices);
    to_csv(&join(&products, &prices))
}
