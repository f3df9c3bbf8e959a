use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Body of `GET ?action=getMasterData`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDataResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_names: Vec<String>,
    #[serde(default, deserialize_with = "lenient_stock_map")]
    pub stock_data: HashMap<String, f64>,
}

impl MasterDataResponse {
    pub fn into_parts(self) -> (ItemCatalog, StockIndex) {
        (ItemCatalog::new(self.item_names), StockIndex::new(self.stock_data))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Spreadsheet cells sometimes arrive as numeric strings; anything else is skipped.
fn lenient_stock_map<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| {
            let qty = match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            qty.map(|q| (name, q))
        })
        .collect())
}

/// Known item names, used only to suggest completions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    names: Vec<String>,
}

impl ItemCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Case-insensitive substring match, catalog order preserved
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Stock on hand per item name, loaded once per session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockIndex {
    stock: HashMap<String, f64>,
}

impl StockIndex {
    pub fn new(stock: HashMap<String, f64>) -> Self {
        Self { stock }
    }

    /// Unknown items have zero stock
    pub fn stock_of(&self, item_name: &str) -> f64 {
        self.stock.get(item_name).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}
