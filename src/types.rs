use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    pub category: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Outgoing product shape for create and bulk-import requests.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub category: String,
}

impl ProductDraft {
    pub fn new(name: &str, price: f64, stock: i64, category: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            price,
            stock,
            category: category.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total_processed: usize,
    pub success_count: usize,
    pub failure_count: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}
