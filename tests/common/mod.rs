//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use std::path::PathBuf;
use std::time::Duration;

use stockscan::api::InventoryClient;
use stockscan::config::ApiConfig;
use tempfile::TempDir;

pub use mock_api::{CapturedRequest, MockApi, MockResponse};

pub const VOLUNTEER_V123: &str = r#"{
    "id": "V123",
    "name": "Dara",
    "team": "Ops",
    "kh_name": "ដារ៉ា",
    "kh_team": "ប្រតិបត្តិការ"
}"#;

pub const ITEM_I001: &str = r#"{
    "code": "I001",
    "item_name": "Gaffer tape",
    "qty": 5,
    "unit": "roll",
    "category_id": "C1"
}"#;

/// Client with short timeouts pointed at `base_url`.
pub fn client_for(base_url: &str) -> InventoryClient {
    InventoryClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
    })
    .expect("valid mock base url")
}

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// `borrowed_items` envelope with one row per `(transaction_id, status, qty)`.
pub fn borrowed_items_json(rows: &[(&str, &str, i64)]) -> String {
    let items: Vec<serde_json::Value> = rows
        .iter()
        .map(|(id, status, qty)| {
            serde_json::json!({
                "transaction_id": id,
                "item_code": "I001",
                "item_name": "Gaffer tape",
                "qty_borrowed": qty,
                "borrow_time": "2024-11-02T09:15:00",
                "return_time": null,
                "status": status,
            })
        })
        .collect();
    serde_json::json!({ "borrowed_items": items }).to_string()
}

/// Poll `check` until it holds or `timeout` passes.
pub async fn eventually<F: FnMut() -> bool>(timeout: Duration, mut check: F) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
