//! Common test utilities for PawHub integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use pawhub_service::{create_router, AppState, ServiceConfig};
use pawhub_store::MemoryStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server.
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    /// Create a new test harness with an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Create a test harness over a prepared store.
    pub fn with_store(store: MemoryStore) -> Self {
        let store = Arc::new(store);

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(store.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Create a listing through the API and return the response body.
    pub async fn create(&self, body: &Value) -> Value {
        let response = self.server.post("/v1/listings").json(body).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid create body; override fields with `merge`.
pub fn draft(title: &str) -> Value {
    json!({
        "category": "LOST",
        "animalType": "DOG",
        "title": title,
        "description": "Хар цагаан эрэгчин хаски",
        "locationCity": "Улаанбаатар",
        "contactPhone": "+976 9911-2233",
        "photos": ["https://cdn.example.mn/dog.jpg"]
    })
}

/// Shallow-merge `patch` into `base`.
pub fn merge(mut base: Value, patch: Value) -> Value {
    if let (Some(base), Value::Object(patch)) = (base.as_object_mut(), patch) {
        for (key, value) in patch {
            if value.is_null() {
                base.remove(&key);
            } else {
                base.insert(key, value);
            }
        }
    }
    base
}

/// Titles of the items in a list response.
pub fn titles(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
