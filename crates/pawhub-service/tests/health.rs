//! Health endpoint integration tests.

mod common;

use common::{draft, TestHarness};

#[tokio::test]
async fn health_check_returns_ok() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn health_check_reports_listing_count() {
    let harness = TestHarness::new();
    harness.create(&draft("Нохой")).await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "pawhub");
    assert_eq!(body["listings"], 1);
}
