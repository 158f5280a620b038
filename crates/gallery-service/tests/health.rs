//! Health and liveness integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health_check_returns_ok() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gallery");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn api_root_returns_banner() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/api").await;

    response.assert_status_ok();
    response.assert_text("🎨 Online Gallery API is running!");
}
