//! Static frontend hosting tests.

mod common;

use common::{TestHarness, APP_JS, INDEX_HTML};

#[tokio::test]
async fn root_serves_index() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/").await;

    response.assert_status_ok();
    response.assert_text(INDEX_HTML);
}

#[tokio::test]
async fn static_asset_is_served() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/assets/app.js").await;

    response.assert_status_ok();
    response.assert_text(APP_JS);
}

#[tokio::test]
async fn unmapped_path_serves_index() {
    let harness = TestHarness::new().await;
    let root = harness.server.get("/").await.text();

    for path in [
        "/admin/orders",
        "/paintings/7/edit",
        "/no/such/page",
        "/api/nope",
        "/api/paintings/1/extra",
    ] {
        let response = harness.server.get(path).await;

        response.assert_status_ok();
        assert_eq!(response.text(), root, "path {path}");
    }
}
