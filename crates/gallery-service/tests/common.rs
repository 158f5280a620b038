//! Common test utilities for gallery integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use gallery_core::{User, UserId};
use gallery_service::{create_router, AppState, ServiceConfig};
use gallery_store::MemoryStore;

/// Body of the static `index.html` served by the fallback.
pub const INDEX_HTML: &str = "<!doctype html><title>Gallery</title>";

/// Body of the static asset at `/assets/app.js`.
pub const APP_JS: &str = "console.log('gallery');";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The backing store, for seeding and direct inspection.
    pub store: MemoryStore,
    /// Static frontend directory (kept alive for test duration).
    pub _static_dir: TempDir,
    /// A seeded customer.
    pub user: User,
}

impl TestHarness {
    /// Create a new test harness with an empty catalog and one user.
    pub async fn new() -> Self {
        let static_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML)
            .expect("Failed to write index.html");
        std::fs::create_dir(static_dir.path().join("assets")).expect("Failed to create assets");
        std::fs::write(static_dir.path().join("assets/app.js"), APP_JS)
            .expect("Failed to write app.js");

        let store = MemoryStore::new();
        let user = store.add_user("Ada Lovelace", "ada@example.com").await;

        let config = ServiceConfig {
            host: "127.0.0.1".into(),
            port: 0,
            static_dir: static_dir.path().to_path_buf(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::new(store.clone()), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _static_dir: static_dir,
            user,
        }
    }

    /// The seeded user's ID.
    pub fn user_id(&self) -> UserId {
        self.user.user_id
    }

    /// Seed another user.
    pub async fn add_user(&self, full_name: &str, email: &str) -> User {
        self.store.add_user(full_name, email).await
    }

    /// Create a painting through the API and return its JSON.
    pub async fn create_painting(&self, title: &str, price: &str) -> Value {
        let response = self
            .server
            .post("/api/paintings")
            .json(&json!({
                "title": title,
                "artist": "Test Artist",
                "price": price,
                "image_url": format!("https://img.test/{title}.jpg"),
                "status": "available"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    /// Create a painting and return only its ID.
    pub async fn create_painting_id(&self, title: &str) -> i64 {
        self.create_painting(title, "100.00").await["painting_id"]
            .as_i64()
            .expect("painting_id is an integer")
    }

    /// Check out paintings for the seeded user and return the order ID.
    pub async fn place_order(&self, painting_ids: &[i64]) -> i64 {
        let response = self
            .server
            .post("/api/orders")
            .json(&json!({
                "user_id": self.user_id(),
                "painting_ids": painting_ids
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        body["order_id"].as_i64().expect("order_id is an integer")
    }
}
