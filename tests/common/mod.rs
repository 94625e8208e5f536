#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use office_inventory_api::{
    app,
    auth::{generate_jwt, Claims},
    config::AppConfig,
    database::{InventoryStore, MemoryInventoryStore},
    state::AppState,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const SECRET: &str = "integration-test-secret";

pub struct TestServer<S = MemoryInventoryStore> {
    pub base_url: String,
    pub store: Arc<S>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::for_tests(SECRET)).await
    }

    /// Serve the app in-process on an unused port, backed by a fresh memory store.
    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        TestServer::spawn_with_store(config, Arc::new(MemoryInventoryStore::new())).await
    }
}

impl<S: InventoryStore + 'static> TestServer<S> {
    pub async fn spawn_with_store(config: AppConfig, store: Arc<S>) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let shared: Arc<dyn InventoryStore> = store.clone();
        let router = app(AppState::new(shared, &config), &config);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            store,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl<S> Drop for TestServer<S> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A valid token for `user_id`, signed with the test secret.
pub fn token_for(user_id: &str) -> String {
    let claims = Claims::new(user_id, 1).expect("failed to build test claims");
    generate_jwt(&claims, SECRET).expect("failed to sign test token")
}

/// A fresh 24-hex-digit id, the shape the external auth service issues.
pub fn object_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..24].to_string()
}

pub fn desk() -> Value {
    json!({
        "name": "Desk",
        "description": "Standing desk",
        "quantity": 2,
        "dateAdded": "2024-01-01"
    })
}
