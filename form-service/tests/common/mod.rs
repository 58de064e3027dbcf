#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use form_service::config::{FormConfig, MongoConfig, DEFAULT_MAX_BODY_BYTES};
use form_service::services::{
    DatastoreConnection, DatastoreState, InMemoryFormStore, MongoDb, MongoFormRepository,
};
use form_service::{build_router, AppState, Application};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const SURVEY_FORM: &str = r#"{"title":"Survey","fields":[{"id":"q1","type":"text","label":"Name","options":[],"selectedOptions":[],"value":"Alice"}]}"#;

/// Router backed by an in-memory store, plus the store for inspection.
pub fn memory_app() -> (Router, Arc<InMemoryFormStore>) {
    let store = Arc::new(InMemoryFormStore::new());
    let router = build_router(AppState::new(store.clone()));
    (router, store)
}

/// Router backed by a MongoDB repository whose connection is stuck in `state`.
pub fn app_with_connection(state: DatastoreState) -> Router {
    let repository = MongoFormRepository::new(DatastoreConnection::fixed(state));
    build_router(AppState::new(Arc::new(repository)))
}

pub fn json_request(method: Method, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends `request` and decodes the JSON response body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is not JSON")
    };
    (status, json)
}

/// Application settings on a random port with the given datastore.
pub fn test_config(mongodb: MongoConfig) -> FormConfig {
    FormConfig {
        common: CoreConfig { port: 0 },
        mongodb,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    }
}

/// A full application bound to a random port against a real MongoDB.
///
/// Set `TEST_MONGODB_URI` to point at a server; defaults to localhost.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("form_test_{}", unique_suffix());
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let config = test_config(MongoConfig {
            url: Secret::new(uri),
            database: Some(db_name.clone()),
            wait_for_connection: true,
        });

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app
            .connection()
            .database()
            .expect("MongoDB connection not ready");
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    /// Drops the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.database().drop(None).await;
    }
}

fn unique_suffix() -> String {
    mongodb::bson::oid::ObjectId::new().to_hex()
}
