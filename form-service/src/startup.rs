//! Application startup and lifecycle management.

use crate::config::{FormConfig, DEFAULT_MAX_BODY_BYTES};
use crate::handlers;
use crate::services::{DatastoreConnection, FormStore, MongoFormRepository, Readiness};
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    middleware::from_fn,
    routing::{delete, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, RequestId};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub forms: Arc<dyn FormStore>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(forms: Arc<dyn FormStore>) -> Self {
        Self {
            forms,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/forms",
            get(handlers::list_forms).post(handlers::submit_form),
        )
        .route("/api/forms/:id", delete(handlers::delete_form))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .route_layer(from_fn(metrics_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .merge(api)
        .fallback(handlers::not_found)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestId>()
                    .map_or("-", |id| id.0.as_str());

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    connection: DatastoreConnection,
}

impl Application {
    /// Starts the datastore connection and binds the listener.
    ///
    /// The connection is made in the background unless
    /// `mongodb.wait_for_connection` is set, in which case a failed
    /// connection fails the build.
    pub async fn build(config: FormConfig) -> Result<Self, AppError> {
        tracing::info!("Attempting to connect to MongoDB");
        let connection = DatastoreConnection::spawn(config.mongodb.clone());

        if config.mongodb.wait_for_connection {
            if let Readiness::Failed(reason) = connection.resolved().await {
                return Err(AppError::DatabaseError(anyhow::anyhow!(
                    "MongoDB connection failed: {}",
                    reason
                )));
            }
        }

        let repository = MongoFormRepository::new(connection.clone());
        let state =
            AppState::new(Arc::new(repository)).with_max_body_bytes(config.max_body_bytes);
        let router = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server running on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            connection,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn connection(&self) -> &DatastoreConnection {
        &self.connection
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
