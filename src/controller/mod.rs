use std::sync::Arc;
use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::memory_repo::MemoryStore;
use crate::services::identity::{IdentityProvider, MockIdentity};
use crate::services::uploads::{UploadStore, PUBLIC_PREFIX};

pub mod auth_controller;
pub mod booking_controller;
pub mod health_check;
pub mod place_controller;
pub mod upload_controller;

/// Handles shared by every controller. Built once before the server binds.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub uploads: Arc<UploadStore>,
    pub http_client: reqwest::Client,
    pub max_upload_files: usize,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client for link uploads")?;

        Ok(Self {
            store: Arc::new(MemoryStore::seeded()),
            identity: Arc::new(MockIdentity),
            uploads: Arc::new(UploadStore::new(config.uploads_dir.clone())),
            http_client,
            max_upload_files: config.max_upload_files,
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}

pub async fn serve(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<()> {
    app_state
        .uploads
        .ensure_root()
        .await
        .with_context(|| format!("Failed to create upload directory {:?}", config.uploads_dir))?;

    let application = build_application(app_state, config)?;

    let address = config.socket_addr();
    info!("API server ({}) listening on: {}", config.environment, address);
    axum::Server::bind(&address)
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error spinning up the API server")
}

pub fn build_application(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<Router> {
    let origins: Vec<HeaderValue> = config.allowed_origins()?;
    let uploads_root = app_state.uploads.root().to_path_buf();

    let application = Router::new()
        .merge(health_check::router())
        .nest("/api", router_endpoints(app_state))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(uploads_root))
        .fallback(page_not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                        .allow_credentials(true)
                )
        );

    Ok(application)
}

pub fn router_endpoints(app_state: AppState) -> Router {
    Router::new()
        .merge(health_check::api_router())
        .merge(auth_controller::router(app_state.clone()))
        .merge(upload_controller::router(app_state.clone()))
        .merge(place_controller::router(app_state.clone()))
        .merge(booking_controller::router(app_state))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, draining connections");
    }
}

#[cfg(test)]
pub mod test_support {
    use std::path::Path;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use axum::Router;
    use serde_json::Value;
    use super::{build_application, AppState};
    use crate::config::test_config;

    pub fn test_application(uploads_dir: &Path) -> Router {
        let config = test_config(uploads_dir.to_path_buf());
        let app_state = AppState::new(&config).unwrap();
        build_application(app_state, &config).unwrap()
    }

    pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub async fn body_json<B>(response: Response<B>) -> Value
    where
        B: axum::body::HttpBody,
        B::Error: std::fmt::Debug,
    {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;
    use super::test_support::*;

    #[tokio::test]
    async fn unknown_route_falls_back_to_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_application(&dir.path().join("uploads"));

        let response = app.oneshot(get_request("/api/nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_configured_origin_with_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_application(&dir.path().join("uploads"));

        let request = axum::http::Request::builder()
            .uri("/api/places")
            .header("origin", "http://localhost:5173")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "http://localhost:5173");
        assert_eq!(headers["access-control-allow-credentials"], "true");
    }

    #[tokio::test]
    async fn uploaded_files_are_served_statically() {
        let dir = tempfile::tempdir().unwrap();
        let uploads_dir = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads_dir).unwrap();
        std::fs::write(uploads_dir.join("123.txt"), "hello").unwrap();
        let app = test_application(&uploads_dir);

        let response = app.oneshot(get_request("/uploads/123.txt")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_endpoint_answers() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_application(&dir.path().join("uploads"));

        let response = app.oneshot(get_request("/api/test")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!("Test OK"));
    }
}
