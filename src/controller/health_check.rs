use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub fn router() -> Router {
    Router::new().route("/health", get(get_health_check))
}

pub fn api_router() -> Router {
    Router::new().route("/test", get(get_test))
}

/// Liveness probe for process supervisors
async fn get_health_check() -> Result<StatusCode, StatusCode>
{
    Ok(StatusCode::OK)
}

/// Smoke test used by the frontend to check the API is reachable
async fn get_test() -> Json<&'static str> {
    Json("Test OK")
}
