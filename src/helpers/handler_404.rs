use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn page_not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json("Oops looks like you landed at the wrong endpoint"))
}
