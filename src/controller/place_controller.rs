use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tracing::{debug, info};
use crate::controller::AppState;
use crate::models::place::{Place, PlaceDraft};
use crate::repositories::memory_repo::MemoryStore;

pub const PLACE_NOT_FOUND: &str = "Place not found";

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/places", get(list_places).post(create_place))
        .route("/places/:id", get(retrieve_place))
        .route("/user-places", get(list_user_places))
        .route_layer(Extension(app_state.store))
}

/// Echoes the submitted place. The listing collection is left untouched, so
/// the place never shows up in later reads.
pub async fn create_place(
    Json(body): Json<PlaceDraft>,
) -> Json<PlaceDraft> {
    info!("Received place {:?}, not persisted", body.title);
    Json(body)
}

pub async fn list_places(
    Extension(store): Extension<Arc<MemoryStore>>,
) -> Json<Vec<Place>> {
    Json(store.all_places().await)
}

/// Owner filtering is not applied, every caller sees the full collection.
pub async fn list_user_places(
    Extension(store): Extension<Arc<MemoryStore>>,
) -> Json<Vec<Place>> {
    Json(store.all_places().await)
}

pub async fn retrieve_place(
    Extension(store): Extension<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let place = match parse_place_id(&id) {
        Some(place_id) => store.find_place(place_id).await,
        None => None,
    };

    match place {
        Some(place) => Json(place).into_response(),
        None => {
            debug!("No place with id: {}", id);
            Json(PLACE_NOT_FOUND).into_response()
        }
    }
}

/// Reads the leading integer of the path segment the way `parseInt` does
/// without a radix: `3-cabin` finds place 3 and a `0x` prefix reads hex.
fn parse_place_id(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (radix, body) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let digits_len = body
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&body[..digits_len], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
