use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::http::HeaderMap;
use axum::routing::get;
use crate::controller::AppState;
use crate::helpers::cookies::{read_cookie, TOKEN_COOKIE};
use crate::models::booking::{Booking, BookingDraft};
use crate::repositories::memory_repo::MemoryStore;
use crate::services::identity::IdentityProvider;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/bookings", get(get_user_bookings).post(add_booking))
        .route_layer(Extension(app_state.store))
        .route_layer(Extension(app_state.identity))
}

pub async fn add_booking(
    Extension(store): Extension<Arc<MemoryStore>>,
    Extension(identity): Extension<Arc<dyn IdentityProvider>>,
    headers: HeaderMap,
    Json(body): Json<BookingDraft>,
) -> Json<Booking> {
    let token = read_cookie(&headers, TOKEN_COOKIE);
    let user = identity.current_user(token.as_deref());

    Json(store.add_booking(body, user.id).await)
}

pub async fn get_user_bookings(
    Extension(store): Extension<Arc<MemoryStore>>,
    Extension(identity): Extension<Arc<dyn IdentityProvider>>,
    headers: HeaderMap,
) -> Json<Vec<Booking>> {
    let token = read_cookie(&headers, TOKEN_COOKIE);
    let user = identity.current_user(token.as_deref());

    Json(store.bookings_for_user(user.id).await)
}
