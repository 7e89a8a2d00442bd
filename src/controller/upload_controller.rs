use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::routing::post;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};
use crate::controller::AppState;
use crate::helpers::api_error::ApiError;
use crate::services::uploads::{spool_stream, UploadStore};

pub const PHOTOS_FIELD: &str = "photos";

#[derive(Clone, Copy, Debug)]
pub struct UploadLimits {
    pub max_files: usize,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_photos))
        .route("/upload-by-link", post(upload_by_link))
        .route_layer(Extension(app_state.uploads))
        .route_layer(Extension(app_state.http_client))
        .route_layer(Extension(UploadLimits {
            max_files: app_state.max_upload_files,
        }))
        .layer(DefaultBodyLimit::max(app_state.max_upload_bytes))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadByLink {
    pub link: String,
}

/// Downloads the linked image and stores it like a regular upload.
pub async fn upload_by_link(
    Extension(uploads): Extension<Arc<UploadStore>>,
    Extension(http_client): Extension<reqwest::Client>,
    Json(body): Json<UploadByLink>,
) -> Result<Json<String>, ApiError> {
    let response = http_client
        .get(&body.link)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| {
            warn!("Failed to download {} due to: {}", body.link, e);
            ApiError::Download(e.to_string())
        })?;
    let spool = spool_stream(
        response.bytes_stream(),
        |e: reqwest::Error| ApiError::Download(e.to_string()),
    ).await?;

    let temp_name = format!(
        "photo{}.jpg",
        OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
    );
    let public_path = uploads.store_file(spool.path(), &temp_name).await?;
    info!("Stored image from {} at {}", body.link, public_path);

    Ok(Json(public_path))
}

/// Stores every `photos` file part of a multipart form, in order. All parts
/// are spooled and counted before anything reaches the upload directory, so
/// a rejected request leaves no files behind. Text parts are ignored.
pub async fn upload_photos(
    Extension(uploads): Extension<Arc<UploadStore>>,
    Extension(limits): Extension<UploadLimits>,
    mut multipart: Multipart,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut spooled = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name != PHOTOS_FIELD {
            warn!("Rejected upload with file under field: {}", field_name);
            return Err(ApiError::UnexpectedField(field_name));
        }

        if spooled.len() >= limits.max_files {
            return Err(ApiError::TooManyFiles(limits.max_files));
        }

        let spool = spool_stream(field, |e: MultipartError| ApiError::Multipart(e.to_string())).await?;
        spooled.push((spool, original_name));
    }

    let mut stored = Vec::with_capacity(spooled.len());
    for (spool, original_name) in &spooled {
        stored.push(uploads.store_file(spool.path(), original_name).await?);
    }

    Ok(Json(stored))
}
