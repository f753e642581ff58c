//! Download handler: fetch a video into the output directory

use super::{DownloadRequest, DownloadResponse, invalid_body};
use crate::api::AppState;
use crate::error::Error;
use axum::{Json, extract::State, extract::rejection::JsonRejection};

/// POST /api/download - Download a video and return its retrieval path
///
/// Blocks until the tool finishes. The artifact is then served from
/// `/downloads/<file>`.
#[utoipa::path(
    post,
    path = "/api/download",
    tag = "media",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "Download completed", body = DownloadResponse),
        (status = 400, description = "Missing or invalid URL", body = crate::error::ApiError),
        (status = 500, description = "Every strategy failed or no file was produced", body = crate::error::ApiError)
    )
)]
pub async fn download_video(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>, Error> {
    let Json(request) = payload.map_err(invalid_body)?;
    let artifact = state
        .service
        .download(request.url.as_deref(), request.format.as_deref())
        .await?;

    Ok(Json(DownloadResponse {
        success: true,
        message: "Download completed".to_string(),
        download_url: artifact.public_path(),
    }))
}
