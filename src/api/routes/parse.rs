//! Parse handler: metadata and format list for a video page

use super::{ParseRequest, invalid_body};
use crate::api::AppState;
use crate::error::Error;
use crate::types::VideoMetadata;
use axum::{Json, extract::State, extract::rejection::JsonRejection};

/// POST /api/parse - Fetch normalized video metadata
#[utoipa::path(
    post,
    path = "/api/parse",
    tag = "media",
    request_body = ParseRequest,
    responses(
        (status = 200, description = "Video metadata", body = VideoMetadata),
        (status = 400, description = "Missing or invalid URL", body = crate::error::ApiError),
        (status = 401, description = "Every strategy failed and the site requires sign-in", body = crate::error::ApiError),
        (status = 500, description = "Every strategy failed", body = crate::error::ApiError)
    )
)]
pub async fn parse_video(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<VideoMetadata>, Error> {
    let Json(request) = payload.map_err(invalid_body)?;
    let metadata = state.service.parse(request.url.as_deref()).await?;
    Ok(Json(metadata))
}
