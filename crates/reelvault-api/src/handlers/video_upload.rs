//! Video media upload endpoint.

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadPipeline;
use crate::state::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::Json;
use reelvault_core::{AppError, VideoResponse};
use std::sync::Arc;
use uuid::Uuid;

/// Multipart field carrying the video bytes.
const VIDEO_FIELD: &str = "video";

/// Media type without parameters, lowercased.
pub(super) fn normalized_media_type(raw: &str) -> String {
    raw.split(';').next().unwrap_or(raw).trim().to_lowercase()
}

/// Upload video media for an existing record.
///
/// Ownership is checked before a single body byte is spooled. On success
/// the record's media reference is replaced and the response carries the
/// freshly resolved URL.
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/upload",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Video record id")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Media ingested", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not the owner, or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown video", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Processing failure", body = ErrorResponse),
        (status = 502, description = "Object storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let user_id = state.authenticate(&headers)?;

    let mut video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if video.user_id != user_id {
        return Err(AppError::Unauthorized("You do not own this video".to_string()).into());
    }

    let field = loop {
        match multipart.next_field().await.map_err(HttpAppError::from)? {
            Some(f) if f.name() == Some(VIDEO_FIELD) => break f,
            Some(_) => continue,
            None => {
                return Err(AppError::InvalidInput(format!(
                    "Missing '{}' form field",
                    VIDEO_FIELD
                ))
                .into())
            }
        }
    };

    let media_type = field
        .content_type()
        .map(normalized_media_type)
        .ok_or_else(|| AppError::InvalidInput("Missing video content type".to_string()))?;

    if !state
        .config
        .video_allowed_content_types()
        .iter()
        .any(|ct| ct == &media_type)
    {
        return Err(AppError::InvalidInput(format!(
            "Unsupported video type: {}",
            media_type
        ))
        .into());
    }

    let pipeline = UploadPipeline::new(
        state.storage.clone(),
        state.prober.clone(),
        state.remuxer.clone(),
        state.resolver.clone(),
        state.config.max_video_size_bytes(),
    );

    let reference = pipeline.ingest(video_id, Box::pin(field)).await?;

    video.media_ref = Some(reference.clone());
    let updated = match state.videos.update_video(video).await {
        Ok(updated) => updated,
        Err(e) => {
            // The object is already in the store; without the record update
            // nothing references it. Log it for out-of-band reaping.
            tracing::warn!(
                video_id = %video_id,
                reference = %reference,
                error = %e,
                "Metadata update failed after upload, stored object is orphaned"
            );
            return Err(e.into());
        }
    };

    let video_url = state.resolver.resolve(updated.media_ref.as_ref()).await?;

    Ok(Json(VideoResponse::resolved(updated, video_url)))
}
