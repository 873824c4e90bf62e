//! Thumbnail upload and serve endpoints.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::BytesMut;
use reelvault_core::{AppError, VideoResponse};
use std::sync::Arc;
use uuid::Uuid;

use super::video_upload::normalized_media_type;

/// Multipart field carrying the thumbnail bytes.
const THUMBNAIL_FIELD: &str = "thumbnail";

/// Upload a thumbnail for an existing record.
///
/// Where the bytes end up depends on the configured strategy (assets dir,
/// inline data URL, or in-memory cache); the record only stores the URL.
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/thumbnail",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Video record id")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail stored", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not the owner, or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown video", body = ErrorResponse),
        (status = 413, description = "Thumbnail too large", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
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

    let mut field = loop {
        match multipart.next_field().await.map_err(HttpAppError::from)? {
            Some(f) if f.name() == Some(THUMBNAIL_FIELD) => break f,
            Some(_) => continue,
            None => {
                return Err(AppError::InvalidInput(format!(
                    "Missing '{}' form field",
                    THUMBNAIL_FIELD
                ))
                .into())
            }
        }
    };

    let media_type = field
        .content_type()
        .map(normalized_media_type)
        .ok_or_else(|| AppError::InvalidInput("Missing thumbnail content type".to_string()))?;

    if !state
        .config
        .thumbnail_allowed_content_types()
        .iter()
        .any(|ct| ct == &media_type)
    {
        return Err(AppError::InvalidInput(format!(
            "Unsupported thumbnail type: {}",
            media_type
        ))
        .into());
    }

    // Thumbnails are small enough to buffer, but the limit still applies
    // per chunk so an oversize body is cut off early.
    let max_bytes = state.config.max_thumbnail_size_bytes();
    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(HttpAppError::from)? {
        if data.len() + chunk.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Thumbnail exceeds the maximum allowed size of {} bytes",
                max_bytes
            ))
            .into());
        }
        data.extend_from_slice(&chunk);
    }

    let url = state
        .thumbnails
        .store(video_id, &media_type, data.freeze())
        .await?;

    video.thumbnail_url = Some(url);
    let updated = state.videos.update_video(video).await?;

    let video_url = state.resolver.resolve(updated.media_ref.as_ref()).await?;

    Ok(Json(VideoResponse::resolved(updated, video_url)))
}

/// Serve a cached thumbnail (in-memory strategy only).
#[utoipa::path(
    get,
    path = "/thumbnails/{video_id}",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Video record id")),
    responses(
        (status = 200, description = "Thumbnail bytes"),
        (status = 404, description = "No cached thumbnail", body = ErrorResponse)
    )
)]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    match state.thumbnails.get(video_id).await {
        Some(thumbnail) => Ok((
            [(header::CONTENT_TYPE, thumbnail.media_type)],
            thumbnail.data,
        )
            .into_response()),
        None => Err(AppError::NotFound(format!(
            "No cached thumbnail for video {}",
            video_id
        ))
        .into()),
    }
}
