//! Video metadata endpoints.
//!
//! URLs are resolved lazily at read time: in signed mode every response
//! mints a fresh short-lived URL from the stored reference.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use reelvault_core::{AppError, CreateVideoParams, Video, VideoResponse};
use std::sync::Arc;
use uuid::Uuid;

/// Create a video metadata record. Media is attached by the upload
/// endpoints afterwards.
#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = CreateVideoParams,
    responses(
        (status = 201, description = "Record created", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(params): ValidatedJson<CreateVideoParams>,
) -> Result<(StatusCode, Json<VideoResponse>), HttpAppError> {
    let user_id = state.authenticate(&headers)?;

    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title must not be empty".to_string()).into());
    }

    let video = state.videos.create_video(Video::new(user_id, params)).await?;

    tracing::info!(video_id = %video.id, user_id = %user_id, "Video record created");

    Ok((StatusCode::CREATED, Json(VideoResponse::resolved(video, None))))
}

/// Fetch a single video with its resolved media URL.
#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Video record id")),
    responses(
        (status = 200, description = "Video record", body = VideoResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown video", body = ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<VideoResponse>, HttpAppError> {
    state.authenticate(&headers)?;

    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    let video_url = state.resolver.resolve(video.media_ref.as_ref()).await?;

    Ok(Json(VideoResponse::resolved(video, video_url)))
}

/// List the caller's videos, newest first.
#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    responses(
        (status = 200, description = "The caller's videos", body = [VideoResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<VideoResponse>>, HttpAppError> {
    let user_id = state.authenticate(&headers)?;

    let videos = state.videos.list_videos_by_user(user_id).await?;

    let mut responses = Vec::with_capacity(videos.len());
    for video in videos {
        let video_url = state.resolver.resolve(video.media_ref.as_ref()).await?;
        responses.push(VideoResponse::resolved(video, video_url));
    }

    Ok(Json(responses))
}
