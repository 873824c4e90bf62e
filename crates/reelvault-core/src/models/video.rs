use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::reference::MediaReference;

/// A video metadata record.
///
/// `media_ref` is only ever set after a successful end-to-end ingestion run.
/// In signed-URL deployments it holds an opaque (bucket, key) pointer; in
/// static deployments it holds the public URL directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub media_ref: Option<MediaReference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    pub fn new(user_id: Uuid, params: CreateVideoParams) -> Self {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            user_id,
            title: params.title,
            description: params.description,
            thumbnail_url: None,
            media_ref: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Caller-supplied fields for creating a video record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateVideoParams {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Client-facing view of a video record. `video_url` carries the resolved
/// URL (static or freshly signed); the opaque reference never leaves the
/// server in signed mode.
#[derive(Debug, Serialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoResponse {
    /// Build a response from a record and its already-resolved video URL.
    pub fn resolved(video: Video, video_url: Option<String>) -> Self {
        VideoResponse {
            id: video.id,
            user_id: video.user_id,
            title: video.title,
            description: video.description,
            thumbnail_url: video.thumbnail_url,
            video_url,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_video_has_no_media() {
        let video = Video::new(
            Uuid::new_v4(),
            CreateVideoParams {
                title: "clip".to_string(),
                description: None,
            },
        );
        assert!(video.media_ref.is_none());
        assert!(video.thumbnail_url.is_none());
    }

    #[test]
    fn test_response_omits_absent_urls() {
        let video = Video::new(
            Uuid::new_v4(),
            CreateVideoParams {
                title: "clip".to_string(),
                description: Some("desc".to_string()),
            },
        );
        let json = serde_json::to_value(VideoResponse::resolved(video, None)).unwrap();
        assert!(json.get("video_url").is_none());
        assert!(json.get("thumbnail_url").is_none());
        assert_eq!(json["title"], "clip");
    }
}
