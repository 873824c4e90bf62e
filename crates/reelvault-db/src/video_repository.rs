use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reelvault_core::{AppError, MediaReference, Video};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Video metadata repository
///
/// The API layer depends on this trait rather than a concrete database so
/// handlers and the upload pipeline can be exercised against an in-memory
/// implementation.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Fetch a video by id. Absence is `Ok(None)`, not an error.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Insert a new video record.
    async fn create_video(&self, video: Video) -> Result<Video, AppError>;

    /// Persist updated mutable fields (thumbnail and media reference).
    /// Bumps `updated_at`.
    async fn update_video(&self, video: Video) -> Result<Video, AppError>;

    /// List a user's videos, newest first.
    async fn list_videos_by_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;
}

/// Database row for a video. The media reference is persisted as its text
/// form in `video_url`; parsing back is infallible for rows this crate
/// wrote, so a parse failure means a corrupt row.
#[derive(Debug, sqlx::FromRow)]
struct VideoRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    thumbnail_url: Option<String>,
    video_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VideoRow {
    fn into_video(self) -> Result<Video, AppError> {
        let media_ref = self
            .video_url
            .map(|raw| {
                raw.parse::<MediaReference>().map_err(|e| {
                    AppError::Internal(format!("Corrupt media reference for video {}: {}", self.id, e))
                })
            })
            .transpose()?;

        Ok(Video {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            media_ref,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let row: Option<VideoRow> = sqlx::query_as::<Postgres, VideoRow>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url,
                   created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(VideoRow::into_video).transpose()
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert"))]
    async fn create_video(&self, video: Video) -> Result<Video, AppError> {
        let row: VideoRow = sqlx::query_as::<Postgres, VideoRow>(
            r#"
            INSERT INTO videos (
                id, user_id, title, description, thumbnail_url, video_url,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, title, description, thumbnail_url, video_url,
                      created_at, updated_at
            "#,
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(video.media_ref.as_ref().map(|r| r.to_string()))
        .bind(video.created_at)
        .bind(video.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_video()
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update"))]
    async fn update_video(&self, video: Video) -> Result<Video, AppError> {
        let row: Option<VideoRow> = sqlx::query_as::<Postgres, VideoRow>(
            r#"
            UPDATE videos
            SET title = $2,
                description = $3,
                thumbnail_url = $4,
                video_url = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, title, description, thumbnail_url, video_url,
                      created_at, updated_at
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(video.media_ref.as_ref().map(|r| r.to_string()))
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))?
            .into_video()
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_videos_by_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let rows: Vec<VideoRow> = sqlx::query_as::<Postgres, VideoRow>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url,
                   created_at, updated_at
            FROM videos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VideoRow::into_video).collect()
    }
}
