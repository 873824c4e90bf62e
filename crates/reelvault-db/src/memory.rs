//! In-memory repository used by tests and local development.

use crate::video_repository::VideoRepository;
use async_trait::async_trait;
use chrono::Utc;
use reelvault_core::{AppError, Video};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn create_video(&self, video: Video) -> Result<Video, AppError> {
        self.videos.write().await.insert(video.id, video.clone());
        Ok(video)
    }

    async fn update_video(&self, mut video: Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        if !videos.contains_key(&video.id) {
            return Err(AppError::NotFound(format!("Video {} not found", video.id)));
        }
        video.updated_at = Utc::now();
        videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn list_videos_by_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .await
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelvault_core::{CreateVideoParams, MediaReference};

    fn sample(user_id: Uuid, title: &str) -> Video {
        Video::new(
            user_id,
            CreateVideoParams {
                title: title.to_string(),
                description: None,
            },
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryVideoRepository::new();
        let video = repo.create_video(sample(Uuid::new_v4(), "a")).await.unwrap();

        let fetched = repo.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(fetched, video);
        assert!(repo.get_video(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_sets_media_ref() {
        let repo = InMemoryVideoRepository::new();
        let mut video = repo.create_video(sample(Uuid::new_v4(), "a")).await.unwrap();

        video.media_ref = Some(MediaReference::stored("bucket", "landscape/x.mp4"));
        let updated = repo.update_video(video.clone()).await.unwrap();
        assert_eq!(updated.media_ref, video.media_ref);
        assert!(updated.updated_at >= video.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let result = repo.update_video(sample(Uuid::new_v4(), "a")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_by_user_newest_first() {
        let repo = InMemoryVideoRepository::new();
        let user = Uuid::new_v4();

        let first = repo.create_video(sample(user, "first")).await.unwrap();
        let second = repo.create_video(sample(user, "second")).await.unwrap();
        repo.create_video(sample(Uuid::new_v4(), "other user"))
            .await
            .unwrap();

        let listed = repo.list_videos_by_user(user).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }
}
