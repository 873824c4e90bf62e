//! Shared application state.

use crate::auth::JwtService;
use crate::services::thumbnails::ThumbnailStore;
use axum::http::HeaderMap;
use reelvault_core::{AppError, Config};
use reelvault_db::VideoRepository;
use reelvault_processing::{MediaProber, Remuxer};
use reelvault_storage::{Storage, UrlResolver};
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across handlers.
///
/// Every external dependency sits behind a trait object so integration
/// tests can assemble a state from fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub prober: Arc<dyn MediaProber>,
    pub remuxer: Arc<dyn Remuxer>,
    pub thumbnails: Arc<dyn ThumbnailStore>,
    pub resolver: UrlResolver,
    pub jwt: JwtService,
}

impl AppState {
    /// Authenticate a request and return the caller's user id.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Uuid, AppError> {
        let token = crate::auth::bearer_token(headers)?;
        self.jwt.validate_token(token)
    }
}
