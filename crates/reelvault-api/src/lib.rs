//! Reelvault API Library
//!
//! HTTP surface for the media ingestion and delivery pipeline: JWT-guarded
//! video/thumbnail uploads, metadata endpoints, and application setup.

mod api_doc;
mod handlers;

// Public modules (integration tests build the app through these)
pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::thumbnails::ThumbnailStore;
pub use services::upload::UploadPipeline;
pub use state::AppState;
