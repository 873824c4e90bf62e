//! Reelvault Database Library
//!
//! Video metadata persistence. The `VideoRepository` trait is the seam the
//! API works against; `PgVideoRepository` is the production implementation
//! and `InMemoryVideoRepository` backs tests.

pub mod memory;
pub mod pool;
pub mod video_repository;

pub use memory::InMemoryVideoRepository;
pub use pool::create_pool;
pub use video_repository::{PgVideoRepository, VideoRepository};

/// Embedded migrations, applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
