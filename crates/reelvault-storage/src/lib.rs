//! Reelvault Storage Library
//!
//! This crate provides the object-store abstraction used by the ingestion
//! pipeline, with S3 and local filesystem backends.
//!
//! # Storage key format
//!
//! Media keys are orientation-scoped: `{landscape|portrait|other}/{id}.mp4`,
//! where `{id}` is 32 random bytes rendered as unpadded URL-safe base64.
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
pub mod local;
pub mod resolver;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{generate_asset_name, generate_media_key};
pub use local::LocalStorage;
pub use reelvault_core::StorageBackend;
pub use resolver::UrlResolver;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
