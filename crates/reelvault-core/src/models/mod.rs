//! Domain models shared across reelvault components.

pub mod orientation;
pub mod reference;
pub mod video;

pub use orientation::Orientation;
pub use reference::{MediaReference, MediaReferenceParseError};
pub use video::{CreateVideoParams, Video, VideoResponse};
