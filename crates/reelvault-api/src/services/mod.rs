//! Application services: the upload pipeline and thumbnail persistence.

pub mod thumbnails;
pub mod upload;
