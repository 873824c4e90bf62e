//! OpenAPI document assembly.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reelvault API",
        description = "Video ingestion and delivery pipeline"
    ),
    paths(
        crate::handlers::health::healthz,
        crate::handlers::videos::create_video,
        crate::handlers::videos::get_video,
        crate::handlers::videos::list_videos,
        crate::handlers::video_upload::upload_video,
        crate::handlers::thumbnails::upload_thumbnail,
        crate::handlers::thumbnails::get_thumbnail,
    ),
    components(schemas(
        reelvault_core::models::video::CreateVideoParams,
        reelvault_core::models::video::VideoResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "videos", description = "Video metadata and media ingestion"),
        (name = "health", description = "Service probes")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
