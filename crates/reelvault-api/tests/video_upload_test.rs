mod helpers;

use helpers::{
    create_test_video, multipart_file, setup_test_app, setup_test_app_with, FailingRemuxer,
    FakeProber, FakeRemuxer, MEDIA_BASE_URL,
};
use std::sync::Arc;

const FAKE_MP4: &[u8] = b"not really mp4 bytes, but the tools are faked";

#[tokio::test]
async fn test_upload_attaches_media_url() {
    let app = setup_test_app().await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Landscape clip").await;
    let video_id = video["id"].as_str().unwrap();

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!("/api/videos/{video_id}/upload"))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let url = body["video_url"].as_str().unwrap();
    // Default fake prober reports 1920x1080, an exact 16:9 landscape.
    assert!(url.starts_with(&format!("{MEDIA_BASE_URL}/landscape/")));
    assert!(url.ends_with(".mp4"));

    // The reference is persisted, not just echoed back.
    let fetched = app
        .client()
        .get(&format!("/api/videos/{video_id}"))
        .add_header("Authorization", format!("Bearer {token}"))
        .await;
    assert_eq!(fetched.status_code(), 200);
    let fetched: serde_json::Value = fetched.json();
    assert_eq!(fetched["video_url"].as_str().unwrap(), url);
}

#[tokio::test]
async fn test_portrait_upload_gets_portrait_prefix() {
    let app = setup_test_app_with(
        Arc::new(FakeProber::with_dimensions(1080, 1920)),
        Arc::new(FakeRemuxer),
    )
    .await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Portrait clip").await;

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!(
            "/api/videos/{}/upload",
            video["id"].as_str().unwrap()
        ))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["video_url"]
        .as_str()
        .unwrap()
        .contains("/portrait/"));
}

#[tokio::test]
async fn test_square_upload_classified_other() {
    let app = setup_test_app_with(
        Arc::new(FakeProber::with_dimensions(1080, 1080)),
        Arc::new(FakeRemuxer),
    )
    .await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Square clip").await;

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!(
            "/api/videos/{}/upload",
            video["id"].as_str().unwrap()
        ))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["video_url"].as_str().unwrap().contains("/other/"));
}

#[tokio::test]
async fn test_upload_rejects_wrong_content_type() {
    let app = setup_test_app().await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Clip").await;

    let (content_type, body) = multipart_file("video", "clip.txt", "text/plain", FAKE_MP4);
    let response = app
        .client()
        .post(&format!(
            "/api/videos/{}/upload",
            video["id"].as_str().unwrap()
        ))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_upload_missing_video_field() {
    let app = setup_test_app().await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Clip").await;

    let (content_type, body) = multipart_file("file", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!(
            "/api/videos/{}/upload",
            video["id"].as_str().unwrap()
        ))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_upload_unknown_video() {
    let app = setup_test_app().await;
    let (_, token) = app.test_user();

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!("/api/videos/{}/upload", uuid::Uuid::new_v4()))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_upload_other_users_video_rejected() {
    let app = setup_test_app().await;
    let (_, owner_token) = app.test_user();
    let (_, intruder_token) = app.test_user();
    let video = create_test_video(app.client(), &owner_token, "Owned clip").await;

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!(
            "/api/videos/{}/upload",
            video["id"].as_str().unwrap()
        ))
        .add_header("Authorization", format!("Bearer {intruder_token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_upload_without_token() {
    let app = setup_test_app().await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Clip").await;

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!(
            "/api/videos/{}/upload",
            video["id"].as_str().unwrap()
        ))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_probe_failure_is_server_error() {
    let app = setup_test_app_with(Arc::new(FakeProber::failing()), Arc::new(FakeRemuxer)).await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Broken clip").await;

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!(
            "/api/videos/{}/upload",
            video["id"].as_str().unwrap()
        ))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 500);
}

#[tokio::test]
async fn test_remux_failure_stores_nothing() {
    let app = setup_test_app_with(
        Arc::new(FakeProber::with_dimensions(1920, 1080)),
        Arc::new(FailingRemuxer),
    )
    .await;
    let (_, token) = app.test_user();
    let video = create_test_video(app.client(), &token, "Broken clip").await;
    let video_id = video["id"].as_str().unwrap();

    let (content_type, body) = multipart_file("video", "clip.mp4", "video/mp4", FAKE_MP4);
    let response = app
        .client()
        .post(&format!("/api/videos/{video_id}/upload"))
        .add_header("Authorization", format!("Bearer {token}"))
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 500);

    // Nothing reached the object store and the record is untouched.
    let entries: Vec<_> = std::fs::read_dir(app.media_dir.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(entries.is_empty());

    let fetched = app
        .client()
        .get(&format!("/api/videos/{video_id}"))
        .add_header("Authorization", format!("Bearer {token}"))
        .await;
    let fetched: serde_json::Value = fetched.json();
    assert!(fetched.get("video_url").is_none());
}
