mod helpers;

use helpers::{create_test_video, setup_test_app};

#[tokio::test]
async fn test_healthz() {
    let app = setup_test_app().await;

    let response = app.client().get("/healthz").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let spec: serde_json::Value = response.json();
    assert!(spec["paths"]["/api/videos"].is_object());
}

#[tokio::test]
async fn test_create_video() {
    let app = setup_test_app().await;
    let (user_id, token) = app.test_user();

    let response = app
        .client()
        .post("/api/videos")
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({ "title": "My clip", "description": "first" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "My clip");
    assert_eq!(body["description"], "first");
    assert_eq!(body["user_id"], user_id.to_string());
    // No media attached yet, so the URL fields are absent entirely.
    assert!(body.get("video_url").is_none());
    assert!(body.get("thumbnail_url").is_none());
}

#[tokio::test]
async fn test_create_video_empty_title() {
    let app = setup_test_app().await;
    let (_, token) = app.test_user();

    let response = app
        .client()
        .post("/api/videos")
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({ "title": "   " }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_create_video_unauthorized() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .json(&serde_json::json!({ "title": "My clip" }))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_get_video_not_found() {
    let app = setup_test_app().await;
    let (_, token) = app.test_user();
    let fake_id = uuid::Uuid::new_v4();

    let response = app
        .client()
        .get(&format!("/api/videos/{}", fake_id))
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_get_video_visible_to_other_users() {
    let app = setup_test_app().await;
    let (_, owner_token) = app.test_user();
    let (_, viewer_token) = app.test_user();

    let video = create_test_video(app.client(), &owner_token, "Shared clip").await;

    let response = app
        .client()
        .get(&format!("/api/videos/{}", video["id"].as_str().unwrap()))
        .add_header("Authorization", format!("Bearer {viewer_token}"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Shared clip");
}

#[tokio::test]
async fn test_list_videos_scoped_to_caller() {
    let app = setup_test_app().await;
    let (_, token_a) = app.test_user();
    let (_, token_b) = app.test_user();

    create_test_video(app.client(), &token_a, "A one").await;
    create_test_video(app.client(), &token_a, "A two").await;
    create_test_video(app.client(), &token_b, "B one").await;

    let response = app
        .client()
        .get("/api/videos")
        .add_header("Authorization", format!("Bearer {token_a}"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"A one"));
    assert!(titles.contains(&"A two"));
}

#[tokio::test]
async fn test_list_videos_invalid_token() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/videos")
        .add_header("Authorization", "Bearer not-a-jwt")
        .await;

    assert_eq!(response.status_code(), 401);
}
