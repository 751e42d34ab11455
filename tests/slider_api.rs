mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_app, delete, get, png_part, post_multipart, send_raw, Part};
use ctv_admin::handlers::upload::UPLOAD_BODY_LIMIT;

#[tokio::test]
async fn upload_then_list_then_delete() {
    let app = build_test_app();

    let (status, created) = post_multipart(&app.router, "/api/sliders", &[png_part("hero.png")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["success"], true);
    let image_url = created["imageUrl"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("https://images.test/"));
    assert!(image_url.ends_with("-hero.png"));
    assert!(created.get("imageKey").is_none());

    // The URL resolves to the stored bytes
    assert!(app.images.get_by_url(&image_url).await.is_some());

    let (status, list) = get(&app.router, "/api/sliders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["imageUrl"], image_url.as_str());
    let id = list[0]["id"].as_str().unwrap().to_string();
    assert_eq!(created["id"], id.as_str());

    let (status, body) = delete(&app.router, &format!("/api/sliders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "success": true }));

    let (_, list) = get(&app.router, "/api/sliders").await;
    assert!(list.as_array().unwrap().is_empty());
    assert_eq!(app.images.object_count().await, 0);
}

#[tokio::test]
async fn missing_file_is_400_and_stores_nothing() {
    let app = build_test_app();

    let (status, body) = post_multipart(
        &app.router,
        "/api/sliders",
        &[Part::Text {
            name: "caption",
            value: "no image here",
        }],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(app.images.put_count(), 0);
}

#[tokio::test]
async fn non_image_file_is_rejected() {
    let app = build_test_app();

    let (status, body) = post_multipart(
        &app.router,
        "/api/sliders",
        &[Part::File {
            name: "image",
            file_name: "notes.txt",
            content_type: "text/plain",
            bytes: b"hello",
        }],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only image files are allowed");
    assert_eq!(app.images.put_count(), 0);
}

#[tokio::test]
async fn oversized_file_is_rejected() {
    let app = build_test_app();
    let big = vec![0u8; 5 * 1024 * 1024 + 1];

    let (status, _) = post_multipart(
        &app.router,
        "/api/sliders",
        &[Part::File {
            name: "image",
            file_name: "big.png",
            content_type: "image/png",
            bytes: &big,
        }],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.images.put_count(), 0);
}

#[tokio::test]
async fn body_over_the_route_limit_is_400() {
    let app = build_test_app();
    let huge = vec![0u8; 6 * 1024 * 1024];
    assert!(huge.len() > UPLOAD_BODY_LIMIT);

    let (status, body) = post_multipart(
        &app.router,
        "/api/sliders",
        &[Part::File {
            name: "image",
            file_name: "huge.png",
            content_type: "image/png",
            bytes: &huge,
        }],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "Image exceeds the 5MB size limit");
    assert_eq!(app.images.put_count(), 0);
}

#[tokio::test]
async fn non_multipart_request_gets_error_body() {
    let app = build_test_app();

    let (status, body) = send_raw(&app.router, Method::POST, "/api/sliders", None, "image").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].is_string());

    let (status, body) = send_raw(
        &app.router,
        Method::POST,
        "/api/sliders",
        Some("application/json"),
        "{}",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(app.images.put_count(), 0);
}

#[tokio::test]
async fn two_image_parts_are_rejected() {
    let app = build_test_app();

    let (status, body) = post_multipart(
        &app.router,
        "/api/sliders",
        &[png_part("a.png"), png_part("b.png")],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only one image file is allowed");
    assert_eq!(app.images.put_count(), 0);
}

#[tokio::test]
async fn delete_unknown_id_is_404_without_store_mutation() {
    let app = build_test_app();
    post_multipart(&app.router, "/api/sliders", &[png_part("keep.png")]).await;

    let (status, body) = delete(
        &app.router,
        "/api/sliders/6f9619ff-8b86-4d11-b42d-00c04fc964ff",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Slider not found");

    let (status, _) = delete(&app.router, "/api/sliders/not-an-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(app.images.delete_count(), 0);
    assert_eq!(app.images.object_count().await, 1);
}

#[tokio::test]
async fn delete_succeeds_when_image_delete_fails() {
    let app = build_test_app();
    let (_, created) = post_multipart(&app.router, "/api/sliders", &[png_part("s.png")]).await;
    let id = created["id"].as_str().unwrap().to_string();
    app.images.fail_deletes(true);

    let (status, _) = delete(&app.router, &format!("/api/sliders/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    let (_, list) = get(&app.router, "/api/sliders").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn storage_failure_is_500_with_generic_message() {
    let app = build_test_app();
    app.images.fail_puts(true);

    let (status, body) = post_multipart(&app.router, "/api/sliders", &[png_part("s.png")]).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An internal error occurred");
    let (_, list) = get(&app.router, "/api/sliders").await;
    assert!(list.as_array().unwrap().is_empty());
}
