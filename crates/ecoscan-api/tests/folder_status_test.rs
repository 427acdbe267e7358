//! Folder status, health and docs integration tests.

mod helpers;

use ecoscan_core::UploadFolder;
use helpers::fixtures::{create_minimal_jpeg, create_minimal_png};
use helpers::{image_form, setup_production_test_app, setup_test_app, upload};
use serde_json::Value;

#[tokio::test]
async fn test_status_of_empty_folder() {
    let app = setup_test_app().await;

    let response = app.client().get("/folder-status/uploads").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["folder"], "uploads");
    assert_eq!(body["totalImages"], 0);
    assert_eq!(body["frontImages"], 0);
    assert_eq!(body["backImages"], 0);
    assert_eq!(body["files"]["front"], serde_json::json!([]));
    assert_eq!(body["files"]["back"], serde_json::json!([]));
}

#[tokio::test]
async fn test_status_lists_slot_urls() {
    let app = setup_test_app().await;
    let client = app.client();

    let front: Value = upload(
        client,
        "/upload-product2",
        image_form(create_minimal_jpeg(), "a.jpg", "image/jpeg"),
    )
    .await
    .json();
    let back: Value = upload(
        client,
        "/upload-product2",
        image_form(create_minimal_png(), "b.png", "image/png"),
    )
    .await
    .json();

    let body: Value = client.get("/folder-status/product2").await.json();
    assert_eq!(body["folder"], "product2");
    assert_eq!(body["totalImages"], 2);
    assert_eq!(body["files"]["front"], serde_json::json!([front["fileUrl"]]));
    assert_eq!(body["files"]["back"], serde_json::json!([back["fileUrl"]]));
}

#[tokio::test]
async fn test_status_counts_unprefixed_images_but_lists_only_slots() {
    let app = setup_test_app().await;
    let dir = app.folder_dir(UploadFolder::Product1);
    std::fs::write(dir.join("legacy.jpg"), b"img").unwrap();
    std::fs::write(dir.join("readme.txt"), b"text").unwrap();
    std::fs::write(dir.join("front-1-1.png"), b"img").unwrap();

    let body: Value = app.client().get("/folder-status/product1").await.json();

    assert_eq!(body["totalImages"], 2);
    assert_eq!(body["frontImages"], 1);
    assert_eq!(body["backImages"], 0);
    assert_eq!(
        body["files"]["front"],
        serde_json::json!(["http://localhost:5000/product1/front-1-1.png"])
    );
}

#[tokio::test]
async fn test_status_rejects_unknown_folder() {
    let app = setup_test_app().await;

    let response = app.client().get("/folder-status/secrets").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["message"].as_str().unwrap().contains("secrets"));
}

#[tokio::test]
async fn test_error_details_follow_configured_environment() {
    let app = setup_test_app().await;
    let body: Value = app.client().get("/folder-status/secrets").await.json();
    assert_eq!(body["error_type"], "InvalidInput");
    assert!(body["details"].as_str().is_some());

    let app = setup_production_test_app().await;
    let response = app.client().get("/folder-status/secrets").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["message"].as_str().unwrap().contains("secrets"));
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}

#[tokio::test]
async fn test_status_of_deleted_folder_is_server_error() {
    let app = setup_test_app().await;
    std::fs::remove_dir_all(app.folder_dir(UploadFolder::Uploads)).unwrap();

    let response = app.client().get("/folder-status/uploads").await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "DIRECTORY_NOT_FOUND");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_health_reports_every_folder() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    for folder in ["uploads", "product1", "product2"] {
        assert_eq!(body["folders"][folder], "healthy");
    }
}

#[tokio::test]
async fn test_health_degraded_when_folder_missing() {
    let app = setup_test_app().await;
    std::fs::remove_dir_all(app.folder_dir(UploadFolder::Product2)).unwrap();

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["folders"]["uploads"], "healthy");
    assert_ne!(body["folders"]["product2"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"].get("/upload-product1").is_some());
    assert!(body["paths"].get("/folder-status/{folder}").is_some());
}
