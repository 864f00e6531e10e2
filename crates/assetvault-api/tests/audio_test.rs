//! Audio upload and listing integration tests.
//!
//! Run with: `cargo test -p assetvault-api --test audio_test`

mod helpers;

use assetvault_core::models::DocumentId;
use axum_test::multipart::MultipartForm;
use helpers::{api_path, file_part, setup_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_upload_audio() {
    let app = setup_test_app();
    let client = app.client();

    let form = MultipartForm::new()
        .add_part("files", file_part("meow.wav", b"RIFF....WAVE", "audio/wav"))
        .add_part("files", file_part("purr.mp3", b"ID3", "audio/mpeg"));
    let response = client.post(&api_path("/audio")).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "Audio uploaded");
    assert_eq!(body["inserted_ids"].as_array().unwrap().len(), 2);

    // Audio never lands in the sprite collection.
    assert_eq!(app.store.count("audio").unwrap(), 2);
    assert_eq!(app.store.count("sprites").unwrap(), 0);

    let listed: Value = client.get(&api_path("/audio")).await.json();
    let records = listed.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "meow.wav");
    assert_eq!(records[0]["content_type"], "audio/wav");
    assert_eq!(records[1]["content_type"], "audio/mpeg");
}

#[tokio::test]
async fn test_upload_without_files_returns_empty_outcome() {
    let app = setup_test_app();

    let form = MultipartForm::new().add_text("note", "no files here");
    let response = app.client().post(&api_path("/audio")).multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["inserted_ids"], json!([]));
    assert_eq!(body["rejected"], json!([]));
}

#[tokio::test]
async fn test_legacy_audio_document_is_upgraded_on_read() {
    let app = setup_test_app();
    app.store
        .seed(
            "audio",
            DocumentId::new("legacy-1"),
            json!({"name": "old.wav", "content": "aGVsbG8=", "content_type": "audio/wav"}),
        )
        .unwrap();

    let listed: Value = app.client().get(&api_path("/audio")).await.json();
    assert_eq!(listed[0]["id"], "legacy-1");
    assert_eq!(listed[0]["content"], "data:audio/wav;base64,aGVsbG8=");
    assert_eq!(listed[0]["incomplete"], false);
}
