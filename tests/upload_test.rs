use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_lfs_backend::config::ServerConfig;
use rust_lfs_backend::utils::hash::sha256_hex;
use rust_lfs_backend::{AppState, create_app};
use tempfile::TempDir;
use tower::ServiceExt;

// SHA-256 for "hello"
const HELLO_OID: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

async fn test_app(dir: &TempDir, max_object_size: u64) -> Router {
    let config = ServerConfig {
        storage_root: dir.path().to_path_buf(),
        max_object_size,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
    };
    let state = AppState::new(config).await.unwrap();
    create_app(state)
}

fn put_object(oid: &str, body: &'static [u8]) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/objects/{}", oid))
        .body(Body::from(body))
        .unwrap()
}

fn get_object(oid: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/objects/{}", oid))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_upload_and_redownload_roundtrip() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, 1024).await;

    let response = app.clone().oneshot(put_object(HELLO_OID, b"hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());

    let response = app.clone().oneshot(get_object(HELLO_OID)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/octet-stream"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"hello");
}

#[tokio::test]
async fn test_repeat_upload_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, 1024).await;

    let response = app.clone().oneshot(put_object(HELLO_OID, b"hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(put_object(HELLO_OID, b"hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The store holds exactly one canonical object.
    let mut count = 0;
    let mut entries = tokio::fs::read_dir(dir.path().join("objects")).await.unwrap();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        assert_eq!(entry.file_name().to_str().unwrap(), HELLO_OID);
        count += 1;
    }
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_digest_mismatch_rejected() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, 1024).await;
    let wrong_oid = sha256_hex(b"goodbye");

    let response = app
        .clone()
        .oneshot(put_object(&wrong_oid, b"hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("digest mismatch"));

    // No canonical file, no staging leftovers.
    let response = app.clone().oneshot(get_object(&wrong_oid)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let mut entries = tokio::fs::read_dir(dir.path().join("staging")).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn test_oversize_upload_rejected() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, 4).await;

    let response = app.clone().oneshot(put_object(HELLO_OID, b"hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let response = app.clone().oneshot(get_object(HELLO_OID)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_oid_rejected() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, 1024).await;

    let response = app.clone().oneshot(put_object("deadbeef", b"hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_uploads_of_same_object() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir, 1024).await;

    let (first, second) = tokio::join!(
        app.clone().oneshot(put_object(HELLO_OID, b"hello")),
        app.clone().oneshot(put_object(HELLO_OID, b"hello")),
    );
    assert_eq!(first.unwrap().status(), StatusCode::OK);
    assert_eq!(second.unwrap().status(), StatusCode::OK);

    let stored = tokio::fs::read(dir.path().join("objects").join(HELLO_OID))
        .await
        .unwrap();
    assert_eq!(sha256_hex(&stored), HELLO_OID);
}
