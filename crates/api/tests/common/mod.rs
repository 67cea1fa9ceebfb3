#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use playlife_core::roles::Role;
use playlife_core::submission::{CollaboratorError, ObjectStorage};
use playlife_core::types::DbId;
use playlife_db::models::user::CreateUser;
use playlife_db::repositories::{ProfileRepo, RoleRepo, UserRepo};
use playlife_storage::{LocalObjectStorage, StorageConfig};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use playlife_api::auth::jwt::{generate_access_token, JwtConfig};
use playlife_api::auth::password::hash_password;
use playlife_api::config::ServerConfig;
use playlife_api::router::build_app_router;
use playlife_api::state::AppState;

pub const TEST_PASSWORD: &str = "ballon-rond-2026";
pub const MEDIA_BASE_URL: &str = "http://localhost:3000/media";

/// Build a test `ServerConfig` with safe defaults and local storage in `root`.
pub fn test_config(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 10 * 1024 * 1024,
        wizard_idle_secs: 7200,
        jwt: test_jwt_config(),
        storage: StorageConfig::local(root, MEDIA_BASE_URL),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "playlife-integration-test-secret".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Full router over `pool` with local filesystem storage.
///
/// Uploads land in the returned directory, which is deleted when dropped;
/// keep it alive for as long as the router is used.
pub fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    build_test_app_with(pool, None, |_| {})
}

/// Full router whose object storage is `storage`.
pub fn build_test_app_with_storage(
    pool: PgPool,
    storage: Arc<dyn ObjectStorage>,
) -> (Router, TempDir) {
    build_test_app_with(pool, Some(storage), |_| {})
}

/// Full router with `storage` (local storage when `None`) and a config
/// adjusted by `configure`.
pub fn build_test_app_with(
    pool: PgPool,
    storage: Option<Arc<dyn ObjectStorage>>,
    configure: impl FnOnce(&mut ServerConfig),
) -> (Router, TempDir) {
    let root = tempfile::tempdir().unwrap();
    let mut config = test_config(root.path());
    configure(&mut config);
    let storage = storage.unwrap_or_else(|| {
        Arc::new(LocalObjectStorage::new(
            &config.storage.local_root,
            &config.storage.public_base_url,
        ))
    });
    let app = build_app_router(AppState::new(pool, config.clone(), storage), &config);
    (app, root)
}

/// Object storage that rejects every upload.
pub struct UnavailableStorage;

#[async_trait]
impl ObjectStorage for UnavailableStorage {
    async fn upload(
        &self,
        _bucket: &str,
        _path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::new("bucket offline"))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://unavailable.test/{bucket}/{path}")
    }
}

/// Object storage that takes `delay` to accept each upload and stores nothing.
pub struct SlowStorage {
    pub delay: Duration,
}

#[async_trait]
impl ObjectStorage for SlowStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, CollaboratorError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.public_url(bucket, path))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://slow.test/{bucket}/{path}")
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), body)).await
}

/// POST without a body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("POST", uri, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("DELETE", uri, Some(token))).await
}

/// POST a multipart form with a single `file` part.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    token: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response<Body> {
    let boundary = "playlife-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register through the API and return `(access_token, user_id)`.
pub async fn register(app: Router, email: &str, role: &str) -> (String, DbId) {
    let body = serde_json::json!({
        "email": email,
        "password": TEST_PASSWORD,
        "full_name": "Test Member",
        "role": role,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["access_token"].as_str().unwrap().to_string(),
        json["data"]["user"]["id"].as_i64().unwrap(),
    )
}

/// Insert an admin directly (admins cannot self-register) and return
/// `(access_token, user_id)`.
pub async fn create_admin(pool: &PgPool, email: &str) -> (String, DbId) {
    let role = RoleRepo::find_by_name(pool, Role::Admin.as_str())
        .await
        .unwrap()
        .unwrap();
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();
    ProfileRepo::create(pool, user.id, Some("Admin")).await.unwrap();

    let token = generate_access_token(user.id, Role::Admin, &test_jwt_config()).unwrap();
    (token, user.id)
}
