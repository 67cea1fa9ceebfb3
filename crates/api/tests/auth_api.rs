//! Registration, login, token refresh, logout and the `/me` profile.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, post_auth, post_json, put_json_auth, register, TEST_PASSWORD,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_tokens_and_profile_role(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "  Awa@Example.org ",
        "password": TEST_PASSWORD,
        "full_name": "Awa Diop",
        "role": "facilitator",
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["expires_in"], 15 * 60);
    assert_eq!(data["user"]["email"], "awa@example.org");
    assert_eq!(data["user"]["role"], "facilitator");

    let token = data["access_token"].as_str().unwrap();
    let me = body_json(get_auth(app, "/api/v1/me", token).await).await;
    assert_eq!(me["data"]["role"], "facilitator");
    assert_eq!(me["data"]["profile"]["full_name"], "Awa Diop");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_409(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    register(app.clone(), "dup@example.org", "traveler").await;

    let body = serde_json::json!({
        "email": "DUP@example.org",
        "password": TEST_PASSWORD,
        "full_name": "Second",
        "role": "traveler",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_registration_leaves_email_free(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);

    // PostgreSQL rejects NUL in text, so the profile insert fails after
    // the user row was written.
    let body = serde_json::json!({
        "email": "ana@example.org",
        "password": TEST_PASSWORD,
        "full_name": "Ana\u{0}Diallo",
        "role": "traveler",
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let (token, _) = register(app.clone(), "ana@example.org", "traveler").await;
    let json = body_json(get_auth(app, "/api/v1/me", &token).await).await;
    assert_eq!(json["data"]["email"], "ana@example.org");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_role_cannot_be_self_assigned(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "sneaky@example.org",
        "password": TEST_PASSWORD,
        "full_name": "Sneaky",
        "role": "admin",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "short@example.org",
        "password": "1234567",
        "full_name": "Short",
        "role": "traveler",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password must be at least 8 characters long");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_checks_password(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    register(app.clone(), "login@example.org", "traveler").await;

    let ok = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "login@example.org", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["user"]["role"], "traveler");

    let wrong = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "login@example.org", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let ghost = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "ghost@example.org", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(ghost.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "rotate@example.org",
        "password": TEST_PASSWORD,
        "full_name": "Rotate",
        "role": "traveler",
    });
    let json = body_json(post_json(app.clone(), "/api/v1/auth/register", body).await).await;
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let first = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let rotated = body_json(first).await;
    assert_ne!(rotated["data"]["refresh_token"], refresh_token.as_str());

    // The old token was revoked by the rotation.
    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "bye@example.org",
        "password": TEST_PASSWORD,
        "full_name": "Bye",
        "role": "traveler",
    });
    let json = body_json(post_json(app.clone(), "/api/v1/auth/register", body).await).await;
    let access = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_auth(app.clone(), "/api/v1/auth/logout", &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_me_changes_profile(pool: PgPool) {
    let (app, _storage) = common::build_test_app(pool);
    let (token, _) = register(app.clone(), "me@example.org", "traveler").await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/me",
        &token,
        serde_json::json!({ "full_name": "Moussa Kane", "avatar_url": "https://cdn.example.org/a.png" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["full_name"], "Moussa Kane");
    assert_eq!(json["data"]["avatar_url"], "https://cdn.example.org/a.png");

    let bad = put_json_auth(
        app,
        "/api/v1/me",
        &token,
        serde_json::json!({ "avatar_url": "not a url" }),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}
