//! HTTP-level integration tests for the auth endpoints.
//!
//! Covers signup validation, login with the session cookie, logout, and
//! current-user resolution.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_json, get, get_with_session, post_json, post_json_with_session, set_cookie_pair,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_creates_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "new@example.com", "password": "long-enough" });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "new@example.com");
    assert!(json["user"]["id"].is_number());
    assert!(json["user"].get("passwordHash").is_none());
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_rejects_blank_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "  ", "password": "long-enough" });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_with_string_body_is_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/auth/signup", json!("a@example.com")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_BODY");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "a@example.com", "password": "short" });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email_conflicts(pool: PgPool) {
    common::create_user(&pool, "taken@example.com").await;
    let app = common::build_test_app(pool);
    let body = json!({ "email": "taken@example.com", "password": "long-enough" });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_sets_session_cookie(pool: PgPool) {
    let user = common::create_user(&pool, "login@example.com").await;
    let app = common::build_test_app(pool);

    let body = json!({ "email": "login@example.com", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let cookie = set_cookie_pair(&response).unwrap();
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);

    // The issued cookie is a working session.
    let me = get_with_session(app, "/api/auth/get-user", &cookie).await;
    assert_eq!(me.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_user(&pool, "wrongpw@example.com").await;
    let app = common::build_test_app(pool);

    let body = json!({ "email": "wrongpw@example.com", "password": "not-the-password" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email_matches_wrong_password(pool: PgPool) {
    common::create_user(&pool, "known@example.com").await;
    let app = common::build_test_app(pool);

    let unknown = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": "ghost@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    let wrong = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "known@example.com", "password": "nope-nope" }),
    )
    .await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await["error"], body_json(wrong).await["error"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_expires_cookie(pool: PgPool) {
    let (_user, cookie) = common::create_user_with_session(&pool, "out@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_with_session(app, "/api/auth/logout", json!({}), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Current user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_returns_user_and_tours(pool: PgPool) {
    let (user, cookie) = common::create_user_with_session(&pool, "me@example.com").await;
    let app = common::build_test_app(pool);

    let create = json!({ "title": "Mine", "userId": user.id, "steps": [{ "title": "one" }] });
    let created = post_json_with_session(app.clone(), "/api/tours/create-tour", create, &cookie).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = get_with_session(app, "/api/auth/get-user", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "me@example.com");
    assert_eq!(json["tours"].as_array().unwrap().len(), 1);
    assert_eq!(json["tours"][0]["steps"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_without_session_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/get-user").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_with_garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_with_session(app, "/api/auth/get-user", "token=garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_for_deleted_user_is_401(pool: PgPool) {
    let (user, cookie) = common::create_user_with_session(&pool, "gone@example.com").await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get_with_session(app, "/api/auth/get-user", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
