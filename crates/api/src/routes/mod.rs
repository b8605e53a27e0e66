pub mod auth;
pub mod health;
pub mod pages;
pub mod tour;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (public)
/// /auth/get-user                                   current user + tours
///
/// /tours/create-tour                               create (POST)
/// /tours/get-tours                                 visible tours
/// /tours/get-tours/{user_id}                       a user's tours
/// /tours/get-tours/{user_id}/{tour_id}             one owned tour
/// /tours/update-tour/{id}                          replace (PUT)
/// /tours/delete-tour/{id}                          delete (DELETE)
/// ```
///
/// Unmatched paths under `/api` get a JSON 404 instead of the page fallback.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tours", tour::router())
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "code": "NOT_FOUND",
        })),
    )
}
