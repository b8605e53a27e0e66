//! Handlers for the `/api/auth` resource (signup, login, logout, get-user).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use marvedge_core::error::CoreError;
use marvedge_db::models::user::{CreateUser, UserResponse};
use marvedge_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::session::{resolve_current_user, CurrentUser};
use crate::state::AppState;

/// Message for any failed login, whether the email or the password was wrong.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/signup` and `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

/// Response carrying only a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Trim the email and reject blank credentials.
fn require_credentials(input: &CredentialsRequest) -> AppResult<&str> {
    let email = input.email.trim();
    if email.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    }
    Ok(email)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Register a new account. Does not start a session.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let email = require_credentials(&input)?;

    validate_password_strength(&input.password, state.config.password_min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Internal(format!("Password hashing error: {e}")))?;

    // A concurrent signup for the same email still hits `uq_users_email` (409).
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Signup successful",
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/auth/login
///
/// Verify credentials and set the `token` session cookie.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let email = require_credentials(&input)?;

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = generate_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(&token, &state.config)
        .map_err(|e| AppError::Internal(format!("Session cookie error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Login successful",
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Expire the session cookie. Succeeds with or without a session.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie(&state.config))],
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    )
}

/// GET /api/auth/get-user
///
/// The signed-in user with their tours, or 401.
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<CurrentUser>> {
    let current = resolve_current_user(&state, &headers)
        .await
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;
    Ok(Json(current))
}
