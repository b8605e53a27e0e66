//! Session-cookie extractors and the current-user resolver.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use marvedge_core::error::CoreError;
use marvedge_core::types::DbId;
use marvedge_db::models::tour::TourWithSteps;
use marvedge_db::models::user::UserResponse;
use marvedge_db::repositories::{TourRepo, UserRepo};
use serde::Serialize;

use crate::auth::cookie::session_token;
use crate::auth::jwt::{verify_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity taken from a valid `token` cookie.
///
/// Use it as an extractor in any handler that requires a session:
///
/// ```ignore
/// async fn my_handler(session: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Wrap it in `Option` where a session is welcome but not required.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The email embedded in the token at login.
    pub email: String,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Verify the session cookie in `headers`, if any.
///
/// A missing cookie and a token that fails verification both yield `None`.
pub fn session_claims(headers: &HeaderMap, state: &AppState) -> Option<Claims> {
    let token = session_token(headers)?;
    match verify_token(&token, &state.config.jwt) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            None
        }
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_claims(&parts.headers, state)
            .map(SessionUser::from)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not authenticated".into())))
    }
}

impl OptionalFromRequestParts<AppState> for SessionUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(session_claims(&parts.headers, state).map(SessionUser::from))
    }
}

/// The signed-in user's profile together with their tours.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub user: UserResponse,
    /// The user's tours with steps, newest first.
    pub tours: Vec<TourWithSteps>,
}

/// Resolve the caller from the session cookie.
///
/// Returns `None` when the cookie is missing or invalid, when the user no
/// longer exists, or when a lookup fails. Lookup failures are logged.
pub async fn resolve_current_user(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let claims = session_claims(headers, state)?;

    let user = match UserRepo::find_by_id(&state.pool, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(user_id = claims.sub, "Session refers to a missing user");
            return None;
        }
        Err(e) => {
            tracing::warn!(user_id = claims.sub, error = %e, "Failed to load session user");
            return None;
        }
    };

    let tours = match TourRepo::list_by_user(&state.pool, user.id).await {
        Ok(tours) => tours,
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Failed to load tours for session user");
            return None;
        }
    };

    Some(CurrentUser {
        user: UserResponse::from(&user),
        tours,
    })
}
