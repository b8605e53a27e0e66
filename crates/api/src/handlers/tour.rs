//! Handlers for the `/api/tours` resource.
//!
//! Every handler except `list_all` requires a session. Ownership mismatches
//! on a specific tour are answered with 404 so that other users' tour ids
//! are not disclosed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use marvedge_core::error::CoreError;
use marvedge_core::tour::{require_title_and_owner, validate_title_update};
use marvedge_core::types::DbId;
use marvedge_db::models::tour::{
    normalize_steps, CreateTour, NewTour, Tour, TourReplacement, TourWithSteps, UpdateTour,
};
use marvedge_db::repositories::TourRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// Response for `DELETE /api/tours/delete-tour/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTourResponse {
    pub message: &'static str,
    pub deleted_tour: Tour,
}

fn tour_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Tour", id })
}

/// Load a tour and confirm the session user owns it.
async fn require_owned(state: &AppState, session: &SessionUser, id: DbId) -> AppResult<Tour> {
    match TourRepo::find_by_id(&state.pool, id).await? {
        Some(tour) if tour.user_id == session.user_id => Ok(tour),
        Some(_) => {
            tracing::info!(user_id = session.user_id, tour_id = id, "Tour access denied");
            Err(tour_not_found(id))
        }
        None => Err(tour_not_found(id)),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/tours/create-tour
pub async fn create(
    State(state): State<AppState>,
    session: SessionUser,
    ApiJson(input): ApiJson<CreateTour>,
) -> AppResult<(StatusCode, Json<TourWithSteps>)> {
    let (title, user_id) = require_title_and_owner(input.title.as_deref(), input.user_id)?;

    if user_id != session.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot create a tour for another user".into(),
        )));
    }

    let new_tour = NewTour {
        title: title.to_string(),
        is_public: input.is_public.unwrap_or(false),
        user_id,
        steps: normalize_steps(input.steps.as_deref().unwrap_or_default()),
    };

    let tour = TourRepo::create(&state.pool, &new_tour).await?;

    tracing::info!(
        user_id,
        tour_id = tour.tour.id,
        step_count = tour.steps.len(),
        "Tour created"
    );

    Ok((StatusCode::CREATED, Json(tour)))
}

/// GET /api/tours/get-tours
///
/// Public tours plus, with a session, the caller's own private tours.
pub async fn list_all(
    State(state): State<AppState>,
    session: Option<SessionUser>,
) -> AppResult<Json<Vec<TourWithSteps>>> {
    let viewer = session.map(|s| s.user_id);
    let tours = TourRepo::list_visible(&state.pool, viewer).await?;
    Ok(Json(tours))
}

/// GET /api/tours/get-tours/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    session: SessionUser,
    ApiPath(user_id): ApiPath<DbId>,
) -> AppResult<Json<Vec<TourWithSteps>>> {
    if user_id != session.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot list another user's tours".into(),
        )));
    }

    let tours = TourRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(tours))
}

/// GET /api/tours/get-tours/{user_id}/{tour_id}
pub async fn get_one(
    State(state): State<AppState>,
    session: SessionUser,
    ApiPath((user_id, tour_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<Json<TourWithSteps>> {
    if user_id != session.user_id {
        return Err(tour_not_found(tour_id));
    }

    let tour = TourRepo::find_owned(&state.pool, tour_id, user_id)
        .await?
        .ok_or_else(|| tour_not_found(tour_id))?;
    Ok(Json(tour))
}

/// PUT /api/tours/update-tour/{id}
///
/// Present scalars overwrite; the step list always replaces the stored set.
pub async fn update(
    State(state): State<AppState>,
    session: SessionUser,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateTour>,
) -> AppResult<Json<TourWithSteps>> {
    validate_title_update(input.title.as_deref())?;
    require_owned(&state, &session, id).await?;

    let replacement = TourReplacement {
        title: input.title,
        is_public: input.is_public,
        steps: normalize_steps(input.steps.as_deref().unwrap_or_default()),
    };

    let tour = TourRepo::replace(&state.pool, id, &replacement)
        .await?
        .ok_or_else(|| tour_not_found(id))?;

    tracing::info!(
        user_id = session.user_id,
        tour_id = id,
        step_count = tour.steps.len(),
        "Tour updated"
    );

    Ok(Json(tour))
}

/// DELETE /api/tours/delete-tour/{id}
pub async fn delete(
    State(state): State<AppState>,
    session: SessionUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DeleteTourResponse>> {
    require_owned(&state, &session, id).await?;

    let deleted = TourRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| tour_not_found(id))?;

    tracing::info!(user_id = session.user_id, tour_id = id, "Tour deleted");

    Ok(Json(DeleteTourResponse {
        message: "Tour deleted successfully",
        deleted_tour: deleted,
    }))
}
