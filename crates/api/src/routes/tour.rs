//! Route definitions for the `/tours` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::tour;
use crate::state::AppState;

/// Routes mounted at `/api/tours`.
///
/// ```text
/// POST   /create-tour                      -> create
/// GET    /get-tours                        -> list_all
/// GET    /get-tours/{user_id}              -> list_by_user
/// GET    /get-tours/{user_id}/{tour_id}    -> get_one
/// PUT    /update-tour/{id}                 -> update
/// DELETE /delete-tour/{id}                 -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-tour", post(tour::create))
        .route("/get-tours", get(tour::list_all))
        .route("/get-tours/{user_id}", get(tour::list_by_user))
        .route("/get-tours/{user_id}/{tour_id}", get(tour::get_one))
        .route("/update-tour/{id}", put(tour::update))
        .route("/delete-tour/{id}", delete(tour::delete))
}
