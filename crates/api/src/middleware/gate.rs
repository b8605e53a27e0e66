//! Route gate applied to page requests.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use marvedge_core::gate::{decide, GateDecision};

use crate::middleware::session::session_claims;
use crate::state::AppState;

/// Redirect page requests according to [`marvedge_core::gate::decide`].
///
/// An invalid or expired token counts as no session. Redirects are
/// `307 Temporary Redirect`.
pub async fn route_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authenticated = session_claims(request.headers(), &state).is_some();

    match decide(request.uri().path(), authenticated) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), target, authenticated, "Route gate redirect");
            Redirect::temporary(target).into_response()
        }
    }
}
