//! `GET /health`, mounted outside `/api` and the session cookie's concerns.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Ok,
    /// The server is up but PostgreSQL did not answer.
    Degraded,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: Health,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthReport {
    fn from_db_check(check: Result<(), sqlx::Error>) -> Self {
        let db_healthy = match check {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Health check: database unreachable");
                false
            }
        };
        Self {
            status: if db_healthy { Health::Ok } else { Health::Degraded },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.status {
            Health::Ok => StatusCode::OK,
            Health::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::from_db_check(marvedge_db::health_check(&state.pool).await);
    (report.status_code(), Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_degrades_to_503() {
        let report = HealthReport::from_db_check(Err(sqlx::Error::PoolTimedOut));
        assert_eq!(report.status, Health::Degraded);
        assert!(!report.db_healthy);
        assert_eq!(report.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["dbHealthy"], false);
    }

    #[test]
    fn reachable_database_is_ok() {
        let report = HealthReport::from_db_check(Ok(()));
        assert_eq!(report.status_code(), StatusCode::OK);
        assert_eq!(serde_json::to_value(&report).unwrap()["status"], "ok");
    }
}
