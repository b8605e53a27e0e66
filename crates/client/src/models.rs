//! Wire types exchanged with the API.

use chrono::{DateTime, Utc};
use marvedge_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Public user projection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Owner info attached to listed tours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TourOwner {
    pub id: DbId,
    pub email: String,
}

/// A stored step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: DbId,
    pub tour_id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub media_url: Option<String>,
    pub order: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub duration: Option<i32>,
    #[serde(default)]
    pub interactive: Value,
    pub created_at: DateTime<Utc>,
}

/// A stored tour row without steps, as returned by delete.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSummary {
    pub id: DbId,
    pub title: String,
    pub is_public: bool,
    pub user_id: DbId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored tour with its ordered steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: DbId,
    pub title: String,
    pub is_public: bool,
    pub user_id: DbId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub user: Option<TourOwner>,
}

/// Body of `GET /api/auth/get-user`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub user: User,
    pub tours: Vec<Tour>,
}

/// Body of signup and login responses.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
}

/// Body of `DELETE /api/tours/delete-tour/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTourResponse {
    pub message: String,
    pub deleted_tour: TourSummary,
}

/// One step as sent to create or update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInput {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub order: i32,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub interactive: Value,
}

/// Body of `POST /api/tours/create-tour`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourRequest {
    pub title: String,
    pub is_public: bool,
    pub user_id: DbId,
    pub steps: Vec<StepInput>,
}

/// Body of `PUT /api/tours/update-tour/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTourRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    pub steps: Vec<StepInput>,
}

/// Error envelope returned by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
