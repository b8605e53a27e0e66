//! Tour and tour-step models and DTOs.
//!
//! Wire names are camelCase; the step's `sort_order` column is exposed as
//! `order`.

use marvedge_core::tour::resolve_step_order;
use marvedge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A tour row from the `tours` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: DbId,
    pub title: String,
    pub is_public: bool,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A step row from the `tour_steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStep {
    pub id: DbId,
    pub tour_id: DbId,
    pub title: String,
    pub description: String,
    pub media_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub tags: Vec<String>,
    pub duration: Option<i32>,
    pub interactive: Value,
    pub created_at: Timestamp,
}

/// Minimal owner info attached to listed tours.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TourOwner {
    pub id: DbId,
    pub email: String,
}

/// A tour enriched with its ordered steps and, for listings, its owner.
#[derive(Debug, Clone, Serialize)]
pub struct TourWithSteps {
    #[serde(flatten)]
    pub tour: Tour,
    pub steps: Vec<TourStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<TourOwner>,
}

/// One step as submitted by the editor.
///
/// Only `title` is required. Extra fields the editor keeps locally
/// (`id`, `tourId`, `createdAt`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourStep {
    pub title: String,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub order: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub duration: Option<i32>,
    pub interactive: Option<Value>,
}

impl CreateTourStep {
    /// Fill defaults for the step at `index` of the submitted list.
    pub fn normalize(&self, index: usize) -> NewTourStep {
        NewTourStep {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            media_url: self.media_url.clone(),
            sort_order: resolve_step_order(self.order, index),
            tags: self.tags.clone().unwrap_or_default(),
            duration: self.duration,
            interactive: match &self.interactive {
                Some(Value::Null) | None => Value::Object(Default::default()),
                Some(v) => v.clone(),
            },
        }
    }
}

/// Normalize a submitted step list, assigning positional orders.
pub fn normalize_steps(steps: &[CreateTourStep]) -> Vec<NewTourStep> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| step.normalize(index))
        .collect()
}

/// Request body for creating a tour. Required fields are checked by the
/// handler so a missing one is a validation error, not a decode error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTour {
    pub title: Option<String>,
    pub is_public: Option<bool>,
    pub user_id: Option<DbId>,
    pub steps: Option<Vec<CreateTourStep>>,
}

/// Request body for updating a tour.
///
/// Absent scalars are left unchanged. The step list always replaces the
/// existing steps; an absent list means no steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTour {
    pub title: Option<String>,
    pub is_public: Option<bool>,
    pub steps: Option<Vec<CreateTourStep>>,
}

/// A step ready for insertion, defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTourStep {
    pub title: String,
    pub description: String,
    pub media_url: Option<String>,
    pub sort_order: i32,
    pub tags: Vec<String>,
    pub duration: Option<i32>,
    pub interactive: Value,
}

/// A validated tour ready for insertion.
#[derive(Debug, Clone)]
pub struct NewTour {
    pub title: String,
    pub is_public: bool,
    pub user_id: DbId,
    pub steps: Vec<NewTourStep>,
}

/// A validated tour replacement.
#[derive(Debug, Clone)]
pub struct TourReplacement {
    pub title: Option<String>,
    pub is_public: Option<bool>,
    pub steps: Vec<NewTourStep>,
}
