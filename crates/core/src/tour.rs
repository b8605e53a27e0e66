//! Input rules for tours and their steps.

use crate::error::CoreError;
use crate::types::DbId;

/// Message returned when a tour is submitted without a title or owner.
pub const TITLE_AND_OWNER_REQUIRED: &str = "Title and userId are required";

/// Check the required fields of a new tour.
///
/// Both the title and the owning user id must be present; a title made only
/// of whitespace counts as absent. Returns the validated pair.
pub fn require_title_and_owner(
    title: Option<&str>,
    user_id: Option<DbId>,
) -> Result<(&str, DbId), CoreError> {
    match (title, user_id) {
        (Some(title), Some(user_id)) if !title.trim().is_empty() => Ok((title, user_id)),
        _ => Err(CoreError::Validation(TITLE_AND_OWNER_REQUIRED.to_string())),
    }
}

/// Check an optional replacement title. Absent is fine, blank is not.
pub fn validate_title_update(title: Option<&str>) -> Result<(), CoreError> {
    match title {
        Some(t) if t.trim().is_empty() => {
            Err(CoreError::Validation("Title must not be empty".to_string()))
        }
        _ => Ok(()),
    }
}

/// Display order for the step at `index` in a submitted list.
///
/// An explicit order wins; otherwise the 1-based position is used. Orders
/// are neither unique nor contiguous.
pub fn resolve_step_order(submitted: Option<i32>, index: usize) -> i32 {
    submitted.unwrap_or_else(|| i32::try_from(index + 1).unwrap_or(i32::MAX))
}
