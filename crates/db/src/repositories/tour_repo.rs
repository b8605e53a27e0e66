//! Repository for the `tours` table.
//!
//! Tours are always returned together with their steps. Writes that touch
//! both tables (create, update, delete) run in a single transaction so a
//! failure never leaves a tour with a partial step set.

use marvedge_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::tour::{NewTour, Tour, TourOwner, TourReplacement, TourStep, TourWithSteps};
use crate::repositories::TourStepRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, is_public, user_id, created_at, updated_at";

/// Tour columns qualified for joins against `users`.
const JOINED_COLUMNS: &str = "t.id, t.title, t.is_public, t.user_id, t.created_at, t.updated_at, \
                              u.email AS owner_email";

/// Newest first; id breaks ties between rows created in the same instant.
const NEWEST_FIRST: &str = "ORDER BY t.created_at DESC, t.id DESC";

/// A tour row joined with its owner's email.
#[derive(Debug, FromRow)]
struct TourOwnerRow {
    #[sqlx(flatten)]
    tour: Tour,
    owner_email: String,
}

/// Provides CRUD operations for tours and their step sets.
pub struct TourRepo;

impl TourRepo {
    /// Insert a tour and all of its steps, returning both.
    pub async fn create(pool: &PgPool, input: &NewTour) -> Result<TourWithSteps, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tours (title, is_public, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let tour = sqlx::query_as::<_, Tour>(&query)
            .bind(&input.title)
            .bind(input.is_public)
            .bind(input.user_id)
            .fetch_one(&mut *tx)
            .await?;

        let steps = TourStepRepo::insert_all_inner(&mut tx, tour.id, &input.steps).await?;

        tx.commit().await?;
        Ok(TourWithSteps {
            tour,
            steps,
            user: None,
        })
    }

    /// Find a tour row by ID, without steps.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tours WHERE id = $1");
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tour by ID only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<TourWithSteps>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tours t JOIN users u ON u.id = t.user_id
             WHERE t.id = $1 AND t.user_id = $2"
        );
        let row = sqlx::query_as::<_, TourOwnerRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => {
                let steps = TourStepRepo::list_for_tour(pool, row.tour.id).await?;
                Ok(Some(Self::with_owner(row, steps)))
            }
            None => Ok(None),
        }
    }

    /// List a user's tours with steps, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TourWithSteps>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tours t JOIN users u ON u.id = t.user_id
             WHERE t.user_id = $1 {NEWEST_FIRST}"
        );
        let rows = sqlx::query_as::<_, TourOwnerRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Self::attach_steps(pool, rows).await
    }

    /// List every public tour, plus the private tours of `viewer` if given,
    /// newest first.
    pub async fn list_visible(
        pool: &PgPool,
        viewer: Option<DbId>,
    ) -> Result<Vec<TourWithSteps>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tours t JOIN users u ON u.id = t.user_id
             WHERE t.is_public OR t.user_id = $1 {NEWEST_FIRST}"
        );
        let rows = sqlx::query_as::<_, TourOwnerRow>(&query)
            .bind(viewer)
            .fetch_all(pool)
            .await?;
        Self::attach_steps(pool, rows).await
    }

    /// Replace a tour's scalars (where given) and its entire step set.
    ///
    /// Existing steps are deleted and the new ones inserted in the same
    /// transaction. Returns `None` if no tour with `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &TourReplacement,
    ) -> Result<Option<TourWithSteps>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE tours SET
                title = COALESCE($2, title),
                is_public = COALESCE($3, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let tour = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.is_public)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(tour) = tour else {
            tx.rollback().await?;
            return Ok(None);
        };

        let removed = TourStepRepo::delete_for_tour_inner(&mut tx, tour.id).await?;
        let steps = TourStepRepo::insert_all_inner(&mut tx, tour.id, &input.steps).await?;
        tracing::debug!(
            tour_id = tour.id,
            removed,
            inserted = steps.len(),
            "Replaced tour steps"
        );

        tx.commit().await?;
        Ok(Some(TourWithSteps {
            tour,
            steps,
            user: None,
        }))
    }

    /// Delete a tour's steps, then the tour. Returns the deleted tour row, or
    /// `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        TourStepRepo::delete_for_tour_inner(&mut tx, id).await?;

        let query = format!("DELETE FROM tours WHERE id = $1 RETURNING {COLUMNS}");
        let tour = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(tour)
    }

    fn with_owner(row: TourOwnerRow, steps: Vec<TourStep>) -> TourWithSteps {
        let owner = TourOwner {
            id: row.tour.user_id,
            email: row.owner_email,
        };
        TourWithSteps {
            tour: row.tour,
            steps,
            user: Some(owner),
        }
    }

    async fn attach_steps(
        pool: &PgPool,
        rows: Vec<TourOwnerRow>,
    ) -> Result<Vec<TourWithSteps>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.tour.id).collect();
        let mut steps_by_tour = TourStepRepo::list_for_tours(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let steps = steps_by_tour.remove(&row.tour.id).unwrap_or_default();
                Self::with_owner(row, steps)
            })
            .collect())
    }
}
