//! Repository for the `tour_steps` table.
//!
//! Steps are only ever written as a whole set inside the owning tour's
//! transaction, so the write helpers take a transaction rather than a pool.

use std::collections::HashMap;

use marvedge_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::tour::{NewTourStep, TourStep};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tour_id, title, description, media_url, sort_order, tags, \
                       duration, interactive, created_at";

/// Display ordering: explicit order first, insertion position breaks ties.
const ORDER_BY: &str = "ORDER BY sort_order, id";

/// Provides reads and set-replacement writes for tour steps.
pub struct TourStepRepo;

impl TourStepRepo {
    /// List the steps of one tour in display order.
    pub async fn list_for_tour(pool: &PgPool, tour_id: DbId) -> Result<Vec<TourStep>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tour_steps WHERE tour_id = $1 {ORDER_BY}");
        sqlx::query_as::<_, TourStep>(&query)
            .bind(tour_id)
            .fetch_all(pool)
            .await
    }

    /// Load the steps of many tours in one query, grouped by tour id.
    ///
    /// Each group is in display order. Tours without steps are absent from
    /// the map.
    pub async fn list_for_tours(
        pool: &PgPool,
        tour_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TourStep>>, sqlx::Error> {
        if tour_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM tour_steps WHERE tour_id = ANY($1) \
             ORDER BY tour_id, sort_order, id"
        );
        let steps = sqlx::query_as::<_, TourStep>(&query)
            .bind(tour_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<TourStep>> = HashMap::new();
        for step in steps {
            grouped.entry(step.tour_id).or_default().push(step);
        }
        Ok(grouped)
    }

    /// Count steps referencing a tour id, whether or not the tour exists.
    pub async fn count_for_tour(pool: &PgPool, tour_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tour_steps WHERE tour_id = $1")
            .bind(tour_id)
            .fetch_one(pool)
            .await
    }

    /// Insert `steps` for `tour_id`, returning the rows in display order.
    pub(crate) async fn insert_all_inner(
        tx: &mut Transaction<'_, Postgres>,
        tour_id: DbId,
        steps: &[NewTourStep],
    ) -> Result<Vec<TourStep>, sqlx::Error> {
        let query = format!(
            "INSERT INTO tour_steps
                (tour_id, title, description, media_url, sort_order, tags, duration, interactive)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(steps.len());
        for step in steps {
            let row = sqlx::query_as::<_, TourStep>(&query)
                .bind(tour_id)
                .bind(&step.title)
                .bind(&step.description)
                .bind(&step.media_url)
                .bind(step.sort_order)
                .bind(&step.tags)
                .bind(step.duration)
                .bind(&step.interactive)
                .fetch_one(&mut **tx)
                .await?;
            inserted.push(row);
        }

        // Stable sort keeps insertion order among equal orders, matching ORDER_BY.
        inserted.sort_by_key(|s| s.sort_order);
        Ok(inserted)
    }

    /// Delete every step of `tour_id`. Returns the number removed.
    pub(crate) async fn delete_for_tour_inner(
        tx: &mut Transaction<'_, Postgres>,
        tour_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tour_steps WHERE tour_id = $1")
            .bind(tour_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
