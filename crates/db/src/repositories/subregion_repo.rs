//! Repository for the `subregions` and `points` tables.
//!
//! A subregion and its polygon points are created together in one
//! transaction; points carry an explicit order column and are returned
//! ordered. The schema cascades point deletion, so removing a subregion
//! is a single statement.

use sqlx::{FromRow, PgPool};

use lungmap_core::types::{DbId, Timestamp};

use crate::models::subregion::{
    AnatomySubregionCount, CreateSubregion, ImageSetSubregionCount, Point, Subregion,
    SubregionDetail,
};

/// Joined subregion + anatomy row used to assemble details.
#[derive(Debug, FromRow)]
struct SubregionRow {
    id: DbId,
    image_id: DbId,
    anatomy_id: DbId,
    created_at: Timestamp,
    anatomy_name: String,
}

impl SubregionRow {
    fn into_detail(self, points: Vec<Point>) -> SubregionDetail {
        SubregionDetail {
            subregion: Subregion {
                id: self.id,
                image_id: self.image_id,
                anatomy_id: self.anatomy_id,
                created_at: self.created_at,
            },
            anatomy_name: self.anatomy_name,
            points,
        }
    }
}

const ROW_QUERY: &str = "SELECT s.id, s.image_id, s.anatomy_id, s.created_at, \
    a.name AS anatomy_name FROM subregions s JOIN anatomy a ON a.id = s.anatomy_id";

/// Provides operations for subregion annotations.
pub struct SubregionRepo;

impl SubregionRepo {
    /// Create a subregion and its ordered points in one transaction.
    ///
    /// Point order is assigned from list position. Degenerate polygons
    /// (any point count) are accepted; validation happens upstream.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubregion,
    ) -> Result<SubregionDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let subregion = sqlx::query_as::<_, Subregion>(
            "INSERT INTO subregions (image_id, anatomy_id)
             VALUES ($1, $2)
             RETURNING id, image_id, anatomy_id, created_at",
        )
        .bind(input.image_id)
        .bind(input.anatomy_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut points = Vec::with_capacity(input.points.len());
        for (order, p) in input.points.iter().enumerate() {
            let point = sqlx::query_as::<_, Point>(
                "INSERT INTO points (subregion_id, x, y, point_order)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, subregion_id, x, y, point_order",
            )
            .bind(subregion.id)
            .bind(p.x)
            .bind(p.y)
            .bind(order as i32)
            .fetch_one(&mut *tx)
            .await?;
            points.push(point);
        }

        let anatomy_name: (String,) = sqlx::query_as("SELECT name FROM anatomy WHERE id = $1")
            .bind(input.anatomy_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(SubregionDetail {
            subregion,
            anatomy_name: anatomy_name.0,
            points,
        })
    }

    /// Find a subregion with its anatomy label and ordered points.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubregionDetail>, sqlx::Error> {
        let query = format!("{ROW_QUERY} WHERE s.id = $1");
        let Some(row) = sqlx::query_as::<_, SubregionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let points = Self::points_for(pool, row.id).await?;
        Ok(Some(row.into_detail(points)))
    }

    /// List all subregion details, newest first.
    pub async fn list_details(pool: &PgPool) -> Result<Vec<SubregionDetail>, sqlx::Error> {
        let query = format!("{ROW_QUERY} ORDER BY s.created_at DESC");
        let rows = sqlx::query_as::<_, SubregionRow>(&query)
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// List the subregion details drawn on one image.
    pub async fn list_details_by_image(
        pool: &PgPool,
        image_id: DbId,
    ) -> Result<Vec<SubregionDetail>, sqlx::Error> {
        let query = format!("{ROW_QUERY} WHERE s.image_id = $1 ORDER BY s.id ASC");
        let rows = sqlx::query_as::<_, SubregionRow>(&query)
            .bind(image_id)
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Delete a subregion. Its points go with it (FK cascade).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subregions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count annotated subregions per image set.
    pub async fn count_by_image_set(
        pool: &PgPool,
    ) -> Result<Vec<ImageSetSubregionCount>, sqlx::Error> {
        sqlx::query_as::<_, ImageSetSubregionCount>(
            "SELECT iset.id AS image_set_id, iset.name AS image_set_name,
                    COUNT(s.id) AS subregion_count
             FROM image_sets iset
             LEFT JOIN images i ON i.image_set_id = iset.id
             LEFT JOIN subregions s ON s.image_id = i.id
             GROUP BY iset.id, iset.name
             ORDER BY iset.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Count annotated subregions per anatomy term.
    pub async fn count_by_anatomy(
        pool: &PgPool,
    ) -> Result<Vec<AnatomySubregionCount>, sqlx::Error> {
        sqlx::query_as::<_, AnatomySubregionCount>(
            "SELECT a.id AS anatomy_id, a.name AS anatomy_name,
                    COUNT(s.id) AS subregion_count
             FROM anatomy a
             JOIN subregions s ON s.anatomy_id = a.id
             GROUP BY a.id, a.name
             ORDER BY a.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Ordered points for one subregion. Order column first, row id as
    /// tie-break for duplicated orders.
    async fn points_for(pool: &PgPool, subregion_id: DbId) -> Result<Vec<Point>, sqlx::Error> {
        sqlx::query_as::<_, Point>(
            "SELECT id, subregion_id, x, y, point_order
             FROM points
             WHERE subregion_id = $1
             ORDER BY point_order ASC, id ASC",
        )
        .bind(subregion_id)
        .fetch_all(pool)
        .await
    }

    async fn assemble(
        pool: &PgPool,
        rows: Vec<SubregionRow>,
    ) -> Result<Vec<SubregionDetail>, sqlx::Error> {
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            let points = Self::points_for(pool, row.id).await?;
            details.push(row.into_detail(points));
        }
        Ok(details)
    }
}
