use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report, ReportChanges};

use super::ReportStore;

/// `reports` table backed by PostgreSQL
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, data: &NewReport) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (user_id, title, description, image_path, latitude, longitude, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, user_id, title, description, image_path,
                latitude, longitude, status, vote_count,
                created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.image_path.as_deref())
        .bind(data.location.map(|p| p.latitude))
        .bind(data.location.map(|p| p.longitude))
        .bind(data.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db("create report", e))?;

        tracing::info!("Created report: {} for user: {}", report.id, report.user_id);

        Ok(report)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, user_id, title, description, image_path,
                latitude, longitude, status, vote_count,
                created_at, updated_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db("get report", e))
    }

    async fn update(&self, id: i64, changes: &ReportChanges) -> Result<Option<Report>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db("begin report update", e))?;

        // Row lock serializes concurrent updates of the same report
        let current = sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, user_id, title, description, image_path,
                latitude, longitude, status, vote_count,
                created_at, updated_at
            FROM reports
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_db("lock report", e))?;

        let Some(mut report) = current else {
            return Ok(None);
        };
        report.apply(changes, Utc::now());

        let report = sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports
            SET title = $2, description = $3, image_path = $4,
                latitude = $5, longitude = $6, status = $7, vote_count = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, user_id, title, description, image_path,
                latitude, longitude, status, vote_count,
                created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&report.title)
        .bind(&report.description)
        .bind(report.image_path.as_deref())
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(report.status.as_str())
        .bind(report.vote_count)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db("update report", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db("commit report update", e))?;

        tracing::info!("Updated report: {} (status: {})", id, report.status);
        Ok(Some(report))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db("delete report", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, user_id, title, description, image_path,
                latitude, longitude, status, vote_count,
                created_at, updated_at
            FROM reports
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db("list reports", e))
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db("count reports", e))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, user_id, title, description, image_path,
                latitude, longitude, status, vote_count,
                created_at, updated_at
            FROM reports
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db("list reports by user", e))
    }
}
