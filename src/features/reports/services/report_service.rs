use std::sync::Arc;

use crate::core::config::ReportsConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{CreateReportDto, UpdateReportDto};
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reports::repository::ReportStore;
use crate::features::users::{User, UserDirectory};
use crate::shared::types::{Page, PaginationQuery};

/// Service for report operations
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    users: Arc<dyn UserDirectory>,
    default_status: ReportStatus,
}

impl ReportService {
    pub fn new(
        store: Arc<dyn ReportStore>,
        users: Arc<dyn UserDirectory>,
        config: &ReportsConfig,
    ) -> Result<Self> {
        let default_status = ReportStatus::new(config.default_status.as_str())
            .map_err(|e| AppError::Internal(format!("Invalid default report status: {}", e)))?;

        Ok(Self {
            store,
            users,
            default_status,
        })
    }

    /// File a new report for an existing user
    pub async fn create(&self, dto: CreateReportDto) -> Result<Report> {
        let data = dto.into_new_report(&self.default_status)?;

        if self.users.get_user_by_id(data.user_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "User {} does not exist",
                data.user_id
            )));
        }

        self.store.insert(&data).await
    }

    /// Get report by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Report> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Apply the supplied fields; the owner and id never change
    pub async fn update(&self, id: i64, dto: UpdateReportDto) -> Result<Report> {
        let changes = dto.into_changes()?;

        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        self.store
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tracing::info!("Deleted report: {}", id);
        Ok(())
    }

    /// Resolve the user that filed the report
    pub async fn get_owner(&self, report_id: i64) -> Result<User> {
        let report = self.get_by_id(report_id).await?;

        self.users
            .get_user_by_id(report.user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    "Report {} references missing user {}",
                    report.id,
                    report.user_id
                );
                AppError::NotFound(format!(
                    "Owner {} of report {} not found",
                    report.user_id, report.id
                ))
            })
    }

    /// List reports page by page, ordered by id
    pub async fn list(&self, query: &PaginationQuery) -> Result<Page<Report>> {
        let items = self.store.list(query.limit(), query.offset()).await?;
        let total = self.store.count().await?;
        Ok(Page::new(items, query, total))
    }

    /// List every report filed by a user
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Report>> {
        if self.users.get_user_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        self.store.list_by_user(user_id).await
    }
}
