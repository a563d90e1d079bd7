use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reports::models::{NewReport, Report, ReportChanges};

mod postgres;
mod reference;

pub use postgres::PgReportStore;
pub use reference::ReferenceReportStore;

/// Storage backend for reports.
///
/// Every method is one unit of work: a single statement or a single
/// transaction. Constraint checks on input happen before the store is called.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert a report, assigning a fresh id and a zero vote count
    async fn insert(&self, report: &NewReport) -> Result<Report>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>>;

    /// Apply `changes` to the report with `id` atomically, `None` if absent.
    /// Concurrent updates of the same id are serialized.
    async fn update(&self, id: i64, changes: &ReportChanges) -> Result<Option<Report>>;

    /// Remove a report; `false` if it did not exist
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Reports ordered by id
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Report>>;

    async fn count(&self) -> Result<i64>;

    /// All reports owned by `user_id`, ordered by id
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Report>>;
}
