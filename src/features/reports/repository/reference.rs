use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::core::error::Result;
use crate::features::reports::models::{NewReport, Report, ReportChanges};

use super::ReportStore;

/// In-memory report store.
///
/// Ids come from a counter that never rewinds, so deleted ids are not reused.
/// A single lock guards all state, which serializes every operation.
#[derive(Debug, Default)]
pub struct ReferenceReportStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    reports: BTreeMap<i64, Report>,
}

impl ReferenceReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for ReferenceReportStore {
    async fn insert(&self, data: &NewReport) -> Result<Report> {
        let mut state = self.state.lock().await;
        state.last_id += 1;

        let now = Utc::now();
        let report = Report {
            id: state.last_id,
            user_id: data.user_id,
            title: data.title.clone(),
            description: data.description.clone(),
            image_path: data.image_path.clone(),
            latitude: data.location.map(|p| p.latitude),
            longitude: data.location.map(|p| p.longitude),
            status: data.status.clone(),
            vote_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.reports.insert(report.id, report.clone());

        tracing::debug!("Created report: {} for user: {}", report.id, report.user_id);
        Ok(report)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        Ok(self.state.lock().await.reports.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &ReportChanges) -> Result<Option<Report>> {
        let mut state = self.state.lock().await;
        Ok(state.reports.get_mut(&id).map(|report| {
            report.apply(changes, Utc::now());
            report.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.state.lock().await.reports.remove(&id).is_some())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Report>> {
        let state = self.state.lock().await;
        Ok(state
            .reports
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.state.lock().await.reports.len() as i64)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Report>> {
        let state = self.state.lock().await;
        Ok(state
            .reports
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;

    fn new_report(user_id: i64, title: &str) -> NewReport {
        NewReport {
            user_id,
            title: title.to_string(),
            description: "details".to_string(),
            image_path: None,
            location: None,
            status: ReportStatus::new("pending").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = ReferenceReportStore::new();
        let first = store.insert(&new_report(1, "a")).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());

        let second = store.insert(&new_report(1, "b")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let store = ReferenceReportStore::new();
        for i in 0..5 {
            store
                .insert(&new_report(1, &format!("report {}", i)))
                .await
                .unwrap();
        }

        let page = store.list(2, 2).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = ReferenceReportStore::new();
        let changes = ReportChanges {
            vote_count: Some(1),
            ..Default::default()
        };
        assert_eq!(store.update(42, &changes).await.unwrap(), None);
    }
}
