use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::shared::constants::MAX_STATUS_LENGTH;

/// Lifecycle label of a report.
///
/// The set of labels and the transitions between them belong to whoever runs
/// the report workflow, so this only guarantees a short, non-blank value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct ReportStatus(String);

impl ReportStatus {
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err("status must not be blank".to_string());
        }
        if value.chars().count() > MAX_STATUS_LENGTH {
            return Err(format!(
                "status must not exceed {} characters",
                MAX_STATUS_LENGTH
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReportStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        status.0
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {} is outside [-90, 90]", latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {} is outside [-180, 180]", longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Database model for report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ReportStatus,
    pub vote_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Coordinates of the report, if it was filed with a location
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Apply a validated change set in place and bump `updated_at`.
    ///
    /// `id`, `user_id` and `created_at` are not reachable from `ReportChanges`.
    pub fn apply(&mut self, changes: &ReportChanges, now: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(image_path) = &changes.image_path {
            self.image_path = image_path.clone();
        }
        if let Some(location) = changes.location {
            self.latitude = location.map(|p| p.latitude);
            self.longitude = location.map(|p| p.longitude);
        }
        if let Some(status) = &changes.status {
            self.status = status.clone();
        }
        if let Some(vote_count) = changes.vote_count {
            self.vote_count = vote_count;
        }
        self.updated_at = now;
    }
}

/// Data for inserting a new report. `vote_count` always starts at zero.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub location: Option<GeoPoint>,
    pub status: ReportStatus,
}

/// Validated partial update.
///
/// Outer `None` leaves the column untouched; for nullable columns
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ReportChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<Option<String>>,
    pub location: Option<Option<GeoPoint>>,
    pub status: Option<ReportStatus>,
    pub vote_count: Option<i32>,
}

impl ReportChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_path.is_none()
            && self.location.is_none()
            && self.status.is_none()
            && self.vote_count.is_none()
    }
}
