use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{GeoPoint, NewReport, ReportChanges, ReportStatus};
use crate::shared::constants::{
    MAX_DESCRIPTION_LENGTH, MAX_IMAGE_PATH_LENGTH, MAX_TITLE_LENGTH,
};
use crate::shared::serde_helpers::double_option;

/// Input for filing a new report.
///
/// Lists exactly the fields a submitter may set; `id`, `vote_count` and the
/// timestamps are owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_create_report"))]
pub struct CreateReportDto {
    pub user_id: i64,

    pub title: String,

    pub description: String,

    pub image_path: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within [-90, 90]"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within [-180, 180]"))]
    pub longitude: Option<f64>,

    /// Initial status; the configured default applies when omitted
    pub status: Option<String>,
}

/// Partial update of a report.
///
/// Omitted fields are left as they are. `image_path`, `latitude` and
/// `longitude` accept an explicit `null` to clear the stored value; the two
/// coordinates must be set or cleared together.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_report"))]
pub struct UpdateReportDto {
    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub image_path: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub latitude: Option<Option<f64>>,

    #[serde(default, deserialize_with = "double_option")]
    pub longitude: Option<Option<f64>>,

    pub status: Option<String>,

    pub vote_count: Option<i32>,
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// Non-blank and at most `max` characters
fn check_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", format!("{} must not be blank", field)));
    }
    if value.chars().count() > max {
        return Err(invalid(
            "length",
            format!("{} must be 1-{} characters", field, max),
        ));
    }
    Ok(())
}

fn check_status(value: &str) -> std::result::Result<(), ValidationError> {
    ReportStatus::new(value)
        .map(|_| ())
        .map_err(|e| invalid("status", e))
}

fn validate_create_report(dto: &CreateReportDto) -> std::result::Result<(), ValidationError> {
    check_text("title", &dto.title, MAX_TITLE_LENGTH)?;
    check_text("description", &dto.description, MAX_DESCRIPTION_LENGTH)?;
    if let Some(image_path) = &dto.image_path {
        check_text("image_path", image_path, MAX_IMAGE_PATH_LENGTH)?;
    }
    if dto.latitude.is_some() != dto.longitude.is_some() {
        return Err(invalid(
            "location_pair",
            "latitude and longitude must be supplied together".to_string(),
        ));
    }
    if let Some(status) = &dto.status {
        check_status(status)?;
    }
    Ok(())
}

fn validate_update_report(dto: &UpdateReportDto) -> std::result::Result<(), ValidationError> {
    if let Some(title) = &dto.title {
        check_text("title", title, MAX_TITLE_LENGTH)?;
    }
    if let Some(description) = &dto.description {
        check_text("description", description, MAX_DESCRIPTION_LENGTH)?;
    }
    if let Some(Some(image_path)) = &dto.image_path {
        check_text("image_path", image_path, MAX_IMAGE_PATH_LENGTH)?;
    }
    if let Some(status) = &dto.status {
        check_status(status)?;
    }

    match (dto.latitude, dto.longitude) {
        (None, None) | (Some(None), Some(None)) => {}
        (Some(Some(latitude)), Some(Some(longitude))) => {
            GeoPoint::new(latitude, longitude).map_err(|e| invalid("location", e))?;
        }
        _ => {
            return Err(invalid(
                "location_pair",
                "latitude and longitude must be set or cleared together".to_string(),
            ))
        }
    }
    Ok(())
}

impl CreateReportDto {
    /// Validate and turn the request into an insertable record
    pub fn into_new_report(self, default_status: &ReportStatus) -> Result<NewReport> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let location = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                Some(GeoPoint::new(latitude, longitude).map_err(AppError::Validation)?)
            }
            _ => None,
        };
        let status = match self.status {
            Some(status) => ReportStatus::new(status).map_err(AppError::Validation)?,
            None => default_status.clone(),
        };

        Ok(NewReport {
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            image_path: self.image_path,
            location,
            status,
        })
    }
}

impl UpdateReportDto {
    /// Validate and turn the request into a change set.
    ///
    /// A negative `vote_count` is reported as a constraint violation rather
    /// than a malformed field.
    pub fn into_changes(self) -> Result<ReportChanges> {
        if let Some(vote_count) = self.vote_count {
            if vote_count < 0 {
                return Err(AppError::Constraint(format!(
                    "vote_count must not be negative (got {})",
                    vote_count
                )));
            }
        }

        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let location = match (self.latitude, self.longitude) {
            (Some(Some(latitude)), Some(Some(longitude))) => Some(Some(
                GeoPoint::new(latitude, longitude).map_err(AppError::Validation)?,
            )),
            (Some(None), Some(None)) => Some(None),
            _ => None,
        };
        let status = self
            .status
            .map(ReportStatus::new)
            .transpose()
            .map_err(AppError::Validation)?;

        Ok(ReportChanges {
            title: self.title,
            description: self.description,
            image_path: self.image_path,
            location,
            status,
            vote_count: self.vote_count,
        })
    }
}
