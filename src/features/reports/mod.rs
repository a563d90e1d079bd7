//! Citizen-submitted reports.
//!
//! A report describes an issue at an optional geographic location and is
//! owned by exactly one user. The owner is referenced by id only; resolving it
//! is an explicit [`ReportService::get_owner`] call through the
//! [`UserDirectory`](crate::features::users::UserDirectory) seam.
//!
//! ## Operations
//!
//! | Operation | Fails with |
//! |-----------|------------|
//! | `create` | `Validation` (bad input, unknown user) |
//! | `get_by_id` | `NotFound` |
//! | `update` | `NotFound`, `Validation`, `Constraint` (negative votes) |
//! | `delete` | `NotFound` |
//! | `get_owner` | `NotFound` (report or user) |
//! | `list` / `list_by_user` | `NotFound` (unknown user) |

pub mod dtos;
pub mod models;
pub mod repository;
pub mod services;

pub use repository::{PgReportStore, ReferenceReportStore, ReportStore};
pub use services::ReportService;
