mod report;

pub use report::{GeoPoint, NewReport, Report, ReportChanges, ReportStatus};
