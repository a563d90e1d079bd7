/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// REPORT FIELD LIMITS
// =============================================================================

pub const MAX_TITLE_LENGTH: usize = 255;

pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

pub const MAX_IMAGE_PATH_LENGTH: usize = 2048;

pub const MAX_STATUS_LENGTH: usize = 50;
