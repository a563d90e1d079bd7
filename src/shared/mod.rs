pub mod constants;
pub mod serde_helpers;
pub mod types;
