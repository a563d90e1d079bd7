//! Typed persistence for citizen reports and their owning users.

pub mod core;
pub mod features;
pub mod shared;

pub use crate::core::error::{AppError, Result};
