//! Data model for the tracked API lifecycle state

pub mod problem;
pub mod registry;

pub use problem::Problem;
pub use registry::{ApiCategory, ApiEntry, PackageRecord, Registry};
