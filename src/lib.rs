// Apitrack - API stability lifecycle tracker
// Tracks when preview APIs become stable and when deprecated APIs are to be removed

pub mod cli;
pub mod engine;
pub mod models;
pub mod render;
pub mod version;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{ApiCategory, ApiEntry, PackageRecord, Problem, Registry};
pub use version::{VersionError, VersionField, VersionSet};
