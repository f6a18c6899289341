//! Consistency problems found while reconciling tracked state against a
//! discovered API surface
//!
//! Problems are accumulated into a plain ordered list and reported
//! together at the end of a run; they never abort the walk that found
//! them. Presentation (console lines, exit codes) is the CLI's concern.

use super::registry::ApiCategory;
use crate::version::VersionField;
use std::fmt;

/// One consistency problem, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Entry present in the discovered document but not tracked
    Untracked {
        package: String,
        name: String,
        category: ApiCategory,
    },

    /// Tracked entry missing a required lifecycle field
    MissingVersionField {
        package: String,
        name: String,
        field: VersionField,
    },

    /// Entry tracked as preview and stable at the same time
    DualTracked { package: String, name: String },

    /// Promotion candidate that never went through preview
    NotInPreview { package: String, name: String },

    /// Entry discovered under a different category than it is tracked in
    CategoryMoved {
        package: String,
        name: String,
        tracked: ApiCategory,
        discovered: ApiCategory,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Untracked {
                package,
                name,
                category,
            } => {
                write!(f, "not tracked ({}): {} {}", category.label(), package, name)
            }
            Problem::MissingVersionField {
                package,
                name,
                field,
            } => {
                write!(f, "no {} set: {} {}", field, package, name)
            }
            Problem::DualTracked { package, name } => {
                write!(
                    f,
                    "bad state: {}:{} found in both preview and stable",
                    package, name
                )
            }
            Problem::NotInPreview { package, name } => {
                write!(f, "api not found in preview: {}:{}", package, name)
            }
            Problem::CategoryMoved {
                package,
                name,
                tracked,
                discovered,
            } => {
                write!(
                    f,
                    "category changed without promotion: {}:{} tracked as {} but discovered as {}",
                    package,
                    name,
                    tracked.label(),
                    discovered.label()
                )
            }
        }
    }
}
