//! Placeholder version resolution
//!
//! Walks the tracked registry and rewrites `$…` placeholder versions to
//! the concrete values supplied by the caller. A placeholder with no
//! concrete replacement is fatal for the pass; nothing should be
//! persisted when that happens.

use crate::models::{ApiEntry, Registry};
use crate::version::{is_placeholder, VersionError, VersionField, VersionSet};

/// One field rewritten by a resolution pass
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedFix {
    pub package: String,
    pub name: String,
    pub field: VersionField,
    pub value: String,
}

/// What a resolution pass did, for the caller to report
#[derive(Debug, Default)]
pub struct ResolutionReport {
    pub updated: Vec<AppliedFix>,
    /// Entries rejected by the caller's filter: skipped, not resolved
    pub skipped: Vec<(String, String)>,
}

/// Replace placeholder versions across the registry.
///
/// `filter` restricts the pass to entries it accepts, judged on the
/// (package, name) pair; everything else is recorded as skipped.
pub fn fix_versions<F>(
    registry: &mut Registry,
    values: &VersionSet,
    filter: F,
) -> Result<ResolutionReport, VersionError>
where
    F: Fn(&str, &str) -> bool,
{
    let mut report = ResolutionReport::default();
    for (pkg, record) in &mut registry.packages {
        if let Some(entries) = record.deprecated_api.as_mut() {
            for entry in entries {
                if !filter(pkg, &entry.name) {
                    report.skipped.push((pkg.clone(), entry.name.clone()));
                    continue;
                }
                resolve_field(pkg, entry, VersionField::DeprecatedIn, values, &mut report)?;
                resolve_field(pkg, entry, VersionField::ExpectedRemove, values, &mut report)?;
            }
        }
        if let Some(entries) = record.preview_api.as_mut() {
            for entry in entries {
                if !filter(pkg, &entry.name) {
                    report.skipped.push((pkg.clone(), entry.name.clone()));
                    continue;
                }
                resolve_field(pkg, entry, VersionField::AddedIn, values, &mut report)?;
                resolve_field(pkg, entry, VersionField::ExpectedStable, values, &mut report)?;
            }
        }
    }
    Ok(report)
}

fn resolve_field(
    pkg: &str,
    entry: &mut ApiEntry,
    field: VersionField,
    values: &VersionSet,
    report: &mut ResolutionReport,
) -> Result<(), VersionError> {
    let current = entry.get(field).unwrap_or("");
    if !is_placeholder(current) {
        return Ok(());
    }
    let value = values.get(field).ok_or_else(|| VersionError::MissingValue {
        field,
        package: pkg.to_string(),
        name: entry.name.clone(),
    })?;
    entry.set(field, value);
    report.updated.push(AppliedFix {
        package: pkg.to_string(),
        name: entry.name.clone(),
        field,
        value: value.to_string(),
    });
    Ok(())
}
