//! Release-readiness query
//!
//! Scans the registry for entries whose target transition version
//! matches an upcoming release: preview APIs due to become stable and
//! deprecated APIs due to be removed. The engine only reports readiness;
//! the transitions themselves stay manual.

use crate::models::Registry;
use serde::{Deserialize, Serialize};

/// A preview API due to become stable at the queried release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewDue {
    pub package: String,
    pub name: String,
    pub expected_stable_version: String,
}

/// A deprecated API due to be removed at the queried release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeprecatedDue {
    pub package: String,
    pub name: String,
    pub expected_remove_version: String,
}

/// APIs whose target transition version matches an upcoming release
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub preview: Vec<PreviewDue>,
    pub deprecated: Vec<DeprecatedDue>,
}

impl ReadinessReport {
    pub fn is_empty(&self) -> bool {
        self.preview.is_empty() && self.deprecated.is_empty()
    }
}

/// Collect every entry due to transition at `next_version`
pub fn find_due(registry: &Registry, next_version: &str) -> ReadinessReport {
    let mut report = ReadinessReport::default();
    for (pkg, record) in &registry.packages {
        for entry in record.deprecated_api.as_deref().unwrap_or_default() {
            if entry.expected_remove_version.as_deref() == Some(next_version) {
                report.deprecated.push(DeprecatedDue {
                    package: pkg.clone(),
                    name: entry.name.clone(),
                    expected_remove_version: next_version.to_string(),
                });
            }
        }
        for entry in record.preview_api.as_deref().unwrap_or_default() {
            if entry.expected_stable_version.as_deref() == Some(next_version) {
                report.preview.push(PreviewDue {
                    package: pkg.clone(),
                    name: entry.name.clone(),
                    expected_stable_version: next_version.to_string(),
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiCategory, ApiEntry};

    fn registry() -> Registry {
        let mut registry = Registry::default();
        let mut preview = ApiEntry::named("NewOp");
        preview.expected_stable_version = Some("v1.5.0".to_string());
        registry.entries_mut("rados", ApiCategory::Preview).push(preview);
        let mut deprecated = ApiEntry::named("OldOp");
        deprecated.expected_remove_version = Some("v1.5.0".to_string());
        registry
            .entries_mut("rbd", ApiCategory::Deprecated)
            .push(deprecated);
        registry
    }

    #[test]
    fn test_due_entries_found() {
        let report = find_due(&registry(), "v1.5.0");

        assert_eq!(
            report.preview,
            vec![PreviewDue {
                package: "rados".to_string(),
                name: "NewOp".to_string(),
                expected_stable_version: "v1.5.0".to_string(),
            }]
        );
        assert_eq!(
            report.deprecated,
            vec![DeprecatedDue {
                package: "rbd".to_string(),
                name: "OldOp".to_string(),
                expected_remove_version: "v1.5.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        let report = find_due(&registry(), "v9.9.9");
        assert!(report.is_empty());
    }

    #[test]
    fn test_placeholders_never_match_a_release() {
        let mut registry = Registry::default();
        let mut entry = ApiEntry::named("NewOp");
        entry.expected_stable_version = Some("$NEXT_RELEASE_STABLE".to_string());
        registry.entries_mut("rados", ApiCategory::Preview).push(entry);

        assert!(find_due(&registry, "v1.5.0").is_empty());
    }

    #[test]
    fn test_report_serializes_with_field_names() {
        let report = find_due(&registry(), "v1.5.0");
        let json = serde_json::to_string_pretty(&report).unwrap();

        assert!(json.contains("\"preview\""));
        assert!(json.contains("\"deprecated\""));
        assert!(json.contains("\"expected_stable_version\": \"v1.5.0\""));
        assert!(json.contains("\"expected_remove_version\": \"v1.5.0\""));
    }
}
