//! Diff and merge between the tracked registry and a discovered API surface
//!
//! The primitive is a per-category set difference by entry name: entries
//! the scanner found that the registry does not track yet. Comparison
//! never looks across categories, so an entry tracked under one category
//! and discovered under another is simply "new" in the discovered
//! category; `compare` can flag that with `strict_categories`.

use crate::engine::validate;
use crate::models::{ApiCategory, ApiEntry, PackageRecord, Problem, Registry};
use crate::version::VersionSet;
use std::collections::HashSet;

/// Default lifecycle metadata stamped onto newly tracked preview entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewDefaults {
    pub added_in_version: String,
    pub expected_stable_version: String,
}

/// Default lifecycle metadata stamped onto newly tracked deprecated entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeprecatedDefaults {
    pub deprecated_in_version: String,
    pub expected_remove_version: String,
}

/// Per-category defaults for one merge run.
///
/// Empty strings mean "unset, to be resolved by a later fix-versions
/// pass". Stable entries never receive defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeDefaults {
    pub preview: PreviewDefaults,
    pub deprecated: DeprecatedDefaults,
}

impl MergeDefaults {
    /// Build merge defaults from the caller-supplied version values
    pub fn from_versions(versions: &VersionSet) -> Self {
        Self {
            preview: PreviewDefaults {
                added_in_version: versions.added_in.clone().unwrap_or_default(),
                expected_stable_version: versions.stable_in.clone().unwrap_or_default(),
            },
            deprecated: DeprecatedDefaults {
                deprecated_in_version: versions.deprecated_in.clone().unwrap_or_default(),
                expected_remove_version: versions.remove_in.clone().unwrap_or_default(),
            },
        }
    }

    fn stamp(&self, category: ApiCategory, entry: &mut ApiEntry) {
        match category {
            ApiCategory::Preview => {
                entry.added_in_version = Some(self.preview.added_in_version.clone());
                entry.expected_stable_version =
                    Some(self.preview.expected_stable_version.clone());
            }
            ApiCategory::Deprecated => {
                entry.deprecated_in_version = Some(self.deprecated.deprecated_in_version.clone());
                entry.expected_remove_version =
                    Some(self.deprecated.expected_remove_version.clone());
            }
            ApiCategory::Stable => {}
        }
    }
}

/// Discovered entries not yet tracked, per category, for one package
#[derive(Debug, Default, PartialEq)]
pub struct CategoryAdditions {
    pub deprecated: Vec<ApiEntry>,
    pub preview: Vec<ApiEntry>,
    pub stable: Vec<ApiEntry>,
}

impl CategoryAdditions {
    /// Category-tagged view, in report order
    pub fn by_category(&self) -> [(ApiCategory, &[ApiEntry]); 3] {
        [
            (ApiCategory::Deprecated, self.deprecated.as_slice()),
            (ApiCategory::Preview, self.preview.as_slice()),
            (ApiCategory::Stable, self.stable.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.deprecated.is_empty() && self.preview.is_empty() && self.stable.is_empty()
    }

    /// Total number of new entries across all categories
    pub fn total(&self) -> usize {
        self.deprecated.len() + self.preview.len() + self.stable.len()
    }
}

/// Outcome of an update-mode merge
#[derive(Debug, Default, PartialEq)]
pub struct UpdateOutcome {
    /// Entries newly appended to the registry
    pub merged: usize,
    /// Untracked stable entries that blocked the merge, from the first
    /// offending package
    pub unmerged_stable: usize,
}

/// Entries in `src` whose name is not yet in `tracked`, with category
/// defaults stamped on. Names already seen earlier in `src` are skipped
/// too, so a duplicated scanner entry cannot land twice.
pub fn new_entries(
    tracked: Option<&[ApiEntry]>,
    src: &[ApiEntry],
    category: ApiCategory,
    defaults: &MergeDefaults,
) -> Vec<ApiEntry> {
    let mut known: HashSet<&str> = tracked
        .unwrap_or_default()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    let mut added = Vec::new();
    for entry in src {
        if !known.insert(entry.name.as_str()) {
            continue;
        }
        let mut entry = entry.clone();
        defaults.stamp(category, &mut entry);
        added.push(entry);
    }
    added
}

/// Pure diff of one discovered package record against the registry
pub fn diff_package(
    registry: &Registry,
    pkg: &str,
    discovered: &PackageRecord,
    defaults: &MergeDefaults,
) -> CategoryAdditions {
    let mut additions = CategoryAdditions::default();
    if let Some(src) = &discovered.deprecated_api {
        additions.deprecated = new_entries(
            registry.entries(pkg, ApiCategory::Deprecated),
            src,
            ApiCategory::Deprecated,
            defaults,
        );
    }
    if let Some(src) = &discovered.preview_api {
        additions.preview = new_entries(
            registry.entries(pkg, ApiCategory::Preview),
            src,
            ApiCategory::Preview,
            defaults,
        );
    }
    if let Some(src) = &discovered.stable_api {
        additions.stable = new_entries(
            registry.entries(pkg, ApiCategory::Stable),
            src,
            ApiCategory::Stable,
            defaults,
        );
    }
    additions
}

/// Merge every newly discovered entry into the registry.
///
/// Deprecated and preview entries merge unconditionally. Stable entries
/// merge only when `copy_stable` is set: an API must normally pass
/// through preview, so untracked stable entries abort the merge at the
/// first package carrying them and nothing should be persisted.
pub fn update(
    registry: &mut Registry,
    source: &Registry,
    copy_stable: bool,
    defaults: &MergeDefaults,
) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::default();
    for (pkg, discovered) in &source.packages {
        let additions = diff_package(registry, pkg, discovered, defaults);
        if !copy_stable && !additions.stable.is_empty() {
            outcome.unmerged_stable = additions.stable.len();
            return outcome;
        }
        outcome.merged += additions.total();
        append(registry, pkg, ApiCategory::Deprecated, additions.deprecated);
        append(registry, pkg, ApiCategory::Preview, additions.preview);
        append(registry, pkg, ApiCategory::Stable, additions.stable);
    }
    outcome
}

fn append(registry: &mut Registry, pkg: &str, category: ApiCategory, entries: Vec<ApiEntry>) {
    if entries.is_empty() {
        return;
    }
    registry.entries_mut(pkg, category).extend(entries);
}

/// Compare the discovered surface against the tracked state without
/// mutating anything: one problem per untracked entry, followed by a
/// field-completeness validation of the registry itself.
///
/// With `strict_categories`, an entry that is tracked - just under a
/// different category than the scanner reports - is flagged as a
/// category move instead of counted as untracked.
pub fn compare(registry: &Registry, source: &Registry, strict_categories: bool) -> Vec<Problem> {
    let defaults = MergeDefaults::default();
    let mut problems = Vec::new();
    for (pkg, discovered) in &source.packages {
        let additions = diff_package(registry, pkg, discovered, &defaults);
        for (category, added) in additions.by_category() {
            for entry in added {
                match tracked_elsewhere(registry, pkg, &entry.name, category) {
                    Some(tracked) if strict_categories => problems.push(Problem::CategoryMoved {
                        package: pkg.clone(),
                        name: entry.name.clone(),
                        tracked,
                        discovered: category,
                    }),
                    _ => problems.push(Problem::Untracked {
                        package: pkg.clone(),
                        name: entry.name.clone(),
                        category,
                    }),
                }
            }
        }
    }
    problems.extend(validate::validate(registry));
    problems
}

fn tracked_elsewhere(
    registry: &Registry,
    pkg: &str,
    name: &str,
    category: ApiCategory,
) -> Option<ApiCategory> {
    ApiCategory::ALL
        .into_iter()
        .filter(|other| *other != category)
        .find(|other| {
            registry
                .entries(pkg, *other)
                .map_or(false, |entries| entries.iter().any(|e| e.name == name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionField;

    fn source_with(pkg: &str, category: ApiCategory, names: &[&str]) -> Registry {
        let mut source = Registry::default();
        source
            .entries_mut(pkg, category)
            .extend(names.iter().copied().map(ApiEntry::named));
        source
    }

    fn preview_defaults() -> MergeDefaults {
        MergeDefaults::from_versions(&VersionSet {
            added_in: Some("v1.3.0".to_string()),
            stable_in: Some("v1.5.0".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_merge_stamps_preview_defaults() {
        let mut registry = Registry::default();
        let source = source_with("rados", ApiCategory::Preview, &["NewOp"]);

        let outcome = update(&mut registry, &source, false, &preview_defaults());

        assert_eq!(outcome, UpdateOutcome { merged: 1, unmerged_stable: 0 });
        let entry = &registry.entries("rados", ApiCategory::Preview).unwrap()[0];
        assert_eq!(entry.added_in_version.as_deref(), Some("v1.3.0"));
        assert_eq!(entry.expected_stable_version.as_deref(), Some("v1.5.0"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut registry = Registry::default();
        let source = source_with("rados", ApiCategory::Preview, &["NewOp", "OtherOp"]);
        let defaults = preview_defaults();

        update(&mut registry, &source, false, &defaults);
        let once = registry.clone();
        let outcome = update(&mut registry, &source, false, &defaults);

        assert_eq!(outcome.merged, 0);
        assert_eq!(registry, once);
    }

    #[test]
    fn test_duplicate_source_names_merge_once() {
        let mut registry = Registry::default();
        let source = source_with("rados", ApiCategory::Preview, &["NewOp", "NewOp"]);

        update(&mut registry, &source, false, &preview_defaults());

        let entries = registry.entries("rados", ApiCategory::Preview).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_unset_defaults_stamp_empty_strings() {
        let mut registry = Registry::default();
        let source = source_with("rbd", ApiCategory::Deprecated, &["OldOp"]);

        update(&mut registry, &source, false, &MergeDefaults::default());

        let entry = &registry.entries("rbd", ApiCategory::Deprecated).unwrap()[0];
        assert_eq!(entry.deprecated_in_version.as_deref(), Some(""));
        assert!(entry.is_unset(VersionField::DeprecatedIn));
    }

    #[test]
    fn test_stable_entries_blocked_without_copy_flag() {
        let mut registry = Registry::default();
        let source = source_with("rados", ApiCategory::Stable, &["Op1", "Op2"]);

        let outcome = update(&mut registry, &source, false, &MergeDefaults::default());

        assert_eq!(outcome.unmerged_stable, 2);
        assert_eq!(registry.entries("rados", ApiCategory::Stable), None);
    }

    #[test]
    fn test_stable_entries_merge_with_copy_flag() {
        let mut registry = Registry::default();
        let source = source_with("rados", ApiCategory::Stable, &["Op1"]);

        let outcome = update(&mut registry, &source, true, &MergeDefaults::default());

        assert_eq!(outcome, UpdateOutcome { merged: 1, unmerged_stable: 0 });
        let entry = &registry.entries("rados", ApiCategory::Stable).unwrap()[0];
        // stable entries carry no lifecycle defaults
        assert_eq!(entry.added_in_version, None);
        assert_eq!(entry.expected_stable_version, None);
    }

    #[test]
    fn test_merge_does_not_create_empty_lists() {
        let mut registry = source_with("rados", ApiCategory::Preview, &["NewOp"]);
        let source = source_with("rados", ApiCategory::Preview, &["NewOp"]);

        update(&mut registry, &source, false, &MergeDefaults::default());

        assert_eq!(registry.entries("rados", ApiCategory::Deprecated), None);
        assert_eq!(registry.entries("rados", ApiCategory::Stable), None);
    }

    #[test]
    fn test_compare_reports_untracked_without_mutating() {
        let registry = Registry::default();
        let mut source = source_with("rados", ApiCategory::Preview, &["NewOp"]);
        source
            .entries_mut("rados", ApiCategory::Deprecated)
            .push(ApiEntry::named("OldOp"));

        let problems = compare(&registry, &source, false);

        assert_eq!(
            problems,
            vec![
                Problem::Untracked {
                    package: "rados".to_string(),
                    name: "OldOp".to_string(),
                    category: ApiCategory::Deprecated,
                },
                Problem::Untracked {
                    package: "rados".to_string(),
                    name: "NewOp".to_string(),
                    category: ApiCategory::Preview,
                },
            ]
        );
        assert!(registry.packages.is_empty());
    }

    #[test]
    fn test_compare_includes_registry_validation() {
        let mut registry = Registry::default();
        registry
            .entries_mut("rados", ApiCategory::Preview)
            .push(ApiEntry::named("Unversioned"));
        let source = source_with("rados", ApiCategory::Preview, &["Unversioned"]);

        let problems = compare(&registry, &source, false);

        // tracked, so not "untracked" - but both lifecycle fields missing
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().all(|p| matches!(
            p,
            Problem::MissingVersionField { name, .. } if name == "Unversioned"
        )));
    }

    #[test]
    fn test_category_move_ignored_by_default() {
        let registry = source_with("rados", ApiCategory::Stable, &["Op"]);
        let source = source_with("rados", ApiCategory::Preview, &["Op"]);

        let problems = compare(&registry, &source, false);

        assert_eq!(
            problems,
            vec![Problem::Untracked {
                package: "rados".to_string(),
                name: "Op".to_string(),
                category: ApiCategory::Preview,
            }]
        );
    }

    #[test]
    fn test_category_move_flagged_when_strict() {
        let registry = source_with("rados", ApiCategory::Stable, &["Op"]);
        let source = source_with("rados", ApiCategory::Preview, &["Op"]);

        let problems = compare(&registry, &source, true);

        assert_eq!(
            problems,
            vec![Problem::CategoryMoved {
                package: "rados".to_string(),
                name: "Op".to_string(),
                tracked: ApiCategory::Stable,
                discovered: ApiCategory::Preview,
            }]
        );
    }
}
