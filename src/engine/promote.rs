//! Preview to stable promotion
//!
//! A preview API is promoted once a fresh discovered-API document reports
//! it as stable. Promotion moves the entry between lists and carries its
//! history forward; it never deletes anything implicitly.

use crate::models::{ApiCategory, ApiEntry, Problem, Registry};

/// One API moved from preview to stable
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    pub package: String,
    pub name: String,
}

/// Outcome of a promotion run
#[derive(Debug, Default)]
pub struct PromotionOutcome {
    pub promoted: Vec<Promotion>,
    pub problems: Vec<Problem>,
}

/// Promote every API the discovered document reports as stable, provided
/// it is currently tracked as preview.
///
/// The promoted entry is the discovered one, carrying forward
/// `added_in_version` from its tracked preview record; when the caller
/// supplied a concrete version for this run it is stamped as
/// `became_stable_version`. An API tracked in both preview and stable is
/// reported and left untouched; one tracked in neither must pass through
/// preview first. Already-stable APIs are a no-op.
pub fn promote(
    registry: &mut Registry,
    source: &Registry,
    became_stable: Option<&str>,
) -> PromotionOutcome {
    let mut outcome = PromotionOutcome::default();
    for (pkg, discovered) in &source.packages {
        let src_stable = discovered.stable_api.as_deref().unwrap_or_default();
        if src_stable.is_empty() {
            continue;
        }

        // Work on detached copies so lists created on demand only attach
        // to the registry when they end up non-empty.
        let had_stable = registry.entries(pkg, ApiCategory::Stable).is_some();
        let had_preview = registry.entries(pkg, ApiCategory::Preview).is_some();
        let mut stable: Vec<ApiEntry> = registry
            .entries(pkg, ApiCategory::Stable)
            .map(<[ApiEntry]>::to_vec)
            .unwrap_or_default();
        let mut preview: Vec<ApiEntry> = registry
            .entries(pkg, ApiCategory::Preview)
            .map(<[ApiEntry]>::to_vec)
            .unwrap_or_default();

        for api in src_stable {
            let in_preview = preview.iter().position(|entry| entry.name == api.name);
            let in_stable = stable.iter().any(|entry| entry.name == api.name);
            match (in_preview, in_stable) {
                (Some(index), false) => {
                    let tracked = preview.remove(index);
                    let mut promoted = api.clone();
                    promoted.added_in_version = tracked.added_in_version.clone();
                    if let Some(version) = became_stable {
                        promoted.became_stable_version = Some(version.to_string());
                    }
                    stable.push(promoted);
                    outcome.promoted.push(Promotion {
                        package: pkg.clone(),
                        name: api.name.clone(),
                    });
                }
                (Some(_), true) => outcome.problems.push(Problem::DualTracked {
                    package: pkg.clone(),
                    name: api.name.clone(),
                }),
                (None, false) => outcome.problems.push(Problem::NotInPreview {
                    package: pkg.clone(),
                    name: api.name.clone(),
                }),
                (None, true) => {} // already stable, nothing to do
            }
        }

        if had_stable || !stable.is_empty() {
            *registry.entries_mut(pkg, ApiCategory::Stable) = stable;
        }
        if had_preview {
            *registry.entries_mut(pkg, ApiCategory::Preview) = preview;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview_registry() -> Registry {
        let mut registry = Registry::default();
        let mut entry = ApiEntry::named("Foo");
        entry.added_in_version = Some("v1.2.0".to_string());
        entry.expected_stable_version = Some("v1.4.0".to_string());
        registry.entries_mut("p", ApiCategory::Preview).push(entry);
        registry
    }

    fn stable_source(names: &[&str]) -> Registry {
        let mut source = Registry::default();
        source
            .entries_mut("p", ApiCategory::Stable)
            .extend(names.iter().copied().map(ApiEntry::named));
        source
    }

    #[test]
    fn test_promotion_moves_entry_and_carries_added_in() {
        let mut registry = preview_registry();

        let outcome = promote(&mut registry, &stable_source(&["Foo"]), None);

        assert_eq!(outcome.promoted.len(), 1);
        assert!(outcome.problems.is_empty());
        assert_eq!(registry.entries("p", ApiCategory::Preview), Some(&[] as &[ApiEntry]));
        let stable = registry.entries("p", ApiCategory::Stable).unwrap();
        assert_eq!(stable.len(), 1);
        assert_eq!(stable[0].name, "Foo");
        assert_eq!(stable[0].added_in_version.as_deref(), Some("v1.2.0"));
        assert_eq!(stable[0].became_stable_version, None);
    }

    #[test]
    fn test_promotion_stamps_became_stable_when_supplied() {
        let mut registry = preview_registry();

        promote(&mut registry, &stable_source(&["Foo"]), Some("v1.4.0"));

        let stable = registry.entries("p", ApiCategory::Stable).unwrap();
        assert_eq!(stable[0].became_stable_version.as_deref(), Some("v1.4.0"));
    }

    #[test]
    fn test_dual_tracked_is_reported_not_resolved() {
        let mut registry = preview_registry();
        registry
            .entries_mut("p", ApiCategory::Stable)
            .push(ApiEntry::named("Foo"));
        let before = registry.clone();

        let outcome = promote(&mut registry, &stable_source(&["Foo"]), None);

        assert!(outcome.promoted.is_empty());
        assert_eq!(
            outcome.problems,
            vec![Problem::DualTracked {
                package: "p".to_string(),
                name: "Foo".to_string(),
            }]
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn test_unknown_api_must_pass_through_preview() {
        let mut registry = preview_registry();

        let outcome = promote(&mut registry, &stable_source(&["Bar"]), None);

        assert_eq!(
            outcome.problems,
            vec![Problem::NotInPreview {
                package: "p".to_string(),
                name: "Bar".to_string(),
            }]
        );
        // a problems-only run must not attach a stable list
        assert_eq!(registry.entries("p", ApiCategory::Stable), None);
    }

    #[test]
    fn test_already_stable_is_a_noop() {
        let mut registry = Registry::default();
        registry
            .entries_mut("p", ApiCategory::Stable)
            .push(ApiEntry::named("Foo"));
        let before = registry.clone();

        let outcome = promote(&mut registry, &stable_source(&["Foo"]), None);

        assert!(outcome.promoted.is_empty());
        assert!(outcome.problems.is_empty());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_names_stay_unique_after_promotion() {
        let mut registry = preview_registry();

        promote(&mut registry, &stable_source(&["Foo", "Foo"]), None);

        let stable = registry.entries("p", ApiCategory::Stable).unwrap();
        assert_eq!(stable.len(), 1);
    }

    #[test]
    fn test_promotion_keeps_discovered_extra_fields() {
        let mut registry = preview_registry();
        let mut source = Registry::default();
        let mut api = ApiEntry::named("Foo");
        api.extra
            .insert("signature".to_string(), "func Foo() error".into());
        source.entries_mut("p", ApiCategory::Stable).push(api);

        promote(&mut registry, &source, None);

        let stable = registry.entries("p", ApiCategory::Stable).unwrap();
        assert_eq!(stable[0].extra.get("signature").unwrap(), "func Foo() error");
    }
}
