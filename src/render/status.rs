//! Markdown rendering of the tracked registry
//!
//! Pure formatting over the registry: per package, a table of preview
//! APIs and a table of deprecated APIs, or a notice that everything is
//! stable. The output file is regenerated wholesale on every write.

use crate::models::{ApiEntry, Registry};

const GENERATED_BANNER: &str = "<!-- GENERATED FILE: DO NOT EDIT DIRECTLY -->";

type Column = (&'static str, fn(&ApiEntry) -> &str);

const PREVIEW_COLUMNS: [Column; 3] = [
    ("Name", |entry| entry.name.as_str()),
    ("Added in Version", |entry| {
        entry.added_in_version.as_deref().unwrap_or("")
    }),
    ("Expected Stable Version", |entry| {
        entry.expected_stable_version.as_deref().unwrap_or("")
    }),
];

const DEPRECATED_COLUMNS: [Column; 3] = [
    ("Name", |entry| entry.name.as_str()),
    ("Deprecated in Version", |entry| {
        entry.deprecated_in_version.as_deref().unwrap_or("")
    }),
    ("Expected Removal Version", |entry| {
        entry.expected_remove_version.as_deref().unwrap_or("")
    }),
];

/// Render the whole registry as a markdown document
pub fn render_status(registry: &Registry, title: &str) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push_str("\n\n");
    out.push_str(&format!("# {}\n\n", title));
    for (pkg, record) in &registry.packages {
        out.push_str(&format!("## Package: {}\n\n", pkg));
        let preview = record.preview_api.as_deref().unwrap_or_default();
        let deprecated = record.deprecated_api.as_deref().unwrap_or_default();
        if !preview.is_empty() {
            out.push_str("### Preview APIs\n\n");
            table(&mut out, preview, &PREVIEW_COLUMNS);
            out.push('\n');
        }
        if !deprecated.is_empty() {
            out.push_str("### Deprecated APIs\n\n");
            table(&mut out, deprecated, &DEPRECATED_COLUMNS);
            out.push('\n');
        }
        if preview.is_empty() && deprecated.is_empty() {
            out.push_str("No Preview/Deprecated APIs found. All APIs are considered stable.\n\n");
        }
    }
    out
}

fn table(out: &mut String, entries: &[ApiEntry], columns: &[Column]) {
    for (header, _) in columns {
        out.push_str(header);
        out.push_str(" | ");
    }
    out.push('\n');
    for (header, _) in columns {
        out.push_str(&"-".repeat(header.len()));
        out.push_str(" | ");
    }
    out.push('\n');
    for entry in entries {
        for (_, value) in columns {
            out.push_str(value(entry));
            out.push_str(" | ");
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiCategory;

    #[test]
    fn test_preview_table() {
        let mut registry = Registry::default();
        let mut entry = ApiEntry::named("MountWithRoot");
        entry.added_in_version = Some("v1.2.0".to_string());
        entry.expected_stable_version = Some("v1.4.0".to_string());
        registry.entries_mut("cephfs", ApiCategory::Preview).push(entry);

        let doc = render_status(&registry, "API Stability");

        assert!(doc.starts_with(GENERATED_BANNER));
        assert!(doc.contains("# API Stability\n"));
        assert!(doc.contains("## Package: cephfs\n"));
        assert!(doc.contains("### Preview APIs\n"));
        assert!(doc.contains("Name | Added in Version | Expected Stable Version | \n"));
        assert!(doc.contains("MountWithRoot | v1.2.0 | v1.4.0 | \n"));
        assert!(!doc.contains("### Deprecated APIs"));
    }

    #[test]
    fn test_deprecated_table() {
        let mut registry = Registry::default();
        let mut entry = ApiEntry::named("OldOp");
        entry.deprecated_in_version = Some("v1.3.0".to_string());
        registry.entries_mut("rbd", ApiCategory::Deprecated).push(entry);

        let doc = render_status(&registry, "API Stability");

        assert!(doc.contains("### Deprecated APIs\n"));
        assert!(doc.contains("Name | Deprecated in Version | Expected Removal Version | \n"));
        // unset version renders empty
        assert!(doc.contains("OldOp | v1.3.0 |  | \n"));
    }

    #[test]
    fn test_all_stable_notice() {
        let mut registry = Registry::default();
        registry
            .entries_mut("rados", ApiCategory::Stable)
            .push(ApiEntry::named("Op"));
        registry.entries_mut("rgw", ApiCategory::Preview);

        let doc = render_status(&registry, "API Stability");

        let notices = doc
            .matches("No Preview/Deprecated APIs found. All APIs are considered stable.")
            .count();
        // both the stable-only package and the empty-preview package qualify
        assert_eq!(notices, 2);
    }
}
