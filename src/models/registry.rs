//! Tracked registry - the persisted state of record for API lifecycle metadata
//!
//! The registry maps package names to per-category lists of API entries.
//! The same shape is used for the discovered-API document produced by the
//! source scanner, so both sides of a diff share one model. Fields we do
//! not interpret are preserved verbatim across load/save round trips.

use crate::version::VersionField;
use crate::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Lifecycle category of an API entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiCategory {
    Stable,
    Preview,
    Deprecated,
}

impl ApiCategory {
    /// All categories, in the order diffs report them
    pub const ALL: [ApiCategory; 3] = [
        ApiCategory::Deprecated,
        ApiCategory::Preview,
        ApiCategory::Stable,
    ];

    /// JSON key of the category list inside a package record
    pub fn key(&self) -> &'static str {
        match self {
            ApiCategory::Stable => "stable_api",
            ApiCategory::Preview => "preview_api",
            ApiCategory::Deprecated => "deprecated_api",
        }
    }

    /// Display name used in problem reports
    pub fn label(&self) -> &'static str {
        match self {
            ApiCategory::Stable => "stable",
            ApiCategory::Preview => "preview",
            ApiCategory::Deprecated => "deprecated",
        }
    }
}

/// A single tracked API function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEntry {
    /// Function name, unique within its category list
    pub name: String,

    /// Version the API first appeared as preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_in_version: Option<String>,

    /// Version the preview API is expected to become stable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_stable_version: Option<String>,

    /// Version the API was marked deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_in_version: Option<String>,

    /// Version the deprecated API is expected to disappear
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_remove_version: Option<String>,

    /// Version a promoted API actually became stable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub became_stable_version: Option<String>,

    /// Scanner-supplied fields we do not interpret, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiEntry {
    /// Create a bare entry with no lifecycle metadata
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            added_in_version: None,
            expected_stable_version: None,
            deprecated_in_version: None,
            expected_remove_version: None,
            became_stable_version: None,
            extra: Map::new(),
        }
    }

    /// Read a lifecycle field
    pub fn get(&self, field: VersionField) -> Option<&str> {
        match field {
            VersionField::AddedIn => self.added_in_version.as_deref(),
            VersionField::ExpectedStable => self.expected_stable_version.as_deref(),
            VersionField::DeprecatedIn => self.deprecated_in_version.as_deref(),
            VersionField::ExpectedRemove => self.expected_remove_version.as_deref(),
        }
    }

    /// Write a lifecycle field
    pub fn set(&mut self, field: VersionField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            VersionField::AddedIn => self.added_in_version = value,
            VersionField::ExpectedStable => self.expected_stable_version = value,
            VersionField::DeprecatedIn => self.deprecated_in_version = value,
            VersionField::ExpectedRemove => self.expected_remove_version = value,
        }
    }

    /// True when a lifecycle field has no usable value yet.
    ///
    /// Merges stamp empty strings for "to be resolved later", so both a
    /// missing field and an empty one count as unset.
    pub fn is_unset(&self, field: VersionField) -> bool {
        self.get(field).map_or(true, str::is_empty)
    }
}

/// Per-package lifecycle lists.
///
/// A list is `None` when the package has never had entries in that
/// category; that is distinct from `Some(vec![])` and keeps absent
/// categories out of the persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable_api: Option<Vec<ApiEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_api: Option<Vec<ApiEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_api: Option<Vec<ApiEntry>>,

    /// Package-level fields we do not interpret, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageRecord {
    /// The category list, if the package has ever had one
    pub fn list(&self, category: ApiCategory) -> Option<&Vec<ApiEntry>> {
        match category {
            ApiCategory::Stable => self.stable_api.as_ref(),
            ApiCategory::Preview => self.preview_api.as_ref(),
            ApiCategory::Deprecated => self.deprecated_api.as_ref(),
        }
    }

    /// Mutable slot for the category list
    pub fn list_mut(&mut self, category: ApiCategory) -> &mut Option<Vec<ApiEntry>> {
        match category {
            ApiCategory::Stable => &mut self.stable_api,
            ApiCategory::Preview => &mut self.preview_api,
            ApiCategory::Deprecated => &mut self.deprecated_api,
        }
    }
}

/// Mapping from package name to its lifecycle record.
///
/// Serialized as a single JSON object; `BTreeMap` keeps key order
/// deterministic so rewrites produce stable diffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    pub packages: BTreeMap<String, PackageRecord>,
}

impl Registry {
    /// Load a registry from disk. A missing file is an empty registry,
    /// not an error; malformed JSON is.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the registry as 2-space-indented JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            anyhow::bail!("a valid registry path is required");
        }
        let mut content =
            serde_json::to_string_pretty(self).context("Failed to serialize registry")?;
        content.push('\n');
        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// The tracked entries of one category, if the list exists
    pub fn entries(&self, pkg: &str, category: ApiCategory) -> Option<&[ApiEntry]> {
        self.packages
            .get(pkg)
            .and_then(|record| record.list(category))
            .map(Vec::as_slice)
    }

    /// Mutable handle to a category list, creating the package record
    /// and the list on first write
    pub fn entries_mut(&mut self, pkg: &str, category: ApiCategory) -> &mut Vec<ApiEntry> {
        self.packages
            .entry(pkg.to_string())
            .or_default()
            .list_mut(category)
            .get_or_insert_with(Vec::new)
    }
}
