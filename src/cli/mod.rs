//! CLI command implementations
//!
//! Each subcommand lives in its own module with a `run` function. The
//! engine reports problems as values; the modules here print them,
//! decide exit status, and own all file I/O ordering so that a failing
//! run never persists a half-applied registry.

pub mod compare;
pub mod find_updates;
pub mod fix_versions;
pub mod promote;
pub mod report;
pub mod update;
pub mod write_doc;

use crate::models::Registry;
use crate::version::VersionSet;
use crate::{Context, Result};
use std::path::{Path, PathBuf};

/// Document paths shared by the reconciliation subcommands
#[derive(clap::Args, Debug, Clone)]
pub struct PathArgs {
    /// JSON describing the API surface discovered in source
    #[arg(short, long, default_value = "./_results/api-surface.json")]
    pub source: PathBuf,

    /// JSON tracking the current API lifecycle state
    #[arg(short, long, default_value = "./docs/api-status.json")]
    pub current: PathBuf,

    /// Markdown document describing the current APIs
    #[arg(short, long, default_value = "./docs/api-status.md")]
    pub document: PathBuf,
}

/// Version values applied to new or placeholder-bearing entries
#[derive(clap::Args, Debug, Clone, Default)]
pub struct VersionArgs {
    /// Added-in version for newly tracked preview APIs
    #[arg(short = 'A', long)]
    pub added_in_version: Option<String>,

    /// Expected stable version for newly tracked preview APIs
    #[arg(short = 'S', long)]
    pub stable_in_version: Option<String>,

    /// Deprecated-in version for newly tracked deprecated APIs
    #[arg(short = 'D', long)]
    pub deprecated_in_version: Option<String>,

    /// Version a newly tracked deprecated API is expected to be removed in
    #[arg(short = 'R', long)]
    pub remove_in_version: Option<String>,

    /// Current VCS tag; unspecified version values are derived from it
    #[arg(short = 't', long)]
    pub current_tag: Option<String>,

    /// Use placeholder tokens for unspecified version values
    #[arg(long)]
    pub placeholder_versions: bool,
}

impl VersionArgs {
    /// Resolve the version values for this run.
    ///
    /// A release tag wins over placeholder mode. Placeholder mode is
    /// rejected up front when the operation needs concrete values.
    pub fn resolve(&self, allow_placeholders: bool) -> Result<VersionSet> {
        let mut versions = VersionSet {
            added_in: self.added_in_version.clone(),
            stable_in: self.stable_in_version.clone(),
            deprecated_in: self.deprecated_in_version.clone(),
            remove_in: self.remove_in_version.clone(),
        };
        if let Some(tag) = &self.current_tag {
            versions.apply_tag(tag)?;
        } else if self.placeholder_versions {
            if !allow_placeholders {
                anyhow::bail!("this operation requires real version numbers, not placeholders");
            }
            versions.apply_placeholders();
        }
        Ok(versions)
    }
}

/// Load the discovered-API document, failing when it is missing or empty
pub(crate) fn load_source(path: &Path) -> Result<Registry> {
    let source = Registry::load(path)?;
    if source.packages.is_empty() {
        anyhow::bail!("no source data found (path: {})", path.display());
    }
    Ok(source)
}

/// Write the markdown rendering of the registry
pub(crate) fn write_document(path: &Path, registry: &Registry, title: &str) -> Result<()> {
    let doc = crate::render::render_status(registry, title);
    std::fs::write(path, doc).with_context(|| format!("Failed to write {}", path.display()))
}
