//! Merge newly discovered APIs into the tracked state

use super::{load_source, write_document, PathArgs, VersionArgs};
use crate::engine::diff::{self, MergeDefaults};
use crate::models::Registry;
use crate::Result;
use colored::Colorize;

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(flatten)]
    pub versions: VersionArgs,

    /// Allow copying of pre-existing stable APIs
    #[arg(long)]
    pub copy_stable_apis: bool,

    /// Title of the generated markdown document
    #[arg(long, default_value = "API Stability")]
    pub title: String,
}

pub fn run(args: UpdateArgs) -> Result<()> {
    let mut registry = Registry::load(&args.paths.current)?;
    let source = load_source(&args.paths.source)?;
    let versions = args.versions.resolve(true)?;
    let defaults = MergeDefaults::from_versions(&versions);

    let outcome = diff::update(&mut registry, &source, args.copy_stable_apis, &defaults);
    if outcome.unmerged_stable > 0 {
        anyhow::bail!(
            "{} untracked stable APIs; promote them through preview or pass --copy-stable-apis",
            outcome.unmerged_stable
        );
    }

    registry.save(&args.paths.current)?;
    write_document(&args.paths.document, &registry, &args.title)?;
    println!(
        "{}",
        format!("Tracked {} new APIs", outcome.merged).green()
    );
    Ok(())
}
