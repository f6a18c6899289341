use super::{load_source, PathArgs, VersionArgs};
use crate::engine::promote;
use crate::models::Registry;
use crate::Result;
use colored::Colorize;

#[derive(clap::Args, Debug)]
pub struct PromoteArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(flatten)]
    pub versions: VersionArgs,
}

pub fn run(args: PromoteArgs) -> Result<()> {
    let mut registry = Registry::load(&args.paths.current)?;
    let source = load_source(&args.paths.source)?;
    let versions = args.versions.resolve(true)?;

    let outcome = promote::promote(&mut registry, &source, versions.added_in.as_deref());
    for promotion in &outcome.promoted {
        println!(
            "{}",
            format!("promoting to stable: {}:{}", promotion.package, promotion.name).cyan()
        );
    }
    for problem in &outcome.problems {
        println!("{}", problem);
    }
    println!("found {} apis to promote", outcome.promoted.len());
    if !outcome.problems.is_empty() {
        anyhow::bail!("{} problems detected", outcome.problems.len());
    }

    registry.save(&args.paths.current)?;
    Ok(())
}
