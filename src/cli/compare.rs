//! CI gate: compare the discovered API surface against the tracked state

use super::{load_source, PathArgs};
use crate::engine::diff;
use crate::models::Registry;
use crate::Result;
use colored::Colorize;

#[derive(clap::Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Also flag entries discovered under a different category than tracked
    #[arg(long)]
    pub strict_categories: bool,
}

pub fn run(args: CompareArgs) -> Result<()> {
    let registry = Registry::load(&args.paths.current)?;
    let source = load_source(&args.paths.source)?;

    let problems = diff::compare(&registry, &source, args.strict_categories);
    for problem in &problems {
        println!("{}", problem);
    }
    if !problems.is_empty() {
        anyhow::bail!("{} problems detected", problems.len());
    }

    println!("{}", "API surface matches tracked state".green());
    Ok(())
}
