//! Replace placeholder versions with concrete ones

use super::{PathArgs, VersionArgs};
use crate::engine::resolve;
use crate::models::Registry;
use crate::{Context, Result};
use colored::Colorize;
use regex::Regex;

#[derive(clap::Args, Debug)]
pub struct FixVersionsArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(flatten)]
    pub versions: VersionArgs,

    /// Regular expression filtering on package names
    #[arg(long)]
    pub fix_filter_pkg: Option<String>,

    /// Regular expression filtering on function names
    #[arg(long)]
    pub fix_filter_func: Option<String>,
}

pub fn run(args: FixVersionsArgs) -> Result<()> {
    let mut registry = Registry::load(&args.paths.current)?;
    // placeholder mode would write new placeholders over old ones
    let versions = args.versions.resolve(false)?;

    let pkg_filter = compile(args.fix_filter_pkg.as_deref(), "--fix-filter-pkg")?;
    let func_filter = compile(args.fix_filter_func.as_deref(), "--fix-filter-func")?;
    let filter = |pkg: &str, name: &str| {
        pkg_filter.as_ref().map_or(true, |re| re.is_match(pkg))
            && func_filter.as_ref().map_or(true, |re| re.is_match(name))
    };

    let report = resolve::fix_versions(&mut registry, &versions, filter)?;
    for (pkg, name) in &report.skipped {
        println!("{}", format!("Skipping {}:{} due to filter", pkg, name).yellow());
    }
    for fix in &report.updated {
        println!("Updated {}:{} {}={}", fix.package, fix.name, fix.field, fix.value);
    }

    registry.save(&args.paths.current)?;
    Ok(())
}

fn compile(pattern: Option<&str>, flag: &str) -> Result<Option<Regex>> {
    pattern
        .map(Regex::new)
        .transpose()
        .with_context(|| format!("invalid {} pattern", flag))
}
