use crate::engine::readiness;
use crate::models::Registry;
use crate::Result;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
pub struct FindUpdatesArgs {
    /// JSON tracking the current API lifecycle state
    #[arg(short, long, default_value = "./docs/api-status.json")]
    pub current: PathBuf,

    /// The upcoming release to query for due transitions
    #[arg(short, long)]
    pub next_version: String,
}

pub fn run(args: FindUpdatesArgs) -> Result<()> {
    let registry = Registry::load(&args.current)?;

    let report = readiness::find_due(&registry, &args.next_version);
    println!("{}", serde_json::to_string_pretty(&report)?);
    if report.is_empty() {
        anyhow::bail!("no APIs due to transition at {}", args.next_version);
    }
    Ok(())
}
