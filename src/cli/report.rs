use crate::engine::readiness::ReadinessReport;
use crate::render::render_readiness;
use crate::{Context, Result};
use std::io;

pub fn run() -> Result<()> {
    let report: ReadinessReport = serde_json::from_reader(io::stdin())
        .context("Failed to parse readiness report from stdin")?;
    print!("{}", render_readiness(&report));
    Ok(())
}
