use super::write_document;
use crate::models::Registry;
use crate::Result;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
pub struct WriteDocArgs {
    /// JSON tracking the current API lifecycle state
    #[arg(short, long, default_value = "./docs/api-status.json")]
    pub current: PathBuf,

    /// Markdown document to write
    #[arg(short, long, default_value = "./docs/api-status.md")]
    pub document: PathBuf,

    /// Title of the generated markdown document
    #[arg(long, default_value = "API Stability")]
    pub title: String,
}

pub fn run(args: WriteDocArgs) -> Result<()> {
    let registry = Registry::load(&args.current)?;
    write_document(&args.document, &registry, &args.title)
}
