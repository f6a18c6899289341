use apitrack::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

#[derive(Parser)]
#[command(name = "apitrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track the stability lifecycle of public APIs across releases", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the discovered API surface against the tracked state (CI gate)
    Compare(apitrack::cli::compare::CompareArgs),

    /// Merge newly discovered APIs into the tracked state
    Update(apitrack::cli::update::UpdateArgs),

    /// Promote preview APIs the source now reports as stable
    Promote(apitrack::cli::promote::PromoteArgs),

    /// Replace placeholder versions with concrete ones
    #[command(name = "fix-versions")]
    FixVersions(apitrack::cli::fix_versions::FixVersionsArgs),

    /// List APIs due to transition at an upcoming release
    #[command(name = "find-updates")]
    FindUpdates(apitrack::cli::find_updates::FindUpdatesArgs),

    /// Render the tracked state as a markdown document
    #[command(name = "write-doc")]
    WriteDoc(apitrack::cli::write_doc::WriteDocArgs),

    /// Render a readiness report (JSON on stdin) as markdown
    Report,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compare(args) => apitrack::cli::compare::run(args),
        Commands::Update(args) => apitrack::cli::update::run(args),
        Commands::Promote(args) => apitrack::cli::promote::run(args),
        Commands::FixVersions(args) => apitrack::cli::fix_versions::run(args),
        Commands::FindUpdates(args) => apitrack::cli::find_updates::run(args),
        Commands::WriteDoc(args) => apitrack::cli::write_doc::run(args),
        Commands::Report => apitrack::cli::report::run(),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "apitrack", &mut io::stdout());
            Ok(())
        }
    }
}
