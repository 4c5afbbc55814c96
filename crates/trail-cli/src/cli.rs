use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trail",
    about = "ChangeTrail — Audit-Trail Change Inspection",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show changes between two JSON snapshots
    Diff(DiffArgs),
    /// Inspect a single audit-log entry and its change table
    Show(ShowArgs),
    /// Summarize a file of audit-log entries
    Log(LogArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Path to the "before" snapshot
    pub before: String,
    /// Path to the "after" snapshot
    pub after: String,
    /// Render multi-line string changes as unified hunks
    #[arg(long)]
    pub text_diff: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Path to a file holding one audit-log entry
    pub entry: String,
}

#[derive(Args)]
pub struct LogArgs {
    /// Path to a file holding a JSON array of audit-log entries
    pub entries: String,
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}
