use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "aliya-compass",
    version,
    about = "Aliyah readiness assessments and community matching CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory for saved answers (defaults to ~/.local/state/aliya-compass)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Directory of extra quiz definitions (*.toml), overriding built-ins by id
    #[arg(long, global = true)]
    pub quiz_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available assessments
    List,
    Show(ShowCommand),
    Rate(RateCommand),
    Score(ScoreCommand),
    Reset(ResetCommand),
}

#[derive(Args)]
/// Show an assessment's questions and current answers
pub struct ShowCommand {
    pub quiz: String,
}

#[derive(Args)]
/// Record one or more answers, e.g. `rate community-finder 1=9 8=7`
pub struct RateCommand {
    pub quiz: String,
    /// Answers as ID=VALUE pairs, values 0 to 10
    #[arg(required = true)]
    pub ratings: Vec<String>,
}

#[derive(Args)]
/// Score an assessment and render the results
pub struct ScoreCommand {
    pub quiz: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Apply answers for this run only, without persisting them
    #[arg(long = "set", value_name = "ID=VALUE")]
    pub set: Vec<String>,
}

#[derive(Args)]
/// Discard saved answers and start over
pub struct ResetCommand {
    pub quiz: String,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
