//! CLI argument definitions for patient-link.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use plink_access::CrudAction;

#[derive(Parser)]
#[command(
    name = "patient-link",
    version,
    about = "Score candidate patient records for linking",
    long_about = "Compare a manually entered patient profile with candidate records from a \
                  hospital information system.\n\n\
                  Scores are an aid for the operator; records are never linked automatically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient names and birth dates in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Scoring config JSON (weights, thresholds). Missing fields use defaults.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score one candidate record against a source record.
    Score(ScoreArgs),

    /// Score and rank a list of candidate records.
    Rank(RankArgs),

    /// Print the effective scoring configuration.
    Config,

    /// Resolve role permissions from grant rows.
    Permissions(PermissionsArgs),
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Source (manually entered) record as JSON. Omit when no profile is selected.
    #[arg(long = "source", value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Candidate record as JSON.
    #[arg(long = "candidate", value_name = "FILE")]
    pub candidate: PathBuf,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RankArgs {
    /// Source (manually entered) record as JSON. Omit when no profile is selected.
    #[arg(long = "source", value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Candidate records as a JSON array or CSV file.
    #[arg(long = "candidates", value_name = "FILE")]
    pub candidates: PathBuf,

    /// Show at most this many candidates.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Hide candidates scoring below this value.
    #[arg(long = "min-score", value_name = "SCORE", default_value_t = 0,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: u8,

    /// Print the ranking as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PermissionsArgs {
    /// Grant rows as a JSON array.
    #[arg(long = "grants", value_name = "FILE")]
    pub grants: PathBuf,

    /// Roles held by the user (repeatable).
    #[arg(long = "role", value_name = "ROLE", required = true)]
    pub roles: Vec<String>,

    /// Module to check. Prints the full matrix when omitted.
    #[arg(long = "module", value_name = "MODULE", requires = "action")]
    pub module: Option<String>,

    /// Action to check on `--module`.
    #[arg(long = "action", value_enum, requires = "module")]
    pub action: Option<ActionArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ActionArg {
    Create,
    Read,
    Update,
    Delete,
}

impl From<ActionArg> for CrudAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Create => CrudAction::Create,
            ActionArg::Read => CrudAction::Read,
            ActionArg::Update => CrudAction::Update,
            ActionArg::Delete => CrudAction::Delete,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
