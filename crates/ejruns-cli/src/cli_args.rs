use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use ejruns_core::config::DEFAULT_PAGE_SIZE;

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ejruns",
    version,
    about = "List ejudge runs across contests as JSON or a tab-separated table"
)]
pub struct Cli {
    /// Base ejudge URL, e.g. https://judge.example.org [env: EJUDGE_BASE_URL]
    #[arg(long = "base-url", value_name = "URL", value_hint = ValueHint::Url)]
    pub base_url: Option<String>,

    /// Authorization header value [env: EJUDGE_TOKEN]
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Comma separated contest IDs.
    #[arg(long = "contests", value_name = "LIST")]
    pub contests: Option<String>,

    /// File with one contest ID per line; blank lines and `#` comments are ignored.
    #[arg(long = "contest-file", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub contest_file: Option<PathBuf>,

    /// Directory whose numerically named subdirectories are contest IDs.
    #[arg(long = "contest-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub contest_dir: Option<PathBuf>,

    /// Filter expression passed to list-runs.
    #[arg(long = "filter", value_name = "EXPR", default_value = "")]
    pub filter: String,

    /// Runs requested per page; zero or less lets the server decide.
    #[arg(
        long = "page-size",
        value_name = "N",
        default_value_t = DEFAULT_PAGE_SIZE,
        allow_negative_numbers = true
    )]
    pub page_size: i64,

    /// Field mask for list-runs; zero leaves it unset.
    #[arg(long = "field-mask", value_name = "MASK", default_value_t = 0)]
    pub field_mask: i64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Per-request timeout in seconds [env: EJUDGE_TIMEOUT_SECS, default: 30]
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    /// Also write JSON logs to this file.
    #[arg(long = "log-file", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    Json,
    /// Tab-separated table grouped by contest.
    Text,
}
