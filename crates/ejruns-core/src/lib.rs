//! Core library: fetches run listings from the ejudge master API and
//! normalizes them into report rows.

pub mod api;
pub mod client;
pub mod config;
pub mod contest;
pub mod error;
pub mod logging;
pub mod report;
pub mod runs;

pub use api::{ApiErrorPayload, ApiReply, Contest, ContestStatus, Run, RunPage, format_api_error};
pub use client::ApiClient;
pub use config::{ApiConfig, ListOptions, ReportConfig};
pub use contest::fetch_contest_name;
pub use error::ReportError;
pub use logging::{LoggingDestination, LoggingError, init_logging, level_for_verbosity};
pub use report::{
    ContestFailure, FailureStage, Report, ReportRow, collect_report, contest_url,
    format_submitted_at, sort_runs,
};
pub use runs::{PageStep, StopReason, list_runs, next_step, page_params};

/// Runs a full report for an already-resolved configuration.
///
/// A missing base URL fails up front instead of once per contest.
pub async fn run_report(config: &ReportConfig) -> Result<Report, ReportError> {
    if config.api.trimmed_base_url().is_empty() {
        return Err(ReportError::config("base URL is required"));
    }
    let client = ApiClient::new(&config.api)?;
    Ok(collect_report(&client, &config.contest_ids, &config.list).await)
}
