//! Command-line shell around `ejruns-core`: flag and environment handling,
//! contest ID sourcing and output rendering.

pub mod cli_args;
pub mod contest_ids;
pub mod render;

use std::io::{self, Write};
use std::time::Duration;

use ejruns_core::{
    ApiConfig, ListOptions, LoggingDestination, LoggingError, ReportConfig, ReportError,
    init_logging, level_for_verbosity, run_report,
};
use thiserror::Error;
use tracing::{info, warn};

use cli_args::{Cli, OutputFormat};
use contest_ids::{ContestIdError, ContestIdSources, resolve_contest_ids};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    ContestIds(#[from] ContestIdError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
    #[error("write output: {0}")]
    Output(#[from] io::Error),
}

/// Fully resolved invocation: the core configuration plus the renderer choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub report: ReportConfig,
    pub format: OutputFormat,
}

impl Cli {
    /// Merges flags over the environment defaults and resolves contest IDs.
    pub fn resolve(&self, env_defaults: ApiConfig) -> Result<Invocation, CliError> {
        let mut api = env_defaults;
        if let Some(base_url) = &self.base_url {
            api.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            api = api.with_token(token.clone());
        }
        if let Some(secs) = self.timeout_secs {
            api = api.with_timeout(Duration::from_secs(secs));
        }

        let contest_ids = resolve_contest_ids(&ContestIdSources {
            list: self.contests.as_deref(),
            file: self.contest_file.as_deref(),
            dir: self.contest_dir.as_deref(),
        })?;

        Ok(Invocation {
            report: ReportConfig {
                api,
                list: ListOptions {
                    filter_expr: self.filter.clone(),
                    page_size: self.page_size,
                    field_mask: self.field_mask,
                },
                contest_ids,
            },
            format: self.format,
        })
    }

    fn logging_destination(&self) -> LoggingDestination {
        match &self.log_file {
            Some(path) => LoggingDestination::FileAndStderr(path.clone()),
            None => LoggingDestination::StderrOnly,
        }
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.logging_destination(), level_for_verbosity(cli.verbose))?;

    let invocation = cli.resolve(ApiConfig::from_env()?)?;
    info!(
        contests = invocation.report.contest_ids.len(),
        base_url = %invocation.report.api.trimmed_base_url(),
        "starting report"
    );

    let report = run_report(&invocation.report).await?;
    if !report.failures.is_empty() {
        warn!(
            skipped = report.failures.len(),
            reported = report.contests_with_rows(),
            "some contests were skipped"
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::render(invocation.format, &report.rows, &mut out)?;
    out.flush()?;
    Ok(())
}
