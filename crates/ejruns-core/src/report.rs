use std::cmp::Reverse;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::api::Run;
use crate::client::ApiClient;
use crate::config::{CONTEST_VIEW_PATH, ListOptions};
use crate::contest::fetch_contest_name;
use crate::error::ReportError;
use crate::runs::list_runs;

/// One run attributed to its contest, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub contest: String,
    pub contest_id: i64,
    pub run_id: i64,
    pub submitted_at: String,
    pub user: String,
    pub problem: String,
    pub result: String,
    pub contest_url: String,
}

impl ReportRow {
    pub fn from_run(contest: &str, contest_id: i64, contest_url: &str, run: &Run) -> Self {
        Self {
            contest: contest.to_string(),
            contest_id,
            run_id: run.run_id,
            submitted_at: format_submitted_at(run.run_time_us),
            user: run.resolved_user(),
            problem: run.resolved_problem(),
            result: format!("{} {}", run.resolved_status(), run.resolved_score()),
            contest_url: contest_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    ContestName,
    RunListing,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::ContestName => f.write_str("contest name"),
            FailureStage::RunListing => f.write_str("run listing"),
        }
    }
}

/// A contest left out of the report.
#[derive(Debug)]
pub struct ContestFailure {
    pub contest_id: i64,
    pub stage: FailureStage,
    pub error: ReportError,
}

#[derive(Debug, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub failures: Vec<ContestFailure>,
}

impl Report {
    pub fn contests_with_rows(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for row in &self.rows {
            if last != Some(row.contest_id) {
                count += 1;
                last = Some(row.contest_id);
            }
        }
        count
    }
}

/// Builds the report for `contest_ids`, in the given order.
///
/// A contest whose name or runs cannot be fetched is logged, recorded in
/// [`Report::failures`] and skipped; the remaining contests still run.
pub async fn collect_report(
    client: &ApiClient,
    contest_ids: &[i64],
    options: &ListOptions,
) -> Report {
    let mut report = Report::default();

    for &contest_id in contest_ids {
        let name = match fetch_contest_name(client, contest_id).await {
            Ok(name) => name,
            Err(error) => {
                skip_contest(&mut report, contest_id, FailureStage::ContestName, error);
                continue;
            }
        };

        let mut runs = match list_runs(client, contest_id, options).await {
            Ok(runs) => runs,
            Err(error) => {
                skip_contest(&mut report, contest_id, FailureStage::RunListing, error);
                continue;
            }
        };

        sort_runs(&mut runs);
        let url = contest_url(client.base_url(), contest_id);
        info!(contest_id, contest = %name, runs = runs.len(), "collected contest runs");

        report
            .rows
            .extend(runs.iter().map(|run| ReportRow::from_run(&name, contest_id, &url, run)));
    }

    report
}

fn skip_contest(report: &mut Report, contest_id: i64, stage: FailureStage, error: ReportError) {
    warn!(
        contest_id,
        stage = %stage,
        api = error.is_api(),
        error = %error,
        "skipping contest"
    );
    report.failures.push(ContestFailure {
        contest_id,
        stage,
        error,
    });
}

/// Newest submission first; simultaneous submissions by descending run id.
pub fn sort_runs(runs: &mut [Run]) {
    runs.sort_by_key(|run| (Reverse(run.run_time_us), Reverse(run.run_id)));
}

pub fn contest_url(base_url: &str, contest_id: i64) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        CONTEST_VIEW_PATH,
        contest_id
    )
}

/// RFC 3339 in UTC; empty for unset (non-positive) or unrepresentable timestamps.
pub fn format_submitted_at(run_time_us: i64) -> String {
    if run_time_us <= 0 {
        return String::new();
    }
    DateTime::<Utc>::from_timestamp_micros(run_time_us)
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(run_id: i64, run_time_us: i64) -> Run {
        Run {
            run_id,
            run_time_us,
            ..Run::default()
        }
    }

    #[test]
    fn sorts_newest_first_then_highest_run_id() {
        let mut runs = vec![run(7, 100), run(3, 100), run(9, 50)];
        sort_runs(&mut runs);
        let ids: Vec<i64> = runs.iter().map(|run| run.run_id).collect();
        assert_eq!(ids, vec![7, 3, 9]);

        let mut runs = vec![run(1, 10), run(2, 30), run(5, 30), run(4, 0)];
        sort_runs(&mut runs);
        let ids: Vec<i64> = runs.iter().map(|run| run.run_id).collect();
        assert_eq!(ids, vec![5, 2, 1, 4]);
    }

    #[test]
    fn submitted_at_is_empty_for_unset_timestamps() {
        assert_eq!(format_submitted_at(0), "");
        assert_eq!(format_submitted_at(-5), "");
        assert_eq!(
            format_submitted_at(1_700_000_000_123_456),
            "2023-11-14T22:13:20Z"
        );
    }

    #[test]
    fn row_uses_fallback_fields() {
        let source = Run {
            run_id: 12,
            user_name: "Bob Builder".to_string(),
            prob_id: 2,
            status_desc: "Wrong answer".to_string(),
            saved_score: 0,
            ..Run::default()
        };
        let row = ReportRow::from_run("Qualifier", 5, "https://judge.example/ej/contest/5", &source);
        assert_eq!(row.user, "Bob Builder");
        assert_eq!(row.problem, "2");
        assert_eq!(row.result, "Wrong answer 0");
        assert_eq!(row.submitted_at, "");
        assert_eq!(row.contest, "Qualifier");
        assert_eq!(row.contest_id, 5);
        assert_eq!(row.run_id, 12);
    }

    #[test]
    fn row_serializes_with_report_keys() {
        let source = Run {
            run_id: 1,
            user_login: "alice".to_string(),
            prob_name: "A".to_string(),
            status_str: "OK".to_string(),
            score_str: "100".to_string(),
            run_time_us: 1_000_000,
            ..Run::default()
        };
        let row = ReportRow::from_run("Final", 3, "https://judge.example/ej/contest/3", &source);
        let value = serde_json::to_value(&row).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "contest": "Final",
                "contest_id": 3,
                "run_id": 1,
                "submitted_at": "1970-01-01T00:00:01Z",
                "user": "alice",
                "problem": "A",
                "result": "OK 100",
                "contest_url": "https://judge.example/ej/contest/3",
            })
        );
    }

    #[test]
    fn contest_url_trims_trailing_slash() {
        assert_eq!(
            contest_url("https://judge.example/", 41),
            "https://judge.example/ej/contest/41"
        );
        assert_eq!(
            contest_url("https://judge.example", 41),
            "https://judge.example/ej/contest/41"
        );
    }

    #[test]
    fn counts_contest_groups() {
        let row = |contest_id| ReportRow {
            contest: String::new(),
            contest_id,
            run_id: 0,
            submitted_at: String::new(),
            user: String::new(),
            problem: String::new(),
            result: String::new(),
            contest_url: String::new(),
        };
        let report = Report {
            rows: vec![row(1), row(1), row(4), row(2)],
            failures: Vec::new(),
        };
        assert_eq!(report.contests_with_rows(), 3);
    }
}
