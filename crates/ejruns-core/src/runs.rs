use tracing::debug;

use crate::api::{ApiReply, Run, RunPage};
use crate::client::ApiClient;
use crate::config::{LIST_RUNS_PATH, ListOptions};
use crate::error::ReportError;

/// Run index the first window starts at.
pub const FIRST_RUN_INDEX: i64 = 1;

/// What the lister does after a page has been appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Continue { next_cursor: i64 },
    Done(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    NoResult,
    EmptyPage,
    NoProgress,
    FilteredRunsReached,
}

/// Decides whether another window is needed. `accumulated` counts the runs
/// collected so far, including this page's.
pub fn next_step(page: Option<&RunPage>, accumulated: usize) -> PageStep {
    let Some(page) = page else {
        return PageStep::Done(StopReason::NoResult);
    };
    if page.runs.is_empty() {
        return PageStep::Done(StopReason::EmptyPage);
    }
    if page.last_run <= page.first_run {
        return PageStep::Done(StopReason::NoProgress);
    }
    if page.filtered_runs > 0 && accumulated as i64 >= page.filtered_runs {
        return PageStep::Done(StopReason::FilteredRunsReached);
    }
    PageStep::Continue {
        next_cursor: page.last_run.saturating_add(1),
    }
}

/// Query parameters for the window starting at `cursor`.
pub fn page_params(
    contest_id: i64,
    options: &ListOptions,
    cursor: i64,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("contest_id", contest_id.to_string())];
    if !options.filter_expr.is_empty() {
        params.push(("filter_expr", options.filter_expr.clone()));
    }
    if options.page_size > 0 {
        params.push(("first_run", cursor.to_string()));
        let last_run = cursor.saturating_add(options.page_size - 1);
        params.push(("last_run", last_run.to_string()));
    }
    if options.field_mask > 0 {
        params.push(("field_mask", options.field_mask.to_string()));
    }
    params
}

/// Walks `list-runs-json` windows until the server runs out of runs.
///
/// Runs come back in fetch order. A failing page aborts the whole listing.
pub async fn list_runs(
    client: &ApiClient,
    contest_id: i64,
    options: &ListOptions,
) -> Result<Vec<Run>, ReportError> {
    let mut runs = Vec::new();
    let mut cursor = FIRST_RUN_INDEX;
    let mut pages = 0usize;

    loop {
        let params = page_params(contest_id, options, cursor);
        let reply: ApiReply<RunPage> = client.get(LIST_RUNS_PATH, &params).await?;
        let page = reply.into_result(contest_id)?;
        pages += 1;

        let step = match page {
            Some(page) => {
                debug!(
                    contest_id,
                    cursor,
                    first_run = page.first_run,
                    last_run = page.last_run,
                    filtered_runs = page.filtered_runs,
                    fetched = page.runs.len(),
                    "fetched run page"
                );
                let step = next_step(Some(&page), runs.len() + page.runs.len());
                runs.extend(page.runs);
                step
            }
            None => next_step(None, runs.len()),
        };

        match step {
            PageStep::Continue { next_cursor } => cursor = next_cursor,
            PageStep::Done(reason) => {
                debug!(contest_id, pages, total = runs.len(), ?reason, "run listing complete");
                break;
            }
        }
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: usize, first_run: i64, last_run: i64, filtered_runs: i64) -> RunPage {
        RunPage {
            runs: (0..count)
                .map(|i| Run {
                    run_id: first_run + i as i64,
                    ..Run::default()
                })
                .collect(),
            first_run,
            last_run,
            filtered_runs,
        }
    }

    #[test]
    fn missing_result_stops_without_error() {
        assert_eq!(next_step(None, 0), PageStep::Done(StopReason::NoResult));
    }

    #[test]
    fn empty_page_stops() {
        let empty = page(0, 1, 200, 0);
        assert_eq!(
            next_step(Some(&empty), 0),
            PageStep::Done(StopReason::EmptyPage)
        );
    }

    #[test]
    fn last_run_not_past_first_run_stops() {
        let single = page(1, 7, 7, 0);
        assert_eq!(
            next_step(Some(&single), 1),
            PageStep::Done(StopReason::NoProgress)
        );

        let backwards = page(2, 9, 4, 0);
        assert_eq!(
            next_step(Some(&backwards), 2),
            PageStep::Done(StopReason::NoProgress)
        );
    }

    #[test]
    fn reaching_filtered_runs_stops_even_with_room_left() {
        let full = page(5, 1, 5, 5);
        assert_eq!(
            next_step(Some(&full), 5),
            PageStep::Done(StopReason::FilteredRunsReached)
        );
    }

    #[test]
    fn progressing_page_advances_past_last_run() {
        let partial = page(2, 1, 2, 5);
        assert_eq!(
            next_step(Some(&partial), 2),
            PageStep::Continue { next_cursor: 3 }
        );

        let unknown_total = page(3, 10, 12, 0);
        assert_eq!(
            next_step(Some(&unknown_total), 3),
            PageStep::Continue { next_cursor: 13 }
        );
    }

    #[test]
    fn cursor_arithmetic_saturates_at_the_top_of_the_range() {
        let top = page(2, i64::MAX - 1, i64::MAX, 0);
        assert_eq!(
            next_step(Some(&top), 2),
            PageStep::Continue {
                next_cursor: i64::MAX
            }
        );

        let options = ListOptions {
            page_size: i64::MAX,
            ..ListOptions::default()
        };
        assert_eq!(
            page_params(1, &options, 6),
            vec![
                ("contest_id", "1".to_string()),
                ("first_run", "6".to_string()),
                ("last_run", i64::MAX.to_string()),
            ]
        );
    }

    #[test]
    fn params_include_window_only_for_positive_page_size() {
        let options = ListOptions {
            filter_expr: String::new(),
            page_size: 50,
            field_mask: 0,
        };
        assert_eq!(
            page_params(4, &options, 51),
            vec![
                ("contest_id", "4".to_string()),
                ("first_run", "51".to_string()),
                ("last_run", "100".to_string()),
            ]
        );

        let options = ListOptions {
            filter_expr: "status == OK".to_string(),
            page_size: 0,
            field_mask: 0x1f,
        };
        assert_eq!(
            page_params(4, &options, 1),
            vec![
                ("contest_id", "4".to_string()),
                ("filter_expr", "status == OK".to_string()),
                ("field_mask", "31".to_string()),
            ]
        );
    }
}
