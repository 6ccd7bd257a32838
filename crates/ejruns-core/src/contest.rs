use tracing::debug;

use crate::api::{ApiReply, ContestStatus};
use crate::client::ApiClient;
use crate::config::CONTEST_STATUS_PATH;
use crate::error::ReportError;

/// Looks up the display name of one contest.
///
/// A blank name on the server side is replaced by `contest <id>`; a reply
/// without a result payload is an error.
pub async fn fetch_contest_name(
    client: &ApiClient,
    contest_id: i64,
) -> Result<String, ReportError> {
    let params = [("contest_id", contest_id.to_string())];

    let reply: ApiReply<ContestStatus> = client.get(CONTEST_STATUS_PATH, &params).await?;
    let status = reply
        .into_result(contest_id)?
        .ok_or(ReportError::EmptyResult { contest_id })?;

    let name = status.contest.name;
    if name.is_empty() {
        debug!(contest_id, "contest has no name, using placeholder");
        return Ok(placeholder_name(contest_id));
    }
    Ok(name)
}

pub fn placeholder_name(contest_id: i64) -> String {
    format!("contest {}", contest_id)
}
