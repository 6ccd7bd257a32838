//! Wire shapes of the ejudge master JSON API.
//!
//! Every field is optional on the wire; missing and `null` values decode to
//! zero or the empty string, which is what the fallback rules in [`Run`]
//! expect.

use serde::{Deserialize, Deserializer};

use crate::error::ReportError;

/// Common `{ok, error, result}` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReply<T> {
    #[serde(default, deserialize_with = "null_default")]
    pub ok: bool,
    pub error: Option<ApiErrorPayload>,
    pub result: Option<T>,
}

impl<T> ApiReply<T> {
    /// Turns `ok: false` into [`ReportError::Api`]; an absent result is
    /// returned as `None` and left for the caller to interpret.
    pub fn into_result(self, contest_id: i64) -> Result<Option<T>, ReportError> {
        if !self.ok {
            return Err(ReportError::Api {
                contest_id,
                message: format_api_error(self.error.as_ref()),
            });
        }
        Ok(self.result)
    }
}

/// Reads an explicit `null` the same way as a missing key.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorPayload {
    #[serde(default, deserialize_with = "null_default")]
    pub log_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_default")]
    pub num: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub symbol: String,
}

/// Renders the structured API error as one line:
/// `message symbol=... num=... log_id=...`, omitting empty parts.
pub fn format_api_error(error: Option<&ApiErrorPayload>) -> String {
    let Some(error) = error else {
        return "unknown API error".to_string();
    };

    let mut parts = Vec::with_capacity(4);
    if !error.message.is_empty() {
        parts.push(error.message.clone());
    }
    if !error.symbol.is_empty() {
        parts.push(format!("symbol={}", error.symbol));
    }
    if error.num != 0 {
        parts.push(format!("num={}", error.num));
    }
    if !error.log_id.is_empty() {
        parts.push(format!("log_id={}", error.log_id));
    }

    if parts.is_empty() {
        "unknown API error".to_string()
    } else {
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContestStatus {
    #[serde(default, deserialize_with = "null_default")]
    pub contest: Contest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Contest {
    #[serde(default, deserialize_with = "null_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

/// One window of `list-runs-json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunPage {
    #[serde(default, deserialize_with = "null_default")]
    pub runs: Vec<Run>,
    #[serde(default, deserialize_with = "null_default")]
    pub first_run: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub last_run: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub filtered_runs: i64,
}

/// A submission exactly as the server reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Run {
    #[serde(deserialize_with = "null_default")]
    pub run_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub contest_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub user_login: String,
    #[serde(deserialize_with = "null_default")]
    pub user_name: String,
    #[serde(deserialize_with = "null_default")]
    pub prob_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub prob_name: String,
    #[serde(deserialize_with = "null_default")]
    pub status_str: String,
    #[serde(deserialize_with = "null_default")]
    pub score_str: String,
    #[serde(deserialize_with = "null_default")]
    pub status_desc: String,
    #[serde(deserialize_with = "null_default")]
    pub raw_score: i64,
    #[serde(deserialize_with = "null_default")]
    pub saved_score: i64,
    #[serde(deserialize_with = "null_default")]
    pub lang_name: String,
    #[serde(deserialize_with = "null_default")]
    pub test: i64,
    #[serde(deserialize_with = "null_default")]
    pub tests_passed: i64,
    /// Execution time in milliseconds.
    #[serde(rename = "run_time", deserialize_with = "null_default")]
    pub run_time_ms: i64,
    /// Submission timestamp, microseconds since the Unix epoch.
    #[serde(deserialize_with = "null_default")]
    pub run_time_us: i64,
}

impl Run {
    pub fn resolved_user(&self) -> String {
        first_non_empty(&self.user_login, &self.user_name)
    }

    pub fn resolved_problem(&self) -> String {
        if self.prob_name.is_empty() {
            self.prob_id.to_string()
        } else {
            self.prob_name.clone()
        }
    }

    pub fn resolved_status(&self) -> String {
        first_non_empty(&self.status_str, &self.status_desc)
    }

    pub fn resolved_score(&self) -> String {
        if self.score_str.is_empty() {
            self.saved_score.to_string()
        } else {
            self.score_str.clone()
        }
    }
}

fn first_non_empty(preferred: &str, fallback: &str) -> String {
    if preferred.is_empty() {
        fallback.to_string()
    } else {
        preferred.to_string()
    }
}
