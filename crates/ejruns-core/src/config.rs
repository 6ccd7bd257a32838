use std::env;
use std::time::Duration;

use crate::error::ReportError;

pub const CONTEST_STATUS_PATH: &str = "/ej/api/v1/master/contest-status-json";
pub const LIST_RUNS_PATH: &str = "/ej/api/v1/master/list-runs-json";
/// Path segment of the contest view linked from every report row.
pub const CONTEST_VIEW_PATH: &str = "/ej/contest";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: i64 = 200;

pub const BASE_URL_ENV: &str = "EJUDGE_BASE_URL";
pub const TOKEN_ENV: &str = "EJUDGE_TOKEN";
pub const TIMEOUT_ENV: &str = "EJUDGE_TIMEOUT_SECS";

/// Connection settings for the ejudge master API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token<T: Into<String>>(mut self, token: T) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Environment defaults, read once at startup. Unset variables fall back
    /// to an empty base URL, no token and the 30 second timeout.
    pub fn from_env() -> Result<Self, ReportError> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_default();
        let token = env::var(TOKEN_ENV).ok().filter(|value| !value.is_empty());
        let timeout_secs = parse_env(TIMEOUT_ENV, DEFAULT_TIMEOUT_SECS, parse_timeout_secs)?;

        Ok(Self {
            base_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Base URL without trailing slashes.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Parameters forwarded to every `list-runs-json` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Server-side filter; sent only when non-empty.
    pub filter_expr: String,
    /// Window size; `<= 0` lets the server pick the page.
    pub page_size: i64,
    /// Sent only when `> 0`.
    pub field_mask: i64,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            filter_expr: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            field_mask: 0,
        }
    }
}

/// Everything one report invocation needs, resolved before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub api: ApiConfig,
    pub list: ListOptions,
    pub contest_ids: Vec<i64>,
}

/// Whole seconds, at least one; a zero timeout would fail every request.
fn parse_timeout_secs(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("timeout must be at least 1 second".to_string()),
        Ok(secs) => Ok(secs),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_env<T, F, E>(var: &str, default: T, mut parser: F) -> Result<T, ReportError>
where
    F: FnMut(&str) -> Result<T, E>,
    E: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(default),
        Ok(value) => parser(&value).map_err(|err| {
            ReportError::Config(format!("invalid value for {}: {}", var, err))
        }),
        Err(_) => Ok(default),
    }
}
