use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("perform request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
    #[error("decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("contest {contest_id}: {message}")]
    Api { contest_id: i64, message: String },
    #[error("contest {contest_id}: empty response")]
    EmptyResult { contest_id: i64 },
}

impl ReportError {
    pub fn config<T: Into<String>>(message: T) -> Self {
        ReportError::Config(message.into())
    }

    /// True for failures reported by the judging service itself rather than
    /// by the network or the client.
    pub fn is_api(&self) -> bool {
        matches!(
            self,
            ReportError::Api { .. } | ReportError::EmptyResult { .. }
        )
    }
}
