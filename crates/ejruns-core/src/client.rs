//! Authenticated GET against the ejudge master API.
//!
//! One attempt per call: network failures, non-200 statuses and malformed
//! bodies are surfaced to the caller as-is. Status errors are raised before
//! the body is decoded.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ReportError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ReportError> {
        let http = Client::builder()
            .user_agent(concat!("ejruns/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.trimmed_base_url().to_string(),
            token: config.token.clone().filter(|token| !token.is_empty()),
            http,
        })
    }

    /// Base URL with trailing slashes removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ReportError> {
        let url = self.endpoint(path)?;

        let mut builder = self.http.get(url.clone()).query(query);
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, token.as_str());
        }

        debug!(url = %url, params = query.len(), "GET");
        let response = builder.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ReportError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ReportError> {
        if self.base_url.is_empty() {
            return Err(ReportError::config("base URL is required"));
        }

        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|err| ReportError::config(format!("invalid base URL: {}", err)))
    }
}
