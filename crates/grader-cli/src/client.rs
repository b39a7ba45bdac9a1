//! Client for a remote Prompt Grader API

use std::time::Duration;

use async_trait::async_trait;
use grader_core::{
    Error, ErrorResponse, Evaluation, GradeResponse, PromptRequest, Result, ScoreBreakdown,
    Suggestion, SuggestionsResponse,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::backend::{breakdown_unavailable, GradingBackend};

/// Requests that take longer than this are abandoned
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
const NOT_FOUND_MESSAGE: &str = "Service not found. Please check your connection.";
const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

/// Grades prompts by calling a Prompt Grader HTTP API
pub struct RemoteGrader {
    base_url: Url,
    client: Client,
}

impl RemoteGrader {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| Error::Configuration(format!("invalid server URL '{}': {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an API path such as `api/prompts/grade`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Configuration(e.to_string()))
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, prompt: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "posting prompt");

        let response = self
            .client
            .post(url)
            .json(&PromptRequest::new(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(status_message(status, &body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(TIMEOUT_MESSAGE.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

/// User-facing message for a failed API response
pub fn status_message(status: StatusCode, body: &str) -> String {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => SERVER_ERROR_MESSAGE.to_string(),
        StatusCode::NOT_FOUND => NOT_FOUND_MESSAGE.to_string(),
        _ => serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("Request failed with status {}", status)),
    }
}

#[async_trait]
impl GradingBackend for RemoteGrader {
    fn name(&self) -> String {
        self.base_url.to_string()
    }

    async fn grade(&self, prompt: &str) -> Result<u8> {
        let response: GradeResponse = self.post("api/prompts/grade", prompt).await?;
        Ok(response.score)
    }

    async fn suggest(&self, prompt: &str, max: Option<usize>) -> Result<Vec<Suggestion>> {
        let response: SuggestionsResponse = self.post("api/prompts/suggestions", prompt).await?;
        let mut suggestions = response.suggestions;
        if let Some(max) = max {
            suggestions.truncate(max);
        }
        Ok(suggestions)
    }

    async fn evaluate(&self, prompt: &str) -> Result<Evaluation> {
        self.post("api/prompts/analyze", prompt).await
    }

    async fn breakdown(&self, _prompt: &str) -> Result<ScoreBreakdown> {
        Err(breakdown_unavailable(&self.name()))
    }
}
