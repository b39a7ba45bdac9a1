//! Request and response bodies shared by the HTTP API and its clients

use serde::{Deserialize, Serialize};

use crate::rating::ScoreBand;
use crate::suggestions::Suggestion;

/// Body of every `/api/prompts/*` request.
///
/// `prompt` is kept as raw JSON so that a missing, null or non-string value
/// degrades to an empty prompt instead of a rejected request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: serde_json::Value,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: serde_json::Value::String(prompt.into()),
        }
    }

    /// The prompt text, or `""` when absent or not a string
    pub fn text(&self) -> &str {
        self.prompt.as_str().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResponse {
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Score, rating and suggestions in one response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u8,
    pub label: String,
    pub band: ScoreBand,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
