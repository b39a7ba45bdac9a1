//! Where prompts get graded: in process or against a remote API

use async_trait::async_trait;
use grader_core::{Error, Evaluation, PromptGrader, Result, ScoreBreakdown, Suggestion};

/// A source of grades and suggestions
#[async_trait]
pub trait GradingBackend: Send + Sync {
    /// Short description for logs and the banner
    fn name(&self) -> String;

    async fn grade(&self, prompt: &str) -> Result<u8>;

    /// Suggestions, capped at `max` when given
    async fn suggest(&self, prompt: &str, max: Option<usize>) -> Result<Vec<Suggestion>>;

    async fn evaluate(&self, prompt: &str) -> Result<Evaluation>;

    /// Per-criterion sub-scores
    async fn breakdown(&self, prompt: &str) -> Result<ScoreBreakdown>;
}

/// Grades with an in-process [`PromptGrader`]
pub struct LocalBackend {
    grader: PromptGrader,
}

impl LocalBackend {
    pub fn new(grader: PromptGrader) -> Self {
        Self { grader }
    }

    pub fn grader(&self) -> &PromptGrader {
        &self.grader
    }
}

#[async_trait]
impl GradingBackend for LocalBackend {
    fn name(&self) -> String {
        "local".to_string()
    }

    async fn grade(&self, prompt: &str) -> Result<u8> {
        Ok(self.grader.grade(prompt))
    }

    async fn suggest(&self, prompt: &str, max: Option<usize>) -> Result<Vec<Suggestion>> {
        Ok(match max {
            Some(max) => self.grader.suggest_at_most(prompt, max),
            None => self.grader.suggest(prompt),
        })
    }

    async fn evaluate(&self, prompt: &str) -> Result<Evaluation> {
        Ok(self.grader.evaluate(prompt))
    }

    async fn breakdown(&self, prompt: &str) -> Result<ScoreBreakdown> {
        Ok(self.grader.breakdown(prompt))
    }
}

pub(crate) fn breakdown_unavailable(backend: &str) -> Error {
    Error::InvalidInput(format!(
        "score breakdown is only available with the local grader, not {}",
        backend
    ))
}
