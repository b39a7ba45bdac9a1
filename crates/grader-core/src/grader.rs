//! The grader: scorer and suggestion engine behind one configuration

use std::sync::LazyLock;

use tracing::{debug, error};

use crate::criteria::GradingConfig;
use crate::rating::Rating;
use crate::scorer::{PromptScorer, ScoreBreakdown};
use crate::suggestions::{Suggestion, SuggestionEngine};
use crate::types::Evaluation;
use crate::Result;

/// A prompt that scores 100 under the default configuration
pub const PERFECT_PROMPT_EXAMPLE: &str = "Act as an experienced content marketing strategist and write a comprehensive 800-word blog post about email marketing best practices for small businesses. The post should be written in a professional yet approachable tone, similar to HubSpot's blog style. Structure it with an engaging introduction, 5 main sections with actionable tips, and a compelling conclusion with a call-to-action. Include specific examples such as subject line formulas and email templates. The target audience is small business owners with limited marketing experience who want to improve their email open rates and conversions because they need cost-effective marketing strategies.";

/// Grades prompts and suggests improvements.
///
/// Immutable once built, so one instance can be shared across threads.
pub struct PromptGrader {
    config: GradingConfig,
    scorer: PromptScorer,
    suggestions: SuggestionEngine,
}

impl PromptGrader {
    /// Build a grader, validating the configuration
    pub fn new(config: GradingConfig) -> Result<Self> {
        config.validate()?;
        let scorer = PromptScorer::new(config.criteria.clone())?;
        let suggestions = SuggestionEngine::new()?;

        Ok(Self {
            config,
            scorer,
            suggestions,
        })
    }

    /// Grader with the default weights and suggestion cap
    pub fn with_defaults() -> Result<Self> {
        Self::new(GradingConfig::default())
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    pub fn suggestion_engine(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    /// Composite score in `[0, 100]`
    pub fn grade(&self, prompt: &str) -> u8 {
        self.scorer.score(prompt)
    }

    /// Composite score with the seven sub-scores
    pub fn breakdown(&self, prompt: &str) -> ScoreBreakdown {
        self.scorer.breakdown(prompt)
    }

    /// Up to `max_suggestions` suggestions in rule order
    pub fn suggest(&self, prompt: &str) -> Vec<Suggestion> {
        self.suggest_at_most(prompt, self.config.max_suggestions)
    }

    /// Suggestions with an explicit cap
    pub fn suggest_at_most(&self, prompt: &str, max: usize) -> Vec<Suggestion> {
        self.suggestions.suggest(prompt, max)
    }

    /// Score, rating and suggestions together
    pub fn evaluate(&self, prompt: &str) -> Evaluation {
        let score = self.grade(prompt);
        let rating = Rating::of(score);
        let suggestions = self.suggest(prompt);

        debug!(
            score,
            label = rating.label,
            suggestions = suggestions.len(),
            "evaluated prompt"
        );

        Evaluation {
            score,
            label: rating.label.to_string(),
            band: rating.band,
            suggestions,
        }
    }
}

static DEFAULT_GRADER: LazyLock<Option<PromptGrader>> =
    LazyLock::new(|| match PromptGrader::with_defaults() {
        Ok(grader) => Some(grader),
        Err(e) => {
            error!(error = %e, "failed to build the default grader");
            None
        }
    });

/// Shared grader with the default configuration
pub fn default_grader() -> Option<&'static PromptGrader> {
    DEFAULT_GRADER.as_ref()
}

/// Score a prompt with the default configuration; 0 if no grader is available
pub fn grade_prompt(prompt: &str) -> u8 {
    default_grader().map_or(0, |grader| grader.grade(prompt))
}

/// Suggestions under the default configuration; empty if no grader is available
pub fn generate_suggestions(prompt: &str) -> Vec<Suggestion> {
    default_grader().map_or_else(Vec::new, |grader| grader.suggest(prompt))
}
