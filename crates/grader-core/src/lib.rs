//! Core engine for Prompt Grader
//!
//! Grades free-text prompts written for AI systems. A prompt is scored from
//! 0 to 100 over seven weighted criteria (length, clarity, specificity,
//! context, persona, examples, structure), and an ordered rule table produces
//! short, actionable suggestions. Everything here is deterministic and free
//! of I/O; the HTTP server and the CLI build on top of it.

pub mod criteria;
pub mod error;
pub mod grader;
pub mod highlight;
pub mod lexicon;
pub mod rating;
pub mod scorer;
pub mod suggestions;
pub mod types;

#[cfg(test)]
mod tests;

pub use criteria::{
    Criterion, CriterionWeight, GradingConfig, GradingCriteria, LengthCriterion, MAX_SUGGESTIONS,
};
pub use error::{Error, Result};
pub use grader::{
    default_grader, generate_suggestions, grade_prompt, PromptGrader, PERFECT_PROMPT_EXAMPLE,
};
pub use rating::{score_label, Rating, ScoreBand};
pub use scorer::{word_count, CriterionScorer, PromptScorer, ScoreBreakdown, SubScore};
pub use suggestions::{Suggestion, SuggestionEngine, SuggestionRule};
pub use types::*;
