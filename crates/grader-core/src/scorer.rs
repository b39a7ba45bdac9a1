//! Weighted composite scoring over seven sub-criteria
//!
//! Every criterion except length is described as data: a base value, a list
//! of signals that move it up or down, an optional bonus for hitting several
//! signals at once, and a clamp to `[0, 100]`. Length follows a piecewise
//! formula over the word count.

use serde::{Deserialize, Serialize};

use crate::criteria::{Criterion, GradingCriteria, LengthCriterion};
use crate::lexicon::Lexicon;
use crate::Result;

/// Score at which the length ramp hands over to interpolation
const LENGTH_RAMP_CEILING: f64 = 60.0;
/// Points lost per word beyond the comfort limit
const LENGTH_DECAY_PER_WORD: f64 = 0.5;
/// Lowest score a long prompt can decay to
const LENGTH_FLOOR: f64 = 85.0;

/// Score of a single criterion, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub criterion: Criterion,
    pub value: f64,
}

/// Composite score together with the sub-scores it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: u8,
    pub sub_scores: Vec<SubScore>,
}

impl ScoreBreakdown {
    /// Sub-score for a criterion, if it was evaluated
    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        self.sub_scores
            .iter()
            .find(|s| s.criterion == criterion)
            .map(|s| s.value)
    }
}

/// One row of the scoring table
pub trait CriterionScorer: Send + Sync {
    /// Criterion this scorer evaluates
    fn criterion(&self) -> Criterion;

    /// Score in `[0, 100]`
    fn score(&self, prompt: &str) -> f64;
}

/// Number of whitespace-separated words
pub fn word_count(prompt: &str) -> usize {
    prompt.split_whitespace().count()
}

/// Piecewise word-count score
pub struct LengthScorer {
    thresholds: LengthCriterion,
}

impl LengthScorer {
    pub fn new(thresholds: LengthCriterion) -> Self {
        Self { thresholds }
    }
}

impl CriterionScorer for LengthScorer {
    fn criterion(&self) -> Criterion {
        Criterion::Length
    }

    fn score(&self, prompt: &str) -> f64 {
        let words = word_count(prompt);
        let LengthCriterion {
            min,
            optimal,
            comfort_limit,
            ..
        } = self.thresholds;

        let value = if words < min {
            (words as f64 / min as f64) * LENGTH_RAMP_CEILING
        } else if words < optimal {
            let progress = (words - min) as f64 / (optimal - min) as f64;
            LENGTH_RAMP_CEILING + progress * (100.0 - LENGTH_RAMP_CEILING)
        } else if words <= comfort_limit {
            100.0
        } else {
            let excess = (words - comfort_limit) as f64;
            (100.0 - excess * LENGTH_DECAY_PER_WORD).max(LENGTH_FLOOR)
        };

        value.clamp(0.0, 100.0)
    }
}

/// Something observable in a prompt
pub enum Signal {
    Keywords(Lexicon),
    Predicate(fn(&str) -> bool),
}

impl Signal {
    fn fires(&self, prompt: &str) -> bool {
        match self {
            Signal::Keywords(lexicon) => lexicon.is_match(prompt),
            Signal::Predicate(check) => check(prompt),
        }
    }
}

/// A signal and how much it moves the score
pub struct Adjustment {
    pub signal: Signal,
    pub delta: f64,
}

impl Adjustment {
    pub fn keywords(terms: &[&str], delta: f64) -> Result<Self> {
        Ok(Self {
            signal: Signal::Keywords(Lexicon::new(terms)?),
            delta,
        })
    }

    pub fn predicate(check: fn(&str) -> bool, delta: f64) -> Self {
        Self {
            signal: Signal::Predicate(check),
            delta,
        }
    }
}

/// Extra points when at least `min_hits` adjustments fire
#[derive(Debug, Clone, Copy)]
pub struct Bonus {
    pub min_hits: usize,
    pub delta: f64,
}

/// Base value plus signal-driven adjustments, clamped to `[0, 100]`
pub struct SignalScorer {
    criterion: Criterion,
    base: f64,
    adjustments: Vec<Adjustment>,
    bonus: Option<Bonus>,
}

impl SignalScorer {
    pub fn new(criterion: Criterion, base: f64) -> Self {
        Self {
            criterion,
            base,
            adjustments: Vec::new(),
            bonus: None,
        }
    }

    pub fn adjust(mut self, adjustment: Adjustment) -> Self {
        self.adjustments.push(adjustment);
        self
    }

    pub fn with_bonus(mut self, min_hits: usize, delta: f64) -> Self {
        self.bonus = Some(Bonus { min_hits, delta });
        self
    }
}

impl CriterionScorer for SignalScorer {
    fn criterion(&self) -> Criterion {
        self.criterion
    }

    fn score(&self, prompt: &str) -> f64 {
        let mut value = self.base;
        let mut hits = 0;

        for adjustment in &self.adjustments {
            if adjustment.signal.fires(prompt) {
                value += adjustment.delta;
                hits += 1;
            }
        }

        if let Some(bonus) = self.bonus {
            if hits >= bonus.min_hits {
                value += bonus.delta;
            }
        }

        value.clamp(0.0, 100.0)
    }
}

fn has_terminal_punctuation(prompt: &str) -> bool {
    prompt.contains(['.', '!', '?'])
}

fn has_multiple_sentences(prompt: &str) -> bool {
    prompt
        .split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .count()
        >= 2
}

/// The built-in scoring table
pub fn default_rubric(length: LengthCriterion) -> Result<Vec<Box<dyn CriterionScorer>>> {
    let clarity = SignalScorer::new(Criterion::Clarity, 50.0)
        .adjust(Adjustment::keywords(
            &[
                "write", "create", "generate", "analyze", "explain", "describe", "list",
                "compare", "summarize", "outline", "design", "develop",
            ],
            25.0,
        )?)
        .adjust(Adjustment::keywords(
            &["what", "how", "why", "when", "where", "which", "who"],
            15.0,
        )?)
        .adjust(Adjustment::keywords(
            &["specifically", "exactly", "precisely", "clearly", "comprehensive", "detailed"],
            10.0,
        )?)
        .adjust(Adjustment::keywords(
            &["maybe", "perhaps", "kind of", "sort of", "something like", "might", "could be"],
            -15.0,
        )?)
        .adjust(Adjustment {
            signal: Signal::Keywords(vague_adjectives()?),
            delta: -10.0,
        });

    let specificity = SignalScorer::new(Criterion::Specificity, 20.0)
        .adjust(Adjustment::keywords(
            &["format", "style", "tone", "length", "structure", "template"],
            25.0,
        )?)
        .adjust(Adjustment::keywords(
            &[
                "professional", "casual", "formal", "informal", "technical", "simple",
                "detailed", "concise", "friendly", "approachable", "conversational",
                "persuasive", "humorous", "serious",
            ],
            20.0,
        )?)
        .adjust(Adjustment::keywords(
            &[r"\d+(?:-|\s*)(?:word|sentence|paragraph|point|step|item|section)s?"],
            25.0,
        )?)
        .adjust(Adjustment::keywords(
            &[
                "bullet points?", "numbered list", "table", "outline", "summary",
                "introduction", "conclusion",
            ],
            20.0,
        )?)
        .with_bonus(3, 10.0);

    let context = SignalScorer::new(Criterion::Context, 20.0)
        .adjust(Adjustment::keywords(
            &["background", "context", "situation", "scenario", "for", "because", "in order to"],
            25.0,
        )?)
        .adjust(Adjustment::keywords(
            &["audience", "target", "purpose", "goal", "objective", "intended for"],
            35.0,
        )?)
        .adjust(Adjustment::keywords(
            &["project", "company", "business", "academic", "research", "marketing", "industry"],
            30.0,
        )?)
        .with_bonus(2, 15.0);

    let persona = SignalScorer::new(Criterion::Persona, 0.0).adjust(Adjustment {
        signal: Signal::Keywords(persona_phrases()?),
        delta: 100.0,
    });

    let examples = SignalScorer::new(Criterion::Examples, 0.0).adjust(Adjustment {
        signal: Signal::Keywords(example_markers()?),
        delta: 100.0,
    });

    let structure = SignalScorer::new(Criterion::Structure, 75.0)
        .adjust(Adjustment::predicate(has_terminal_punctuation, 15.0))
        .adjust(Adjustment::predicate(has_multiple_sentences, 10.0))
        .adjust(Adjustment::keywords(
            &[
                "first", "second", "third", "finally", "also", "additionally", "structure",
                "sections", "introduction", "conclusion",
            ],
            10.0,
        )?);

    Ok(vec![
        Box::new(LengthScorer::new(length)),
        Box::new(clarity),
        Box::new(specificity),
        Box::new(context),
        Box::new(persona),
        Box::new(examples),
        Box::new(structure),
    ])
}

/// Role-assignment phrases
pub(crate) fn persona_phrases() -> Result<Lexicon> {
    Lexicon::new(&[
        "act as",
        "you are",
        "as a",
        "role of",
        "pretend",
        "imagine you",
        "assume you are",
    ])
}

/// Exemplification markers
pub(crate) fn example_markers() -> Result<Lexicon> {
    Lexicon::new(&[
        "example",
        "for instance",
        "such as",
        "like",
        "similar to",
        "including",
        r"e\.g",
        r"i\.e",
        "examples",
        "formulas",
        "templates",
    ])
}

/// Vague filler adjectives; "best practices" and the like are terms of art
fn vague_adjectives() -> Result<Lexicon> {
    Lexicon::new(&["good", "nice", "better", "best", "some", "many", "few"])?
        .unless_followed_by(&["practices?"])
}

/// Composite scorer over the seven criteria
pub struct PromptScorer {
    criteria: GradingCriteria,
    rubric: Vec<Box<dyn CriterionScorer>>,
}

impl PromptScorer {
    /// Build a scorer for the given weights table
    pub fn new(criteria: GradingCriteria) -> Result<Self> {
        criteria.validate()?;
        let rubric = default_rubric(criteria.length)?;
        Ok(Self { criteria, rubric })
    }

    pub fn criteria(&self) -> &GradingCriteria {
        &self.criteria
    }

    /// Composite score in `[0, 100]`
    pub fn score(&self, prompt: &str) -> u8 {
        self.breakdown(prompt).score
    }

    /// Composite score with every sub-score; blank prompts evaluate nothing
    pub fn breakdown(&self, prompt: &str) -> ScoreBreakdown {
        if prompt.trim().is_empty() {
            return ScoreBreakdown {
                score: 0,
                sub_scores: Vec::new(),
            };
        }

        let sub_scores: Vec<SubScore> = self
            .rubric
            .iter()
            .map(|scorer| SubScore {
                criterion: scorer.criterion(),
                value: scorer.score(prompt),
            })
            .collect();

        let total: f64 = sub_scores
            .iter()
            .map(|s| s.value * self.criteria.weight(s.criterion))
            .sum();

        ScoreBreakdown {
            score: total.round().clamp(0.0, 100.0) as u8,
            sub_scores,
        }
    }
}
