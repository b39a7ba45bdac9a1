//! Grading criteria, weights and engine configuration

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default cap on the number of suggestions returned per prompt
pub const MAX_SUGGESTIONS: usize = 6;

/// Tolerance used when checking that the weights sum to 1.0
const WEIGHT_EPSILON: f64 = 1e-6;

/// The seven independently scored dimensions of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    Length,
    Clarity,
    Specificity,
    Context,
    Persona,
    Examples,
    Structure,
}

impl Criterion {
    /// Configuration key for this criterion
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::Length => "length",
            Criterion::Clarity => "clarity",
            Criterion::Specificity => "specificity",
            Criterion::Context => "context",
            Criterion::Persona => "persona",
            Criterion::Examples => "examples",
            Criterion::Structure => "structure",
        }
    }

    /// Display name, also used as the suggestion category
    pub fn display_name(&self) -> &'static str {
        match self {
            Criterion::Length => "Length",
            Criterion::Clarity => "Clarity",
            Criterion::Specificity => "Specificity",
            Criterion::Context => "Context",
            Criterion::Persona => "Persona",
            Criterion::Examples => "Examples",
            Criterion::Structure => "Structure",
        }
    }

    /// Icon shown next to suggestions of this category
    pub fn icon(&self) -> &'static str {
        match self {
            Criterion::Length => "📏",
            Criterion::Clarity => "💡",
            Criterion::Specificity => "🎯",
            Criterion::Context => "🔍",
            Criterion::Persona => "👤",
            Criterion::Examples => "📝",
            Criterion::Structure => "🏗️",
        }
    }

    /// All criteria in scoring order
    pub fn all() -> [Criterion; 7] {
        [
            Criterion::Length,
            Criterion::Clarity,
            Criterion::Specificity,
            Criterion::Context,
            Criterion::Persona,
            Criterion::Examples,
            Criterion::Structure,
        ]
    }

    /// Parse from a key or display name, case-insensitively
    pub fn from_name(s: &str) -> Option<Criterion> {
        Criterion::all()
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Weight of a single criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeight {
    pub weight: f64,
}

impl CriterionWeight {
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

/// Weight and word-count thresholds for the length criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthCriterion {
    pub weight: f64,
    /// Below this many words the score ramps linearly towards 60
    pub min: usize,
    /// From this many words on the score is 100
    pub optimal: usize,
    /// Past this many words the score decays towards 85
    pub comfort_limit: usize,
}

impl Default for LengthCriterion {
    fn default() -> Self {
        Self {
            weight: 0.15,
            min: 10,
            optimal: 50,
            comfort_limit: 100,
        }
    }
}

/// Weights table for all seven criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingCriteria {
    pub length: LengthCriterion,
    pub clarity: CriterionWeight,
    pub specificity: CriterionWeight,
    pub context: CriterionWeight,
    pub persona: CriterionWeight,
    pub examples: CriterionWeight,
    pub structure: CriterionWeight,
}

impl Default for GradingCriteria {
    fn default() -> Self {
        Self {
            length: LengthCriterion::default(),
            clarity: CriterionWeight::new(0.25),
            specificity: CriterionWeight::new(0.20),
            context: CriterionWeight::new(0.15),
            persona: CriterionWeight::new(0.10),
            examples: CriterionWeight::new(0.10),
            structure: CriterionWeight::new(0.05),
        }
    }
}

impl GradingCriteria {
    /// Weight configured for a criterion
    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Length => self.length.weight,
            Criterion::Clarity => self.clarity.weight,
            Criterion::Specificity => self.specificity.weight,
            Criterion::Context => self.context.weight,
            Criterion::Persona => self.persona.weight,
            Criterion::Examples => self.examples.weight,
            Criterion::Structure => self.structure.weight,
        }
    }

    /// Sum of all seven weights
    pub fn total_weight(&self) -> f64 {
        Criterion::all().iter().map(|c| self.weight(*c)).sum()
    }

    /// Check weights and length thresholds for consistency
    pub fn validate(&self) -> Result<()> {
        for criterion in Criterion::all() {
            let weight = self.weight(criterion);
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(Error::Configuration(format!(
                    "weight for '{}' must be within [0, 1], got {}",
                    criterion.key(),
                    weight
                )));
            }
        }

        let total = self.total_weight();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(Error::Configuration(format!(
                "criteria weights must sum to 1.0, got {:.4}",
                total
            )));
        }

        let length = &self.length;
        if length.min == 0 {
            return Err(Error::Configuration(
                "length.min must be at least 1 word".to_string(),
            ));
        }
        if length.optimal <= length.min {
            return Err(Error::Configuration(format!(
                "length.optimal ({}) must be greater than length.min ({})",
                length.optimal, length.min
            )));
        }
        if length.comfort_limit < length.optimal {
            return Err(Error::Configuration(format!(
                "length.comfort_limit ({}) must not be below length.optimal ({})",
                length.comfort_limit, length.optimal
            )));
        }

        Ok(())
    }
}

/// Full configuration consumed by the grader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    pub criteria: GradingCriteria,
    pub max_suggestions: usize,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            criteria: GradingCriteria::default(),
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

impl GradingConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GradingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the suggestion cap
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.criteria.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let criteria = GradingCriteria::default();
        assert!((criteria.total_weight() - 1.0).abs() < 1e-9);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_default_length_thresholds() {
        let length = LengthCriterion::default();
        assert_eq!(length.min, 10);
        assert_eq!(length.optimal, 50);
        assert_eq!(length.comfort_limit, 100);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut criteria = GradingCriteria::default();
        criteria.clarity = CriterionWeight::new(0.5);

        let err = criteria.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut criteria = GradingCriteria::default();
        criteria.persona = CriterionWeight::new(-0.1);
        criteria.examples = CriterionWeight::new(0.3);

        assert!(matches!(criteria.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_length_thresholds_validated() {
        let mut criteria = GradingCriteria::default();
        criteria.length.optimal = 10;
        assert!(criteria.validate().is_err());

        let mut criteria = GradingCriteria::default();
        criteria.length.min = 0;
        assert!(criteria.validate().is_err());

        let mut criteria = GradingCriteria::default();
        criteria.length.comfort_limit = 20;
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GradingConfig::from_json_str(r#"{ "max_suggestions": 3 }"#).unwrap();
        assert_eq!(config.max_suggestions, 3);
        assert_eq!(config.criteria, GradingCriteria::default());

        let config = GradingConfig::from_json_str(
            r#"{ "criteria": { "length": { "min": 5, "optimal": 30 } } }"#,
        )
        .unwrap();
        assert_eq!(config.criteria.length.min, 5);
        assert_eq!(config.criteria.length.optimal, 30);
        assert_eq!(config.criteria.length.weight, 0.15);
    }

    #[test]
    fn test_invalid_json_config() {
        let err = GradingConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));

        let err = GradingConfig::from_json_str(r#"{ "criteria": { "clarity": { "weight": 0.9 } } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_criterion_names() {
        assert_eq!(Criterion::Persona.key(), "persona");
        assert_eq!(Criterion::Persona.to_string(), "Persona");
        assert_eq!(Criterion::from_name("Specificity"), Some(Criterion::Specificity));
        assert_eq!(Criterion::from_name(" structure "), Some(Criterion::Structure));
        assert_eq!(Criterion::from_name("tone"), None);
    }
}
