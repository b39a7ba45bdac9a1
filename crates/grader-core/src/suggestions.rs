//! Ordered suggestion rules
//!
//! Rules are evaluated in declaration order; the first `max` that hold are
//! returned. Order, not severity, decides what survives truncation.

use serde::{Deserialize, Serialize};

use crate::criteria::Criterion;
use crate::lexicon::Lexicon;
use crate::scorer::{example_markers, persona_phrases};
use crate::Result;

/// Prompts shorter than this many characters are "too short"
const TOO_SHORT_CHARS: usize = 20;
/// Prompts longer than this many characters are "too long"
const TOO_LONG_CHARS: usize = 500;
/// Prompts longer than this many characters should state a constraint
const CONSTRAINT_HINT_CHARS: usize = 100;
/// Segments tolerated before flagging multiple requests; each conjunction
/// counts as a segment of its own, so two conjunctions already exceed it
const MAX_REQUEST_SEGMENTS: usize = 3;

/// One improvement suggestion for a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub message: String,
    pub category: Criterion,
    /// Patterns marking the offending text; empty when something is missing
    #[serde(default)]
    pub highlight_patterns: Vec<String>,
}

/// When a rule fires
pub enum Condition {
    /// None of the terms appear
    Lacks(Lexicon),
    /// At least one of the terms appears
    Contains(Lexicon),
    /// Fewer characters than the bound
    ShorterThan(usize),
    /// More characters than the bound
    LongerThan(usize),
    /// Splitting on the separators, keeping each separator as a segment,
    /// yields more than `max` segments
    SegmentsAbove { separators: Lexicon, max: usize },
    /// Longer than `min_chars` and none of the terms appear
    LongAndLacks { min_chars: usize, lexicon: Lexicon },
}

impl Condition {
    pub fn holds(&self, prompt: &str) -> bool {
        match self {
            Condition::Lacks(lexicon) => !lexicon.is_match(prompt),
            Condition::Contains(lexicon) => lexicon.is_match(prompt),
            Condition::ShorterThan(chars) => prompt.chars().count() < *chars,
            Condition::LongerThan(chars) => prompt.chars().count() > *chars,
            Condition::SegmentsAbove { separators, max } => {
                2 * separators.count(prompt) + 1 > *max
            }
            Condition::LongAndLacks { min_chars, lexicon } => {
                prompt.chars().count() > *min_chars && !lexicon.is_match(prompt)
            }
        }
    }

    /// Pattern of the matched text, for conditions that fire on presence
    fn highlight(&self) -> Option<String> {
        match self {
            Condition::Contains(lexicon) => Some(lexicon.source().to_string()),
            Condition::SegmentsAbove { separators, .. } => Some(separators.source().to_string()),
            _ => None,
        }
    }
}

/// A row of the suggestion table
pub struct SuggestionRule {
    pub id: &'static str,
    pub category: Criterion,
    pub message: &'static str,
    pub condition: Condition,
    pub highlight_patterns: Vec<String>,
}

impl SuggestionRule {
    pub fn new(
        id: &'static str,
        category: Criterion,
        message: &'static str,
        condition: Condition,
    ) -> Self {
        let highlight_patterns = condition.highlight().into_iter().collect();
        Self {
            id,
            category,
            message,
            condition,
            highlight_patterns,
        }
    }

    pub fn applies_to(&self, prompt: &str) -> bool {
        self.condition.holds(prompt)
    }

    pub fn to_suggestion(&self) -> Suggestion {
        Suggestion {
            message: self.message.to_string(),
            category: self.category,
            highlight_patterns: self.highlight_patterns.clone(),
        }
    }
}

/// The built-in rule table, in evaluation order
pub fn default_rules() -> Result<Vec<SuggestionRule>> {
    Ok(vec![
        SuggestionRule::new(
            "missing-persona",
            Criterion::Persona,
            "Consider adding a persona or role for the AI (e.g., 'Act as a professional writer...', 'You are an expert in...')",
            Condition::Lacks(persona_phrases()?),
        ),
        SuggestionRule::new(
            "missing-examples",
            Criterion::Examples,
            "Adding specific examples or references would help clarify your expectations and improve output quality",
            Condition::Lacks(example_markers()?),
        ),
        SuggestionRule::new(
            "too-short",
            Criterion::Length,
            "Your prompt could be more detailed. Try adding more context about what you need and why",
            Condition::ShorterThan(TOO_SHORT_CHARS),
        ),
        SuggestionRule::new(
            "too-long",
            Criterion::Length,
            "Consider breaking down your prompt into smaller, more focused requests for better results",
            Condition::LongerThan(TOO_LONG_CHARS),
        ),
        SuggestionRule::new(
            "missing-format-specifics",
            Criterion::Specificity,
            "Be more specific about the format, style, or structure you want in the response",
            Condition::Lacks(Lexicon::new(&[
                "format", "style", "tone", "structure", "include", "avoid", "must", "should",
                "ensure", "make sure",
            ])?),
        ),
        SuggestionRule::new(
            "missing-context",
            Criterion::Context,
            "Provide more background context to help the AI understand your situation and goals",
            Condition::Lacks(Lexicon::new(&[
                "background", "context", "situation", "because", "for", "purpose", "goal",
                "in order to", "intended for",
            ])?),
        ),
        SuggestionRule::new(
            "missing-action-words",
            Criterion::Clarity,
            "Use clear action words like 'write', 'analyze', 'create', 'explain' to specify what you want",
            Condition::Lacks(Lexicon::new(&[
                "write", "create", "generate", "analyze", "explain", "describe", "list",
                "compare", "summarize", "outline", "design", "develop",
            ])?),
        ),
        SuggestionRule::new(
            "vague-language",
            Criterion::Specificity,
            "Avoid vague terms like 'good', 'nice', 'some'. Be specific about quantities, qualities, and requirements",
            Condition::Contains(
                Lexicon::new(&[
                    "good", "nice", "better", "best", "some", "many", "few", "thing", "stuff",
                    "kind of", "sort of",
                ])?
                .unless_followed_by(&["practices?"])?,
            ),
        ),
        SuggestionRule::new(
            "missing-output-format",
            Criterion::Structure,
            "Specify the desired output format (e.g., bullet points, paragraph, table, step-by-step)",
            Condition::Lacks(Lexicon::new(&[
                "bullet points?", "numbered list", "table", "outline", "summary", "paragraphs?",
                "essay", "report", "step-by-step", "blog post", "article", "email", "letter",
            ])?),
        ),
        SuggestionRule::new(
            "missing-tone",
            Criterion::Specificity,
            "Consider specifying the tone you want (professional, casual, technical, friendly, etc.)",
            Condition::Lacks(Lexicon::new(&[
                "professional", "casual", "formal", "informal", "technical", "simple", "friendly",
                "serious", "humorous", "persuasive",
            ])?),
        ),
        SuggestionRule::new(
            "multiple-requests",
            Criterion::Structure,
            "Consider breaking this into separate prompts for each distinct request to get better focused responses",
            Condition::SegmentsAbove {
                separators: Lexicon::new(&[
                    "and", "also", "additionally", "furthermore", "moreover", "plus",
                ])?,
                max: MAX_REQUEST_SEGMENTS,
            },
        ),
        SuggestionRule::new(
            "missing-constraints",
            Criterion::Specificity,
            "Add constraints like word count, time limits, or specific requirements to guide the response",
            Condition::LongAndLacks {
                min_chars: CONSTRAINT_HINT_CHARS,
                lexicon: Lexicon::new(&[
                    r"\d+(?:-|\s*)(?:word|character|sentence|paragraph|minute|hour|page)s?",
                    "within", "under", "maximum", "minimum", "at least", "no more than", "limit",
                    "restrict",
                ])?,
            },
        ),
        SuggestionRule::new(
            "unclear-pronouns",
            Criterion::Clarity,
            "Replace unclear pronouns like 'it', 'this', 'that' with specific nouns for better clarity",
            Condition::Contains(
                Lexicon::new(&["it", "this", "that", "these", "those"])?.unless_followed_by(&[
                    "is", "are", "was", "were", "will", "would", "should", "could",
                ])?,
            ),
        ),
        SuggestionRule::new(
            "filler-words",
            Criterion::Clarity,
            "Remove filler words like 'um', 'uh', 'like', 'you know' to make your prompt more direct",
            Condition::Contains(Lexicon::new(&[
                "um", "uh", "like", "you know", "basically", "actually", "literally",
            ])?),
        ),
    ])
}

/// Evaluates the rule table against prompts
pub struct SuggestionEngine {
    rules: Vec<SuggestionRule>,
}

impl SuggestionEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: default_rules()?,
        })
    }

    /// Engine over a custom rule table
    pub fn with_rules(rules: Vec<SuggestionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SuggestionRule] {
        &self.rules
    }

    /// Every rule that holds for the prompt, in declaration order
    pub fn matching_rules<'a>(&'a self, prompt: &'a str) -> impl Iterator<Item = &'a SuggestionRule> + 'a {
        self.rules.iter().filter(move |rule| rule.applies_to(prompt))
    }

    /// At most `max` suggestions; blank prompts get none
    pub fn suggest(&self, prompt: &str, max: usize) -> Vec<Suggestion> {
        if prompt.trim().is_empty() {
            return Vec::new();
        }

        self.matching_rules(prompt)
            .take(max)
            .map(SuggestionRule::to_suggestion)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SuggestionEngine {
        SuggestionEngine::new().unwrap()
    }

    fn fired(prompt: &str) -> Vec<&'static str> {
        let engine = engine();
        engine.matching_rules(prompt).map(|r| r.id).collect()
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let ids: Vec<_> = engine().rules().iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                "missing-persona",
                "missing-examples",
                "too-short",
                "too-long",
                "missing-format-specifics",
                "missing-context",
                "missing-action-words",
                "vague-language",
                "missing-output-format",
                "missing-tone",
                "multiple-requests",
                "missing-constraints",
                "unclear-pronouns",
                "filler-words",
            ]
        );
    }

    #[test]
    fn test_truncates_to_max_in_declaration_order() {
        let suggestions = engine().suggest("hi", 3);
        let categories: Vec<_> = suggestions.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![Criterion::Persona, Criterion::Examples, Criterion::Length]
        );
        assert!(engine().suggest("hi", 0).is_empty());
    }

    #[test]
    fn test_blank_prompt_short_circuits() {
        assert!(engine().suggest("", 6).is_empty());
        assert!(engine().suggest("  \n ", 6).is_empty());
    }

    #[test]
    fn test_persona_rule() {
        assert!(fired("Write a poem").contains(&"missing-persona"));
        assert!(!fired("You are a poet. Write a poem").contains(&"missing-persona"));
    }

    #[test]
    fn test_length_rules() {
        assert!(fired("Write a poem").contains(&"too-short"));
        assert!(!fired("Write a poem about autumn").contains(&"too-short"));

        let long = "word ".repeat(101);
        let ids = fired(&long);
        assert!(ids.contains(&"too-long"));
        assert!(!ids.contains(&"too-short"));
    }

    #[test]
    fn test_vague_language_with_highlight() {
        let engine = engine();
        let rule = engine
            .matching_rules("Write some good stuff")
            .find(|r| r.id == "vague-language")
            .expect("vague rule fires");
        assert_eq!(rule.highlight_patterns.len(), 1);
        assert!(rule.highlight_patterns[0].contains("stuff"));

        assert!(!fired("Summarize security best practices").contains(&"vague-language"));
    }

    #[test]
    fn test_multiple_requests_fires_from_two_conjunctions() {
        assert!(fired("Write a poem and a song and a story").contains(&"multiple-requests"));
        assert!(fired("Write a poem, also a song plus a story").contains(&"multiple-requests"));
        assert!(fired("Write a poem and a song and a story and also a joke").contains(&"multiple-requests"));
    }

    #[test]
    fn test_single_conjunction_is_one_request() {
        assert!(!fired("Write a poem and a song").contains(&"multiple-requests"));
        assert!(!fired("Write a poem about the sea").contains(&"multiple-requests"));
        assert!(!fired("Handle android sandboxes and bands").contains(&"multiple-requests"));
    }

    #[test]
    fn test_vague_highlight_is_wider_than_the_rule() {
        let prompt = "Write some tips on email best practices";
        let engine = engine();
        let rule = engine
            .rules()
            .iter()
            .find(|r| r.id == "vague-language")
            .unwrap();

        let Condition::Contains(lexicon) = &rule.condition else {
            panic!("vague-language fires on presence");
        };
        let matched: Vec<_> = lexicon.matches(prompt).map(|r| &prompt[r]).collect();
        assert_eq!(matched, vec!["some"]);

        let highlighted: Vec<_> = crate::highlight::find_spans(prompt, &rule.highlight_patterns)
            .into_iter()
            .map(|r| &prompt[r])
            .collect();
        assert_eq!(highlighted, vec!["some", "best"]);
    }

    #[test]
    fn test_constraints_only_for_long_prompts() {
        let short = "Write a poem about the sea";
        assert!(!fired(short).contains(&"missing-constraints"));

        let long = "Write a poem about the sea, the sky, the wind over the harbour, and the fishing boats that come home at dusk";
        assert!(long.len() > 100);
        assert!(fired(long).contains(&"missing-constraints"));

        let bounded = format!("{} in 12 lines, no more than 80 words", long);
        assert!(!fired(&bounded).contains(&"missing-constraints"));
    }

    #[test]
    fn test_unclear_pronouns() {
        assert!(fired("Fix it").contains(&"unclear-pronouns"));
        assert!(!fired("This is a draft letter").contains(&"unclear-pronouns"));
        assert!(!fired("Write a haiku about snow").contains(&"unclear-pronouns"));
    }

    #[test]
    fn test_filler_words() {
        assert!(fired("Basically write a poem").contains(&"filler-words"));
        assert!(!fired("Write a poem").contains(&"filler-words"));
    }

    #[test]
    fn test_missing_element_rules_have_no_highlight() {
        for rule in engine().rules() {
            let presence = matches!(
                rule.condition,
                Condition::Contains(_) | Condition::SegmentsAbove { .. }
            );
            assert_eq!(presence, !rule.highlight_patterns.is_empty(), "rule {}", rule.id);
        }
    }

    #[test]
    fn test_suggestion_wire_format() {
        let suggestion = Suggestion {
            message: "Add an example".to_string(),
            category: Criterion::Examples,
            highlight_patterns: vec![],
        };
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Add an example",
                "category": "Examples",
                "highlightPatterns": []
            })
        );
    }
}
