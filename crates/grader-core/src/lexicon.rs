//! Case-insensitive whole-word keyword matching

use regex::{Regex, RegexBuilder};

use crate::Result;

/// A set of terms matched as whole words, ignoring case.
///
/// Terms are regex fragments; a literal space inside a term matches any run
/// of whitespace. A match can be vetoed by the text that immediately follows
/// it (e.g. a pronoun followed by a linking verb).
#[derive(Debug, Clone)]
pub struct Lexicon {
    source: String,
    regex: Regex,
    unless_followed_by: Option<Regex>,
}

impl Lexicon {
    /// Build a lexicon from a list of terms
    pub fn new(terms: &[&str]) -> Result<Self> {
        let alternatives = terms
            .iter()
            .map(|term| term.replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        Self::from_source(format!(r"\b(?:{})\b", alternatives))
    }

    /// Build a lexicon from a raw pattern
    pub fn from_source(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;

        Ok(Self {
            source,
            regex,
            unless_followed_by: None,
        })
    }

    /// Ignore matches directly followed by one of these terms
    pub fn unless_followed_by(mut self, terms: &[&str]) -> Result<Self> {
        let guard = format!(r"^\s+(?:{})\b", terms.join("|"));
        self.unless_followed_by = Some(RegexBuilder::new(&guard).case_insensitive(true).build()?);
        Ok(self)
    }

    /// Pattern source, usable as a highlight pattern with case-insensitive matching
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether any accepted match exists in the text
    pub fn is_match(&self, text: &str) -> bool {
        self.matches(text).next().is_some()
    }

    /// Number of accepted matches in the text
    pub fn count(&self, text: &str) -> usize {
        self.matches(text).count()
    }

    /// Byte ranges of the accepted matches
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = std::ops::Range<usize>> + 'a {
        self.regex
            .find_iter(text)
            .filter(move |m| match &self.unless_followed_by {
                Some(guard) => !guard.is_match(&text[m.end()..]),
                None => true,
            })
            .map(|m| m.range())
    }
}
