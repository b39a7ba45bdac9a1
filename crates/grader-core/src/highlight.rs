//! Applying suggestion highlight patterns to the original prompt

use std::ops::Range;

use regex::RegexBuilder;
use tracing::warn;

/// Byte ranges of `text` matched by any of the patterns, sorted and merged.
///
/// Patterns are applied case-insensitively; a pattern that fails to compile
/// is skipped.
pub fn find_spans<S: AsRef<str>>(text: &str, patterns: &[S]) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => spans.extend(
                regex
                    .find_iter(text)
                    .filter(|m| !m.is_empty())
                    .map(|m| m.range()),
            ),
            Err(e) => warn!(pattern, error = %e, "skipping invalid highlight pattern"),
        }
    }

    spans.sort_by_key(|span| (span.start, span.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Wrap every highlighted span of `text` in `open` / `close`
pub fn mark<S: AsRef<str>>(text: &str, patterns: &[S], open: &str, close: &str) -> String {
    mark_with(text, patterns, |span| format!("{}{}{}", open, span, close))
}

/// Replace every highlighted span of `text` with `render(span)`
pub fn mark_with<S, F>(text: &str, patterns: &[S], mut render: F) -> String
where
    S: AsRef<str>,
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for span in find_spans(text, patterns) {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&render(&text[span.clone()]));
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
