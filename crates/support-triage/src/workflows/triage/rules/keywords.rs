use regex::{Regex, RegexBuilder};

use super::super::error::TriageError;

/// Compiled keyword list matched case-insensitively at word starts.
///
/// A keyword must begin at a word boundary but may run into a longer word, so
/// `thank` matches "thanks" while `sue` does not match inside "issue". Keywords
/// that open with punctuation (`#legal`, `!!!`) must not follow a word character.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    entries: Vec<Keyword>,
}

#[derive(Debug, Clone)]
struct Keyword {
    term: String,
    pattern: Regex,
}

impl KeywordSet {
    pub fn compile(label: &str, terms: &[String]) -> Result<Self, TriageError> {
        let mut entries = Vec::with_capacity(terms.len());
        for raw in terms {
            let term = raw.trim();
            if term.is_empty() {
                return Err(TriageError::invalid(format!("blank keyword in {label}")));
            }
            let pattern = RegexBuilder::new(&word_start_pattern(term))
                .case_insensitive(true)
                .build()
                .map_err(|err| {
                    TriageError::invalid(format!("keyword '{term}' in {label}: {err}"))
                })?;
            entries.push(Keyword {
                term: term.to_string(),
                pattern,
            });
        }
        Ok(Self { entries })
    }

    /// Total number of keyword hits, counting repeats.
    pub fn count_occurrences(&self, text: &str) -> usize {
        self.entries
            .iter()
            .map(|keyword| keyword.pattern.find_iter(text).count())
            .sum()
    }

    /// Keywords present at least once, in configured order.
    pub fn distinct_matches(&self, text: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|keyword| keyword.pattern.is_match(text))
            .map(|keyword| keyword.term.as_str())
            .collect()
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.entries
            .iter()
            .any(|keyword| keyword.pattern.is_match(text))
    }
}

fn word_start_pattern(term: &str) -> String {
    // `\b` before a non-word character only matches after a word character.
    let anchor = match term.chars().next() {
        Some(first) if first.is_alphanumeric() || first == '_' => r"\b",
        _ => r"\B",
    };
    format!("{anchor}{}", regex::escape(term))
}
