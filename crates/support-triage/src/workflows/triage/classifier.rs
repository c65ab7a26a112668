use std::collections::HashSet;

use super::domain::{Category, CategoryEvidence, Classification, Priority};
use super::rules::{ClassificationRules, RuleBook};

/// Derive category, priority, sentiment, and key issues from raw ticket text.
///
/// Empty text is legal and classifies as general/low with neutral sentiment.
pub fn classify(text: &str, rules: &RuleBook) -> Classification {
    let (category, evidence) = determine_category(text, rules);
    let sentiment_score = sentiment_score(text, rules);
    let escalation_keywords: Vec<String> = rules
        .triggers()
        .distinct_matches(text)
        .into_iter()
        .map(str::to_string)
        .collect();
    let priority = determine_priority(
        sentiment_score,
        escalation_keywords.len(),
        &rules.config().classification,
    );
    let key_issues = extract_key_issues(text, rules);

    Classification {
        category,
        priority,
        sentiment_score,
        key_issues,
        escalation_keywords,
        evidence,
    }
}

fn determine_category(text: &str, rules: &RuleBook) -> (Category, CategoryEvidence) {
    let counts: Vec<(Category, usize)> = rules
        .categories()
        .iter()
        .map(|(category, keywords)| (*category, keywords.count_occurrences(text)))
        .collect();

    // Strict comparison keeps the earliest category on ties.
    let mut winner = (Category::General, 0);
    for &(category, count) in &counts {
        if count > winner.1 {
            winner = (category, count);
        }
    }
    if winner.1 == 0 {
        return (Category::General, CategoryEvidence::default());
    }

    let runner_up_count = counts
        .iter()
        .filter(|(category, _)| *category != winner.0)
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0);

    (
        winner.0,
        CategoryEvidence {
            top_count: winner.1,
            runner_up_count,
        },
    )
}

/// Keyword-balance sentiment in `[-1.0, 1.0]`; neutral when no sentiment keyword appears.
pub fn sentiment_score(text: &str, rules: &RuleBook) -> f64 {
    let positive = rules.positive().count_occurrences(text);
    let negative = rules.negative().count_occurrences(text);
    let total = positive + negative;
    if total == 0 {
        return 0.0;
    }
    ((positive as f64 - negative as f64) / total as f64).clamp(-1.0, 1.0)
}

fn determine_priority(sentiment: f64, trigger_count: usize, rules: &ClassificationRules) -> Priority {
    let base = rules
        .sentiment_bands
        .iter()
        .find(|band| sentiment <= band.at_most)
        .map(|band| band.priority)
        .unwrap_or(Priority::Low);

    if trigger_count >= rules.triggers.urgent_at {
        Priority::Urgent
    } else if trigger_count >= rules.triggers.bump_at {
        base.escalated()
    } else {
        base
    }
}

fn extract_key_issues(text: &str, rules: &RuleBook) -> Vec<String> {
    let limit = rules.config().classification.max_key_issues;
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for fragment in text.split(|c: char| matches!(c, '.' | '!' | '?' | ';' | '\n')) {
        if issues.len() >= limit {
            break;
        }
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        let relevant = rules
            .categories()
            .iter()
            .any(|(_, keywords)| keywords.any_match(fragment))
            || rules.triggers().any_match(fragment);
        if relevant && seen.insert(fragment.to_lowercase()) {
            issues.push(fragment.to_string());
        }
    }

    issues
}
