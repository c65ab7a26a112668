mod config;
mod keywords;
mod loader;
mod standard;

pub use config::{
    ClassificationRules, ConfidenceRules, DepartmentProfile, EscalationActions, EscalationRules,
    ResponseRules, RoutingRules, RuleConfig, SentimentBand, ToneMarkers, TriggerThresholds,
};
pub use keywords::KeywordSet;
pub use loader::RuleLoadError;

use super::domain::{Category, EscalationLevel, Priority, ResponseType};
use super::error::TriageError;

/// Validated, compiled form of a [`RuleConfig`], shared read-only across invocations.
#[derive(Debug, Clone)]
pub struct RuleBook {
    config: RuleConfig,
    categories: Vec<(Category, KeywordSet)>,
    positive: KeywordSet,
    negative: KeywordSet,
    triggers: KeywordSet,
    legal: KeywordSet,
}

impl RuleBook {
    pub fn compile(config: RuleConfig) -> Result<Self, TriageError> {
        config.validate()?;

        let classification = &config.classification;
        let mut categories = Vec::with_capacity(Category::keyed().len());
        for category in Category::keyed() {
            let terms = classification
                .category_keywords
                .get(&category)
                .ok_or_else(|| missing_keywords(category))?;
            let label = format!("{} keywords", category.label());
            categories.push((category, KeywordSet::compile(&label, terms)?));
        }

        let positive = KeywordSet::compile("positive keywords", &classification.positive_keywords)?;
        let negative = KeywordSet::compile("negative keywords", &classification.negative_keywords)?;
        let triggers =
            KeywordSet::compile("escalation keywords", &classification.escalation_keywords)?;
        let legal = KeywordSet::compile("legal keywords", &config.escalation.legal_keywords)?;

        Ok(Self {
            config,
            categories,
            positive,
            negative,
            triggers,
            legal,
        })
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Category matchers in tie-break order.
    pub fn categories(&self) -> &[(Category, KeywordSet)] {
        &self.categories
    }

    pub fn positive(&self) -> &KeywordSet {
        &self.positive
    }

    pub fn negative(&self) -> &KeywordSet {
        &self.negative
    }

    pub fn triggers(&self) -> &KeywordSet {
        &self.triggers
    }

    pub fn legal(&self) -> &KeywordSet {
        &self.legal
    }

    pub fn department_exists(&self, key: &str) -> bool {
        self.config.routing.departments.contains_key(key)
    }

    /// Display name for a department key, falling back to the key itself.
    pub fn department_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.config
            .routing
            .departments
            .get(key)
            .map(|profile| profile.display_name.as_str())
            .unwrap_or(key)
    }

    pub fn actions_for(&self, level: Option<EscalationLevel>) -> &[String] {
        let actions = &self.config.escalation.actions;
        match level {
            None => &actions.no_escalation,
            Some(EscalationLevel::Standard) => &actions.level_1,
            Some(EscalationLevel::High) => &actions.level_2,
            Some(EscalationLevel::Critical) => &actions.level_3,
        }
    }
}

fn missing_keywords(category: Category) -> TriageError {
    TriageError::missing(format!("keyword set for category '{}'", category.label()))
}

fn check_score(label: &str, value: f64) -> Result<(), TriageError> {
    if value.is_finite() && (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TriageError::invalid(format!(
            "{label} must be within [-1.0, 1.0], found {value}"
        )))
    }
}

fn check_unit(label: &str, value: f64) -> Result<(), TriageError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TriageError::invalid(format!(
            "{label} must be within [0.0, 1.0], found {value}"
        )))
    }
}

fn require_nonempty<T>(label: &str, items: &[T]) -> Result<(), TriageError> {
    if items.is_empty() {
        Err(TriageError::missing(label.to_string()))
    } else {
        Ok(())
    }
}

impl RuleConfig {
    /// Reject configurations that would leave any stage without its tables or thresholds.
    pub fn validate(&self) -> Result<(), TriageError> {
        self.validate_classification()?;
        self.validate_routing()?;
        self.validate_responses()?;
        self.validate_escalation()
    }

    fn validate_classification(&self) -> Result<(), TriageError> {
        let rules = &self.classification;
        for category in Category::keyed() {
            match rules.category_keywords.get(&category) {
                Some(terms) if !terms.is_empty() => {}
                _ => return Err(missing_keywords(category)),
            }
        }
        require_nonempty("positive sentiment keywords", &rules.positive_keywords)?;
        require_nonempty("negative sentiment keywords", &rules.negative_keywords)?;
        require_nonempty("escalation trigger keywords", &rules.escalation_keywords)?;
        require_nonempty("sentiment priority bands", &rules.sentiment_bands)?;

        for band in &rules.sentiment_bands {
            check_score(
                &format!("sentiment band for {}", band.priority.label()),
                band.at_most,
            )?;
        }
        // First match wins, so more negative bands must come first and rank higher.
        for pair in rules.sentiment_bands.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            if earlier.at_most >= later.at_most || earlier.priority <= later.priority {
                return Err(TriageError::invalid(format!(
                    "sentiment bands must rise in threshold and fall in priority, but {} (at most \
                     {}) is followed by {} (at most {})",
                    earlier.priority.label(),
                    earlier.at_most,
                    later.priority.label(),
                    later.at_most
                )));
            }
        }
        if rules.triggers.bump_at == 0 || rules.triggers.urgent_at == 0 {
            return Err(TriageError::invalid(
                "trigger thresholds must require at least one keyword",
            ));
        }
        Ok(())
    }

    fn validate_routing(&self) -> Result<(), TriageError> {
        let rules = &self.routing;
        if rules.departments.is_empty() {
            return Err(TriageError::missing("department table"));
        }
        if rules.primary_departments.is_empty() {
            return Err(TriageError::missing("category to department table"));
        }

        let require_department = |key: &str, referenced_by: &str| {
            if rules.departments.contains_key(key) {
                Ok(())
            } else {
                Err(TriageError::missing(format!(
                    "department '{key}' referenced by {referenced_by}"
                )))
            }
        };
        require_department(rules.fallback_department.as_str(), "fallback_department")?;
        require_department(rules.escalation_department.as_str(), "escalation_department")?;
        for (category, key) in &rules.primary_departments {
            let referenced_by = format!("primary route for {}", category.label());
            require_department(key.as_str(), referenced_by.as_str())?;
        }
        for (category, keys) in &rules.backup_departments {
            let referenced_by = format!("backup route for {}", category.label());
            for key in keys {
                require_department(key.as_str(), referenced_by.as_str())?;
            }
        }

        check_score(
            "routing negative sentiment threshold",
            rules.negative_sentiment_threshold,
        )?;
        let confidence = &rules.confidence;
        check_unit("confidence floor", confidence.floor)?;
        check_unit("confidence ceiling", confidence.ceiling)?;
        check_unit("no-match confidence", confidence.no_match)?;
        if confidence.floor > confidence.ceiling {
            return Err(TriageError::invalid(format!(
                "confidence floor {} exceeds ceiling {}",
                confidence.floor, confidence.ceiling
            )));
        }
        Ok(())
    }

    fn validate_responses(&self) -> Result<(), TriageError> {
        let rules = &self.responses;
        if rules.greeting.trim().is_empty() {
            return Err(TriageError::missing("response greeting"));
        }
        if !rules.templates.contains_key(&Category::General) {
            return Err(TriageError::missing("general response template"));
        }
        for priority in Priority::ordered() {
            if !rules.tones.contains_key(&priority) {
                return Err(TriageError::missing(format!(
                    "tone markers for {} priority",
                    priority.label()
                )));
            }
        }
        for response_type in [
            ResponseType::AutoResponse,
            ResponseType::PriorityResponse,
            ResponseType::HumanReviewNeeded,
        ] {
            match rules.next_steps.get(&response_type) {
                Some(steps) if !steps.is_empty() => {}
                _ => {
                    return Err(TriageError::missing(format!(
                        "next steps for {}",
                        response_type.label()
                    )))
                }
            }
        }
        Ok(())
    }

    fn validate_escalation(&self) -> Result<(), TriageError> {
        let rules = &self.escalation;
        check_score(
            "escalation negative sentiment threshold",
            rules.negative_sentiment_threshold,
        )?;
        if rules.keyword_minimum == 0 {
            return Err(TriageError::invalid(
                "escalation keyword minimum must be at least 1",
            ));
        }
        require_nonempty("actions without escalation", &rules.actions.no_escalation)?;
        require_nonempty("recommended actions for level 1", &rules.actions.level_1)?;
        require_nonempty("recommended actions for level 2", &rules.actions.level_2)?;
        require_nonempty("recommended actions for level 3", &rules.actions.level_3)
    }
}
