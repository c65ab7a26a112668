use tracing::warn;

use super::domain::{CategoryEvidence, Classification, Priority, RoutingDecision};
use super::rules::{ConfidenceRules, RuleBook};

/// Assign the ticket to a department, overriding to the escalation desk for hot tickets.
pub fn route(classification: &Classification, rules: &RuleBook) -> RoutingDecision {
    let routing = &rules.config().routing;
    let category = classification.category;

    let table_primary = match routing.primary_departments.get(&category) {
        Some(key) if rules.department_exists(key) => key.clone(),
        _ => {
            warn!(
                category = category.label(),
                fallback = %routing.fallback_department,
                "no department mapped for category, using fallback"
            );
            routing.fallback_department.clone()
        }
    };

    let needs_escalation = classification.priority == Priority::Urgent
        || (classification.priority == Priority::High
            && classification.sentiment_score < routing.negative_sentiment_threshold);

    let (primary_department, mut candidates) = if needs_escalation {
        (routing.escalation_department.clone(), vec![table_primary])
    } else {
        (table_primary, Vec::new())
    };
    if let Some(backups) = routing.backup_departments.get(&category) {
        candidates.extend(backups.iter().cloned());
    }

    let mut backup_departments: Vec<String> = Vec::with_capacity(candidates.len());
    for key in candidates {
        if key != primary_department
            && rules.department_exists(&key)
            && !backup_departments.contains(&key)
        {
            backup_departments.push(key);
        }
    }

    RoutingDecision {
        primary_department,
        backup_departments,
        needs_escalation,
        confidence: routing_confidence(&classification.evidence, &routing.confidence),
    }
}

/// Monotonic in the margin between the winning and runner-up category counts.
fn routing_confidence(evidence: &CategoryEvidence, rules: &ConfidenceRules) -> f64 {
    if evidence.is_no_match() {
        return rules.no_match.clamp(0.0, 1.0);
    }
    let top = evidence.top_count as f64;
    let runner_up = evidence.runner_up_count.min(evidence.top_count) as f64;
    let margin = (top - runner_up) / top;
    (rules.floor + (rules.ceiling - rules.floor) * margin).clamp(0.0, 1.0)
}
