use super::domain::{
    Classification, EscalationCriterion, EscalationEvaluation, EscalationLevel, Priority,
    RoutingDecision, Ticket,
};
use super::rules::RuleBook;

const URGENT_REASON: &str = "Urgent priority ticket";
const NEGATIVE_HIGH_REASON: &str = "High priority with negative sentiment";
const ROUTING_REASON: &str = "Routing flagged for escalation";
const NO_ESCALATION_REASON: &str = "No escalation criteria met";

/// Final escalation verdict.
///
/// Criteria are checked in a fixed order and all matches are recorded; the first
/// match supplies the reason and the level, and later matches never lower it.
pub fn evaluate(
    ticket: &Ticket,
    classification: &Classification,
    routing: &RoutingDecision,
    rules: &RuleBook,
) -> EscalationEvaluation {
    let config = &rules.config().escalation;
    let text = ticket.content();

    let mut criteria = Vec::new();
    let mut verdict: Option<(EscalationLevel, String)> = None;

    if classification.priority == Priority::Urgent {
        criteria.push(EscalationCriterion::UrgentPriority);
        verdict = Some((EscalationLevel::Critical, URGENT_REASON.to_string()));
    }

    if classification.priority == Priority::High
        && classification.sentiment_score < config.negative_sentiment_threshold
    {
        criteria.push(EscalationCriterion::HighPriorityNegativeSentiment);
        if verdict.is_none() {
            verdict = Some((EscalationLevel::High, NEGATIVE_HIGH_REASON.to_string()));
        }
    }

    let mut keywords = rules.triggers().distinct_matches(text);
    let trigger_count = keywords.len();
    let legal = rules.legal().distinct_matches(text);
    if trigger_count >= config.keyword_minimum || !legal.is_empty() {
        criteria.push(EscalationCriterion::EscalationKeywords);
        for term in legal {
            if !keywords.contains(&term) {
                keywords.push(term);
            }
        }
        let reason = format!("Escalation keywords detected: {}", keywords.join(", "));
        match verdict.as_mut() {
            Some((level, _)) => *level = (*level).max(EscalationLevel::Standard),
            None => verdict = Some((EscalationLevel::Standard, reason)),
        }
    }

    if routing.needs_escalation && criteria.is_empty() {
        criteria.push(EscalationCriterion::RoutingFlag);
        verdict = Some((EscalationLevel::Standard, ROUTING_REASON.to_string()));
    }

    let (escalation_level, reason) = match verdict {
        Some((level, reason)) => (Some(level), reason),
        None => (None, NO_ESCALATION_REASON.to_string()),
    };

    EscalationEvaluation {
        escalation_needed: escalation_level.is_some(),
        escalation_level,
        reason,
        criteria,
        recommended_actions: rules.actions_for(escalation_level).to_vec(),
    }
}
