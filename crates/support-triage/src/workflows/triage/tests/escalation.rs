use super::common::*;
use crate::workflows::triage::domain::{EscalationCriterion, EscalationLevel};

#[test]
fn urgent_ticket_is_critical_and_keeps_every_matching_criterion() {
    let rules = rule_book();

    let evaluation = evaluate(OUTAGE_WITH_LEGAL, &rules);

    assert!(evaluation.escalation_needed);
    assert_eq!(evaluation.escalation_level, Some(EscalationLevel::Critical));
    assert_eq!(evaluation.reason, "Urgent priority ticket");
    assert_eq!(
        evaluation.criteria,
        vec![
            EscalationCriterion::UrgentPriority,
            EscalationCriterion::EscalationKeywords,
        ]
    );
    assert_eq!(
        evaluation.recommended_actions.first().map(String::as_str),
        Some("Notify senior support manager")
    );
}

#[test]
fn lawsuit_threat_escalates() {
    let rules = rule_book();

    let evaluation = evaluate(FURIOUS_LAWSUIT, &rules);

    assert!(evaluation.escalation_needed);
    assert!(evaluation.escalation_level >= Some(EscalationLevel::Standard));
    assert!(evaluation
        .criteria
        .contains(&EscalationCriterion::EscalationKeywords));
}

#[test]
fn single_legal_term_is_enough_for_level_one() {
    let rules = rule_book();

    let evaluation = evaluate(LAWYER_QUESTION, &rules);

    assert!(evaluation.escalation_needed);
    assert_eq!(evaluation.escalation_level, Some(EscalationLevel::Standard));
    assert_eq!(evaluation.reason, "Escalation keywords detected: lawyer");
    assert_eq!(
        evaluation.criteria,
        vec![EscalationCriterion::EscalationKeywords]
    );
    assert_eq!(
        evaluation.recommended_actions,
        vec!["Flag for supervisor review", "Respond within 24 hours"]
    );
}

#[test]
fn high_priority_negative_sentiment_is_level_two() {
    let rules = rule_book();

    let evaluation = evaluate(UNHAPPY_LOGIN, &rules);

    assert_eq!(evaluation.escalation_level, Some(EscalationLevel::High));
    assert_eq!(evaluation.reason, "High priority with negative sentiment");
    assert_eq!(
        evaluation.criteria,
        vec![EscalationCriterion::HighPriorityNegativeSentiment]
    );
}

#[test]
fn routing_flag_alone_escalates_at_level_one() {
    let rules = rule_book_with(|config| {
        config.escalation.negative_sentiment_threshold = -0.7;
    });

    let evaluation = evaluate(UNHAPPY_LOGIN, &rules);

    assert!(evaluation.escalation_needed);
    assert_eq!(evaluation.escalation_level, Some(EscalationLevel::Standard));
    assert_eq!(evaluation.reason, "Routing flagged for escalation");
    assert_eq!(evaluation.criteria, vec![EscalationCriterion::RoutingFlag]);
}

#[test]
fn calm_tickets_need_no_escalation() {
    let rules = rule_book();

    for text in ["", POLITE_BILLING, GRUMPY_INVOICE] {
        let evaluation = evaluate(text, &rules);

        assert!(!evaluation.escalation_needed, "{text:?} escalated");
        assert_eq!(evaluation.escalation_level, None);
        assert_eq!(evaluation.reason, "No escalation criteria met");
        assert!(evaluation.criteria.is_empty());
        assert_eq!(
            evaluation.recommended_actions,
            vec!["Process through standard workflow"]
        );
    }
}

#[test]
fn keyword_reason_lists_triggers_then_new_legal_terms() {
    let rules = rule_book_with(|config| {
        config.escalation.legal_keywords.push("court".to_string());
    });

    let evaluation = evaluate("Please cancel, or we will see you in court", &rules);

    assert_eq!(evaluation.escalation_level, Some(EscalationLevel::Standard));
    assert_eq!(
        evaluation.reason,
        "Escalation keywords detected: cancel, court"
    );
}
