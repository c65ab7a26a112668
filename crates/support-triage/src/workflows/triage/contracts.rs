use super::domain::{
    Category, Classification, EscalationEvaluation, EscalationLevel, Priority, Response,
    ResponseType, RoutingDecision,
};
use super::error::{Stage, TriageError};
use super::rules::RuleBook;

pub(crate) fn check_classification(
    classification: &Classification,
    rules: &RuleBook,
) -> Result<(), TriageError> {
    let score = classification.sentiment_score;
    if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
        return Err(TriageError::violation(
            Stage::Classification,
            format!("sentiment score {score} outside [-1.0, 1.0]"),
        ));
    }
    let limit = rules.config().classification.max_key_issues;
    if classification.key_issues.len() > limit {
        return Err(TriageError::violation(
            Stage::Classification,
            format!(
                "{} key issues exceed the limit of {limit}",
                classification.key_issues.len()
            ),
        ));
    }
    if classification.evidence.is_no_match() && classification.category != Category::General {
        return Err(TriageError::violation(
            Stage::Classification,
            format!(
                "category {} chosen without any keyword match",
                classification.category.label()
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_routing(
    classification: &Classification,
    routing: &RoutingDecision,
    rules: &RuleBook,
) -> Result<(), TriageError> {
    if !rules.department_exists(&routing.primary_department) {
        return Err(TriageError::violation(
            Stage::Routing,
            format!("unknown department '{}'", routing.primary_department),
        ));
    }
    if routing
        .backup_departments
        .contains(&routing.primary_department)
    {
        return Err(TriageError::violation(
            Stage::Routing,
            "primary department repeated among backups",
        ));
    }
    let confidence = routing.confidence;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(TriageError::violation(
            Stage::Routing,
            format!("confidence {confidence} outside [0.0, 1.0]"),
        ));
    }
    if classification.priority == Priority::Urgent && !routing.needs_escalation {
        return Err(TriageError::violation(
            Stage::Routing,
            "urgent ticket not flagged for escalation",
        ));
    }
    Ok(())
}

pub(crate) fn check_response(
    routing: &RoutingDecision,
    response: &Response,
) -> Result<(), TriageError> {
    if response.body.trim().is_empty() {
        return Err(TriageError::violation(Stage::Response, "empty response body"));
    }
    if routing.needs_escalation && response.response_type != ResponseType::HumanReviewNeeded {
        return Err(TriageError::violation(
            Stage::Response,
            format!(
                "escalated ticket drafted as {}",
                response.response_type.label()
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_escalation(
    classification: &Classification,
    escalation: &EscalationEvaluation,
) -> Result<(), TriageError> {
    if escalation.escalation_needed != escalation.escalation_level.is_some() {
        return Err(TriageError::violation(
            Stage::Escalation,
            "escalation level must be present exactly when escalation is needed",
        ));
    }
    if escalation.escalation_needed && escalation.recommended_actions.is_empty() {
        return Err(TriageError::violation(
            Stage::Escalation,
            "escalation without recommended actions",
        ));
    }
    if classification.priority == Priority::Urgent
        && escalation.escalation_level != Some(EscalationLevel::Critical)
    {
        return Err(TriageError::violation(
            Stage::Escalation,
            "urgent ticket not escalated at level 3",
        ));
    }
    Ok(())
}
