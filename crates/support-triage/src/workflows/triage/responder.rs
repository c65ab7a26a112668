use tracing::warn;

use super::domain::{Category, Classification, Priority, Response, ResponseType, RoutingDecision};
use super::rules::{RuleBook, ToneMarkers};

const DEPARTMENT_PLACEHOLDER: &str = "{department}";

/// Draft the customer reply for a classified, routed ticket.
pub fn respond(
    classification: &Classification,
    routing: &RoutingDecision,
    rules: &RuleBook,
) -> Response {
    let responses = &rules.config().responses;
    let response_type = select_response_type(classification.priority, routing.needs_escalation);
    let department = rules.department_name(&routing.primary_department).to_string();

    let template = match responses.templates.get(&classification.category) {
        Some(template) => template.as_str(),
        None => {
            warn!(
                category = classification.category.label(),
                "no response template for category, using general template"
            );
            responses
                .templates
                .get(&Category::General)
                .map(String::as_str)
                .unwrap_or_default()
        }
    };
    let tone = responses
        .tones
        .get(&classification.priority)
        .cloned()
        .unwrap_or_else(ToneMarkers::default);

    let body = [
        responses.greeting.as_str(),
        tone.opening.as_str(),
        template,
        tone.closing.as_str(),
        responses.signature.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .map(|part| part.replace(DEPARTMENT_PLACEHOLDER, &department))
    .collect::<Vec<_>>()
    .join("\n\n");

    let next_steps = responses
        .next_steps
        .get(&response_type)
        .cloned()
        .unwrap_or_default();

    Response {
        response_type,
        body,
        next_steps,
        department,
    }
}

/// Escalated or urgent tickets always go to a human before anything is sent.
pub fn select_response_type(priority: Priority, needs_escalation: bool) -> ResponseType {
    if needs_escalation || priority == Priority::Urgent {
        ResponseType::HumanReviewNeeded
    } else if priority == Priority::High {
        ResponseType::PriorityResponse
    } else {
        ResponseType::AutoResponse
    }
}
