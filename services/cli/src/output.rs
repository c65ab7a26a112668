use clap::ValueEnum;
use support_triage::error::AppError;
use support_triage::workflows::triage::{TicketMetadata, TicketResult, TicketSummary};

const RULE: &str =
    "================================================================================";
const BODY_RULE: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Flat JSON summaries
    Json,
}

pub(crate) fn render_text(result: &TicketResult) -> String {
    let classification = result.classification();
    let routing = result.routing();
    let response = result.response();
    let escalation = result.escalation();

    let mut lines = vec![
        RULE.to_string(),
        format!("TICKET {}", result.ticket().id()),
        RULE.to_string(),
        format!("Status: {}", result.status().label()),
        format!("Words: {}", result.ticket().metadata().word_count),
        format!("Contact details: {}", contact_details(result.ticket().metadata())),
        String::new(),
        "--- CLASSIFICATION ---".to_string(),
        format!("Category: {}", classification.category.label()),
        format!("Priority: {}", classification.priority.label()),
        format!("Sentiment: {:.2}", classification.sentiment_score),
    ];
    push_list(&mut lines, "Key issues", &classification.key_issues);

    lines.push(String::new());
    lines.push("--- ROUTING ---".to_string());
    lines.push(format!(
        "Department: {} ({})",
        routing.primary_department, response.department
    ));
    lines.push(format!(
        "Backup departments: {}",
        if routing.backup_departments.is_empty() {
            "None".to_string()
        } else {
            routing.backup_departments.join(", ")
        }
    ));
    lines.push(format!(
        "Needs escalation: {}",
        yes_no(routing.needs_escalation)
    ));
    lines.push(format!("Confidence: {:.2}", routing.confidence));

    lines.push(String::new());
    lines.push("--- RESPONSE ---".to_string());
    lines.push(format!("Response type: {}", response.response_type.label()));
    lines.push("Generated response:".to_string());
    lines.push(BODY_RULE.to_string());
    lines.push(response.body.clone());
    lines.push(BODY_RULE.to_string());
    push_list(&mut lines, "Next steps", &response.next_steps);

    lines.push(String::new());
    match escalation.escalation_level {
        Some(level) => {
            lines.push("--- ESCALATION ---".to_string());
            lines.push(format!("Level: {level}"));
            lines.push(format!("Reason: {}", escalation.reason));
            push_list(
                &mut lines,
                "Recommended actions",
                &escalation.recommended_actions,
            );
        }
        None => lines.push(format!("Escalation: not needed ({})", escalation.reason)),
    }

    lines.join("\n")
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        lines.push(format!("{heading}: none"));
        return;
    }
    lines.push(format!("{heading}:"));
    lines.extend(items.iter().map(|item| format!("  - {item}")));
}

fn contact_details(metadata: &TicketMetadata) -> String {
    let found: Vec<&str> = [
        (metadata.has_email, "email"),
        (metadata.has_phone, "phone"),
        (metadata.has_url, "url"),
    ]
    .into_iter()
    .filter_map(|(present, label)| present.then_some(label))
    .collect();
    if found.is_empty() {
        "none".to_string()
    } else {
        found.join(", ")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

pub(crate) fn summary_json(result: &TicketResult) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&result.summary())?)
}

pub(crate) fn summaries_json(results: &[TicketResult]) -> Result<String, AppError> {
    let summaries: Vec<TicketSummary> = results.iter().map(TicketResult::summary).collect();
    Ok(serde_json::to_string_pretty(&summaries)?)
}
