use chrono::{TimeZone, Utc};
use serde_json::json;

use super::common::*;
use crate::workflows::triage::domain::{
    Category, Priority, ResponseType, Ticket, TicketId, TicketStatus,
};
use crate::workflows::triage::{process, RuleConfig, TriageError, TriagePipeline};

#[test]
fn pipeline_escalates_urgent_outage() {
    let result = pipeline().process(OUTAGE_WITH_LEGAL).expect("ticket triaged");

    assert_eq!(result.classification().category, Category::Technical);
    assert_eq!(result.classification().priority, Priority::Urgent);
    assert_eq!(result.routing().primary_department, "escalation_team");
    assert_eq!(
        result.response().response_type,
        ResponseType::HumanReviewNeeded
    );
    assert_eq!(result.status(), TicketStatus::Escalated);
    assert!(result.ticket().id().0.starts_with("TKT-"));
}

#[test]
fn pipeline_answers_polite_ticket_automatically() {
    let result = pipeline().process(POLITE_BILLING).expect("ticket triaged");

    assert_eq!(result.status(), TicketStatus::Responded);
    assert!(!result.escalation().escalation_needed);
    assert_eq!(result.response().response_type, ResponseType::AutoResponse);
}

#[test]
fn empty_ticket_is_processed() {
    let result = pipeline().process("").expect("empty ticket triaged");

    assert_eq!(result.classification().category, Category::General);
    assert_eq!(result.status(), TicketStatus::Responded);
    assert!(!result.response().body.is_empty());
    assert_eq!(result.ticket().metadata().word_count, 0);
}

#[test]
fn repeated_runs_make_the_same_decisions() {
    let pipeline = pipeline();

    let first = pipeline.process(FURIOUS_LAWSUIT).expect("first run");
    let second = pipeline.process(FURIOUS_LAWSUIT).expect("second run");

    assert!(first.same_decisions(&second));
    assert_ne!(first.ticket().id(), second.ticket().id());
}

#[test]
fn batch_results_keep_input_order() {
    let texts = vec![
        POLITE_BILLING,
        OUTAGE_WITH_LEGAL,
        "",
        FEATURE_IDEA,
        LAWYER_QUESTION,
        UNHAPPY_LOGIN,
    ];

    let results = pipeline().process_batch(&texts).expect("batch triaged");

    assert_eq!(results.len(), texts.len());
    for (result, text) in results.iter().zip(&texts) {
        assert_eq!(result.ticket().content(), *text);
    }
    assert_eq!(
        results[3].classification().category,
        Category::FeatureRequest
    );
}

#[test]
fn supplied_ticket_ids_are_preserved() {
    let created_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
    let tickets = vec![
        Ticket::with_id(TicketId("CUST-7".to_string()), POLITE_BILLING, created_at),
        Ticket::with_id(TicketId("CUST-8".to_string()), FURIOUS_LAWSUIT, created_at),
    ];

    let results = pipeline().process_tickets(tickets).expect("tickets triaged");

    assert_eq!(results[0].ticket().id().to_string(), "CUST-7");
    assert_eq!(results[1].ticket().id().to_string(), "CUST-8");
    assert_eq!(results[1].ticket().created_at(), created_at);
}

#[test]
fn ticket_metadata_notes_contact_details() {
    let ticket = Ticket::new("Reach me at jo@example.com or 555-123-4567, see https://status.example.com");

    let metadata = ticket.metadata();

    assert!(metadata.has_email);
    assert!(metadata.has_phone);
    assert!(metadata.has_url);
    assert_eq!(metadata.word_count, 8);
}

#[test]
fn summary_serializes_flat_with_numeric_level() {
    let result = pipeline().process(OUTAGE_WITH_LEGAL).expect("ticket triaged");

    let value = serde_json::to_value(result.summary()).expect("summary serializes");

    assert_eq!(value["category"], json!("technical"));
    assert_eq!(value["priority"], json!("urgent"));
    assert_eq!(value["primary_department"], json!("escalation_team"));
    assert_eq!(value["response_type"], json!("human_review_needed"));
    assert_eq!(value["escalation_level"], json!(3));
    assert_eq!(value["status"], json!("escalated"));
    assert_eq!(value["metadata"]["word_count"], json!(10));
    assert_eq!(value["metadata"]["has_url"], json!(false));

    let calm = pipeline().process(POLITE_BILLING).expect("ticket triaged");
    let value = serde_json::to_value(calm.summary()).expect("summary serializes");
    assert_eq!(value["escalation_level"], json!(null));
}

#[test]
fn missing_category_keywords_are_rejected() {
    let mut config = RuleConfig::standard();
    config
        .classification
        .category_keywords
        .remove(&Category::Technical);

    let err = TriagePipeline::new(config).expect_err("missing keywords rejected");

    match err {
        TriageError::ConfigurationMissing(detail) => assert!(detail.contains("technical")),
        other => panic!("expected missing configuration, got {other:?}"),
    }
}

#[test]
fn dangling_department_reference_is_rejected() {
    let mut config = RuleConfig::standard();
    config
        .routing
        .primary_departments
        .insert(Category::Billing, "accounts_receivable".to_string());

    let err = process(POLITE_BILLING, &config).expect_err("dangling department rejected");

    match err {
        TriageError::ConfigurationMissing(detail) => {
            assert!(detail.contains("accounts_receivable"))
        }
        other => panic!("expected missing configuration, got {other:?}"),
    }
}

#[test]
fn out_of_range_settings_are_invalid() {
    let mut inverted = RuleConfig::standard();
    inverted.routing.confidence.floor = 0.9;
    inverted.routing.confidence.ceiling = 0.6;
    assert!(matches!(
        TriagePipeline::new(inverted),
        Err(TriageError::ConfigurationInvalid(_))
    ));

    let mut no_minimum = RuleConfig::standard();
    no_minimum.escalation.keyword_minimum = 0;
    assert!(matches!(
        TriagePipeline::new(no_minimum),
        Err(TriageError::ConfigurationInvalid(_))
    ));

    let mut reversed_bands = RuleConfig::standard();
    reversed_bands.classification.sentiment_bands.reverse();
    assert!(matches!(
        TriagePipeline::new(reversed_bands),
        Err(TriageError::ConfigurationInvalid(_))
    ));

    let mut repeated_priority = RuleConfig::standard();
    repeated_priority.classification.sentiment_bands[1].priority = Priority::Urgent;
    assert!(matches!(
        TriagePipeline::new(repeated_priority),
        Err(TriageError::ConfigurationInvalid(_))
    ));

    let mut blank = RuleConfig::standard();
    blank.classification.positive_keywords.push("   ".to_string());
    assert!(matches!(
        TriagePipeline::new(blank),
        Err(TriageError::ConfigurationInvalid(_))
    ));
}

#[test]
fn empty_action_lists_are_missing_configuration() {
    let mut config = RuleConfig::standard();
    config.escalation.actions.level_3.clear();

    let err = TriagePipeline::new(config).expect_err("empty actions rejected");

    assert!(matches!(err, TriageError::ConfigurationMissing(_)));
    assert!(err.to_string().contains("level 3"));
}
