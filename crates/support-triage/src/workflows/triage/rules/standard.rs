use std::collections::BTreeMap;

use super::super::domain::{Category, Priority, ResponseType};
use super::config::{
    ClassificationRules, ConfidenceRules, DepartmentProfile, EscalationActions, EscalationRules,
    ResponseRules, RoutingRules, RuleConfig, SentimentBand, ToneMarkers, TriggerThresholds,
};

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl RuleConfig {
    /// Built-in rule set; `config/triage_rules.yaml` carries the same values.
    pub fn standard() -> Self {
        Self {
            classification: standard_classification(),
            routing: standard_routing(),
            responses: standard_responses(),
            escalation: standard_escalation(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_classification() -> ClassificationRules {
    let category_keywords = BTreeMap::from([
        (
            Category::Technical,
            words(&[
                "error",
                "bug",
                "crash",
                "not working",
                "broken",
                "issue",
                "problem",
                "technical",
                "system",
                "outage",
            ]),
        ),
        (
            Category::Billing,
            words(&[
                "payment",
                "charge",
                "billing",
                "invoice",
                "refund",
                "subscription",
                "price",
            ]),
        ),
        (
            Category::Account,
            words(&["account", "login", "password", "access", "username", "profile"]),
        ),
        (
            Category::FeatureRequest,
            words(&[
                "feature",
                "request",
                "suggestion",
                "enhancement",
                "would like",
                "could you add",
            ]),
        ),
    ]);

    ClassificationRules {
        category_keywords,
        positive_keywords: words(&[
            "thank",
            "great",
            "excellent",
            "happy",
            "satisfied",
            "love",
            "appreciate",
        ]),
        negative_keywords: words(&[
            "bad",
            "terrible",
            "awful",
            "hate",
            "angry",
            "frustrated",
            "disappointed",
            "poor",
            "furious",
            "unacceptable",
        ]),
        escalation_keywords: words(&[
            "urgent",
            "critical",
            "emergency",
            "asap",
            "immediately",
            "lawsuit",
            "legal",
            "attorney",
            "lawyer",
            "sue",
            "cancel",
            "refund",
            "money back",
            "charge back",
            "angry",
            "frustrated",
            "disappointed",
            "terrible",
        ]),
        sentiment_bands: vec![
            SentimentBand {
                priority: Priority::Urgent,
                at_most: -0.75,
            },
            SentimentBand {
                priority: Priority::High,
                at_most: -0.4,
            },
            SentimentBand {
                priority: Priority::Medium,
                at_most: -0.1,
            },
        ],
        triggers: TriggerThresholds {
            bump_at: 1,
            urgent_at: 2,
        },
        max_key_issues: 3,
    }
}

fn standard_routing() -> RoutingRules {
    let departments = [
        ("technical_support", "Technical Support"),
        ("billing_support", "Billing Support"),
        ("customer_success", "Customer Success"),
        ("product_team", "Product"),
        ("escalation_team", "Escalation"),
    ]
    .into_iter()
    .map(|(key, display_name)| {
        (
            key.to_string(),
            DepartmentProfile {
                display_name: display_name.to_string(),
            },
        )
    })
    .collect();

    let primary_departments = BTreeMap::from([
        (Category::Technical, "technical_support".to_string()),
        (Category::Billing, "billing_support".to_string()),
        (Category::Account, "customer_success".to_string()),
        (Category::FeatureRequest, "product_team".to_string()),
        (Category::General, "customer_success".to_string()),
    ]);

    let backup_departments = BTreeMap::from([
        (Category::Technical, words(&["customer_success"])),
        (Category::Billing, words(&["customer_success"])),
        (Category::Account, words(&["technical_support"])),
        (Category::FeatureRequest, words(&["customer_success"])),
    ]);

    RoutingRules {
        departments,
        primary_departments,
        backup_departments,
        fallback_department: "customer_success".to_string(),
        escalation_department: "escalation_team".to_string(),
        negative_sentiment_threshold: -0.5,
        confidence: ConfidenceRules {
            floor: 0.55,
            ceiling: 0.95,
            no_match: 0.3,
        },
    }
}

fn standard_responses() -> ResponseRules {
    let templates = BTreeMap::from([
        (
            Category::Technical,
            "We've received your technical support request. The {department} team is reviewing \
             the issue and will follow up with a solution. In the meantime, please make sure you \
             are running the latest version of our software."
                .to_string(),
        ),
        (
            Category::Billing,
            "We've received your billing inquiry. The {department} team is reviewing your account \
             and will provide a detailed response within 24 hours."
                .to_string(),
        ),
        (
            Category::Account,
            "We're here to help with your account. The {department} team is looking into this now. \
             For security purposes, we may need to verify your identity before making any account \
             changes."
                .to_string(),
        ),
        (
            Category::FeatureRequest,
            "Thank you for your suggestion! Customer feedback helps us improve the product, and \
             your request has been forwarded to the {department} team for consideration in future \
             updates."
                .to_string(),
        ),
        (
            Category::General,
            "We've received your inquiry and the {department} team is reviewing it. We'll get back \
             to you with a complete answer shortly."
                .to_string(),
        ),
    ]);

    let routine = ToneMarkers {
        opening: String::new(),
        closing: "If you have any additional questions, just reply to this ticket.".to_string(),
    };
    let tones = BTreeMap::from([
        (Priority::Low, routine.clone()),
        (Priority::Medium, routine),
        (
            Priority::High,
            ToneMarkers {
                opening: "We're sorry for the trouble this is causing and have prioritized your \
                          request."
                    .to_string(),
                closing: "We will keep you updated as we make progress.".to_string(),
            },
        ),
        (
            Priority::Urgent,
            ToneMarkers {
                opening: "We sincerely apologize for the disruption. Your ticket has been marked \
                          urgent and is receiving immediate attention."
                    .to_string(),
                closing: "A specialist will contact you as soon as possible, with a first update \
                          within 2 hours."
                    .to_string(),
            },
        ),
    ]);

    let next_steps = BTreeMap::from([
        (
            ResponseType::AutoResponse,
            words(&[
                "Send automated acknowledgement",
                "Resolve through the standard support queue",
                "Close ticket after customer confirmation",
            ]),
        ),
        (
            ResponseType::PriorityResponse,
            words(&[
                "Assign to the next available agent",
                "Respond within 4 hours",
                "Follow up until resolved",
            ]),
        ),
        (
            ResponseType::HumanReviewNeeded,
            words(&[
                "Hold automated reply for agent review",
                "Assign to a senior agent",
                "Contact the customer directly",
            ]),
        ),
    ]);

    ResponseRules {
        greeting: "Thank you for contacting our support team.".to_string(),
        signature: "Best regards,\nCustomer Support Team".to_string(),
        templates,
        tones,
        next_steps,
    }
}

fn standard_escalation() -> EscalationRules {
    EscalationRules {
        negative_sentiment_threshold: -0.5,
        keyword_minimum: 2,
        legal_keywords: words(&["legal", "lawsuit", "attorney", "lawyer", "sue"]),
        actions: EscalationActions {
            no_escalation: words(&["Process through standard workflow"]),
            level_1: words(&["Flag for supervisor review", "Respond within 24 hours"]),
            level_2: words(&["Route to escalation team", "Respond within 2 hours"]),
            level_3: words(&[
                "Notify senior support manager",
                "Review within 1 hour",
                "Assign a dedicated escalation owner",
            ]),
        },
    }
}
