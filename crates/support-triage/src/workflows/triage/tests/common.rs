use crate::workflows::triage::domain::{Classification, RoutingDecision, Ticket};
use crate::workflows::triage::{
    classifier, escalation, responder, router, EscalationEvaluation, Response, RuleBook,
    RuleConfig, TriagePipeline,
};

pub(super) const OUTAGE_WITH_LEGAL: &str =
    "URGENT: system is completely down, this is a legal issue";
pub(super) const POLITE_BILLING: &str =
    "Thank you, great service, quick question about my invoice";
pub(super) const FURIOUS_LAWSUIT: &str =
    "This is terrible, I am furious and considering a lawsuit";
pub(super) const LAWYER_QUESTION: &str = "My lawyer asked me to check the invoice total";
/// Sentiment -0.6 without trigger keywords: high priority, below the -0.5 thresholds.
pub(super) const UNHAPPY_LOGIN: &str =
    "Thanks for the reply, but the app is bad, the login is awful, support is poor and the delay is unacceptable";
/// Sentiment exactly -0.5: high priority, not below the thresholds.
pub(super) const GRUMPY_INVOICE: &str =
    "I appreciate the quick reply, but the invoice is bad, the price is poor and the charge is unacceptable";
pub(super) const FEATURE_IDEA: &str = "Could you add a dark mode feature";

pub(super) fn rule_book() -> RuleBook {
    RuleBook::compile(RuleConfig::standard()).expect("standard rules compile")
}

pub(super) fn rule_book_with(edit: impl FnOnce(&mut RuleConfig)) -> RuleBook {
    let mut config = RuleConfig::standard();
    edit(&mut config);
    RuleBook::compile(config).expect("edited rules compile")
}

pub(super) fn pipeline() -> TriagePipeline {
    TriagePipeline::new(RuleConfig::standard()).expect("standard pipeline")
}

pub(super) fn classify(text: &str, rules: &RuleBook) -> Classification {
    classifier::classify(text, rules)
}

pub(super) fn classify_and_route(text: &str, rules: &RuleBook) -> (Classification, RoutingDecision) {
    let classification = classifier::classify(text, rules);
    let routing = router::route(&classification, rules);
    (classification, routing)
}

pub(super) fn draft(text: &str, rules: &RuleBook) -> Response {
    let (classification, routing) = classify_and_route(text, rules);
    responder::respond(&classification, &routing, rules)
}

pub(super) fn evaluate(text: &str, rules: &RuleBook) -> EscalationEvaluation {
    let ticket = Ticket::new(text);
    let (classification, routing) = classify_and_route(text, rules);
    escalation::evaluate(&ticket, &classification, &routing, rules)
}

pub(super) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
