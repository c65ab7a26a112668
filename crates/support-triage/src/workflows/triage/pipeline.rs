use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use super::classifier::classify;
use super::contracts::{check_classification, check_escalation, check_response, check_routing};
use super::domain::{Ticket, TicketResult};
use super::error::TriageError;
use super::escalation::evaluate;
use super::responder::respond;
use super::router::route;
use super::rules::{RuleBook, RuleConfig};

/// Runs tickets through classification, routing, response drafting, and escalation.
///
/// The compiled rules are immutable and shared, so one pipeline can serve any number
/// of concurrent invocations.
#[derive(Debug, Clone)]
pub struct TriagePipeline {
    rules: Arc<RuleBook>,
}

impl TriagePipeline {
    pub fn new(config: RuleConfig) -> Result<Self, TriageError> {
        Ok(Self::from_rule_book(Arc::new(RuleBook::compile(config)?)))
    }

    pub fn from_rule_book(rules: Arc<RuleBook>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Ingest `ticket_text` under a generated id and triage it.
    pub fn process(&self, ticket_text: &str) -> Result<TicketResult, TriageError> {
        self.process_ticket(Ticket::new(ticket_text))
    }

    pub fn process_ticket(&self, ticket: Ticket) -> Result<TicketResult, TriageError> {
        let rules = self.rules.as_ref();

        let classification = classify(ticket.content(), rules);
        check_classification(&classification, rules)?;
        debug!(
            ticket_id = %ticket.id(),
            category = classification.category.label(),
            priority = classification.priority.label(),
            sentiment = classification.sentiment_score,
            "ticket classified"
        );

        let routing = route(&classification, rules);
        check_routing(&classification, &routing, rules)?;
        debug!(
            ticket_id = %ticket.id(),
            department = %routing.primary_department,
            needs_escalation = routing.needs_escalation,
            confidence = routing.confidence,
            "ticket routed"
        );

        let response = respond(&classification, &routing, rules);
        check_response(&routing, &response)?;
        debug!(
            ticket_id = %ticket.id(),
            response_type = response.response_type.label(),
            "response drafted"
        );

        let escalation = evaluate(&ticket, &classification, &routing, rules);
        check_escalation(&classification, &escalation)?;

        info!(
            ticket_id = %ticket.id(),
            category = classification.category.label(),
            priority = classification.priority.label(),
            department = %routing.primary_department,
            escalation_level = ?escalation.escalation_level.map(|level| level.as_u8()),
            "ticket triaged"
        );

        Ok(TicketResult::assemble(
            ticket,
            classification,
            routing,
            response,
            escalation,
        ))
    }

    /// Triage independent texts in parallel; results keep input order.
    pub fn process_batch<S>(&self, texts: &[S]) -> Result<Vec<TicketResult>, TriageError>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.process(text.as_ref()))
            .collect()
    }

    pub fn process_tickets(&self, tickets: Vec<Ticket>) -> Result<Vec<TicketResult>, TriageError> {
        tickets
            .into_par_iter()
            .map(|ticket| self.process_ticket(ticket))
            .collect()
    }
}

/// Single-shot entry point: validate `config`, then triage one ticket.
pub fn process(ticket_text: &str, config: &RuleConfig) -> Result<TicketResult, TriageError> {
    TriagePipeline::new(config.clone())?.process(ticket_text)
}
