//! Support ticket triage: classification, routing, response drafting, and escalation.
//!
//! Every stage is a pure function of the ticket text, the outputs of earlier stages,
//! and a validated [`RuleBook`]. [`TriagePipeline`] runs the stages in a fixed order and
//! only hands out a [`TicketResult`] once all of them have passed their output checks.

pub mod classifier;
mod contracts;
pub mod domain;
pub mod error;
pub mod escalation;
pub mod intake;
pub mod pipeline;
pub mod responder;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, CategoryEvidence, Classification, EscalationCriterion, EscalationEvaluation,
    EscalationLevel, Priority, Response, ResponseType, RoutingDecision, Ticket, TicketId,
    TicketMetadata, TicketResult, TicketStatus, TicketSummary,
};
pub use error::{Stage, TriageError};
pub use intake::{read_csv_tickets, read_ticket_text, ticket_text_from_bytes, IntakeError};
pub use pipeline::{process, TriagePipeline};
pub use rules::{RuleBook, RuleConfig, RuleLoadError};
