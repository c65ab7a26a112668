use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for ingested tickets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(pub String);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static TICKET_SEQUENCE: AtomicU64 = AtomicU64::new(1);

impl TicketId {
    /// Timestamped identifier with a process-wide sequence suffix so ids stay unique
    /// when several tickets arrive within the same second.
    pub fn generate(at: DateTime<Utc>) -> Self {
        let sequence = TICKET_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        TicketId(format!("TKT-{}-{sequence:06}", at.format("%Y%m%d%H%M%S")))
    }
}

/// Raw customer ticket as received at intake. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    content: String,
    created_at: DateTime<Utc>,
    metadata: TicketMetadata,
}

impl Ticket {
    /// Ingest text under a freshly generated id.
    pub fn new(content: impl Into<String>) -> Self {
        let created_at = Utc::now();
        Self::with_id(TicketId::generate(created_at), content, created_at)
    }

    /// Ingest text under a caller-supplied id and timestamp.
    pub fn with_id(id: TicketId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let content = content.into();
        let metadata = TicketMetadata::extract(&content);
        Self {
            id,
            content,
            created_at,
            metadata,
        }
    }

    pub fn id(&self) -> &TicketId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn metadata(&self) -> &TicketMetadata {
        &self.metadata
    }
}

/// Contact and size hints lifted from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMetadata {
    pub word_count: usize,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_url: bool,
}

struct MetadataPatterns {
    email: Regex,
    phone: Regex,
    url: Regex,
}

fn metadata_patterns() -> &'static MetadataPatterns {
    static PATTERNS: OnceLock<MetadataPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MetadataPatterns {
        email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("email pattern compiles"),
        phone: Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("phone pattern compiles"),
        url: Regex::new(r"https?://\S+").expect("url pattern compiles"),
    })
}

impl TicketMetadata {
    pub fn extract(content: &str) -> Self {
        let patterns = metadata_patterns();
        Self {
            word_count: content.split_whitespace().count(),
            has_email: patterns.email.is_match(content),
            has_phone: patterns.phone.is_match(content),
            has_url: patterns.url.is_match(content),
        }
    }
}

/// Subject classification. Declaration order is the tie-break order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technical,
    Billing,
    Account,
    FeatureRequest,
    General,
}

impl Category {
    /// Categories that compete on keyword counts; `General` is the no-match default.
    pub const fn keyed() -> [Self; 4] {
        [
            Self::Technical,
            Self::Billing,
            Self::Account,
            Self::FeatureRequest,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Billing => "billing",
            Self::Account => "account",
            Self::FeatureRequest => "feature_request",
            Self::General => "general",
        }
    }
}

/// Ordered urgency level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Urgent]
    }

    /// One level up, saturating at `Urgent`.
    pub const fn escalated(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Urgent => Self::Urgent,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// Keyword hit counts behind the category decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryEvidence {
    pub top_count: usize,
    pub runner_up_count: usize,
}

impl CategoryEvidence {
    pub fn is_no_match(&self) -> bool {
        self.top_count == 0
    }
}

/// Classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub priority: Priority,
    pub sentiment_score: f64,
    pub key_issues: Vec<String>,
    /// Distinct escalation-trigger keywords found, in rule order.
    pub escalation_keywords: Vec<String>,
    pub evidence: CategoryEvidence,
}

/// Router output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub primary_department: String,
    pub backup_departments: Vec<String>,
    pub needs_escalation: bool,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    AutoResponse,
    PriorityResponse,
    HumanReviewNeeded,
}

impl ResponseType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AutoResponse => "auto_response",
            Self::PriorityResponse => "priority_response",
            Self::HumanReviewNeeded => "human_review_needed",
        }
    }
}

/// Responder output: the drafted customer reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub response_type: ResponseType,
    pub body: String,
    pub next_steps: Vec<String>,
    /// Display name of the department the reply speaks for.
    pub department: String,
}

/// Severity of required human intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EscalationLevel {
    Standard = 1,
    High = 2,
    Critical = 3,
}

impl EscalationLevel {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<EscalationLevel> for u8 {
    fn from(level: EscalationLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for EscalationLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Standard),
            2 => Ok(Self::High),
            3 => Ok(Self::Critical),
            other => Err(format!("escalation level must be 1-3, found {other}")),
        }
    }
}

impl fmt::Display for EscalationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Escalation rules in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationCriterion {
    UrgentPriority,
    HighPriorityNegativeSentiment,
    EscalationKeywords,
    RoutingFlag,
}

/// Final escalation verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationEvaluation {
    pub escalation_needed: bool,
    pub escalation_level: Option<EscalationLevel>,
    pub reason: String,
    pub criteria: Vec<EscalationCriterion>,
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Responded,
    Escalated,
}

impl TicketStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Responded => "responded",
            Self::Escalated => "escalated",
        }
    }
}

/// Everything the pipeline decided about one ticket.
///
/// Only the pipeline assembles this, and only once every stage has succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketResult {
    ticket: Ticket,
    classification: Classification,
    routing: RoutingDecision,
    response: Response,
    escalation: EscalationEvaluation,
    status: TicketStatus,
}

impl TicketResult {
    pub(crate) fn assemble(
        ticket: Ticket,
        classification: Classification,
        routing: RoutingDecision,
        response: Response,
        escalation: EscalationEvaluation,
    ) -> Self {
        let status = if escalation.escalation_needed {
            TicketStatus::Escalated
        } else {
            TicketStatus::Responded
        };
        Self {
            ticket,
            classification,
            routing,
            response,
            escalation,
            status,
        }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn routing(&self) -> &RoutingDecision {
        &self.routing
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn escalation(&self) -> &EscalationEvaluation {
        &self.escalation
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    /// True when every decision matches `other`, ignoring ticket id and timestamp.
    pub fn same_decisions(&self, other: &TicketResult) -> bool {
        self.ticket.content == other.ticket.content
            && self.classification == other.classification
            && self.routing == other.routing
            && self.response == other.response
            && self.escalation == other.escalation
            && self.status == other.status
    }

    pub fn summary(&self) -> TicketSummary {
        TicketSummary {
            ticket_id: self.ticket.id.clone(),
            metadata: self.ticket.metadata,
            category: self.classification.category,
            priority: self.classification.priority,
            sentiment_score: self.classification.sentiment_score,
            key_issues: self.classification.key_issues.clone(),
            primary_department: self.routing.primary_department.clone(),
            backup_departments: self.routing.backup_departments.clone(),
            needs_escalation: self.routing.needs_escalation,
            confidence: self.routing.confidence,
            response_type: self.response.response_type,
            response_body: self.response.body.clone(),
            next_steps: self.response.next_steps.clone(),
            escalation_needed: self.escalation.escalation_needed,
            escalation_level: self.escalation.escalation_level,
            escalation_reason: self.escalation.reason.clone(),
            recommended_actions: self.escalation.recommended_actions.clone(),
            status: self.status,
        }
    }
}

/// Flat view of a [`TicketResult`] for presentation and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketSummary {
    pub ticket_id: TicketId,
    pub metadata: TicketMetadata,
    pub category: Category,
    pub priority: Priority,
    pub sentiment_score: f64,
    pub key_issues: Vec<String>,
    pub primary_department: String,
    pub backup_departments: Vec<String>,
    pub needs_escalation: bool,
    pub confidence: f64,
    pub response_type: ResponseType,
    pub response_body: String,
    pub next_steps: Vec<String>,
    pub escalation_needed: bool,
    pub escalation_level: Option<EscalationLevel>,
    pub escalation_reason: String,
    pub recommended_actions: Vec<String>,
    pub status: TicketStatus,
}
