use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{Category, Priority, ResponseType};

/// Complete rule configuration driving every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub classification: ClassificationRules,
    pub routing: RoutingRules,
    pub responses: ResponseRules,
    pub escalation: EscalationRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRules {
    pub category_keywords: BTreeMap<Category, Vec<String>>,
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    pub escalation_keywords: Vec<String>,
    /// Checked in order; the first band whose `at_most` admits the score sets the base priority.
    pub sentiment_bands: Vec<SentimentBand>,
    pub triggers: TriggerThresholds,
    pub max_key_issues: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentBand {
    pub priority: Priority,
    pub at_most: f64,
}

/// Distinct escalation-keyword counts that raise the base priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerThresholds {
    pub bump_at: usize,
    pub urgent_at: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingRules {
    pub departments: BTreeMap<String, DepartmentProfile>,
    pub primary_departments: BTreeMap<Category, String>,
    #[serde(default)]
    pub backup_departments: BTreeMap<Category, Vec<String>>,
    pub fallback_department: String,
    pub escalation_department: String,
    pub negative_sentiment_threshold: f64,
    pub confidence: ConfidenceRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentProfile {
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceRules {
    pub floor: f64,
    pub ceiling: f64,
    pub no_match: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRules {
    pub greeting: String,
    pub signature: String,
    pub templates: BTreeMap<Category, String>,
    pub tones: BTreeMap<Priority, ToneMarkers>,
    pub next_steps: BTreeMap<ResponseType, Vec<String>>,
}

/// Priority-dependent phrasing wrapped around the category template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToneMarkers {
    #[serde(default)]
    pub opening: String,
    #[serde(default)]
    pub closing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationRules {
    pub negative_sentiment_threshold: f64,
    pub keyword_minimum: usize,
    pub legal_keywords: Vec<String>,
    pub actions: EscalationActions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationActions {
    pub no_escalation: Vec<String>,
    pub level_1: Vec<String>,
    pub level_2: Vec<String>,
    pub level_3: Vec<String>,
}
