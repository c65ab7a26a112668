use std::fmt;

/// Pipeline stage names used when reporting invariant failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classification,
    Routing,
    Response,
    Escalation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Classification => "classification",
            Stage::Routing => "routing",
            Stage::Response => "response",
            Stage::Escalation => "escalation",
        };
        f.write_str(label)
    }
}

/// Error raised while preparing or running the triage pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("ticket input is not valid text: {0}")]
    InvalidInput(String),
    #[error("rule configuration is missing {0}")]
    ConfigurationMissing(String),
    #[error("rule configuration is invalid: {0}")]
    ConfigurationInvalid(String),
    #[error("{stage} stage violated its output contract: {detail}")]
    StageInvariantViolation { stage: Stage, detail: String },
}

impl TriageError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Self::ConfigurationMissing(what.into())
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::ConfigurationInvalid(what.into())
    }

    pub(crate) fn violation(stage: Stage, detail: impl Into<String>) -> Self {
        Self::StageInvariantViolation {
            stage,
            detail: detail.into(),
        }
    }
}
