use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::triage::{IntakeError, RuleLoadError, TriageError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Rules(RuleLoadError),
    Intake(IntakeError),
    Triage(TriageError),
    Render(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Rules(err) => write!(f, "rule loading error: {}", err),
            AppError::Intake(err) => write!(f, "ticket intake error: {}", err),
            AppError::Triage(err) => write!(f, "triage error: {}", err),
            AppError::Render(err) => write!(f, "failed to render results: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Rules(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Triage(err) => Some(err),
            AppError::Render(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RuleLoadError> for AppError {
    fn from(value: RuleLoadError) -> Self {
        Self::Rules(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<TriageError> for AppError {
    fn from(value: TriageError) -> Self {
        Self::Triage(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}
