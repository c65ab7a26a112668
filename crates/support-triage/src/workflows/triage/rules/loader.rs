use std::fs;
use std::path::{Path, PathBuf};

use super::config::RuleConfig;

/// Failure to read or parse a rule file. Validation happens separately in `RuleBook::compile`.
#[derive(Debug, thiserror::Error)]
pub enum RuleLoadError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("rule file is not valid triage YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl RuleConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, RuleLoadError> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, RuleLoadError> {
        let content = fs::read_to_string(path).map_err(|source| RuleLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> Result<String, RuleLoadError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SHIPPED_RULES: &str = include_str!("../../../../../../config/triage_rules.yaml");

    #[test]
    fn shipped_rule_file_matches_standard_rules() {
        let loaded = RuleConfig::from_yaml_str(SHIPPED_RULES).expect("shipped rules parse");
        assert_eq!(loaded, RuleConfig::standard());
    }

    #[test]
    fn standard_rules_survive_yaml_export() {
        let yaml = RuleConfig::standard()
            .to_yaml_string()
            .expect("rules serialize");
        let reparsed = RuleConfig::from_yaml_str(&yaml).expect("rules reparse");
        assert_eq!(reparsed, RuleConfig::standard());
    }

    #[test]
    fn load_reads_rules_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SHIPPED_RULES.as_bytes())
            .expect("write rules");

        let loaded = RuleConfig::load(file.path()).expect("rules load");
        assert_eq!(loaded.routing.escalation_department, "escalation_team");
    }

    #[test]
    fn missing_section_is_a_parse_error() {
        let err = RuleConfig::from_yaml_str("classification: {}\n").expect_err("incomplete");
        assert!(matches!(err, RuleLoadError::Yaml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RuleConfig::load(Path::new("/nonexistent/triage_rules.yaml"))
            .expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/triage_rules.yaml"));
    }
}
