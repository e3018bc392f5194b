//! Data source and audit log configuration (`[data]` and `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where user, asset and market records come from
///
/// ```toml
/// [data]
/// documents = "./data/council.json"
/// ```
///
/// Without a documents path the built-in sample records are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    pub documents: Option<String>,
}

/// Audit trail output
///
/// ```toml
/// [logging]
/// audit_log = "~/.local/share/investment-council/audit.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving council events; disabled when unset
    pub audit_log: Option<String>,
}

impl FileDataConfig {
    pub fn documents_path(&self) -> Option<PathBuf> {
        self.documents.as_deref().map(expand_home)
    }
}

impl FileLoggingConfig {
    pub fn audit_log_path(&self) -> Option<PathBuf> {
        self.audit_log.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_untouched() {
        let config = FileDataConfig {
            documents: Some("./data/council.json".to_string()),
        };
        assert_eq!(
            config.documents_path(),
            Some(PathBuf::from("./data/council.json"))
        );
    }

    #[test]
    fn test_home_expansion() {
        let config = FileLoggingConfig {
            audit_log: Some("~/audit.jsonl".to_string()),
        };
        let path = config.audit_log_path().unwrap();
        if dirs::home_dir().is_some() {
            assert!(!path.to_string_lossy().starts_with('~'));
        }
        assert!(path.ends_with("audit.jsonl"));
    }

    #[test]
    fn test_unset_by_default() {
        assert!(FileDataConfig::default().documents_path().is_none());
        assert!(FileLoggingConfig::default().audit_log_path().is_none());
    }
}
