//! JSONL audit trail for council runs.
//!
//! Each [`CouncilEvent`] becomes one JSON line carrying its `type`, a
//! millisecond `timestamp` and the `run` identifier, merged with the event
//! payload. The file is opened in append mode so successive runs share one
//! trail and can be told apart by `run`.

use council_application::{CouncilEvent, CouncilLogger};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Audit logger writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and on `Drop`.
pub struct JsonlCouncilLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
}

impl JsonlCouncilLogger {
    /// Open (or create) the audit file at `path`.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened; the run then proceeds without an audit trail.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    /// Override the generated run identifier.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    fn record(&self, event: CouncilEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        map.insert("run".to_string(), Value::String(self.run_id.clone()));
        Value::Object(map)
    }
}

impl CouncilLogger for JsonlCouncilLogger {
    fn log(&self, event: CouncilEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlCouncilLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit").join("council.jsonl");
        let logger = JsonlCouncilLogger::new(&path).unwrap().with_run_id("run-1");

        logger.log(CouncilEvent::new(
            "agent_accepted",
            serde_json::json!({"agent": "risk_qualification", "verdict": "APPROVE"}),
        ));
        logger.log(CouncilEvent::new(
            "evaluation",
            serde_json::json!({"iteration": 1, "action": "TERMINATE", "reason": "CONSENSUS"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record["run"], "run-1");
            assert!(record.get("timestamp").is_some());
        }
        assert_eq!(records[0]["type"], "agent_accepted");
        assert_eq!(records[0]["agent"], "risk_qualification");
        assert_eq!(records[1]["reason"], "CONSENSUS");
    }

    #[test]
    fn test_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("council.jsonl");

        for run in ["a", "b"] {
            let logger = JsonlCouncilLogger::new(&path).unwrap().with_run_id(run);
            logger.log(CouncilEvent::new("run_started", serde_json::json!({})));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["run"], "a");
        assert_eq!(records[1]["run"], "b");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("council.jsonl");
        let logger = JsonlCouncilLogger::new(&path).unwrap();

        logger.log(CouncilEvent::new("fallback", serde_json::json!("timeout")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "fallback");
        assert_eq!(records[0]["data"], "timeout");
    }

    #[test]
    fn test_unwritable_path_disables_logging() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as the log file
        assert!(JsonlCouncilLogger::new(dir.path()).is_none());
    }
}
