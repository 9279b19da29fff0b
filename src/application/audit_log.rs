// Audit log - Append-only trail of predictions, recommendations and decisions
use crate::application::clock::Clock;
use crate::domain::fingerprint::fingerprint;
use crate::domain::prediction::Prediction;
use crate::domain::trace::{EventType, InputSummary, TraceEntry, TracePayload};
use crate::error::PipelineResult;
use crate::infrastructure::json_store::{ensure_dir, write_pretty_json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const LOG_VERSION: &str = "1.0";
pub const DEFAULT_FILENAME: &str = "audit_log.json";

/// On-disk layout of a saved log.
#[derive(Serialize)]
struct AuditLogDocument<'a> {
    log_version: &'static str,
    generated_at: DateTime<Utc>,
    n_entries: usize,
    entries: &'a [TraceEntry],
}

/// Hashed form of the inputs behind a prediction.
#[derive(Serialize)]
struct PredictionInputs<'a, T> {
    tags: &'a BTreeMap<String, T>,
}

/// In-memory audit trail owned by one pipeline run. Not synchronized;
/// callers appending from several threads must wrap it themselves.
pub struct AuditLog {
    log_dir: PathBuf,
    entries: Vec<TraceEntry>,
    counter: u32,
    clock: Arc<dyn Clock>,
}

impl AuditLog {
    /// Create the log, making `log_dir` (and parents) right away.
    pub fn new(log_dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> PipelineResult<Self> {
        let log_dir = log_dir.into();
        ensure_dir(&log_dir)?;

        Ok(Self {
            log_dir,
            entries: Vec::new(),
            counter: 0,
            clock,
        })
    }

    #[allow(dead_code)]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    #[allow(dead_code)]
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Record a prediction together with the inputs it was made from.
    pub fn log_prediction<T: Serialize>(
        &mut self,
        prediction: &Prediction,
        inputs: &BTreeMap<String, T>,
        model_hash: &str,
    ) -> PipelineResult<&TraceEntry> {
        let data_hash = fingerprint(&PredictionInputs { tags: inputs })?;
        let payload = TracePayload::Prediction {
            prediction: prediction.clone(),
            input_summary: InputSummary {
                n_tags: inputs.len(),
                timestamp: prediction.timestamp,
            },
        };

        Ok(self.append(EventType::Prediction, payload, data_hash, Some(model_hash), None))
    }

    pub fn log_recommendation(
        &mut self,
        recommendation: &str,
        prediction: &Prediction,
        constraints: &[String],
        model_hash: &str,
    ) -> PipelineResult<&TraceEntry> {
        let data_hash = fingerprint(prediction)?;
        let payload = TracePayload::Recommendation {
            recommendation: recommendation.to_string(),
            prediction_ref: prediction.timestamp,
            constraints_applied: constraints.to_vec(),
            status: prediction.status,
        };

        Ok(self.append(EventType::Recommendation, payload, data_hash, Some(model_hash), None))
    }

    /// Record an operator's response to a recommendation.
    pub fn log_decision(
        &mut self,
        accepted: bool,
        recommendation_ref: &str,
        operator_id: &str,
        notes: Option<&str>,
    ) -> PipelineResult<&TraceEntry> {
        let data_hash = fingerprint(&json!({ "accepted": accepted, "ref": recommendation_ref }))?;
        let payload = TracePayload::Decision {
            accepted,
            recommendation_ref: recommendation_ref.to_string(),
            notes: notes.map(str::to_string),
        };

        Ok(self.append(EventType::Decision, payload, data_hash, None, Some(operator_id)))
    }

    /// Record a failure reported by a collaborator. The demo run itself
    /// never logs errors here.
    #[allow(dead_code)]
    pub fn log_error(
        &mut self,
        error_type: &str,
        message: &str,
        context: Option<Map<String, Value>>,
    ) -> PipelineResult<&TraceEntry> {
        let data_hash = fingerprint(&json!({ "error": error_type, "msg": message }))?;
        let payload = TracePayload::Error {
            error_type: error_type.to_string(),
            message: message.to_string(),
            context: context.unwrap_or_default(),
        };

        Ok(self.append(EventType::Error, payload, data_hash, None, None))
    }

    /// Write every entry logged so far to `log_dir/filename`, replacing the
    /// file. Entries stay in memory.
    pub fn save(&self, filename: &str) -> PipelineResult<PathBuf> {
        let path = self.log_dir.join(filename);
        let document = AuditLogDocument {
            log_version: LOG_VERSION,
            generated_at: self.clock.now(),
            n_entries: self.entries.len(),
            entries: &self.entries,
        };
        write_pretty_json(&path, &document)?;

        tracing::info!("Audit log with {} entries saved to {}", self.entries.len(), path.display());
        Ok(path)
    }

    /// Entry count per event type; every type is present.
    pub fn summary(&self) -> BTreeMap<EventType, usize> {
        let mut counts: BTreeMap<EventType, usize> =
            EventType::ALL.iter().map(|t| (*t, 0)).collect();
        for entry in &self.entries {
            *counts.entry(entry.event_type).or_insert(0) += 1;
        }
        counts
    }

    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("TRACE-{}-{:04}", self.clock.now().format("%Y%m%d%H%M%S"), self.counter)
    }

    fn append(
        &mut self,
        event_type: EventType,
        payload: TracePayload,
        data_hash: String,
        model_hash: Option<&str>,
        operator_id: Option<&str>,
    ) -> &TraceEntry {
        let entry = TraceEntry {
            entry_id: self.next_id(),
            timestamp: self.clock.now(),
            event_type,
            payload,
            data_hash,
            model_hash: model_hash.map(str::to_string),
            operator_id: operator_id.map(str::to_string),
        };
        tracing::debug!("Logged {} entry {}", entry.event_type, entry.entry_id);

        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::testing::FixedClock;
    use crate::domain::prediction::PredictionStatus;
    use crate::infrastructure::json_store::read_json;
    use tempfile::TempDir;

    fn audit_log(dir: &Path) -> AuditLog {
        AuditLog::new(dir, Arc::new(FixedClock::at(2026, 1, 1, 8, 0, 0))).unwrap()
    }

    fn prediction(y_hat: f64) -> Prediction {
        Prediction {
            timestamp: FixedClock::at(2026, 1, 1, 8, 0, 0).0,
            variable_id: "RON".to_string(),
            y_hat,
            uncertainty_lower: y_hat - 0.5,
            uncertainty_upper: y_hat + 0.5,
            model_id: "soft-sensor-ron-v1".to_string(),
            model_hash: "abc123".to_string(),
            status: PredictionStatus::Ok,
        }
    }

    fn inputs() -> BTreeMap<String, f64> {
        BTreeMap::from([("TI-101".to_string(), 350.0)])
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("audit");
        let log = audit_log(&dir);
        assert!(dir.is_dir());
        assert_eq!(log.log_dir(), dir.as_path());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_log_prediction() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());

        let entry = log.log_prediction(&prediction(92.5), &inputs(), "abc123").unwrap();
        assert_eq!(entry.event_type, EventType::Prediction);
        assert_eq!(entry.model_hash.as_deref(), Some("abc123"));
        assert_eq!(entry.operator_id, None);
        assert_eq!(entry.entry_id, "TRACE-20260101080000-0001");
        assert_eq!(entry.data_hash, fingerprint(&json!({"tags": {"TI-101": 350.0}})).unwrap());
        match &entry.payload {
            TracePayload::Prediction { prediction, input_summary } => {
                assert_eq!(prediction.y_hat, 92.5);
                assert_eq!(input_summary.n_tags, 1);
                assert_eq!(input_summary.timestamp, prediction.timestamp);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn test_entry_ids_increase() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());

        log.log_prediction(&prediction(92.5), &inputs(), "abc").unwrap();
        log.log_error("SensorFault", "TI-101 offline", None).unwrap();
        log.log_decision(true, "ref", "OP001", None).unwrap();

        let ids: Vec<&str> = log.entries().iter().map(|e| e.entry_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "TRACE-20260101080000-0001",
                "TRACE-20260101080000-0002",
                "TRACE-20260101080000-0003",
            ]
        );
    }

    #[test]
    fn test_log_recommendation() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());
        let pred = prediction(92.5);

        let constraints = vec!["max_rate < 1600".to_string()];
        let entry = log
            .log_recommendation("Increase feed rate by 2%", &pred, &constraints, "abc123")
            .unwrap();

        assert_eq!(entry.event_type, EventType::Recommendation);
        assert_eq!(entry.data_hash, fingerprint(&pred).unwrap());
        let json = serde_json::to_value(&entry.payload).unwrap();
        assert_eq!(json["recommendation"], "Increase feed rate by 2%");
        assert_eq!(json["prediction_ref"], "2026-01-01T08:00:00Z");
        assert_eq!(json["constraints_applied"][0], "max_rate < 1600");
        assert_eq!(json["status"], "OK");
    }

    #[test]
    fn test_log_decision() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());

        let entry = log
            .log_decision(
                true,
                "TRACE-20260101080000-0002",
                "OP001",
                Some("Verified with shift supervisor"),
            )
            .unwrap();
        assert_eq!(entry.event_type, EventType::Decision);
        assert_eq!(entry.model_hash, None);
        assert_eq!(entry.operator_id.as_deref(), Some("OP001"));
        assert_eq!(
            entry.data_hash,
            fingerprint(&json!({"accepted": true, "ref": "TRACE-20260101080000-0002"})).unwrap()
        );
    }

    #[test]
    fn test_log_error_defaults_context() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());

        let entry = log.log_error("SensorFault", "TI-101 offline", None).unwrap();
        assert_eq!(entry.event_type, EventType::Error);
        let json = serde_json::to_value(&entry.payload).unwrap();
        assert_eq!(json["error_type"], "SensorFault");
        assert_eq!(json["message"], "TI-101 offline");
        assert_eq!(json["context"], json!({}));
    }

    #[test]
    fn test_summary_counts() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());

        log.log_prediction(&prediction(92.5), &inputs(), "abc").unwrap();
        log.log_prediction(&prediction(93.0), &inputs(), "abc").unwrap();
        log.log_decision(true, "ref", "OP001", None).unwrap();

        let summary = log.summary();
        assert_eq!(
            summary,
            BTreeMap::from([
                (EventType::Prediction, 2),
                (EventType::Recommendation, 0),
                (EventType::Decision, 1),
                (EventType::Error, 0),
            ])
        );
    }

    #[test]
    fn test_empty_summary_lists_all_types() {
        let temp_dir = TempDir::new().unwrap();
        let log = audit_log(temp_dir.path());
        let summary = log.summary();
        assert_eq!(summary.len(), 4);
        assert!(summary.values().all(|&n| n == 0));
    }

    #[test]
    fn test_save_writes_all_entries() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());
        log.log_prediction(&prediction(92.5), &inputs(), "abc123").unwrap();

        let path = log.save("test_log.json").unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "test_log.json");

        let doc: Value = read_json(&path).unwrap();
        assert_eq!(doc["log_version"], "1.0");
        assert_eq!(doc["n_entries"], 1);
        assert_eq!(doc["generated_at"], "2026-01-01T08:00:00Z");

        let entries: Vec<TraceEntry> = serde_json::from_value(doc["entries"].clone()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_id, log.entries()[0].entry_id);
        assert_eq!(entries[0].data_hash, log.entries()[0].data_hash);
    }

    #[test]
    fn test_save_reflects_total_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = audit_log(temp_dir.path());

        log.log_decision(false, "ref", "OP001", None).unwrap();
        log.save(DEFAULT_FILENAME).unwrap();
        log.log_decision(true, "ref", "OP001", None).unwrap();
        let path = log.save(DEFAULT_FILENAME).unwrap();

        let doc: Value = read_json(&path).unwrap();
        assert_eq!(doc["n_entries"], 2);
        assert_eq!(log.entries().len(), 2);
    }
}
