// Audit trail entries
use super::prediction::{Prediction, PredictionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Prediction,
    Recommendation,
    Decision,
    Error,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Prediction,
        EventType::Recommendation,
        EventType::Decision,
        EventType::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Prediction => "PREDICTION",
            EventType::Recommendation => "RECOMMENDATION",
            EventType::Decision => "DECISION",
            EventType::Error => "ERROR",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSummary {
    pub n_tags: usize,
    pub timestamp: DateTime<Utc>,
}

/// Event-specific body of a trace entry. Serialized without a tag; the
/// shapes are told apart by their required fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TracePayload {
    Prediction {
        prediction: Prediction,
        input_summary: InputSummary,
    },
    Recommendation {
        recommendation: String,
        prediction_ref: DateTime<Utc>,
        constraints_applied: Vec<String>,
        status: PredictionStatus,
    },
    Decision {
        accepted: bool,
        recommendation_ref: String,
        notes: Option<String>,
    },
    Error {
        error_type: String,
        message: String,
        context: Map<String, Value>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub entry_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub payload: TracePayload,
    pub data_hash: String,
    pub model_hash: Option<String>,
    pub operator_id: Option<String>,
}
