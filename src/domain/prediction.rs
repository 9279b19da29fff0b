// Soft sensor predictions
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionStatus {
    Ok,
    /// Inputs were missing or NaN; estimate and bounds are NaN.
    Degraded,
    /// Estimate fell outside the range the model is trusted for.
    Ood,
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PredictionStatus::Ok => "OK",
            PredictionStatus::Degraded => "DEGRADED",
            PredictionStatus::Ood => "OOD",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub timestamp: DateTime<Utc>,
    pub variable_id: String,
    #[serde(with = "crate::domain::nan_as_null")]
    pub y_hat: f64,
    #[serde(with = "crate::domain::nan_as_null")]
    pub uncertainty_lower: f64,
    #[serde(with = "crate::domain::nan_as_null")]
    pub uncertainty_upper: f64,
    pub model_id: String,
    pub model_hash: String,
    pub status: PredictionStatus,
}

/// Contents of `predictions.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub predictions: Vec<Prediction>,
    pub n_total: usize,
    pub n_ok: usize,
    pub n_degraded: usize,
    pub n_ood: usize,
}

impl PredictionReport {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        let count = |status: PredictionStatus| {
            predictions.iter().filter(|p| p.status == status).count()
        };
        let n_ok = count(PredictionStatus::Ok);
        let n_degraded = count(PredictionStatus::Degraded);
        let n_ood = count(PredictionStatus::Ood);

        Self {
            n_total: predictions.len(),
            n_ok,
            n_degraded,
            n_ood,
            predictions,
        }
    }
}
