// Soft sensor - Linear RON estimate from current process tag values
use crate::application::clock::Clock;
use crate::domain::dataset::Dataset;
use crate::domain::fingerprint::fingerprint;
use crate::domain::model::ModelConfig;
use crate::domain::nan_as_null::round_to;
use crate::domain::prediction::{Prediction, PredictionStatus};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

const VALID_RANGE_LOW: f64 = 80.0;
const VALID_RANGE_HIGH: f64 = 100.0;
const OOD_WIDENING: f64 = 2.0;
const OUTPUT_DIGITS: i32 = 3;

#[derive(Clone)]
pub struct SoftSensor {
    config: ModelConfig,
    model_hash: String,
    /// Standard deviations. Not used by the range check, which works on
    /// fixed bounds.
    #[allow(dead_code)]
    ood_threshold: f64,
    clock: Arc<dyn Clock>,
}

impl SoftSensor {
    pub fn new(config: ModelConfig, clock: Arc<dyn Clock>) -> serde_json::Result<Self> {
        let model_hash = fingerprint(&config)?;

        let unlisted = config.unlisted_coefficients();
        if !unlisted.is_empty() {
            tracing::warn!(
                "Model {} has coefficients for tags outside its inputs: {:?}",
                config.model_id,
                unlisted
            );
        }

        Ok(Self {
            config,
            model_hash,
            ood_threshold: 2.0,
            clock,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn model_hash(&self) -> &str {
        &self.model_hash
    }

    /// Predict from the current tag values. Missing or NaN inputs give a
    /// DEGRADED prediction with NaN estimate and bounds.
    pub fn predict(
        &self,
        tag_values: &HashMap<String, f64>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Prediction {
        let timestamp = timestamp.unwrap_or_else(|| self.clock.now());

        let inputs_valid = self
            .config
            .input_tags
            .iter()
            .all(|tag| tag_values.get(tag).is_some_and(|v| !v.is_nan()));

        if !inputs_valid {
            return self.prediction(timestamp, f64::NAN, f64::NAN, PredictionStatus::Degraded);
        }

        let y_hat = self.config.intercept
            + self
                .config
                .coefficients
                .iter()
                .map(|(tag, coef)| coef * tag_values.get(tag).copied().unwrap_or(0.0))
                .sum::<f64>();

        let mut uncertainty = self.config.uncertainty_factor;
        let mut status = PredictionStatus::Ok;
        if !(VALID_RANGE_LOW..=VALID_RANGE_HIGH).contains(&y_hat) {
            status = PredictionStatus::Ood;
            uncertainty *= OOD_WIDENING;
        }

        self.prediction(timestamp, y_hat, uncertainty, status)
    }

    /// One prediction per sample index. Only OK-flagged samples are used as
    /// inputs; the timestamp comes from the first tag (in dataset order)
    /// that has a sample at the index.
    pub fn predict_batch(&self, dataset: &Dataset) -> Vec<Prediction> {
        (0..dataset.metadata.n_samples)
            .map(|i| {
                let section = dataset.cross_section(i);
                let timestamp = section.first().map(|s| s.timestamp);
                let tag_values: HashMap<String, f64> = section
                    .iter()
                    .filter(|s| s.is_usable())
                    .map(|s| (s.tag_id.clone(), s.value))
                    .collect();

                self.predict(&tag_values, timestamp)
            })
            .collect()
    }

    fn prediction(
        &self,
        timestamp: DateTime<Utc>,
        y_hat: f64,
        uncertainty: f64,
        status: PredictionStatus,
    ) -> Prediction {
        Prediction {
            timestamp,
            variable_id: self.config.output_variable.clone(),
            y_hat: round_to(y_hat, OUTPUT_DIGITS),
            uncertainty_lower: round_to(y_hat - uncertainty, OUTPUT_DIGITS),
            uncertainty_upper: round_to(y_hat + uncertainty, OUTPUT_DIGITS),
            model_id: self.config.model_id.clone(),
            model_hash: self.model_hash.clone(),
            status,
        }
    }
}
