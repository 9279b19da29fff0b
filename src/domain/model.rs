// Soft sensor model configuration
use crate::error::PipelineResult;
use crate::infrastructure::json_store::read_json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Static linear model: `y = intercept + sum(coefficient[tag] * value[tag])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_id: String,
    pub version: String,
    pub input_tags: Vec<String>,
    pub output_variable: String,
    pub coefficients: BTreeMap<String, f64>,
    pub intercept: f64,
    /// Half-width of the prediction interval.
    pub uncertainty_factor: f64,
}

impl ModelConfig {
    /// Baseline RON model over the four demo tags.
    pub fn baseline() -> Self {
        let coefficients = [
            ("TI-101", 0.005),
            ("PI-201", 0.1),
            ("FI-301", 0.0001),
            ("AI-401", 2.0),
        ]
        .into_iter()
        .map(|(tag, coef)| (tag.to_string(), coef))
        .collect();

        Self {
            model_id: "soft-sensor-ron-v1".to_string(),
            version: "0.1.0-demo".to_string(),
            input_tags: ["TI-101", "PI-201", "FI-301", "AI-401"]
                .into_iter()
                .map(String::from)
                .collect(),
            output_variable: "RON".to_string(),
            coefficients,
            intercept: 85.0,
            uncertainty_factor: 0.5,
        }
    }

    /// Load a trained configuration from a JSON file.
    pub fn from_file(path: &Path) -> PipelineResult<Self> {
        read_json(path)
    }

    /// Coefficient tags that are not listed as inputs. Empty for a
    /// well-formed configuration.
    pub fn unlisted_coefficients(&self) -> Vec<&str> {
        self.coefficients
            .keys()
            .filter(|tag| !self.input_tags.contains(tag))
            .map(String::as_str)
            .collect()
    }
}
