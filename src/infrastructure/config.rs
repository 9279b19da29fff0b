use crate::application::audit_log::DEFAULT_FILENAME;
use crate::application::series_generator::{Schedule, demo_start};
use crate::error::PipelineResult;
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/pipeline";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub generator: GeneratorSettings,
    pub audit: AuditSettings,
    pub recommendation: RecommendationSettings,
    pub decision: DecisionSettings,
}

impl PipelineConfig {
    /// A seed given on the command line wins over the settings file.
    pub fn with_seed_override(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.generator.seed = seed;
        }
        self
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorSettings {
    pub interval_seconds: u32,
    pub start_time: DateTime<Utc>,
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            start_time: demo_start(),
            seed: None,
        }
    }
}

impl GeneratorSettings {
    pub fn schedule(&self) -> Schedule {
        Schedule {
            interval_seconds: self.interval_seconds,
            start_time: self.start_time,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuditSettings {
    pub filename: String,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

/// Recommendation logged for every in-range prediction.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RecommendationSettings {
    pub text: String,
    pub constraints: Vec<String>,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            text: "Continue current operation (within spec)".to_string(),
            constraints: vec!["y_hat in [88, 95]".to_string()],
        }
    }
}

/// Operator decision recorded at the end of a run.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DecisionSettings {
    pub operator_id: String,
    pub recommendation_ref: String,
    pub accepted: bool,
    pub notes: Option<String>,
}

impl Default for DecisionSettings {
    fn default() -> Self {
        Self {
            operator_id: "DEMO-OPERATOR".to_string(),
            recommendation_ref: "DEMO".to_string(),
            accepted: true,
            notes: Some("Demo run - auto-accepted".to_string()),
        }
    }
}

/// Load settings from `path` (extension optional). A missing file yields
/// the defaults.
pub fn load_pipeline_config(path: &str) -> PipelineResult<PipelineConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
