// Demo pipeline - generate, predict, persist and audit
use crate::application::audit_log::AuditLog;
use crate::application::clock::Clock;
use crate::application::series_generator::SeriesGenerator;
use crate::application::soft_sensor::SoftSensor;
use crate::domain::dataset::Dataset;
use crate::domain::model::ModelConfig;
use crate::domain::prediction::{PredictionReport, PredictionStatus};
use crate::domain::sample::TagSample;
use crate::domain::trace::EventType;
use crate::error::PipelineResult;
use crate::infrastructure::config::PipelineConfig;
use crate::infrastructure::json_store::save_predictions;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Output locations under the run directory.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub data_dir: PathBuf,
    pub dataset_file: PathBuf,
    pub predictions_file: PathBuf,
    pub audit_dir: PathBuf,
}

impl OutputPaths {
    pub fn new(output_dir: &Path) -> Self {
        let data_dir = output_dir.join("data");
        Self {
            dataset_file: data_dir.join(crate::application::series_generator::DATASET_FILE),
            data_dir,
            predictions_file: output_dir.join("predictions.json"),
            audit_dir: output_dir.join("audit"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub path: PathBuf,
    pub summary: BTreeMap<EventType, usize>,
}

/// Model from `path` when given, the baseline model otherwise.
pub fn select_model(path: Option<&Path>) -> PipelineResult<ModelConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading model configuration from {}", path.display());
            ModelConfig::from_file(path)
        }
        None => Ok(ModelConfig::baseline()),
    }
}

pub struct DemoPipeline {
    config: PipelineConfig,
    clock: Arc<dyn Clock>,
    paths: OutputPaths,
}

impl DemoPipeline {
    pub fn new(config: PipelineConfig, clock: Arc<dyn Clock>, output_dir: &Path) -> Self {
        Self {
            config,
            clock,
            paths: OutputPaths::new(output_dir),
        }
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Step 1: synthetic dataset, written under `data/`.
    pub fn generate(&self, n_samples: usize) -> PipelineResult<Dataset> {
        let settings = &self.config.generator;
        if let Some(seed) = settings.seed {
            tracing::info!("Generating with fixed seed {}", seed);
        }

        SeriesGenerator::from_seed(settings.seed, self.clock.clone())
            .with_schedule(settings.schedule())
            .demo_dataset(n_samples, Some(&self.paths.data_dir))
    }

    /// Step 2
    pub fn build_sensor(&self, model: ModelConfig) -> PipelineResult<SoftSensor> {
        Ok(SoftSensor::new(model, self.clock.clone())?)
    }

    /// Step 3: batch predictions, written to `predictions.json`.
    pub fn infer(
        &self,
        sensor: &SoftSensor,
        dataset: &Dataset,
    ) -> PipelineResult<PredictionReport> {
        let report = PredictionReport::new(sensor.predict_batch(dataset));
        tracing::debug!(
            "Predictions: {} OK, {} degraded, {} out of range",
            report.n_ok,
            report.n_degraded,
            report.n_ood
        );

        save_predictions(&report, &self.paths.predictions_file)?;
        Ok(report)
    }

    /// Step 4: one PREDICTION entry per prediction, a RECOMMENDATION for
    /// each OK prediction and a single operator DECISION.
    pub fn audit(
        &self,
        sensor: &SoftSensor,
        dataset: &Dataset,
        report: &PredictionReport,
    ) -> PipelineResult<AuditOutcome> {
        let mut audit = AuditLog::new(&self.paths.audit_dir, self.clock.clone())?;
        let recommendation = &self.config.recommendation;

        for (i, prediction) in report.predictions.iter().enumerate() {
            let inputs: BTreeMap<String, &TagSample> = dataset
                .cross_section(i)
                .into_iter()
                .map(|s| (s.tag_id.clone(), s))
                .collect();
            audit.log_prediction(prediction, &inputs, sensor.model_hash())?;

            if prediction.status == PredictionStatus::Ok {
                audit.log_recommendation(
                    &recommendation.text,
                    prediction,
                    &recommendation.constraints,
                    sensor.model_hash(),
                )?;
            }
        }

        let decision = &self.config.decision;
        audit.log_decision(
            decision.accepted,
            &decision.recommendation_ref,
            &decision.operator_id,
            decision.notes.as_deref(),
        )?;

        let path = audit.save(&self.config.audit.filename)?;
        Ok(AuditOutcome {
            path,
            summary: audit.summary(),
        })
    }
}
