// Console progress output for the demo run
use crate::application::pipeline::{AuditOutcome, OutputPaths};
use crate::application::soft_sensor::SoftSensor;
use crate::domain::dataset::Dataset;
use crate::domain::prediction::{Prediction, PredictionReport};
use crate::domain::trace::EventType;
use std::collections::BTreeMap;

const RULE_WIDTH: usize = 60;
const SAMPLE_PREDICTIONS: usize = 5;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn print_header() {
    println!("{}", rule());
    println!("Soft Sensor Demo - Inference Pipeline");
    println!("{}", rule());
    println!();
}

pub fn print_dataset(dataset: &Dataset) {
    println!("[1/4] Generating synthetic data...");
    println!("      Generated {} samples", dataset.metadata.n_samples);
    println!("      Tags: {}", dataset.metadata.tags.join(", "));
    println!("      Data hash: {}", dataset.metadata.hash);
    println!();
}

pub fn print_sensor(sensor: &SoftSensor) {
    println!("[2/4] Initializing soft sensor...");
    println!("      Model ID: {}", sensor.config().model_id);
    println!("      Version: {}", sensor.config().version);
    println!("      Model hash: {}", sensor.model_hash());
    println!();
}

pub fn print_inference(report: &PredictionReport, paths: &OutputPaths) {
    println!("[3/4] Running inference...");
    println!("      Total predictions: {}", report.n_total);
    println!(
        "      OK: {}, DEGRADED: {}, OOD: {}",
        report.n_ok, report.n_degraded, report.n_ood
    );
    println!("      Saved to: {}", paths.predictions_file.display());
    println!();
}

pub fn print_audit(outcome: &AuditOutcome) {
    println!("[4/4] Generating audit log...");
    println!("      Entries: {}", format_summary(&outcome.summary));
    println!("      Saved to: {}", outcome.path.display());
    println!();
}

pub fn print_footer(paths: &OutputPaths, outcome: &AuditOutcome) {
    println!("{}", rule());
    println!("Demo completed successfully!");
    println!("{}", rule());
    println!();
    println!("Output files:");
    println!("  - {}", paths.dataset_file.display());
    println!("  - {}", paths.predictions_file.display());
    println!("  - {}", outcome.path.display());
    println!();
}

pub fn print_sample_predictions(predictions: &[Prediction]) {
    println!("Sample predictions:");
    for p in predictions.iter().take(SAMPLE_PREDICTIONS) {
        println!("  {}", format_prediction(p));
    }
}

pub fn format_summary(summary: &BTreeMap<EventType, usize>) -> String {
    summary
        .iter()
        .map(|(event_type, count)| format!("{}: {}", event_type, count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_prediction(p: &Prediction) -> String {
    format!(
        "{}: {:.2} [{:.2}, {:.2}] ({})",
        p.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
        p.y_hat,
        p.uncertainty_lower,
        p.uncertainty_upper,
        p.status
    )
}
