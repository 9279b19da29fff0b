// JSON file store for pipeline outputs
use crate::domain::prediction::PredictionReport;
use crate::error::{PipelineError, PipelineResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> PipelineResult<()> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))
}

/// Write `value` as indented JSON, replacing any existing file.
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> PipelineResult<()> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|e| PipelineError::io(path, e))?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> PipelineResult<T> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write `predictions.json`, creating the parent directory if needed.
pub fn save_predictions(report: &PredictionReport, path: &Path) -> PipelineResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    write_pretty_json(path, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::{Prediction, PredictionStatus};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn predictions() -> Vec<Prediction> {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        vec![
            Prediction {
                timestamp: ts,
                variable_id: "RON".to_string(),
                y_hat: 89.85,
                uncertainty_lower: 89.35,
                uncertainty_upper: 90.35,
                model_id: "soft-sensor-ron-v1".to_string(),
                model_hash: "abc".to_string(),
                status: PredictionStatus::Ok,
            },
            Prediction {
                timestamp: ts,
                variable_id: "RON".to_string(),
                y_hat: f64::NAN,
                uncertainty_lower: f64::NAN,
                uncertainty_upper: f64::NAN,
                model_id: "soft-sensor-ron-v1".to_string(),
                model_hash: "abc".to_string(),
                status: PredictionStatus::Degraded,
            },
        ]
    }

    #[test]
    fn test_save_predictions_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("predictions.json");

        save_predictions(&PredictionReport::new(predictions()), &path).unwrap();
        assert!(path.exists());

        let back: PredictionReport = read_json(&path).unwrap();
        assert_eq!(back.n_total, 2);
        assert_eq!(back.n_ok, 1);
        assert_eq!(back.n_degraded, 1);
        assert_eq!(back.n_ood, 0);
        assert!(back.predictions[1].y_hat.is_nan());
    }

    #[test]
    fn test_write_is_indented() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("value.json");

        write_pretty_json(&path, &serde_json::json!({"a": 1})).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let err = read_json::<serde_json::Value>(&missing).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
