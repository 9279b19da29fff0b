// Process tag and quality variable samples
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quality-control flag attached to each tag reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QcFlag {
    Ok,
    Suspect,
    Bad,
}

/// Where a quality value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleSource {
    #[allow(dead_code)]
    Lab,
    Simulated,
}

/// One reading of one process tag. `value` is NaN when the reading is BAD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSample {
    pub timestamp: DateTime<Utc>,
    pub tag_id: String,
    #[serde(with = "crate::domain::nan_as_null")]
    pub value: f64,
    pub unit: String,
    pub qc_flag: QcFlag,
}

impl TagSample {
    pub fn new(
        timestamp: DateTime<Utc>,
        tag_id: String,
        value: f64,
        unit: String,
        qc_flag: QcFlag,
    ) -> Self {
        Self {
            timestamp,
            tag_id,
            value,
            unit,
            qc_flag,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.qc_flag == QcFlag::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySample {
    pub timestamp: DateTime<Utc>,
    pub variable_id: String,
    pub value: f64,
    pub unit: String,
    pub source: SampleSource,
}

impl QualitySample {
    pub fn new(
        timestamp: DateTime<Utc>,
        variable_id: String,
        value: f64,
        unit: String,
        source: SampleSource,
    ) -> Self {
        Self {
            timestamp,
            variable_id,
            value,
            unit,
            source,
        }
    }
}

/// Static description of a simulated tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpec {
    pub tag_id: String,
    pub base_value: f64,
    pub noise_std: f64,
    pub unit: String,
}

impl TagSpec {
    pub fn new(tag_id: &str, base_value: f64, noise_std: f64, unit: &str) -> Self {
        Self {
            tag_id: tag_id.to_string(),
            base_value,
            noise_std,
            unit: unit.to_string(),
        }
    }
}
