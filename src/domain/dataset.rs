// Dataset produced by one generation run
use super::sample::{QualitySample, TagSample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub generated_at: DateTime<Utc>,
    pub n_samples: usize,
    /// Tag identifiers in generation order.
    pub tags: Vec<String>,
    pub quality_variable: String,
    /// Fingerprint of the serialized quality samples.
    pub hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    pub tags: BTreeMap<String, Vec<TagSample>>,
    pub quality: Vec<QualitySample>,
}

impl Dataset {
    pub fn new(
        metadata: DatasetMetadata,
        tags: BTreeMap<String, Vec<TagSample>>,
        quality: Vec<QualitySample>,
    ) -> Self {
        Self {
            metadata,
            tags,
            quality,
        }
    }

    /// Samples at `index` across all tags, in metadata tag order.
    /// Tags whose series is shorter than `index + 1` are skipped.
    pub fn cross_section(&self, index: usize) -> Vec<&TagSample> {
        self.metadata
            .tags
            .iter()
            .filter_map(|tag_id| self.tags.get(tag_id))
            .filter_map(|samples| samples.get(index))
            .collect()
    }
}
