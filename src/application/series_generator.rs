// Series generator - Synthetic process tags and the derived quality variable
use crate::application::clock::Clock;
use crate::domain::dataset::{Dataset, DatasetMetadata};
use crate::domain::fingerprint::fingerprint;
use crate::domain::nan_as_null::round_to;
use crate::domain::sample::{QcFlag, QualitySample, SampleSource, TagSample, TagSpec};
use crate::error::PipelineResult;
use crate::infrastructure::json_store::{ensure_dir, write_pretty_json};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::path::Path;
use std::sync::Arc;

const SUSPECT_PROBABILITY: f64 = 0.02;
const BAD_PROBABILITY: f64 = 0.005;
const TREND_RATE: f64 = 0.001;
const DRIFT_AMPLITUDE: f64 = 0.1;
const DRIFT_PERIOD_STEPS: f64 = 50.0;
const TAG_DIGITS: i32 = 4;

const QUALITY_BASELINE: f64 = 90.0;
const QUALITY_WEIGHT: f64 = 0.01;
const LAB_NOISE_STD: f64 = 0.3;
const QUALITY_DIGITS: i32 = 2;

pub const QUALITY_VARIABLE: &str = "RON";
pub const QUALITY_UNIT: &str = "octane";
pub const DATASET_FILE: &str = "dataset.json";

/// 2026-01-01T08:00:00Z
const DEMO_START_EPOCH: i64 = 1_767_254_400;

/// Temperature, pressure, flow and a simulated PAT analyzer.
pub fn demo_tags() -> Vec<TagSpec> {
    vec![
        TagSpec::new("TI-101", 350.0, 5.0, "°C"),
        TagSpec::new("PI-201", 12.5, 0.3, "bar"),
        TagSpec::new("FI-301", 1500.0, 50.0, "kg/h"),
        TagSpec::new("AI-401", 0.85, 0.02, "ratio"),
    ]
}

pub fn demo_start() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(DEMO_START_EPOCH, 0).unwrap_or_default()
}

/// Sampling grid used for the demo dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub interval_seconds: u32,
    pub start_time: DateTime<Utc>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            start_time: demo_start(),
        }
    }
}

/// Lazy, finite tag series. Each step draws fresh randomness from the
/// generator's RNG, so a consumed series cannot be replayed.
pub struct TagSeries<'a, R: Rng> {
    rng: &'a mut R,
    spec: TagSpec,
    n_samples: usize,
    index: usize,
    interval_seconds: i64,
    start: DateTime<Utc>,
}

impl<R: Rng> TagSeries<'_, R> {
    fn sample_value(&mut self, step: f64) -> f64 {
        let base = self.spec.base_value;
        let trend = TREND_RATE * step * base;
        let z: f64 = self.rng.sample(StandardNormal);
        let noise = z * self.spec.noise_std;
        let drift = DRIFT_AMPLITUDE * base * (2.0 * PI * step / DRIFT_PERIOD_STEPS).sin();

        base + trend + noise + drift
    }
}

impl<R: Rng> Iterator for TagSeries<'_, R> {
    type Item = TagSample;

    fn next(&mut self) -> Option<TagSample> {
        if self.index >= self.n_samples {
            return None;
        }
        let i = self.index;
        self.index += 1;

        let mut value = self.sample_value(i as f64);

        let mut qc_flag = QcFlag::Ok;
        if self.rng.gen_bool(SUSPECT_PROBABILITY) {
            qc_flag = QcFlag::Suspect;
        }
        if self.rng.gen_bool(BAD_PROBABILITY) {
            qc_flag = QcFlag::Bad;
            value = f64::NAN;
        }

        let timestamp = self.start + Duration::seconds(self.interval_seconds * i as i64);

        Some(TagSample::new(
            timestamp,
            self.spec.tag_id.clone(),
            round_to(value, TAG_DIGITS),
            self.spec.unit.clone(),
            qc_flag,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_samples - self.index;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for TagSeries<'_, R> {}

pub struct SeriesGenerator<R: Rng = StdRng> {
    rng: R,
    clock: Arc<dyn Clock>,
    schedule: Schedule,
}

impl SeriesGenerator<StdRng> {
    /// Seeded generator when `seed` is given, entropy-seeded otherwise.
    pub fn from_seed(seed: Option<u64>, clock: Arc<dyn Clock>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, clock)
    }
}

impl<R: Rng> SeriesGenerator<R> {
    pub fn new(rng: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng,
            clock,
            schedule: Schedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Series for one tag: `base + trend + noise + drift` per step, with
    /// random SUSPECT/BAD quality flags. Starts at the current time (whole
    /// seconds) when `start_time` is not given.
    pub fn tag_series(
        &mut self,
        spec: &TagSpec,
        n_samples: usize,
        interval_seconds: u32,
        start_time: Option<DateTime<Utc>>,
    ) -> TagSeries<'_, R> {
        let start = start_time.unwrap_or_else(|| self.clock.now().trunc_subsecs(0));

        TagSeries {
            rng: &mut self.rng,
            spec: spec.clone(),
            n_samples,
            index: 0,
            interval_seconds: i64::from(interval_seconds),
            start,
        }
    }

    /// Simulated lab value per time index: 90.0 plus 1% of every non-NaN
    /// tag value plus lab noise. Stops at the shortest input list.
    pub fn quality_variable(
        &mut self,
        tag_lists: &[Vec<TagSample>],
        variable_id: &str,
        unit: &str,
    ) -> Vec<QualitySample> {
        let Some(first) = tag_lists.first() else {
            return Vec::new();
        };
        let n = tag_lists.iter().map(Vec::len).min().unwrap_or(0);

        let mut samples = Vec::with_capacity(n);
        for i in 0..n {
            let mut value = QUALITY_BASELINE;
            for list in tag_lists {
                let tag_value = list[i].value;
                if !tag_value.is_nan() {
                    value += QUALITY_WEIGHT * tag_value;
                }
            }

            let z: f64 = self.rng.sample(StandardNormal);
            value += z * LAB_NOISE_STD;

            samples.push(QualitySample::new(
                first[i].timestamp,
                variable_id.to_string(),
                round_to(value, QUALITY_DIGITS),
                unit.to_string(),
                SampleSource::Simulated,
            ));
        }

        samples
    }

    /// Build the four-tag demo dataset. When `output_dir` is given it is
    /// created if needed and the dataset is written there as `dataset.json`.
    pub fn demo_dataset(
        &mut self,
        n_samples: usize,
        output_dir: Option<&Path>,
    ) -> PipelineResult<Dataset> {
        let specs = demo_tags();
        let schedule = self.schedule.clone();
        let start_time = schedule.start_time.trunc_subsecs(0);

        let mut tag_lists = Vec::with_capacity(specs.len());
        for spec in &specs {
            let samples: Vec<TagSample> = self
                .tag_series(spec, n_samples, schedule.interval_seconds, Some(start_time))
                .collect();
            tracing::debug!(
                "Generated {} samples for {} ({} not OK)",
                samples.len(),
                spec.tag_id,
                samples.iter().filter(|s| !s.is_usable()).count()
            );
            tag_lists.push(samples);
        }

        let quality = self.quality_variable(&tag_lists, QUALITY_VARIABLE, QUALITY_UNIT);

        let metadata = DatasetMetadata {
            generated_at: self.clock.now(),
            n_samples,
            tags: specs.iter().map(|s| s.tag_id.clone()).collect(),
            quality_variable: QUALITY_VARIABLE.to_string(),
            hash: fingerprint(&quality)?,
        };

        let tags: BTreeMap<String, Vec<TagSample>> = specs
            .into_iter()
            .map(|s| s.tag_id)
            .zip(tag_lists)
            .collect();

        let dataset = Dataset::new(metadata, tags, quality);

        if let Some(dir) = output_dir {
            ensure_dir(dir)?;
            let path = dir.join(DATASET_FILE);
            write_pretty_json(&path, &dataset)?;
            tracing::info!("Dataset written to {}", path.display());
        }

        Ok(dataset)
    }
}
