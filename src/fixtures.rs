//! Typed views of the JSON fixtures the charts are built from.
//!
//! Three shapes exist:
//!
//! - diversity gains: `{ tasks: { task: { method: score } }, improvements: { task: { vs_over_direct } } }`
//! - post-training: `{ stages: { stage: { direct, sequence, multiturn, vs } }, base_model_diversity, retention_rates }`
//! - distribution comparison: three labeled records plus a precomputed `kl_divergence` pair
//!
//! Key order inside every object is preserved.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::divergence::{kl_pair, KlDivergence};
use crate::transform::{
    transform_distribution_data, transform_diversity_gains, transform_post_training,
    transform_rank_frequency, DistributionRow, DiversityPoint, PostTrainingRow, RankFrequencyRow,
};
use crate::{numeric_entries, Distribution, Error, LabeledRecord, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskImprovement {
    pub vs_over_direct: f64,
}

/// Per-task diversity scores for every prompting method.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiversityGainsFixture {
    pub tasks: IndexMap<String, Distribution>,
    #[serde(default)]
    pub improvements: IndexMap<String, TaskImprovement>,
}

impl DiversityGainsFixture {
    /// Chart rows for one task. An unknown task yields no rows.
    pub fn rows(&self, task: &str) -> Vec<DiversityPoint> {
        self.tasks
            .get(task)
            .map(|scores| transform_diversity_gains(scores, task))
            .unwrap_or_default()
    }
}

/// Diversity across post-training checkpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostTrainingFixture {
    pub stages: IndexMap<String, Distribution>,
    pub base_model_diversity: f64,
    #[serde(default)]
    pub retention_rates: Value,
}

impl PostTrainingFixture {
    pub fn rows(&self) -> Vec<PostTrainingRow> {
        transform_post_training(&self.stages)
    }
}

/// A reference distribution and two model outputs over the same categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionFixture {
    pub pretraining_distribution: LabeledRecord,
    pub direct_distribution: LabeledRecord,
    pub vs_distribution: LabeledRecord,
    #[serde(default)]
    pub kl_divergence: KlDivergence,
    #[serde(default)]
    pub metadata: Value,
}

impl DistributionFixture {
    /// Top-20 comparison rows.
    pub fn rows(&self) -> Vec<DistributionRow> {
        transform_distribution_data(
            &self.pretraining_distribution,
            &self.direct_distribution,
            &self.vs_distribution,
        )
    }

    pub fn rank_frequency(&self) -> Vec<RankFrequencyRow> {
        transform_rank_frequency(
            &self.pretraining_distribution,
            &self.direct_distribution,
            &self.vs_distribution,
        )
    }

    /// KL of each model output from the pretraining reference, computed from the
    /// numeric fields rather than read from the stored pair.
    pub fn recompute_kl(&self) -> KlDivergence {
        let reference: Distribution = numeric_entries(&self.pretraining_distribution);
        kl_pair(
            &reference,
            &numeric_entries(&self.direct_distribution),
            &numeric_entries(&self.vs_distribution),
        )
    }
}

/// Parse a fixture from a JSON string.
pub fn parse_fixture<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a fixture file.
pub fn load_fixture<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    let fixture = parse_fixture(&json)?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "loaded fixture");
    Ok(fixture)
}

/// [`load_fixture`] for callers that render a placeholder instead of failing.
///
/// The error is logged and swallowed.
pub fn load_fixture_or_none<T: DeserializeOwned>(path: impl AsRef<Path>) -> Option<T> {
    let path = path.as_ref();
    match load_fixture(path) {
        Ok(fixture) => Some(fixture),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to load fixture");
            None
        }
    }
}
