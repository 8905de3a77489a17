//! # vsdist
//!
//! Distribution analytics behind the Verbalized Sampling charts: normalization,
//! KL divergence, chart-row transforms, and improvement ratios.
//!
//! Every chart on the site starts from a small JSON fixture (a few dozen categories,
//! a handful of methods or training stages) and ends as a vector of fixed-shape rows.
//! The functions here sit in between. They are pure and synchronous, and they never
//! fail on degenerate input: empty maps, all-zero weights, and missing keys all have
//! defined fallback values.
//!
//! ## Key Functions
//!
//! | Function | Does | Fallback |
//! |----------|------|----------|
//! | [`normalize`] | Rescale weights to sum to 1 | total = 0 → unchanged copy |
//! | [`kl_divergence`] | KL(p‖q) = Σ p(k) ln(p(k)/q(k)) over keys of p | missing/zero → ε = 1e-10 |
//! | [`transform_distribution_data`] | Union three records into top-20 rows | missing → 0 |
//! | [`transform_post_training`] | One row per training stage | missing → 0 |
//! | [`transform_diversity_gains`] | One row per method for a task | none needed |
//! | [`improvement`] | Ratio and percentage change over a baseline | baseline = 0 → IEEE inf/NaN |
//!
//! ## Quick Start
//!
//! ```rust
//! use vsdist::{improvement, kl_divergence, normalize, Distribution};
//!
//! let counts: Distribution = [("CA".to_string(), 3.0), ("TX".to_string(), 1.0)]
//!     .into_iter()
//!     .collect();
//! let p = normalize(&counts);
//! assert!((p["CA"] - 0.75).abs() < 1e-12);
//!
//! let q: Distribution = [("CA".to_string(), 0.5), ("TX".to_string(), 0.5)]
//!     .into_iter()
//!     .collect();
//! assert!(kl_divergence(&p, &q) > 0.0);
//!
//! let gain = improvement(36.1, 32.8);
//! assert!((gain.ratio - 1.1006).abs() < 1e-4);
//! ```
//!
//! ## Key order
//!
//! [`Distribution`] is an [`IndexMap`]: iteration follows insertion order, which for
//! fixtures is the order of keys in the JSON object. Transforms that "follow input order"
//! rely on this, and key unions list the first record's keys before the newcomers from
//! later records.
//!
//! ## What Can Go Wrong
//!
//! 1. **Zero probabilities in KL**: a zero `p(k)` is replaced by ε instead of contributing
//!    exactly 0. The result is an approximation, kept for compatibility with the published
//!    figures.
//! 2. **Zero baseline**: [`improvement`] divides by the baseline. Use
//!    [`checked_improvement`] when a zero baseline is possible.
//! 3. **Not normalized**: transforms do not normalize. Call [`normalize`] first if the
//!    chart expects probabilities.

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

pub mod counter;
pub mod display;
pub mod divergence;
pub mod fixtures;
pub mod improvement;
pub mod labels;
pub mod playground;
pub mod transform;

pub use counter::{CounterKind, FigureCounter, NumberingContext};
pub use display::{format_number, format_percentage, validate_chart_data, ChartValue};
pub use divergence::{kl_divergence, kl_pair, KlDivergence};
pub use fixtures::{
    load_fixture, load_fixture_or_none, parse_fixture, DistributionFixture, DiversityGainsFixture,
    PostTrainingFixture,
};
pub use improvement::{
    checked_improvement, improvement, mean_relative_gain, relative_gain, relative_gain_percent,
    Improvement,
};
pub use labels::{method_color, method_label, stage_label, Method, Stage};
pub use playground::{
    candidate_metrics, diversity_proxy, filter_by_threshold, sharpen, sharpening_exponent,
    Candidate, CandidateMetrics, PlaygroundSettings, SharpnessLevel,
};
pub use transform::{
    transform_distribution_data, transform_distribution_data_with, transform_diversity_gains,
    transform_post_training, transform_rank_frequency, DistributionOptions, DistributionRow,
    DiversityPoint, PostTrainingRow, RankFrequencyRow,
};

/// A mapping from category key to a non-negative weight, in insertion order.
pub type Distribution = IndexMap<String, f64>;

/// A fixture record mixing numeric weights with descriptive fields such as `description`.
pub type LabeledRecord = IndexMap<String, Value>;

/// Error types for fixture loading and guarded metrics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("improvement undefined: baseline is 0 (treatment = {treatment})")]
    ZeroBaseline { treatment: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a weight the way the charts do: absent, NaN, and 0 all count as 0.
pub(crate) fn weight_or_zero(value: Option<&f64>) -> f64 {
    match value {
        Some(&v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Rescale a distribution so its values sum to 1.
///
/// Each value is divided by the total. When the total is exactly 0 (empty map, or all
/// weights zero) the input is returned unchanged rather than dividing by zero.
///
/// # Example
///
/// ```rust
/// use vsdist::{normalize, Distribution};
///
/// let zeros: Distribution = [("a".to_string(), 0.0), ("b".to_string(), 0.0)]
///     .into_iter()
///     .collect();
/// assert_eq!(normalize(&zeros), zeros);
/// ```
pub fn normalize(distribution: &Distribution) -> Distribution {
    let total: f64 = distribution.values().sum();

    if total == 0.0 {
        return distribution.clone();
    }

    distribution
        .iter()
        .map(|(key, &value)| (key.clone(), value / total))
        .collect()
}

/// Keep only the numeric entries of a labeled record, in their original order.
///
/// Strings (`description`), booleans, nulls, arrays, and nested objects are dropped.
pub fn numeric_entries(record: &LabeledRecord) -> Distribution {
    record
        .iter()
        .filter_map(|(key, value)| value.as_f64().map(|v| (key.clone(), v)))
        .collect()
}
