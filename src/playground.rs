//! # Playground metrics
//!
//! The interactive widgets recompute these on every slider move.
//!
//! ## Threshold filtering
//!
//! A verbalized-sampling response lists candidates with the probability the model
//! verbalized for each. Raising the threshold τ keeps only `prob >= τ`: fewer,
//! more typical candidates. [`candidate_metrics`] summarizes what survives.
//!
//! ## Diversity proxy
//!
//! The inverse Simpson index 1 / Σ p² is the "effective number" of candidates: k
//! equally likely candidates score k, one dominant candidate scores close to 1.
//!
//! ## Typicality sharpening
//!
//! Preference tuning with typicality bias ε and KL coefficient β sharpens the base
//! distribution by the exponent ρ = 1 + ε/β: p(x) ∝ p_base(x)^ρ. [`sharpen`] applies it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{normalize, Distribution};

/// Slider range for the probability threshold τ.
pub const TAU_MIN: f64 = 0.03;
pub const TAU_MAX: f64 = 0.5;
pub const DEFAULT_TAU: f64 = 0.15;

/// One verbalized candidate response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub text: String,
    pub prob: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub is_novel: bool,
}

/// Summary of the candidates that pass the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetrics {
    pub included: usize,
    pub diversity: f64,
    pub themes: usize,
    /// Share of novel candidates, in percent.
    pub novelty: f64,
}

/// Playground state that outlives a single render.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundSettings {
    pub tau: f64,
}

impl Default for PlaygroundSettings {
    fn default() -> Self {
        Self { tau: DEFAULT_TAU }
    }
}

impl PlaygroundSettings {
    /// Settings with τ clamped to the slider range.
    pub fn with_tau(tau: f64) -> Self {
        Self {
            tau: tau.clamp(TAU_MIN, TAU_MAX),
        }
    }

    pub fn apply(&self, candidates: &[Candidate]) -> CandidateMetrics {
        candidate_metrics(&filter_by_threshold(candidates, self.tau))
    }
}

/// Candidates with `prob >= tau`, in their original order.
pub fn filter_by_threshold(candidates: &[Candidate], tau: f64) -> Vec<Candidate> {
    candidates.iter().filter(|c| c.prob >= tau).cloned().collect()
}

/// Inverse Simpson index 1 / Σ p². Zero when there is no mass at all.
pub fn diversity_proxy(candidates: &[Candidate]) -> f64 {
    let sum_sq: f64 = candidates.iter().map(|c| c.prob * c.prob).sum();
    if sum_sq == 0.0 {
        0.0
    } else {
        1.0 / sum_sq
    }
}

pub fn candidate_metrics(candidates: &[Candidate]) -> CandidateMetrics {
    let themes: HashSet<&str> = candidates
        .iter()
        .filter_map(|c| c.theme.as_deref())
        .filter(|t| !t.is_empty())
        .collect();
    let novel = candidates.iter().filter(|c| c.is_novel).count();

    CandidateMetrics {
        included: candidates.len(),
        diversity: diversity_proxy(candidates),
        themes: themes.len(),
        novelty: if candidates.is_empty() {
            0.0
        } else {
            novel as f64 / candidates.len() as f64 * 100.0
        },
    }
}

/// ρ = 1 + ε/β. A zero β gives `inf`, as with any IEEE division.
pub fn sharpening_exponent(epsilon: f64, beta: f64) -> f64 {
    1.0 + epsilon / beta
}

/// Raise every weight to `rho`, then renormalize.
///
/// # Example
///
/// ```rust
/// use vsdist::{sharpen, Distribution};
///
/// let base: Distribution = [("CA".to_string(), 0.6), ("TX".to_string(), 0.4)]
///     .into_iter()
///     .collect();
/// let sharp = sharpen(&base, 3.0);
/// assert!(sharp["CA"] > base["CA"]);
/// assert!((sharp.values().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
pub fn sharpen(distribution: &Distribution, rho: f64) -> Distribution {
    let powered: Distribution = distribution
        .iter()
        .map(|(key, &p)| (key.clone(), p.powf(rho)))
        .collect();
    normalize(&powered)
}

/// How strongly a sharpening exponent concentrates the distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharpnessLevel {
    Minimal,
    Moderate,
    High,
    Extreme,
}

impl SharpnessLevel {
    pub fn from_exponent(rho: f64) -> Self {
        if rho < 1.5 {
            SharpnessLevel::Minimal
        } else if rho < 2.5 {
            SharpnessLevel::Moderate
        } else if rho < 4.0 {
            SharpnessLevel::High
        } else {
            SharpnessLevel::Extreme
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SharpnessLevel::Minimal => "Minimal",
            SharpnessLevel::Moderate => "Moderate",
            SharpnessLevel::High => "High",
            SharpnessLevel::Extreme => "Extreme",
        }
    }
}
