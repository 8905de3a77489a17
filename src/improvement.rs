//! Ratio and percentage-change summaries of a treatment value over a baseline.
//!
//! [`improvement`] is plain IEEE arithmetic: a zero baseline yields `inf` or `NaN`,
//! and deciding how to show that is left to the caller. [`checked_improvement`] is
//! the guarded form for callers that would rather get an error.
//!
//! The scaling and temperature charts report gains as a fraction over the baseline
//! instead: [`relative_gain`] is `treatment / baseline - 1`, and
//! [`mean_relative_gain`] averages it over several model pairs.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How much a treatment value improves on a baseline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    /// `treatment / baseline`
    pub ratio: f64,
    /// `(treatment - baseline) / baseline * 100`
    pub percentage: f64,
}

impl Improvement {
    /// True when both fields are finite, i.e. the baseline was usable.
    pub fn is_finite(&self) -> bool {
        self.ratio.is_finite() && self.percentage.is_finite()
    }
}

/// Ratio and percentage change of `treatment` relative to `baseline`.
///
/// # Example
///
/// ```rust
/// use vsdist::improvement;
///
/// let gain = improvement(36.1, 32.8);
/// assert!((gain.ratio - 1.1006).abs() < 1e-4);
/// assert!((gain.percentage - 10.06).abs() < 1e-2);
///
/// assert!(improvement(1.0, 0.0).ratio.is_infinite());
/// assert!(improvement(0.0, 0.0).ratio.is_nan());
/// ```
pub fn improvement(treatment: f64, baseline: f64) -> Improvement {
    Improvement {
        ratio: treatment / baseline,
        percentage: (treatment - baseline) / baseline * 100.0,
    }
}

/// Like [`improvement`], but a zero baseline is an error instead of `inf`/`NaN`.
pub fn checked_improvement(treatment: f64, baseline: f64) -> Result<Improvement> {
    if baseline == 0.0 {
        return Err(Error::ZeroBaseline { treatment });
    }
    Ok(improvement(treatment, baseline))
}

/// Fractional gain `treatment / baseline - 1`. 0.25 means 25% above the baseline.
///
/// Zero baselines propagate IEEE `inf`/`NaN`, as in [`improvement`].
pub fn relative_gain(treatment: f64, baseline: f64) -> f64 {
    treatment / baseline - 1.0
}

/// [`relative_gain`] in percent, as shown next to each temperature setting.
pub fn relative_gain_percent(treatment: f64, baseline: f64) -> f64 {
    relative_gain(treatment, baseline) * 100.0
}

/// Mean [`relative_gain`] over `(treatment, baseline)` pairs.
///
/// Used to compare how much a method helps small models versus large ones. An empty
/// slice gives `NaN` (0 / 0).
///
/// # Example
///
/// ```rust
/// use vsdist::improvement::mean_relative_gain;
///
/// // Two small models: VS doubles diversity on one, triples it on the other.
/// let small = [(20.0, 10.0), (30.0, 10.0)];
/// assert!((mean_relative_gain(&small) - 1.5).abs() < 1e-12);
/// ```
pub fn mean_relative_gain(pairs: &[(f64, f64)]) -> f64 {
    let total: f64 = pairs
        .iter()
        .map(|&(treatment, baseline)| relative_gain(treatment, baseline))
        .sum();
    total / pairs.len() as f64
}
