//! # KL divergence over keyed distributions
//!
//! KL(P‖Q) = Σ p(k) ln(p(k) / q(k)), summed over the keys of P only.
//!
//! The charts compare a model's output distribution against a reference (the
//! pretraining distribution). Keys rarely line up exactly: a model may never name a
//! category the reference has, or name one the reference lacks. Rather than returning
//! infinity or an error, both sides are smoothed with a fixed ε:
//!
//! - `q(k)` absent, zero, or NaN → ε
//! - `p(k)` zero or NaN → ε
//!
//! The second rule is **not** the textbook convention (0 · ln(0/q) = 0). A zero `p(k)`
//! contributes ε ln(ε/q(k)), a tiny negative amount when `q(k)` > ε. The published KL
//! values were computed this way, so the approximation is kept.
//!
//! Units are nats (natural log).

use serde::{Deserialize, Serialize};

use crate::Distribution;

/// Smoothing constant substituted for missing or zero probabilities.
pub const EPSILON: f64 = 1e-10;

/// The KL divergence of two model outputs from a shared reference.
///
/// Matches the `kl_divergence` object stored next to the distribution fixtures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KlDivergence {
    pub direct: f64,
    pub vs: f64,
}

fn or_epsilon(value: Option<&f64>) -> f64 {
    match value {
        Some(&v) if v != 0.0 && !v.is_nan() => v,
        _ => EPSILON,
    }
}

/// KL divergence KL(p ‖ q) in nats, over the keys of `p`.
///
/// Keys present only in `q` do not contribute. An empty `p` gives 0.
///
/// # Example
///
/// ```rust
/// use vsdist::{kl_divergence, Distribution};
///
/// let p: Distribution = [("a".to_string(), 0.9), ("b".to_string(), 0.1)].into_iter().collect();
/// let q: Distribution = [("a".to_string(), 0.5), ("b".to_string(), 0.5)].into_iter().collect();
///
/// assert!(kl_divergence(&p, &p).abs() < 1e-12);
/// assert!((kl_divergence(&p, &q) - kl_divergence(&q, &p)).abs() > 1e-3); // asymmetric
/// ```
pub fn kl_divergence(p: &Distribution, q: &Distribution) -> f64 {
    p.iter()
        .map(|(key, p_value)| {
            let p_k = or_epsilon(Some(p_value));
            let q_k = or_epsilon(q.get(key));
            p_k * (p_k / q_k).ln()
        })
        .sum()
}

/// KL(direct ‖ reference) and KL(vs ‖ reference) in one call.
pub fn kl_pair(reference: &Distribution, direct: &Distribution, vs: &Distribution) -> KlDivergence {
    KlDivergence {
        direct: kl_divergence(direct, reference),
        vs: kl_divergence(vs, reference),
    }
}
