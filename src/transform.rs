//! # Chart-row transforms
//!
//! Reshape fixture data into the fixed-shape rows the chart components render.
//!
//! Every transform follows the same recipe:
//!
//! 1. take the union of keys across the sources (first source's keys first, then
//!    whatever later sources add, each in its own order),
//! 2. build one row per key, reading an absent (or NaN, or zero) value as 0,
//! 3. optionally sort and truncate.
//!
//! None of them validate that the input is a probability distribution, and none of
//! them fail: a missing key is a 0, never an error. Normalize first with
//! [`crate::normalize`] if the chart needs probabilities.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{numeric_entries, weight_or_zero, Distribution, LabeledRecord};

/// Display cap for the distribution comparison chart.
pub const TOP_N: usize = 20;

/// Floor for plotting zeros on a log axis.
pub const ZERO_THRESHOLD: f64 = 1e-5;

/// Catch-all bucket excluded from the rank-frequency chart.
pub const OTHER_BUCKET: &str = "other";

/// One bar of the diversity-gains chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiversityPoint {
    pub method: String,
    pub value: f64,
    pub category: String,
}

/// One x-position of the post-training line chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostTrainingRow {
    pub stage: String,
    pub direct: f64,
    pub sequence: f64,
    pub multiturn: f64,
    pub vs: f64,
}

/// One category of the pretraining / direct / VS distribution comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub name: String,
    pub pretraining: f64,
    pub direct: f64,
    pub vs: f64,
}

/// One rank of the rank-frequency chart.
///
/// The `*_display` fields are the raw values floored at [`ZERO_THRESHOLD`] so that
/// zeros can be drawn on a log scale; the raw fields keep the true values for tooltips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankFrequencyRow {
    pub rank: usize,
    pub state_code: String,
    pub state_name: String,
    pub reference: f64,
    pub direct: f64,
    pub vs: f64,
    pub reference_display: f64,
    pub direct_display: f64,
    pub vs_display: f64,
}

/// Tunables for [`transform_distribution_data_with`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionOptions {
    /// Keep only the first `top_n` rows after sorting. `None` keeps everything.
    pub top_n: Option<usize>,
    /// Category keys dropped before the union, e.g. an `other` bucket.
    pub exclude: Vec<String>,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            top_n: Some(TOP_N),
            exclude: Vec::new(),
        }
    }
}

/// Rows for one task of the diversity-gains chart, in input key order.
///
/// # Example
///
/// ```rust
/// use vsdist::{transform_diversity_gains, Distribution};
///
/// let poem: Distribution = [("direct".to_string(), 10.8), ("vs_standard".to_string(), 31.4)]
///     .into_iter()
///     .collect();
/// let rows = transform_diversity_gains(&poem, "poem");
/// assert_eq!(rows[1].method, "vs_standard");
/// assert_eq!(rows[1].category, "poem");
/// ```
pub fn transform_diversity_gains(task_data: &Distribution, task: &str) -> Vec<DiversityPoint> {
    task_data
        .iter()
        .map(|(method, &value)| DiversityPoint {
            method: method.clone(),
            value,
            category: task.to_string(),
        })
        .collect()
}

/// One row per training stage, in input order, with absent methods read as 0.
pub fn transform_post_training(stages: &IndexMap<String, Distribution>) -> Vec<PostTrainingRow> {
    stages
        .iter()
        .map(|(stage, methods)| PostTrainingRow {
            stage: stage.clone(),
            direct: weight_or_zero(methods.get("direct")),
            sequence: weight_or_zero(methods.get("sequence")),
            multiturn: weight_or_zero(methods.get("multiturn")),
            vs: weight_or_zero(methods.get("vs")),
        })
        .collect()
}

/// Compare three labeled records category by category.
///
/// Non-numeric fields are dropped, the category keys of all three are unioned, and the
/// rows are sorted by descending `pretraining` weight (ties keep union order) and cut
/// to the top [`TOP_N`].
///
/// # Example
///
/// ```rust
/// use vsdist::{transform_distribution_data, LabeledRecord};
/// use serde_json::json;
///
/// let record = |v: serde_json::Value| -> LabeledRecord { serde_json::from_value(v).unwrap() };
/// let rows = transform_distribution_data(
///     &record(json!({"CA": 0.2, "TX": 0.1})),
///     &record(json!({"CA": 0.5, "description": "direct prompting"})),
///     &record(json!({"TX": 0.3, "NY": 0.2})),
/// );
///
/// let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["CA", "TX", "NY"]);
/// assert_eq!(rows[2].pretraining, 0.0);
/// assert_eq!(rows[2].vs, 0.2);
/// ```
pub fn transform_distribution_data(
    pretraining: &LabeledRecord,
    direct: &LabeledRecord,
    vs: &LabeledRecord,
) -> Vec<DistributionRow> {
    transform_distribution_data_with(pretraining, direct, vs, &DistributionOptions::default())
}

/// [`transform_distribution_data`] with an explicit row cap and exclusion list.
pub fn transform_distribution_data_with(
    pretraining: &LabeledRecord,
    direct: &LabeledRecord,
    vs: &LabeledRecord,
    options: &DistributionOptions,
) -> Vec<DistributionRow> {
    let pretraining = numeric_entries(pretraining);
    let direct = numeric_entries(direct);
    let vs = numeric_entries(vs);

    let keys = key_union(&[&pretraining, &direct, &vs], &options.exclude);
    let mut rows = sorted_rows(keys, &pretraining, &direct, &vs);

    if let Some(top_n) = options.top_n {
        if rows.len() > top_n {
            tracing::debug!(
                categories = rows.len(),
                kept = top_n,
                "truncating distribution rows"
            );
            rows.truncate(top_n);
        }
    }

    rows
}

/// Rank categories by reference weight for the rank-frequency chart.
///
/// Like [`transform_distribution_data`] but without truncation, with the
/// [`OTHER_BUCKET`] removed, with keys unioned reference → vs → direct, and with a
/// 1-based rank, a short state code, and log-scale display values on every row.
pub fn transform_rank_frequency(
    reference: &LabeledRecord,
    direct: &LabeledRecord,
    vs: &LabeledRecord,
) -> Vec<RankFrequencyRow> {
    let reference = numeric_entries(reference);
    let direct = numeric_entries(direct);
    let vs = numeric_entries(vs);

    // Newcomers from the VS output are listed before those from direct prompting.
    let keys = key_union(&[&reference, &vs, &direct], &[OTHER_BUCKET.to_string()]);

    sorted_rows(keys, &reference, &direct, &vs)
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankFrequencyRow {
            rank: i + 1,
            state_code: state_code(&row.name),
            reference_display: display_floor(row.pretraining),
            direct_display: display_floor(row.direct),
            vs_display: display_floor(row.vs),
            reference: row.pretraining,
            direct: row.direct,
            vs: row.vs,
            state_name: row.name,
        })
        .collect()
}

/// Two-letter code for the states that appear in the US-states fixture.
///
/// Names outside the table fall back to their first two characters, uppercased.
pub fn state_code(name: &str) -> String {
    const STATE_CODES: [(&str, &str); 20] = [
        ("New York", "NY"),
        ("California", "CA"),
        ("Washington", "WA"),
        ("Texas", "TX"),
        ("Florida", "FL"),
        ("Virginia", "VA"),
        ("Georgia", "GA"),
        ("Michigan", "MI"),
        ("Ohio", "OH"),
        ("Colorado", "CO"),
        ("Illinois", "IL"),
        ("Pennsylvania", "PA"),
        ("Arizona", "AZ"),
        ("Minnesota", "MN"),
        ("Massachusetts", "MA"),
        ("North Carolina", "NC"),
        ("New Jersey", "NJ"),
        ("Kansas", "KS"),
        ("Wisconsin", "WI"),
        ("Oregon", "OR"),
    ];

    STATE_CODES
        .iter()
        .find(|(state, _)| *state == name)
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| name.chars().take(2).collect::<String>().to_uppercase())
}

fn display_floor(value: f64) -> f64 {
    if value <= ZERO_THRESHOLD {
        ZERO_THRESHOLD
    } else {
        value
    }
}

fn key_union<'a>(sources: &[&'a Distribution], exclude: &[String]) -> IndexSet<&'a str> {
    sources
        .iter()
        .flat_map(|&source| source.keys())
        .map(String::as_str)
        .filter(|key| !exclude.iter().any(|x| x.as_str() == *key))
        .collect()
}

/// One row per key, stably sorted by descending pretraining weight.
fn sorted_rows(
    keys: IndexSet<&str>,
    pretraining: &Distribution,
    direct: &Distribution,
    vs: &Distribution,
) -> Vec<DistributionRow> {
    let mut rows: Vec<DistributionRow> = keys
        .into_iter()
        .map(|name| DistributionRow {
            pretraining: weight_or_zero(pretraining.get(name)),
            direct: weight_or_zero(direct.get(name)),
            vs: weight_or_zero(vs.get(name)),
            name: name.to_string(),
        })
        .collect();

    rows.sort_by(|a, b| descending(a.pretraining, b.pretraining));
    rows
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> LabeledRecord {
        serde_json::from_value(value).unwrap()
    }

    fn dist(pairs: &[(&str, f64)]) -> Distribution {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn diversity_gains_follow_input_order() {
        let task = dist(&[("vs_multi", 3.0), ("direct", 1.0), ("cot", 2.0)]);
        let rows = transform_diversity_gains(&task, "joke");
        let methods: Vec<_> = rows.iter().map(|r| r.method.as_str()).collect();
        assert_eq!(methods, ["vs_multi", "direct", "cot"]);
        assert!(rows.iter().all(|r| r.category == "joke"));
        assert_eq!(rows[0].value, 3.0);
    }

    #[test]
    fn diversity_gains_empty_task() {
        assert!(transform_diversity_gains(&Distribution::new(), "poem").is_empty());
    }

    #[test]
    fn post_training_defaults_missing_methods() {
        let mut stages = IndexMap::new();
        stages.insert("base".to_string(), dist(&[("direct", 20.0), ("vs", 30.0)]));
        stages.insert(
            "sft".to_string(),
            dist(&[("direct", 18.0), ("sequence", 22.0), ("multiturn", 21.0), ("vs", 29.0)]),
        );
        stages.insert("rlhf".to_string(), Distribution::new());

        let rows = transform_post_training(&stages);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            PostTrainingRow {
                stage: "base".into(),
                direct: 20.0,
                sequence: 0.0,
                multiturn: 0.0,
                vs: 30.0,
            }
        );
        assert_eq!(rows[1].multiturn, 21.0);
        assert_eq!(rows[2].stage, "rlhf");
        assert_eq!(rows[2].vs, 0.0);
    }

    #[test]
    fn post_training_ignores_extra_methods() {
        let mut stages = IndexMap::new();
        stages.insert("dpo".to_string(), dist(&[("cot", 5.0), ("vs", f64::NAN)]));
        let rows = transform_post_training(&stages);
        assert_eq!(rows[0].direct, 0.0);
        assert_eq!(rows[0].vs, 0.0);
    }

    #[test]
    fn distribution_union_and_defaults() {
        let rows = transform_distribution_data(
            &record(json!({"CA": 0.2, "TX": 0.1})),
            &record(json!({"CA": 0.5})),
            &record(json!({"TX": 0.3, "NY": 0.2})),
        );

        assert_eq!(rows.len(), 3);
        let ny = rows.iter().find(|r| r.name == "NY").unwrap();
        assert_eq!(
            *ny,
            DistributionRow {
                name: "NY".into(),
                pretraining: 0.0,
                direct: 0.0,
                vs: 0.2,
            }
        );
        let tx = rows.iter().find(|r| r.name == "TX").unwrap();
        assert_eq!((tx.pretraining, tx.direct, tx.vs), (0.1, 0.0, 0.3));
    }

    #[test]
    fn distribution_drops_description() {
        let rows = transform_distribution_data(
            &record(json!({"CA": 0.4, "description": "pretraining corpus"})),
            &record(json!({"description": "direct"})),
            &record(json!({})),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "CA");
    }

    #[test]
    fn distribution_truncates_to_top_20() {
        let pre: serde_json::Map<String, serde_json::Value> = (0..25)
            .map(|i| (format!("s{i}"), json!((i as f64 + 1.0) / 100.0)))
            .collect();
        let pre = record(serde_json::Value::Object(pre));
        let empty = record(json!({}));

        let rows = transform_distribution_data(&pre, &empty, &empty);
        assert_eq!(rows.len(), TOP_N);

        let all = transform_distribution_data_with(
            &pre,
            &empty,
            &empty,
            &DistributionOptions {
                top_n: None,
                ..Default::default()
            },
        );
        assert_eq!(all.len(), 25);

        let min_kept = rows.iter().map(|r| r.pretraining).fold(f64::INFINITY, f64::min);
        for dropped in &all[TOP_N..] {
            assert!(min_kept >= dropped.pretraining);
            assert!(!rows.iter().any(|r| r.name == dropped.name));
        }
    }

    #[test]
    fn distribution_ties_keep_union_order() {
        let rows = transform_distribution_data(
            &record(json!({"b": 0.5, "a": 0.5})),
            &record(json!({"c": 0.9})),
            &record(json!({})),
        );
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: DistributionOptions =
            serde_json::from_value(json!({"exclude": ["other"]})).unwrap();
        assert_eq!(options.top_n, Some(TOP_N));
        assert_eq!(options.exclude, vec!["other".to_string()]);
    }

    #[test]
    fn rank_frequency_ranks_and_floors() {
        let rows = transform_rank_frequency(
            &record(json!({"California": 0.3, "Texas": 0.2, "other": 0.5})),
            &record(json!({"California": 0.9, "description": "mode collapse"})),
            &record(json!({"Vermont": 0.1, "Texas": 0.15})),
        );

        let names: Vec<_> = rows.iter().map(|r| r.state_name.as_str()).collect();
        assert_eq!(names, ["California", "Texas", "Vermont"]);
        let ranks: Vec<_> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);

        assert_eq!(rows[0].state_code, "CA");
        assert_eq!(rows[2].state_code, "VE");

        assert_eq!(rows[1].direct, 0.0);
        assert_eq!(rows[1].direct_display, ZERO_THRESHOLD);
        assert_eq!(rows[0].direct_display, 0.9);
        assert_eq!(rows[2].reference_display, ZERO_THRESHOLD);
    }

    #[test]
    fn rank_frequency_lists_vs_newcomers_before_direct_ones() {
        let rows = transform_rank_frequency(
            &record(json!({"California": 0.5})),
            &record(json!({"Texas": 0.2})),
            &record(json!({"Vermont": 0.1})),
        );
        let names: Vec<_> = rows.iter().map(|r| r.state_name.as_str()).collect();
        assert_eq!(names, ["California", "Vermont", "Texas"]);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[2].direct, 0.2);

        // The comparison chart keeps pretraining → direct → vs.
        let rows = transform_distribution_data(
            &record(json!({"California": 0.5})),
            &record(json!({"Texas": 0.2})),
            &record(json!({"Vermont": 0.1})),
        );
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["California", "Texas", "Vermont"]);
    }

    #[test]
    fn rank_frequency_serializes_camel_case() {
        let rows = transform_rank_frequency(
            &record(json!({"Ohio": 0.1})),
            &record(json!({})),
            &record(json!({})),
        );
        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["stateCode"], "OH");
        assert_eq!(value["vsDisplay"], ZERO_THRESHOLD);
    }

    #[test]
    fn state_code_fallback() {
        assert_eq!(state_code("North Carolina"), "NC");
        assert_eq!(state_code("Utah"), "UT");
        assert_eq!(state_code("X"), "X");
    }

    proptest! {
        #[test]
        fn distribution_rows_sorted_descending(
            pre in prop::collection::vec(0.0f64..1.0, 0..40),
            vs in prop::collection::vec(0.0f64..1.0, 0..40),
        ) {
            let pre: serde_json::Map<String, serde_json::Value> =
                pre.iter().enumerate().map(|(i, v)| (format!("k{i}"), json!(v))).collect();
            let vs: serde_json::Map<String, serde_json::Value> =
                vs.iter().enumerate().map(|(i, v)| (format!("v{i}"), json!(v))).collect();

            let rows = transform_distribution_data(
                &record(serde_json::Value::Object(pre)),
                &record(json!({})),
                &record(serde_json::Value::Object(vs)),
            );

            prop_assert!(rows.len() <= TOP_N);
            for w in rows.windows(2) {
                prop_assert!(w[0].pretraining >= w[1].pretraining);
            }
        }
    }
}
