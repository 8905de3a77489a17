//! Display metadata for prompting methods and training stages.
//!
//! Fixture keys are strings. Known keys map to a label and a color; anything else
//! still renders, using the raw key as its label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Neutral color for methods outside [`Method`]. Same slate as `direct`.
pub const FALLBACK_COLOR: &str = "#94a3b8";

/// A prompting method compared on the charts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Direct,
    Cot,
    Sequence,
    Multiturn,
    VsStandard,
    VsCot,
    VsMulti,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Direct,
        Method::Cot,
        Method::Sequence,
        Method::Multiturn,
        Method::VsStandard,
        Method::VsCot,
        Method::VsMulti,
    ];

    /// The fixture key, e.g. `vs_standard`.
    pub fn key(self) -> &'static str {
        match self {
            Method::Direct => "direct",
            Method::Cot => "cot",
            Method::Sequence => "sequence",
            Method::Multiturn => "multiturn",
            Method::VsStandard => "vs_standard",
            Method::VsCot => "vs_cot",
            Method::VsMulti => "vs_multi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Method::Direct => "Direct",
            Method::Cot => "CoT",
            Method::Sequence => "Sequence",
            Method::Multiturn => "Multi-turn",
            Method::VsStandard => "VS-Standard",
            Method::VsCot => "VS-CoT",
            Method::VsMulti => "VS-Multi",
        }
    }

    /// Baselines are slate shades, verbalized-sampling variants are reds.
    pub fn color(self) -> &'static str {
        match self {
            Method::Direct => "#94a3b8",
            Method::Cot => "#64748b",
            Method::Sequence => "#475569",
            Method::Multiturn => "#334155",
            Method::VsStandard => "#dc2626",
            Method::VsCot => "#b91c1c",
            Method::VsMulti => "#991b1b",
        }
    }

    pub fn is_verbalized(self) -> bool {
        matches!(self, Method::VsStandard | Method::VsCot | Method::VsMulti)
    }
}

impl FromStr for Method {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A post-training checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Base,
    Sft,
    Dpo,
    Final,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Base, Stage::Sft, Stage::Dpo, Stage::Final];

    pub fn key(self) -> &'static str {
        match self {
            Stage::Base => "base",
            Stage::Sft => "sft",
            Stage::Dpo => "dpo",
            Stage::Final => "final",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Base => "Base",
            Stage::Sft => "SFT",
            Stage::Dpo => "DPO",
            Stage::Final => "Final",
        }
    }
}

impl FromStr for Stage {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|st| st.key() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A key outside the known enumeration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown key: {0}")]
pub struct UnknownKey(pub String);

/// Human-readable label for a method key; unknown keys come back as-is.
pub fn method_label(key: &str) -> &str {
    key.parse::<Method>().map_or(key, |m| m.label())
}

/// Display color for a method key; unknown keys get [`FALLBACK_COLOR`].
pub fn method_color(key: &str) -> &'static str {
    key.parse::<Method>().map_or(FALLBACK_COLOR, |m| m.color())
}

/// Human-readable label for a stage key; unknown keys come back as-is.
pub fn stage_label(key: &str) -> &str {
    key.parse::<Stage>().map_or(key, |s| s.label())
}
