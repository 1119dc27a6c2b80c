//! Tier scoring model and bottleneck classification.
//!
//! GPU and CPU tiers share one score table so that a flagship CPU and a
//! flagship GPU contribute equally before workload weighting.

use serde::{Deserialize, Serialize};

/// Score for any tier string the table does not recognise.
pub const DEFAULT_TIER_SCORE: u32 = 50;

/// A component is the bottleneck when its score is below this fraction of the other's.
pub const BOTTLENECK_RATIO: f64 = 0.8;

/// Discrete capability bucket for a GPU or CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Flagship,
    HighEnd,
    MidHigh,
    Mid,
    Budget,
}

impl Tier {
    /// All tiers, strongest first.
    pub const ALL: [Tier; 5] = [
        Tier::Flagship,
        Tier::HighEnd,
        Tier::MidHigh,
        Tier::Mid,
        Tier::Budget,
    ];

    /// Parse a catalog tier string (`flagship`, `high-end`, ...), ignoring ASCII case.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flagship => "flagship",
            Self::HighEnd => "high-end",
            Self::MidHigh => "mid-high",
            Self::Mid => "mid",
            Self::Budget => "budget",
        }
    }

    pub fn score(self) -> u32 {
        match self {
            Self::Flagship => 100,
            Self::HighEnd => 85,
            Self::MidHigh => 70,
            Self::Mid => 55,
            Self::Budget => 40,
        }
    }
}

/// Map a tier string to a capability score in `[0, 100]`.
///
/// Total: unknown tiers score [`DEFAULT_TIER_SCORE`].
pub fn score(tier: &str) -> u32 {
    Tier::parse(tier).map_or(DEFAULT_TIER_SCORE, Tier::score)
}

/// The inferred performance-limiting component.
///
/// `Unknown` is only produced for empirical samples that carry no recorded
/// classification; the heuristic always yields one of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bottleneck {
    Gpu,
    Cpu,
    Balanced,
    Unknown,
}

impl Bottleneck {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gpu => "gpu",
            Self::Cpu => "cpu",
            Self::Balanced => "balanced",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a stored classification. `unknown` is never stored, so it does not parse.
    pub fn parse_recorded(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpu" => Some(Self::Gpu),
            "cpu" => Some(Self::Cpu),
            "balanced" => Some(Self::Balanced),
            _ => None,
        }
    }
}

/// Tier-ratio bottleneck test. Not workload-aware.
pub fn classify_bottleneck(gpu_score: u32, cpu_score: u32) -> Bottleneck {
    let gpu = f64::from(gpu_score);
    let cpu = f64::from(cpu_score);
    if gpu < cpu * BOTTLENECK_RATIO {
        Bottleneck::Gpu
    } else if cpu < gpu * BOTTLENECK_RATIO {
        Bottleneck::Cpu
    } else {
        Bottleneck::Balanced
    }
}
