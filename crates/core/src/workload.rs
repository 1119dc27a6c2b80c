//! Resolution and quality-preset workload multipliers.
//!
//! Both enumerations are part of the output contract: a higher multiplier
//! means a heavier workload and divides achievable frame rate.

use serde::{Deserialize, Serialize};

/// A string that is not a known resolution or preset identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseWorkloadError {
    pub kind: &'static str,
    pub value: String,
}

/// One selectable option, shaped for catalog listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadOption {
    pub id: &'static str,
    pub name: &'static str,
    pub multiplier: f64,
}

/* --------------------------------------------------------------------------
Resolution
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Resolution {
    FullHd,
    QuadHd,
    UltraHd,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::FullHd, Resolution::QuadHd, Resolution::UltraHd];

    /// Canonical identifier (`1080p`, `1440p`, `4K`).
    pub fn id(self) -> &'static str {
        match self {
            Self::FullHd => "1080p",
            Self::QuadHd => "1440p",
            Self::UltraHd => "4K",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FullHd => "1920x1080 (1080p)",
            Self::QuadHd => "2560x1440 (1440p)",
            Self::UltraHd => "3840x2160 (4K)",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::FullHd => 1.0,
            Self::QuadHd => 1.78,
            Self::UltraHd => 4.0,
        }
    }

    /// Parse an identifier, ignoring ASCII case (`4k` == `4K`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|r| r.id().eq_ignore_ascii_case(s))
    }

    pub fn option(self) -> WorkloadOption {
        WorkloadOption {
            id: self.id(),
            name: self.name(),
            multiplier: self.multiplier(),
        }
    }
}

impl TryFrom<String> for Resolution {
    type Error = ParseWorkloadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(ParseWorkloadError {
            kind: "resolution",
            value,
        })
    }
}

impl From<Resolution> for &'static str {
    fn from(r: Resolution) -> Self {
        r.id()
    }
}

/* --------------------------------------------------------------------------
Quality preset
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum QualityPreset {
    Low,
    Medium,
    High,
    Ultra,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Low,
        QualityPreset::Medium,
        QualityPreset::High,
        QualityPreset::Ultra,
    ];

    /// Canonical identifier, which doubles as the display name.
    pub fn id(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Ultra => "Ultra",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 0.7,
            Self::High => 0.5,
            Self::Ultra => 0.3,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|p| p.id().eq_ignore_ascii_case(s))
    }

    pub fn option(self) -> WorkloadOption {
        WorkloadOption {
            id: self.id(),
            name: self.id(),
            multiplier: self.multiplier(),
        }
    }
}

impl TryFrom<String> for QualityPreset {
    type Error = ParseWorkloadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(ParseWorkloadError {
            kind: "quality preset",
            value,
        })
    }
}

impl From<QualityPreset> for &'static str {
    fn from(p: QualityPreset) -> Self {
        p.id()
    }
}

/// Combined workload divisor for a resolution/preset pair.
pub fn workload_multiplier(resolution: Resolution, preset: QualityPreset) -> f64 {
    resolution.multiplier() * preset.multiplier()
}
