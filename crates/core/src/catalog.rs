//! Component catalog records as the engine consumes them.
//!
//! Only identity, display name and the performance signal (tier or
//! intensity flags) are carried; pricing and engineering fields stay in the
//! store.

use serde::{Deserialize, Serialize};

use crate::benchmark::BenchmarkSample;
use crate::types::CatalogId;
use crate::workload::WorkloadOption;

/// The two hardware axes the scoring model consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareKind {
    Gpu,
    Cpu,
}

impl HardwareKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gpu => "gpu",
            Self::Cpu => "cpu",
        }
    }
}

/// Catalog entities that can be inspected with their recent benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Gpu,
    Cpu,
    Game,
    Ram,
}

impl ComponentKind {
    pub const ALL: [Self; 4] = [Self::Gpu, Self::Cpu, Self::Game, Self::Ram];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpu" => Some(Self::Gpu),
            "cpu" => Some(Self::Cpu),
            "game" => Some(Self::Game),
            "ram" => Some(Self::Ram),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gpu => "gpu",
            Self::Cpu => "cpu",
            Self::Game => "game",
            Self::Ram => "ram",
        }
    }
}

/// A GPU or CPU: identity, display name and tier.
///
/// `tier` is kept as the stored string so that unrecognised tiers still
/// resolve (they score the default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub id: CatalogId,
    pub name: String,
    pub tier: String,
}

/// A game title with its workload intensity flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProfile {
    pub id: CatalogId,
    pub name: String,
    pub genre: String,
    pub gpu_intensive: bool,
    pub cpu_intensive: bool,
    /// Descriptive only; the scoring model ignores it.
    pub ray_tracing_support: bool,
}

impl GameProfile {
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            genre: self.genre.clone(),
        }
    }
}

/// Display identity of a game, echoed in estimate results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub id: CatalogId,
    pub name: String,
    pub genre: String,
}

/// A memory kit. Descriptive only; never an engine input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RamKit {
    pub id: CatalogId,
    pub size_gb: i32,
    pub speed_mhz: i32,
    pub memory_type: String,
    pub brand: String,
}

/// Everything a client needs to populate its selection form.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub gpus: Vec<ComponentRef>,
    pub cpus: Vec<ComponentRef>,
    pub games: Vec<GameProfile>,
    pub rams: Vec<RamKit>,
    pub resolutions: Vec<WorkloadOption>,
    pub presets: Vec<WorkloadOption>,
}

/// A catalog record of either shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Hardware(ComponentRef),
    Game(GameProfile),
    Ram(RamKit),
}

/// A catalog record with the most recent benchmark samples involving it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetails {
    pub kind: ComponentKind,
    pub component: CatalogEntry,
    pub recent_benchmarks: Vec<BenchmarkSample>,
}
