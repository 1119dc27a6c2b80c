//! In-memory catalog and benchmark store.
//!
//! Implements both [`ComponentCatalog`] and [`BenchmarkStore`] behind a
//! single async lock, enforcing the one-canonical-sample-per-key rule the
//! same way a unique constraint would. Used by engine tests and by embedders
//! without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::benchmark::{
    BenchmarkKey, BenchmarkSample, CreateBenchmark, NewBenchmark, NewObservation, Observation,
    PerformanceStat, SOURCE_COMMUNITY,
};
use crate::catalog::{ComponentKind, ComponentRef, GameProfile, HardwareKind, RamKit};
use crate::error::CoreError;
use crate::store::{BenchmarkStore, ComponentCatalog};
use crate::types::DbId;
use crate::workload::{QualityPreset, Resolution};

#[derive(Debug, Default)]
struct Inner {
    gpus: BTreeMap<String, ComponentRef>,
    cpus: BTreeMap<String, ComponentRef>,
    games: BTreeMap<String, GameProfile>,
    rams: BTreeMap<String, RamKit>,
    benchmarks: Vec<BenchmarkSample>,
    observations: Vec<Observation>,
    next_benchmark_id: DbId,
    next_observation_id: DbId,
}

impl Inner {
    fn hardware(&self, kind: HardwareKind) -> &BTreeMap<String, ComponentRef> {
        match kind {
            HardwareKind::Gpu => &self.gpus,
            HardwareKind::Cpu => &self.cpus,
        }
    }

    fn insert_benchmark(&mut self, input: &NewBenchmark) -> CreateBenchmark {
        if self.benchmarks.iter().any(|b| b.key == input.key) {
            return CreateBenchmark::AlreadyExists;
        }
        self.next_benchmark_id += 1;
        let sample = input.clone().into_sample(self.next_benchmark_id);
        self.benchmarks.push(sample.clone());
        CreateBenchmark::Created(sample)
    }

    fn insert_observation(&mut self, input: &NewObservation) -> Result<Observation, CoreError> {
        if !self.benchmarks.iter().any(|b| b.id == input.benchmark_id) {
            return Err(CoreError::NotFound {
                entity: "benchmark",
                id: input.benchmark_id.to_string(),
            });
        }
        self.next_observation_id += 1;
        let observation = Observation {
            id: self.next_observation_id,
            benchmark_id: input.benchmark_id,
            submitter_id: input.submitter_id.clone(),
            avg_fps: input.avg_fps,
            min_fps: input.min_fps,
            max_fps: input.max_fps,
            notes: input.notes.clone(),
            confidence_rating: input.confidence_rating,
            hardware_match: input.hardware_match,
            created_at: Utc::now(),
        };
        self.observations.push(observation.clone());
        Ok(observation)
    }
}

/// Catalog and benchmark store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gpu(mut self, id: &str, name: &str, tier: &str) -> Self {
        self.inner.get_mut().gpus.insert(id.to_string(), component(id, name, tier));
        self
    }

    pub fn with_cpu(mut self, id: &str, name: &str, tier: &str) -> Self {
        self.inner.get_mut().cpus.insert(id.to_string(), component(id, name, tier));
        self
    }

    pub fn with_game(
        mut self,
        id: &str,
        name: &str,
        genre: &str,
        gpu_intensive: bool,
        cpu_intensive: bool,
    ) -> Self {
        self.with_game_profile(GameProfile {
            id: id.to_string(),
            name: name.to_string(),
            genre: genre.to_string(),
            gpu_intensive,
            cpu_intensive,
            ray_tracing_support: false,
        })
    }

    pub fn with_game_profile(mut self, game: GameProfile) -> Self {
        self.inner.get_mut().games.insert(game.id.clone(), game);
        self
    }

    pub fn with_ram(mut self, id: &str, size_gb: i32, speed_mhz: i32, memory_type: &str, brand: &str) -> Self {
        self.inner.get_mut().rams.insert(
            id.to_string(),
            RamKit {
                id: id.to_string(),
                size_gb,
                speed_mhz,
                memory_type: memory_type.to_string(),
                brand: brand.to_string(),
            },
        );
        self
    }

    /// Seed a canonical benchmark. Duplicate keys are ignored.
    pub fn with_benchmark(mut self, input: NewBenchmark) -> Self {
        self.inner.get_mut().insert_benchmark(&input);
        self
    }

    /// The reference catalog and sample benchmarks shipped with the service.
    ///
    /// Mirrors the seed migration of the database store.
    pub fn reference() -> Self {
        let mut store = Self::new();

        for (id, name, tier) in REFERENCE_GPUS {
            store = store.with_gpu(id, name, tier);
        }
        for (id, name, tier) in REFERENCE_CPUS {
            store = store.with_cpu(id, name, tier);
        }
        for (id, name, genre, gpu_intensive, cpu_intensive, ray_tracing_support) in REFERENCE_GAMES {
            store = store.with_game_profile(GameProfile {
                id: id.to_string(),
                name: name.to_string(),
                genre: genre.to_string(),
                gpu_intensive,
                cpu_intensive,
                ray_tracing_support,
            });
        }
        for (id, size, speed, memory_type, brand) in REFERENCE_RAM {
            store = store.with_ram(id, size, speed, memory_type, brand);
        }
        for seed in REFERENCE_BENCHMARKS.iter().chain(&LAB_BENCHMARKS) {
            store = store.with_benchmark(seed.to_new_benchmark());
        }
        let inner = store.inner.get_mut();
        for seed in REFERENCE_OBSERVATIONS {
            let key = REFERENCE_BENCHMARKS[seed.benchmark].key();
            if let Some(id) = inner.benchmarks.iter().find(|b| b.key == key).map(|b| b.id) {
                let _ = inner.insert_observation(&seed.to_new_observation(id));
            }
        }
        store
    }

    pub async fn benchmark_count(&self) -> usize {
        self.inner.read().await.benchmarks.len()
    }

    /// Observations linked to a benchmark, oldest first.
    pub async fn observations_for(&self, benchmark_id: DbId) -> Vec<Observation> {
        self.inner
            .read()
            .await
            .observations
            .iter()
            .filter(|o| o.benchmark_id == benchmark_id)
            .cloned()
            .collect()
    }
}

fn component(id: &str, name: &str, tier: &str) -> ComponentRef {
    ComponentRef {
        id: id.to_string(),
        name: name.to_string(),
        tier: tier.to_string(),
    }
}

#[async_trait]
impl ComponentCatalog for InMemoryStore {
    async fn find_hardware(
        &self,
        kind: HardwareKind,
        id: &str,
    ) -> Result<Option<ComponentRef>, CoreError> {
        Ok(self.inner.read().await.hardware(kind).get(id).cloned())
    }

    async fn find_game(&self, id: &str) -> Result<Option<GameProfile>, CoreError> {
        Ok(self.inner.read().await.games.get(id).cloned())
    }

    async fn find_ram(&self, id: &str) -> Result<Option<RamKit>, CoreError> {
        Ok(self.inner.read().await.rams.get(id).cloned())
    }

    async fn list_hardware(&self, kind: HardwareKind) -> Result<Vec<ComponentRef>, CoreError> {
        Ok(self.inner.read().await.hardware(kind).values().cloned().collect())
    }

    async fn list_games(&self) -> Result<Vec<GameProfile>, CoreError> {
        let inner = self.inner.read().await;
        let mut games: Vec<_> = inner.games.values().cloned().collect();
        games.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(games)
    }

    async fn list_ram(&self) -> Result<Vec<RamKit>, CoreError> {
        let inner = self.inner.read().await;
        let mut rams: Vec<_> = inner.rams.values().cloned().collect();
        rams.sort_by(|a, b| b.speed_mhz.cmp(&a.speed_mhz).then(a.id.cmp(&b.id)));
        Ok(rams)
    }
}

#[async_trait]
impl BenchmarkStore for InMemoryStore {
    async fn find_benchmark(
        &self,
        key: &BenchmarkKey,
    ) -> Result<Option<BenchmarkSample>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.benchmarks.iter().find(|b| &b.key == key).cloned())
    }

    async fn create_benchmark(&self, input: &NewBenchmark) -> Result<CreateBenchmark, CoreError> {
        Ok(self.inner.write().await.insert_benchmark(input))
    }

    async fn attach_observation(&self, input: &NewObservation) -> Result<Observation, CoreError> {
        self.inner.write().await.insert_observation(input)
    }

    async fn recent_benchmarks(
        &self,
        kind: ComponentKind,
        id: &str,
        limit: i64,
    ) -> Result<Vec<BenchmarkSample>, CoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<_> = inner
            .benchmarks
            .iter()
            .filter(|b| b.involves(kind, id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matching.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(matching)
    }

    async fn performance_stats(&self) -> Result<Vec<PerformanceStat>, CoreError> {
        let inner = self.inner.read().await;
        let mut groups: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
        for b in &inner.benchmarks {
            groups
                .entry((b.key.gpu_id.as_str(), b.key.cpu_id.as_str()))
                .or_default()
                .push(b.avg_fps);
        }

        Ok(groups
            .into_iter()
            .map(|((gpu_id, cpu_id), fps)| {
                let count = fps.len();
                PerformanceStat {
                    gpu_id: gpu_id.to_string(),
                    cpu_id: cpu_id.to_string(),
                    benchmark_count: count as i64,
                    avg_fps: fps.iter().sum::<f64>() / count as f64,
                    min_fps: fps.iter().copied().fold(f64::INFINITY, f64::min),
                    max_fps: fps.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                }
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

const REFERENCE_GPUS: [(&str, &str, &str); 20] = [
    ("rtx4090", "NVIDIA RTX 4090", "flagship"),
    ("rtx4080", "NVIDIA RTX 4080", "high-end"),
    ("rtx4070ti", "NVIDIA RTX 4070 Ti", "high-end"),
    ("rtx4070", "NVIDIA RTX 4070", "mid-high"),
    ("rtx4060ti", "NVIDIA RTX 4060 Ti", "mid"),
    ("rtx4060", "NVIDIA RTX 4060", "mid"),
    ("rtx3080", "NVIDIA RTX 3080", "high-end"),
    ("rtx3070", "NVIDIA RTX 3070", "mid-high"),
    ("rtx3060ti", "NVIDIA RTX 3060 Ti", "mid"),
    ("rtx3060", "NVIDIA RTX 3060", "mid"),
    ("gtx1650", "NVIDIA GTX 1650", "budget"),
    ("rx7900xtx", "AMD RX 7900 XTX", "flagship"),
    ("rx7900xt", "AMD RX 7900 XT", "high-end"),
    ("rx7800xt", "AMD RX 7800 XT", "high-end"),
    ("rx7700xt", "AMD RX 7700 XT", "mid-high"),
    ("rx7600", "AMD RX 7600", "mid"),
    ("rx6700xt", "AMD RX 6700 XT", "mid-high"),
    ("rx6600xt", "AMD RX 6600 XT", "mid"),
    ("rx6600", "AMD RX 6600", "mid"),
    ("rx6500xt", "AMD RX 6500 XT", "budget"),
];

const REFERENCE_CPUS: [(&str, &str, &str); 16] = [
    ("i9-14900k", "Intel Core i9-14900K", "flagship"),
    ("i7-14700k", "Intel Core i7-14700K", "high-end"),
    ("i5-14600k", "Intel Core i5-14600K", "high-end"),
    ("i5-13600k", "Intel Core i5-13600K", "high-end"),
    ("i5-12600k", "Intel Core i5-12600K", "mid-high"),
    ("i5-12400f", "Intel Core i5-12400F", "mid"),
    ("i3-12100f", "Intel Core i3-12100F", "budget"),
    ("r9-7950x", "AMD Ryzen 9 7950X", "flagship"),
    ("r9-7900x", "AMD Ryzen 9 7900X", "flagship"),
    ("r7-7800x3d", "AMD Ryzen 7 7800X3D", "high-end"),
    ("r7-7700x", "AMD Ryzen 7 7700X", "high-end"),
    ("r5-7600x", "AMD Ryzen 5 7600X", "high-end"),
    ("r5-7600", "AMD Ryzen 5 7600", "mid-high"),
    ("r5-5600x", "AMD Ryzen 5 5600X", "mid"),
    ("r5-5600", "AMD Ryzen 5 5600", "mid"),
    ("r5-4500", "AMD Ryzen 5 4500", "budget"),
];

const REFERENCE_GAMES: [(&str, &str, &str, bool, bool, bool); 20] = [
    ("cyberpunk2077", "Cyberpunk 2077", "rpg", true, true, true),
    ("reddead2", "Red Dead Redemption 2", "action-adventure", true, false, false),
    ("witcher3", "The Witcher 3: Wild Hunt", "rpg", true, false, true),
    ("gta5", "Grand Theft Auto V", "action-adventure", true, true, false),
    ("fortnite", "Fortnite", "battle-royale", false, true, true),
    ("valorant", "Valorant", "fps", false, true, false),
    ("cs2", "Counter-Strike 2", "fps", false, true, false),
    ("apex", "Apex Legends", "battle-royale", false, true, false),
    ("warzone", "Call of Duty: Warzone", "battle-royale", true, true, false),
    ("minecraft", "Minecraft", "sandbox", false, true, true),
    ("assassinscreed", "Assassin's Creed Valhalla", "action-adventure", true, false, false),
    ("farcry6", "Far Cry 6", "fps", true, false, true),
    ("metro", "Metro Exodus", "fps", true, false, true),
    ("control", "Control", "action-adventure", true, false, true),
    ("deathstranding", "Death Stranding", "action-adventure", true, false, false),
    ("horizon", "Horizon Zero Dawn", "action-adventure", true, false, false),
    ("godofwar", "God of War", "action-adventure", true, false, false),
    ("spiderman", "Marvel's Spider-Man", "action-adventure", true, false, true),
    ("eldenring", "Elden Ring", "action-rpg", true, false, true),
    ("hogwarts", "Hogwarts Legacy", "action-rpg", true, false, true),
];

const REFERENCE_RAM: [(&str, i32, i32, &str, &str); 5] = [
    ("ddr5-6000-32gb", 32, 6000, "DDR5", "Corsair"),
    ("ddr5-5600-32gb", 32, 5600, "DDR5", "G.Skill"),
    ("ddr5-6000-16gb", 16, 6000, "DDR5", "Corsair"),
    ("ddr4-3600-16gb", 16, 3600, "DDR4", "Corsair"),
    ("ddr4-3600-32gb", 32, 3600, "DDR4", "G.Skill"),
];

struct SeedBenchmark {
    gpu: &'static str,
    cpu: &'static str,
    ram: &'static str,
    game: &'static str,
    resolution: Resolution,
    preset: QualityPreset,
    fps: (f64, f64, f64),
    /// Driver version and test date, when the run recorded them.
    provenance: Option<(&'static str, (i32, u32, u32))>,
}

impl SeedBenchmark {
    fn key(&self) -> BenchmarkKey {
        BenchmarkKey {
            gpu_id: self.gpu.to_string(),
            cpu_id: self.cpu.to_string(),
            game_id: self.game.to_string(),
            resolution: self.resolution,
            preset: self.preset,
        }
    }

    fn to_new_benchmark(&self) -> NewBenchmark {
        let (avg, min, max) = self.fps;
        let mut input = NewBenchmark::measured(self.key(), avg, min, max, SOURCE_COMMUNITY);
        input.ram_id = Some(self.ram.to_string());
        if let Some((driver, (y, m, d))) = self.provenance {
            input.driver_version = Some(driver.to_string());
            input.os_version = Some("Windows 11 23H2".to_string());
            input.test_date = NaiveDate::from_ymd_opt(y, m, d);
        }
        input
    }
}

struct SeedObservation {
    /// Index into `REFERENCE_BENCHMARKS`.
    benchmark: usize,
    submitter: &'static str,
    fps: (f64, f64, f64),
    confidence: i16,
    notes: &'static str,
}

impl SeedObservation {
    fn to_new_observation(&self, benchmark_id: DbId) -> NewObservation {
        let (avg, min, max) = self.fps;
        NewObservation {
            benchmark_id,
            submitter_id: self.submitter.to_string(),
            avg_fps: avg,
            min_fps: Some(min),
            max_fps: Some(max),
            notes: Some(self.notes.to_string()),
            confidence_rating: self.confidence,
            hardware_match: true,
        }
    }
}

const REFERENCE_BENCHMARKS: [SeedBenchmark; 6] = [
    SeedBenchmark {
        gpu: "rtx4090",
        cpu: "i9-14900k",
        ram: "ddr5-6000-32gb",
        game: "cyberpunk2077",
        resolution: Resolution::UltraHd,
        preset: QualityPreset::Ultra,
        fps: (78.5, 65.2, 95.8),
        provenance: Some(("546.33", (2024, 1, 15))),
    },
    SeedBenchmark {
        gpu: "rx7900xtx",
        cpu: "r9-7950x",
        ram: "ddr5-5600-32gb",
        game: "cyberpunk2077",
        resolution: Resolution::UltraHd,
        preset: QualityPreset::Ultra,
        fps: (72.3, 58.9, 88.7),
        provenance: Some(("23.12.1", (2024, 1, 14))),
    },
    SeedBenchmark {
        gpu: "rtx4070",
        cpu: "i5-14600k",
        ram: "ddr5-6000-16gb",
        game: "cyberpunk2077",
        resolution: Resolution::QuadHd,
        preset: QualityPreset::High,
        fps: (95.2, 78.4, 112.6),
        provenance: Some(("546.33", (2024, 1, 13))),
    },
    SeedBenchmark {
        gpu: "rx7700xt",
        cpu: "r5-7600x",
        ram: "ddr5-6000-16gb",
        game: "cyberpunk2077",
        resolution: Resolution::QuadHd,
        preset: QualityPreset::High,
        fps: (88.7, 72.1, 105.3),
        provenance: Some(("23.12.1", (2024, 1, 12))),
    },
    SeedBenchmark {
        gpu: "rtx4060ti",
        cpu: "i5-12400f",
        ram: "ddr4-3600-16gb",
        game: "cyberpunk2077",
        resolution: Resolution::FullHd,
        preset: QualityPreset::Medium,
        fps: (75.8, 62.3, 89.4),
        provenance: Some(("546.33", (2024, 1, 11))),
    },
    SeedBenchmark {
        gpu: "rx7600",
        cpu: "r5-5600",
        ram: "ddr4-3600-32gb",
        game: "cyberpunk2077",
        resolution: Resolution::FullHd,
        preset: QualityPreset::Medium,
        fps: (68.9, 55.7, 82.1),
        provenance: Some(("23.12.1", (2024, 1, 10))),
    },
];


/// Lab runs on the top memory kit, without driver or date provenance.
const LAB_BENCHMARKS: [SeedBenchmark; 9] = [
    SeedBenchmark {
        gpu: "rtx4090",
        cpu: "i9-14900k",
        ram: "ddr5-6000-32gb",
        game: "minecraft",
        resolution: Resolution::FullHd,
        preset: QualityPreset::Ultra,
        fps: (180.0, 155.0, 210.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rtx4090",
        cpu: "i9-14900k",
        ram: "ddr5-6000-32gb",
        game: "fortnite",
        resolution: Resolution::FullHd,
        preset: QualityPreset::Ultra,
        fps: (165.0, 142.0, 188.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rtx4090",
        cpu: "i9-14900k",
        ram: "ddr5-6000-32gb",
        game: "warzone",
        resolution: Resolution::FullHd,
        preset: QualityPreset::High,
        fps: (195.0, 168.0, 220.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rtx4080",
        cpu: "i7-14700k",
        ram: "ddr5-6000-32gb",
        game: "cyberpunk2077",
        resolution: Resolution::FullHd,
        preset: QualityPreset::Ultra,
        fps: (98.0, 82.0, 115.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rtx4080",
        cpu: "i7-14700k",
        ram: "ddr5-6000-32gb",
        game: "fortnite",
        resolution: Resolution::FullHd,
        preset: QualityPreset::High,
        fps: (142.0, 125.0, 165.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rtx4070",
        cpu: "i5-14600k",
        ram: "ddr5-6000-32gb",
        game: "cyberpunk2077",
        resolution: Resolution::FullHd,
        preset: QualityPreset::High,
        fps: (67.0, 58.0, 78.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rtx4070",
        cpu: "i5-14600k",
        ram: "ddr5-6000-32gb",
        game: "cs2",
        resolution: Resolution::FullHd,
        preset: QualityPreset::Ultra,
        fps: (185.0, 165.0, 210.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rx7900xtx",
        cpu: "r9-7950x",
        ram: "ddr5-6000-32gb",
        game: "cyberpunk2077",
        resolution: Resolution::FullHd,
        preset: QualityPreset::Ultra,
        fps: (134.0, 118.0, 152.0),
        provenance: None,
    },
    SeedBenchmark {
        gpu: "rx7800xt",
        cpu: "r7-7800x3d",
        ram: "ddr5-6000-32gb",
        game: "fortnite",
        resolution: Resolution::FullHd,
        preset: QualityPreset::High,
        fps: (128.0, 112.0, 145.0),
        provenance: None,
    },
];

const REFERENCE_OBSERVATIONS: [SeedObservation; 3] = [
    SeedObservation {
        benchmark: 0,
        submitter: "user_001",
        fps: (79.2, 66.8, 96.5),
        confidence: 5,
        notes: "Excellent performance, ray tracing looks amazing!",
    },
    SeedObservation {
        benchmark: 1,
        submitter: "user_002",
        fps: (71.8, 59.2, 87.9),
        confidence: 4,
        notes: "Great performance for 4K gaming",
    },
    SeedObservation {
        benchmark: 2,
        submitter: "user_003",
        fps: (94.7, 77.9, 111.8),
        confidence: 5,
        notes: "Perfect for 1440p gaming, smooth experience",
    },
];
