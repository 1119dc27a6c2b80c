//! FPS estimation: exact benchmark lookup with a heuristic fallback.
//!
//! The heuristic is a deliberate simplification, not a physical model:
//!
//! ```text
//! base      = (gpuScore * 0.7 + cpuScore * 0.3) * intensityWeight
//! estimated = clamp(base / (resolution.multiplier * preset.multiplier), 30, 300)
//! min, max  = estimated * 0.85, estimated * 1.15   (each rounded half-up)
//! ```

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use crate::benchmark::BenchmarkSample;
use crate::catalog::{ComponentRef, GameProfile, GameSummary};
use crate::engine::{ConfigurationRefs, FpsEngine, ResolvedConfiguration};
use crate::error::CoreError;
use crate::scoring::{classify_bottleneck, score, Bottleneck};
use crate::store::{BenchmarkStore, ComponentCatalog};
use crate::types::{DbId, Timestamp};
use crate::workload::{workload_multiplier, QualityPreset, Resolution};

// ---------------------------------------------------------------------------
// Model constants
// ---------------------------------------------------------------------------

/// Share of the base score contributed by the GPU.
pub const GPU_SHARE: f64 = 0.7;
/// Share of the base score contributed by the CPU.
pub const CPU_SHARE: f64 = 0.3;

/// Intensity weight for a game that is both GPU- and CPU-intensive.
pub const WEIGHT_BOTH_INTENSIVE: f64 = 0.8;
/// Intensity weight for a GPU-intensive game.
pub const WEIGHT_GPU_INTENSIVE: f64 = 0.9;
/// Intensity weight for a CPU-intensive game.
pub const WEIGHT_CPU_INTENSIVE: f64 = 0.95;
/// Intensity weight for a game with neither flag.
pub const WEIGHT_LIGHT: f64 = 1.0;

/// Lowest frame rate the heuristic will report.
pub const MIN_DISPLAY_FPS: f64 = 30.0;
/// Highest frame rate the heuristic will report.
pub const MAX_DISPLAY_FPS: f64 = 300.0;

/// Relative width of the min/max band around the average (±15%).
pub const FPS_VARIANCE: f64 = 0.15;

// ---------------------------------------------------------------------------
// Pure model
// ---------------------------------------------------------------------------

/// Throughput weight from a game's intensity flags.
pub fn intensity_weight(gpu_intensive: bool, cpu_intensive: bool) -> f64 {
    match (gpu_intensive, cpu_intensive) {
        (true, true) => WEIGHT_BOTH_INTENSIVE,
        (true, false) => WEIGHT_GPU_INTENSIVE,
        (false, true) => WEIGHT_CPU_INTENSIVE,
        (false, false) => WEIGHT_LIGHT,
    }
}

pub fn base_fps(gpu_score: u32, cpu_score: u32, weight: f64) -> f64 {
    (f64::from(gpu_score) * GPU_SHARE + f64::from(cpu_score) * CPU_SHARE) * weight
}

/// Round to the nearest integer, halves up.
///
/// Operates on the product as computed, so `90.0 * 1.15`
/// (`103.49999999999999`) rounds down to 103.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Unrounded `(min, max)` band around an average.
pub fn variance_band(avg_fps: f64) -> (f64, f64) {
    (
        avg_fps * (1.0 - FPS_VARIANCE),
        avg_fps * (1.0 + FPS_VARIANCE),
    )
}

/// Every intermediate of the heuristic, for callers that want to explain a result.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicEstimate {
    pub gpu_score: u32,
    pub cpu_score: u32,
    pub intensity_weight: f64,
    pub base_fps: f64,
    /// Clamped, unrounded.
    pub estimated_fps: f64,
    pub avg_fps: f64,
    pub min_fps: f64,
    pub max_fps: f64,
    pub bottleneck: Bottleneck,
}

/// Run the heuristic model for a tier pair, game and workload.
pub fn heuristic_estimate(
    gpu_tier: &str,
    cpu_tier: &str,
    game: &GameProfile,
    resolution: Resolution,
    preset: QualityPreset,
) -> HeuristicEstimate {
    let gpu_score = score(gpu_tier);
    let cpu_score = score(cpu_tier);
    let weight = intensity_weight(game.gpu_intensive, game.cpu_intensive);
    let base = base_fps(gpu_score, cpu_score, weight);

    let estimated = (base / workload_multiplier(resolution, preset))
        .clamp(MIN_DISPLAY_FPS, MAX_DISPLAY_FPS);
    let (min, max) = variance_band(estimated);

    HeuristicEstimate {
        gpu_score,
        cpu_score,
        intensity_weight: weight,
        base_fps: base,
        estimated_fps: estimated,
        avg_fps: round_half_up(estimated),
        min_fps: round_half_up(min),
        max_fps: round_half_up(max),
        bottleneck: classify_bottleneck(gpu_score, cpu_score),
    }
}

// ---------------------------------------------------------------------------
// Request / result contract
// ---------------------------------------------------------------------------

/// The configuration to estimate, as a client submits it.
///
/// Absent and `null` fields read as empty and fail resolution like any
/// unknown id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimateRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub gpu_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cpu_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub game_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub resolution: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub settings: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl EstimateRequest {
    /// References with surrounding whitespace removed, as submissions see them.
    pub fn refs(&self) -> ConfigurationRefs<'_> {
        ConfigurationRefs {
            gpu_id: self.gpu_id.trim(),
            cpu_id: self.cpu_id.trim(),
            game_id: self.game_id.trim(),
            resolution: self.resolution.trim(),
            settings: self.settings.trim(),
        }
    }
}

/// Which path produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Database,
    Estimated,
}

impl EstimateSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Estimated => "estimated",
        }
    }
}

/// Resolved display identity of what was estimated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateComponents {
    pub gpu: ComponentRef,
    pub cpu: ComponentRef,
    pub game: GameSummary,
    pub resolution: Resolution,
    pub settings: QualityPreset,
}

impl From<&ResolvedConfiguration> for EstimateComponents {
    fn from(config: &ResolvedConfiguration) -> Self {
        Self {
            gpu: config.gpu.clone(),
            cpu: config.cpu.clone(),
            game: config.game.summary(),
            resolution: config.resolution,
            settings: config.preset,
        }
    }
}

/// One field set for both paths; `min_fps <= avg_fps <= max_fps` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    #[serde(rename = "avgFPS")]
    pub avg_fps: f64,
    #[serde(rename = "minFPS")]
    pub min_fps: f64,
    #[serde(rename = "maxFPS")]
    pub max_fps: f64,
    pub bottleneck: Bottleneck,
    pub source: EstimateSource,
    /// The sample a `database` result was read from; `null` for estimates.
    pub benchmark_id: Option<DbId>,
    pub components: EstimateComponents,
    /// When the estimate was produced.
    pub timestamp: Timestamp,
}

impl EstimateResult {
    /// Normalise an empirical sample.
    ///
    /// Missing bounds take the ±15% band; a stored band that excludes the
    /// average is widened to include it.
    pub fn from_sample(sample: &BenchmarkSample, components: EstimateComponents) -> Self {
        let avg = sample.avg_fps;
        let (derived_min, derived_max) = variance_band(avg);
        let min = sample.min_fps.unwrap_or(derived_min).min(avg);
        let max = sample.max_fps.unwrap_or(derived_max).max(avg);

        Self {
            avg_fps: avg,
            min_fps: min,
            max_fps: max,
            bottleneck: sample.bottleneck.unwrap_or(Bottleneck::Unknown),
            source: EstimateSource::Database,
            benchmark_id: Some(sample.id),
            components,
            timestamp: Utc::now(),
        }
    }

    pub fn from_heuristic(estimate: &HeuristicEstimate, components: EstimateComponents) -> Self {
        Self {
            avg_fps: estimate.avg_fps,
            min_fps: estimate.min_fps,
            max_fps: estimate.max_fps,
            bottleneck: estimate.bottleneck,
            source: EstimateSource::Estimated,
            benchmark_id: None,
            components,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine operation
// ---------------------------------------------------------------------------

impl<C, S> FpsEngine<C, S>
where
    C: ComponentCatalog,
    S: BenchmarkStore,
{
    /// Estimate frame rate for a configuration.
    ///
    /// Fails with [`CoreError::InvalidConfiguration`] before touching the
    /// benchmark store if any reference is unresolvable.
    pub async fn estimate(&self, request: &EstimateRequest) -> Result<EstimateResult, CoreError> {
        let config = self.resolve(request.refs()).await?;
        let components = EstimateComponents::from(&config);

        if let Some(sample) = self.store().find_benchmark(&config.key()).await? {
            tracing::debug!(
                benchmark_id = sample.id,
                gpu_id = %config.gpu.id,
                cpu_id = %config.cpu.id,
                game_id = %config.game.id,
                "Exact benchmark match"
            );
            return Ok(EstimateResult::from_sample(&sample, components));
        }

        let estimate = heuristic_estimate(
            &config.gpu.tier,
            &config.cpu.tier,
            &config.game,
            config.resolution,
            config.preset,
        );
        tracing::debug!(
            gpu_score = estimate.gpu_score,
            cpu_score = estimate.cpu_score,
            base_fps = estimate.base_fps,
            estimated_fps = estimate.estimated_fps,
            bottleneck = estimate.bottleneck.as_str(),
            "Heuristic estimate"
        );
        Ok(EstimateResult::from_heuristic(&estimate, components))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::benchmark::{BenchmarkKey, NewBenchmark};
    use crate::error::UnresolvedRef;
    use crate::memory::InMemoryStore;

    fn game(gpu_intensive: bool, cpu_intensive: bool) -> GameProfile {
        GameProfile {
            id: "test-game".into(),
            name: "Test Game".into(),
            genre: "test".into(),
            gpu_intensive,
            cpu_intensive,
            ray_tracing_support: false,
        }
    }

    fn request(gpu: &str, cpu: &str, game: &str, res: &str, preset: &str) -> EstimateRequest {
        EstimateRequest {
            gpu_id: gpu.into(),
            cpu_id: cpu.into(),
            game_id: game.into(),
            resolution: res.into(),
            settings: preset.into(),
        }
    }

    fn reference_engine() -> FpsEngine<Arc<InMemoryStore>, Arc<InMemoryStore>> {
        let store = Arc::new(InMemoryStore::reference());
        FpsEngine::new(Arc::clone(&store), store)
    }

    // -- intensity_weight --

    #[test]
    fn intensity_weights() {
        assert_eq!(intensity_weight(true, true), 0.8);
        assert_eq!(intensity_weight(true, false), 0.9);
        assert_eq!(intensity_weight(false, true), 0.95);
        assert_eq!(intensity_weight(false, false), 1.0);
    }

    // -- round_half_up --

    #[test]
    fn rounds_halves_up() {
        assert_eq!(round_half_up(84.5), 85.0);
        assert_eq!(round_half_up(84.49), 84.0);
        assert_eq!(round_half_up(90.0 * 1.15), 103.0);
        assert_eq!(round_half_up(100.0 * 1.15), 115.0);
    }

    // -- heuristic_estimate --

    #[test]
    fn band_edge_on_representation_error_rounds_down() {
        // Flagship pair, GPU-heavy title: 100 * 0.9 = 90, max = 90 * 1.15.
        let est = heuristic_estimate(
            "flagship",
            "flagship",
            &game(true, false),
            Resolution::FullHd,
            QualityPreset::Low,
        );
        assert_eq!(est.avg_fps, 90.0);
        assert_eq!(est.min_fps, 77.0);
        assert_eq!(est.max_fps, 103.0);
    }

    #[test]
    fn flagship_pair_at_1080p_low_is_unclamped() {
        let est = heuristic_estimate(
            "flagship",
            "flagship",
            &game(false, false),
            Resolution::FullHd,
            QualityPreset::Low,
        );
        assert!((est.base_fps - 100.0).abs() < 1e-9);
        assert!((est.estimated_fps - 100.0).abs() < 1e-9);
        assert_eq!(est.avg_fps, 100.0);
        assert_eq!(est.min_fps, 85.0);
        assert_eq!(est.max_fps, 115.0);
        assert_eq!(est.bottleneck, Bottleneck::Balanced);
    }

    #[test]
    fn budget_pair_at_4k_ultra_never_below_floor() {
        for (gpu_heavy, cpu_heavy) in [(true, true), (true, false), (false, true), (false, false)] {
            let est = heuristic_estimate(
                "budget",
                "budget",
                &game(gpu_heavy, cpu_heavy),
                Resolution::UltraHd,
                QualityPreset::Ultra,
            );
            assert!(est.estimated_fps >= MIN_DISPLAY_FPS);
            assert!(est.min_fps >= (MIN_DISPLAY_FPS * 0.85).floor());
        }
    }

    #[test]
    fn light_load_is_clamped_to_ceiling() {
        // 100 / (1.0 * 0.3) = 333.3 before clamping.
        let est = heuristic_estimate(
            "flagship",
            "flagship",
            &game(false, false),
            Resolution::FullHd,
            QualityPreset::Ultra,
        );
        assert_eq!(est.estimated_fps, MAX_DISPLAY_FPS);
        assert_eq!(est.avg_fps, 300.0);
        assert_eq!(est.min_fps, 255.0);
        assert_eq!(est.max_fps, 345.0);
    }

    #[test]
    fn heavy_load_is_clamped_to_floor() {
        // 40 * 0.8 / 4.0 = 8 before clamping.
        let est = heuristic_estimate(
            "budget",
            "budget",
            &game(true, true),
            Resolution::UltraHd,
            QualityPreset::Low,
        );
        assert_eq!(est.estimated_fps, MIN_DISPLAY_FPS);
        assert_eq!(est.avg_fps, 30.0);
        assert_eq!(est.min_fps, 26.0);
        assert_eq!(est.max_fps, 35.0);
    }

    #[test]
    fn unknown_tiers_score_default() {
        let est = heuristic_estimate(
            "legendary",
            "mystery",
            &game(false, false),
            Resolution::FullHd,
            QualityPreset::Low,
        );
        assert_eq!(est.gpu_score, 50);
        assert_eq!(est.cpu_score, 50);
        assert_eq!(est.avg_fps, 50.0);
    }

    #[test]
    fn mid_gpu_with_flagship_cpu_is_gpu_bound() {
        let est = heuristic_estimate(
            "mid",
            "flagship",
            &game(true, false),
            Resolution::QuadHd,
            QualityPreset::High,
        );
        assert_eq!(est.bottleneck, Bottleneck::Gpu);
    }

    #[test]
    fn band_ordering_holds_across_grid() {
        let tiers = ["flagship", "high-end", "mid-high", "mid", "budget", "unknown"];
        for gpu in tiers {
            for cpu in tiers {
                for res in Resolution::ALL {
                    for preset in QualityPreset::ALL {
                        for (g, c) in [(true, true), (true, false), (false, true), (false, false)] {
                            let est = heuristic_estimate(gpu, cpu, &game(g, c), res, preset);
                            assert!(
                                est.min_fps <= est.avg_fps && est.avg_fps <= est.max_fps,
                                "band violated for {gpu}/{cpu}/{res:?}/{preset:?}: {est:?}"
                            );
                            assert!((MIN_DISPLAY_FPS..=MAX_DISPLAY_FPS).contains(&est.avg_fps));
                        }
                    }
                }
            }
        }
    }

    // -- EstimateResult::from_sample --

    fn sample(avg: f64, min: Option<f64>, max: Option<f64>) -> BenchmarkSample {
        BenchmarkSample {
            id: 7,
            key: BenchmarkKey {
                gpu_id: "rtx4070".into(),
                cpu_id: "r5-7600".into(),
                game_id: "witcher3".into(),
                resolution: Resolution::QuadHd,
                preset: QualityPreset::High,
            },
            avg_fps: avg,
            min_fps: min,
            max_fps: max,
            ram_id: None,
            source: "lab".into(),
            bottleneck: None,
            driver_version: None,
            os_version: None,
            test_date: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn components() -> EstimateComponents {
        EstimateComponents {
            gpu: ComponentRef {
                id: "rtx4070".into(),
                name: "NVIDIA RTX 4070".into(),
                tier: "mid-high".into(),
            },
            cpu: ComponentRef {
                id: "r5-7600".into(),
                name: "AMD Ryzen 5 7600".into(),
                tier: "mid-high".into(),
            },
            game: game(true, false).summary(),
            resolution: Resolution::QuadHd,
            settings: QualityPreset::High,
        }
    }

    #[test]
    fn sample_bounds_taken_verbatim() {
        let result = EstimateResult::from_sample(&sample(95.2, Some(78.4), Some(112.6)), components());
        assert_eq!(result.avg_fps, 95.2);
        assert_eq!(result.min_fps, 78.4);
        assert_eq!(result.max_fps, 112.6);
        assert_eq!(result.source, EstimateSource::Database);
        assert_eq!(result.bottleneck, Bottleneck::Unknown);
        assert_eq!(result.benchmark_id, Some(7));
    }

    #[test]
    fn missing_sample_bounds_are_derived() {
        let result = EstimateResult::from_sample(&sample(80.0, None, None), components());
        assert!((result.min_fps - 68.0).abs() < 1e-9);
        assert!((result.max_fps - 92.0).abs() < 1e-9);
    }

    #[test]
    fn inconsistent_sample_band_is_widened() {
        let result = EstimateResult::from_sample(&sample(60.0, Some(70.0), Some(55.0)), components());
        assert_eq!(result.min_fps, 60.0);
        assert_eq!(result.max_fps, 60.0);
    }

    #[test]
    fn recorded_bottleneck_is_echoed() {
        let mut s = sample(60.0, None, None);
        s.bottleneck = Some(Bottleneck::Cpu);
        let result = EstimateResult::from_sample(&s, components());
        assert_eq!(result.bottleneck, Bottleneck::Cpu);
    }

    #[test]
    fn request_reads_null_and_absent_fields_as_empty() {
        let req: EstimateRequest = serde_json::from_value(serde_json::json!({
            "gpuId": null,
            "cpuId": "i9-14900k",
            "resolution": "1080p",
        }))
        .unwrap();
        assert_eq!(req.gpu_id, "");
        assert_eq!(req.game_id, "");
        assert_eq!(req.cpu_id, "i9-14900k");
    }

    #[test]
    fn result_serializes_contract_field_names() {
        let result = EstimateResult::from_sample(&sample(95.2, Some(78.4), Some(112.6)), components());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["avgFPS"], 95.2);
        assert_eq!(json["source"], "database");
        assert_eq!(json["bottleneck"], "unknown");
        assert_eq!(json["components"]["resolution"], "1440p");
        assert_eq!(json["components"]["settings"], "High");
        assert_eq!(json["components"]["gpu"]["tier"], "mid-high");
        assert!(json["timestamp"].is_string());
    }

    // -- FpsEngine::estimate --

    #[tokio::test]
    async fn exact_match_returns_stored_sample() {
        let engine = reference_engine();
        let result = engine
            .estimate(&request("rtx4090", "i9-14900k", "cyberpunk2077", "4K", "Ultra"))
            .await
            .unwrap();
        assert_eq!(result.source, EstimateSource::Database);
        assert_eq!(result.avg_fps, 78.5);
        assert_eq!(result.min_fps, 65.2);
        assert_eq!(result.max_fps, 95.8);
        assert!(result.benchmark_id.is_some());
        assert_eq!(result.components.game.name, "Cyberpunk 2077");
        assert_eq!(result.components.gpu.id, "rtx4090");
    }

    #[tokio::test]
    async fn exact_match_accepts_lowercase_workload_ids() {
        let engine = reference_engine();
        let result = engine
            .estimate(&request("rtx4090", "i9-14900k", "cyberpunk2077", "4k", "ultra"))
            .await
            .unwrap();
        assert_eq!(result.source, EstimateSource::Database);
        assert_eq!(result.components.resolution, Resolution::UltraHd);
    }

    #[tokio::test]
    async fn no_match_falls_back_to_heuristic() {
        let engine = reference_engine();
        let result = engine
            .estimate(&request("rtx4060", "i9-14900k", "cyberpunk2077", "1440p", "High"))
            .await
            .unwrap();
        assert_eq!(result.source, EstimateSource::Estimated);
        assert_eq!(result.bottleneck, Bottleneck::Gpu);
        assert_eq!(result.benchmark_id, None);
        // (55 * 0.7 + 100 * 0.3) * 0.8 / (1.78 * 0.5) = 61.57
        assert_eq!(result.avg_fps, 62.0);
        assert_eq!(result.min_fps, 52.0);
        assert_eq!(result.max_fps, 71.0);
    }

    #[tokio::test]
    async fn estimate_is_deterministic() {
        let engine = reference_engine();
        let req = request("rx7800xt", "r7-7800x3d", "eldenring", "1440p", "Medium");
        let first = engine.estimate(&req).await.unwrap();
        let second = engine.estimate(&req).await.unwrap();
        assert_eq!(
            (first.avg_fps, first.min_fps, first.max_fps, first.bottleneck),
            (second.avg_fps, second.min_fps, second.max_fps, second.bottleneck)
        );
        assert_eq!(first.components, second.components);
        assert!(second.timestamp >= first.timestamp);
    }

    #[tokio::test]
    async fn padded_ids_resolve_like_submissions() {
        let engine = reference_engine();
        let result = engine
            .estimate(&request(" rtx4090", "i9-14900k ", " cyberpunk2077 ", " 4K", "Ultra "))
            .await
            .unwrap();
        assert_eq!(result.source, EstimateSource::Database);
        assert_eq!(result.components.gpu.id, "rtx4090");
    }

    #[tokio::test]
    async fn null_reference_is_unresolved() {
        let engine = reference_engine();
        let req: EstimateRequest = serde_json::from_value(serde_json::json!({
            "gpuId": null,
            "cpuId": "i9-14900k",
            "gameId": "cs2",
            "resolution": "1080p",
            "settings": "Low",
        }))
        .unwrap();
        let err = engine.estimate(&req).await.unwrap_err();
        assert_matches!(err, CoreError::InvalidConfiguration { ref unresolved } => {
            assert_eq!(unresolved, &vec![UnresolvedRef::new("gpuId", "")]);
        });
    }

    #[tokio::test]
    async fn unresolved_references_fail_without_partial_result() {
        let engine = reference_engine();
        let err = engine
            .estimate(&request("rtx4090", "i9-14900k", "cyberpunk2077", "720p", "Ultra"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidConfiguration { ref unresolved } => {
            assert_eq!(unresolved.len(), 1);
            assert_eq!(unresolved[0].field, "resolution");
        });
    }

    #[tokio::test]
    async fn estimate_sees_benchmarks_added_later() {
        let store = Arc::new(InMemoryStore::reference());
        let engine = FpsEngine::new(Arc::clone(&store), Arc::clone(&store));
        let req = request("rtx3060", "r5-5600", "fortnite", "1080p", "Medium");

        let before = engine.estimate(&req).await.unwrap();
        assert_eq!(before.source, EstimateSource::Estimated);

        let key = engine.resolve(req.refs()).await.unwrap().key();
        store
            .create_benchmark(&NewBenchmark::measured(key, 141.0, 120.0, 160.0, "lab"))
            .await
            .unwrap();

        let after = engine.estimate(&req).await.unwrap();
        assert_eq!(after.source, EstimateSource::Database);
        assert_eq!(after.avg_fps, 141.0);
    }

    #[tokio::test]
    async fn every_reference_configuration_keeps_band_order() {
        let engine = reference_engine();
        let listing = engine.list_catalog().await.unwrap();
        for gpu in &listing.gpus {
            for cpu in &listing.cpus {
                for game in listing.games.iter().take(4) {
                    for res in Resolution::ALL {
                        for preset in QualityPreset::ALL {
                            let result = engine
                                .estimate(&request(&gpu.id, &cpu.id, &game.id, res.id(), preset.id()))
                                .await
                                .unwrap();
                            assert!(result.min_fps <= result.avg_fps);
                            assert!(result.avg_fps <= result.max_fps);
                        }
                    }
                }
            }
        }
    }
}
