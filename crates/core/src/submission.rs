//! Submission normaliser: folds a user-submitted FPS sample into the
//! benchmark store.
//!
//! The first submission for a configuration creates its canonical sample.
//! Every submission, including that first one, is also kept as an
//! observation linked to the canonical sample. Observations never revise the
//! canonical figures.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::benchmark::{
    BenchmarkKey, BenchmarkSample, CreateBenchmark, NewBenchmark, NewObservation, ANONYMOUS_SUBMITTER,
    DEFAULT_CONFIDENCE_RATING, SOURCE_COMMUNITY,
};
use crate::engine::{ConfigurationRefs, FpsEngine};
use crate::error::{CoreError, UnresolvedRef};
use crate::estimation::variance_band;
use crate::store::{BenchmarkStore, ComponentCatalog};
use crate::types::DbId;

/// A crowd-submitted measurement. Required fields are optional here so that
/// their absence surfaces as [`CoreError::MissingField`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FpsSubmission {
    pub gpu_id: Option<String>,
    pub cpu_id: Option<String>,
    pub game_id: Option<String>,
    pub resolution: Option<String>,
    pub settings: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 1000.0))]
    pub avg_fps: Option<f64>,
    #[validate(range(exclusive_min = 0.0, max = 1000.0))]
    pub min_fps: Option<f64>,
    #[validate(range(exclusive_min = 0.0, max = 1000.0))]
    pub max_fps: Option<f64>,
    pub ram_id: Option<String>,
    #[validate(length(max = 128))]
    pub user_id: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub submission_id: DbId,
    pub benchmark_id: DbId,
    /// Whether this submission created the canonical sample.
    pub created_benchmark: bool,
    pub message: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl FpsSubmission {
    /// Names of required fields that are absent or blank, in request order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("gpuId", &self.gpu_id),
            ("cpuId", &self.cpu_id),
            ("gameId", &self.game_id),
            ("resolution", &self.resolution),
            ("settings", &self.settings),
        ] {
            if present(value).is_none() {
                missing.push(name);
            }
        }
        if self.avg_fps.is_none() {
            missing.push("avgFps");
        }
        missing
    }

    /// Range checks plus band ordering against the average.
    pub fn check_values(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        if let Some(avg) = self.avg_fps {
            if !avg.is_finite() {
                return Err(CoreError::Validation("avgFps must be a finite number".into()));
            }
            if self.min_fps.is_some_and(|min| min > avg) {
                return Err(CoreError::Validation(
                    "minFps must not exceed avgFps".into(),
                ));
            }
            if self.max_fps.is_some_and(|max| max < avg) {
                return Err(CoreError::Validation(
                    "maxFps must not be below avgFps".into(),
                ));
            }
        }
        Ok(())
    }
}

impl<C, S> FpsEngine<C, S>
where
    C: ComponentCatalog,
    S: BenchmarkStore,
{
    /// Validate a submission and fold it into the benchmark store.
    ///
    /// Order of checks: missing fields, value ranges, catalog resolution.
    pub async fn submit(&self, submission: &FpsSubmission) -> Result<SubmissionRecord, CoreError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::MissingField { fields: missing });
        }
        submission.check_values()?;

        let refs = ConfigurationRefs {
            gpu_id: present(&submission.gpu_id).unwrap_or_default(),
            cpu_id: present(&submission.cpu_id).unwrap_or_default(),
            game_id: present(&submission.game_id).unwrap_or_default(),
            resolution: present(&submission.resolution).unwrap_or_default(),
            settings: present(&submission.settings).unwrap_or_default(),
        };
        let ram_id = present(&submission.ram_id);

        let (config, ram) = tokio::join!(self.resolve(refs), async {
            match ram_id {
                Some(id) => self.catalog().find_ram(id).await,
                None => Ok(None),
            }
        });
        let ram = ram?;
        let ram_unresolved = ram_id
            .filter(|_| ram.is_none())
            .map(|id| UnresolvedRef::new("ramId", id));
        let config = match (config, ram_unresolved) {
            (Ok(config), None) => config,
            (Ok(_), Some(unresolved)) => {
                return Err(CoreError::InvalidConfiguration {
                    unresolved: vec![unresolved],
                })
            }
            (Err(CoreError::InvalidConfiguration { mut unresolved }), ram_ref) => {
                unresolved.extend(ram_ref);
                return Err(CoreError::InvalidConfiguration { unresolved });
            }
            (Err(other), _) => return Err(other),
        };

        let avg = submission.avg_fps.unwrap_or_default();
        let key = config.key();

        let (benchmark, created_benchmark) = match self.store().find_benchmark(&key).await? {
            Some(existing) => (existing, false),
            None => {
                let (derived_min, derived_max) = variance_band(avg);
                let mut input = NewBenchmark::measured(
                    key.clone(),
                    avg,
                    submission.min_fps.unwrap_or(derived_min),
                    submission.max_fps.unwrap_or(derived_max),
                    SOURCE_COMMUNITY,
                );
                input.ram_id = ram.map(|r| r.id);
                match self.store().create_benchmark(&input).await? {
                    CreateBenchmark::Created(sample) => (sample, true),
                    CreateBenchmark::AlreadyExists => {
                        tracing::debug!(
                            gpu_id = %key.gpu_id,
                            cpu_id = %key.cpu_id,
                            game_id = %key.game_id,
                            "Lost benchmark creation race, attaching observation"
                        );
                        (self.reread_after_conflict(&key).await?, false)
                    }
                }
            }
        };

        let observation = self
            .store()
            .attach_observation(&NewObservation {
                benchmark_id: benchmark.id,
                submitter_id: present(&submission.user_id)
                    .unwrap_or(ANONYMOUS_SUBMITTER)
                    .to_string(),
                avg_fps: avg,
                min_fps: submission.min_fps,
                max_fps: submission.max_fps,
                notes: present(&submission.notes).map(str::to_string),
                confidence_rating: DEFAULT_CONFIDENCE_RATING,
                hardware_match: true,
            })
            .await?;

        tracing::info!(
            submission_id = observation.id,
            benchmark_id = benchmark.id,
            created_benchmark,
            "FPS submission recorded"
        );

        Ok(SubmissionRecord {
            submission_id: observation.id,
            benchmark_id: benchmark.id,
            created_benchmark,
            message: "FPS submission recorded successfully".to_string(),
        })
    }

    async fn reread_after_conflict(
        &self,
        key: &BenchmarkKey,
    ) -> Result<BenchmarkSample, CoreError> {
        self.store().find_benchmark(key).await?.ok_or_else(|| {
            CoreError::StoreUnavailable(
                "benchmark reported as existing but could not be read back".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::benchmark::{Observation, PerformanceStat};
    use crate::catalog::ComponentKind;
    use crate::estimation::{EstimateRequest, EstimateSource};
    use crate::memory::InMemoryStore;

    type MemoryEngine = FpsEngine<Arc<InMemoryStore>, Arc<InMemoryStore>>;

    fn engine() -> (MemoryEngine, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::reference());
        (FpsEngine::new(Arc::clone(&store), Arc::clone(&store)), store)
    }

    fn submission(avg: f64) -> FpsSubmission {
        FpsSubmission {
            gpu_id: Some("rtx4070ti".into()),
            cpu_id: Some("r7-7700x".into()),
            game_id: Some("hogwarts".into()),
            resolution: Some("1440p".into()),
            settings: Some("Ultra".into()),
            avg_fps: Some(avg),
            ..Default::default()
        }
    }

    // -- validation --

    #[test]
    fn missing_fields_are_listed_in_order() {
        let sub = FpsSubmission {
            cpu_id: Some("r7-7700x".into()),
            settings: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            sub.missing_fields(),
            vec!["gpuId", "gameId", "resolution", "settings", "avgFps"]
        );
    }

    #[test]
    fn non_positive_average_rejected() {
        assert_matches!(submission(0.0).check_values(), Err(CoreError::Validation(_)));
        assert_matches!(submission(-5.0).check_values(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn band_must_contain_average() {
        let mut sub = submission(90.0);
        sub.min_fps = Some(95.0);
        assert_matches!(sub.check_values(), Err(CoreError::Validation(ref m)) if m.contains("minFps"));

        let mut sub = submission(90.0);
        sub.max_fps = Some(80.0);
        assert_matches!(sub.check_values(), Err(CoreError::Validation(ref m)) if m.contains("maxFps"));
    }

    #[test]
    fn overlong_notes_rejected() {
        let mut sub = submission(90.0);
        sub.notes = Some("x".repeat(2001));
        assert_matches!(sub.check_values(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn deserializes_camel_case_body() {
        let sub: FpsSubmission = serde_json::from_value(serde_json::json!({
            "gpuId": "rtx4090",
            "cpuId": "i9-14900k",
            "gameId": "cs2",
            "resolution": "1080p",
            "settings": "Low",
            "avgFps": 420.5,
            "userId": "user_042",
        }))
        .unwrap();
        assert_eq!(sub.avg_fps, Some(420.5));
        assert_eq!(sub.user_id.as_deref(), Some("user_042"));
        assert!(sub.missing_fields().is_empty());
    }

    // -- FpsEngine::submit --

    #[tokio::test]
    async fn missing_fields_fail_before_store_access() {
        let (engine, store) = engine();
        let before = store.benchmark_count().await;
        let err = engine
            .submit(&FpsSubmission {
                avg_fps: Some(60.0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::MissingField { ref fields } if fields.len() == 5);
        assert_eq!(store.benchmark_count().await, before);
    }

    #[tokio::test]
    async fn first_submission_creates_community_benchmark() {
        let (engine, store) = engine();
        let before = store.benchmark_count().await;

        let record = engine.submit(&submission(88.0)).await.unwrap();
        assert!(record.created_benchmark);
        assert_eq!(store.benchmark_count().await, before + 1);

        let key = engine.resolve(ConfigurationRefs {
            gpu_id: "rtx4070ti",
            cpu_id: "r7-7700x",
            game_id: "hogwarts",
            resolution: "1440p",
            settings: "Ultra",
        })
        .await
        .unwrap()
        .key();
        let sample = store.find_benchmark(&key).await.unwrap().unwrap();
        assert_eq!(sample.id, record.benchmark_id);
        assert_eq!(sample.source, SOURCE_COMMUNITY);
        assert_eq!(sample.avg_fps, 88.0);
        assert!((sample.min_fps.unwrap() - 74.8).abs() < 1e-9);
        assert!((sample.max_fps.unwrap() - 101.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn repeat_submission_attaches_observation() {
        let (engine, store) = engine();
        let before = store.benchmark_count().await;

        let first = engine.submit(&submission(88.0)).await.unwrap();
        let mut again = submission(120.0);
        again.user_id = Some("user_007".into());
        again.notes = Some("  new driver  ".into());
        let second = engine.submit(&again).await.unwrap();

        assert!(!second.created_benchmark);
        assert_eq!(second.benchmark_id, first.benchmark_id);
        assert_ne!(second.submission_id, first.submission_id);
        assert_eq!(store.benchmark_count().await, before + 1);

        let observations = store.observations_for(first.benchmark_id).await;
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].submitter_id, ANONYMOUS_SUBMITTER);
        assert_eq!(observations[1].submitter_id, "user_007");
        assert_eq!(observations[1].notes.as_deref(), Some("new driver"));
        assert_eq!(observations[1].confidence_rating, DEFAULT_CONFIDENCE_RATING);
    }

    #[tokio::test]
    async fn observations_do_not_revise_canonical_values() {
        let (engine, _store) = engine();
        engine.submit(&submission(88.0)).await.unwrap();
        engine.submit(&submission(150.0)).await.unwrap();

        let result = engine
            .estimate(&EstimateRequest {
                gpu_id: "rtx4070ti".into(),
                cpu_id: "r7-7700x".into(),
                game_id: "hogwarts".into(),
                resolution: "1440p".into(),
                settings: "ultra".into(),
            })
            .await
            .unwrap();
        assert_eq!(result.source, EstimateSource::Database);
        assert_eq!(result.avg_fps, 88.0);
    }

    #[tokio::test]
    async fn submission_for_seeded_benchmark_keeps_original() {
        let (engine, store) = engine();
        let before = store.benchmark_count().await;
        let record = engine
            .submit(&FpsSubmission {
                gpu_id: Some("rtx4090".into()),
                cpu_id: Some("i9-14900k".into()),
                game_id: Some("cyberpunk2077".into()),
                resolution: Some("4K".into()),
                settings: Some("Ultra".into()),
                avg_fps: Some(79.2),
                min_fps: Some(66.8),
                max_fps: Some(96.5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!record.created_benchmark);
        assert_eq!(store.benchmark_count().await, before);
    }

    #[tokio::test]
    async fn unknown_references_rejected() {
        let (engine, _store) = engine();
        let mut sub = submission(60.0);
        sub.game_id = Some("halflife3".into());
        sub.ram_id = Some("ddr6-9000-64gb".into());
        let err = engine.submit(&sub).await.unwrap_err();
        assert_matches!(err, CoreError::InvalidConfiguration { ref unresolved } => {
            let fields: Vec<_> = unresolved.iter().map(|r| r.field).collect();
            assert_eq!(fields, vec!["gameId", "ramId"]);
        });
    }

    #[tokio::test]
    async fn known_ram_is_recorded_on_new_benchmark() {
        let (engine, _store) = engine();
        let mut sub = submission(60.0);
        sub.ram_id = Some("ddr5-6000-32gb".into());
        let record = engine.submit(&sub).await.unwrap();
        let details = engine
            .component_details(ComponentKind::Game, "hogwarts")
            .await
            .unwrap();
        let sample = details
            .recent_benchmarks
            .iter()
            .find(|b| b.id == record.benchmark_id)
            .unwrap();
        assert_eq!(sample.ram_id.as_deref(), Some("ddr5-6000-32gb"));
    }

    /// Store wrapper that hides existing rows from the first lookup, as a
    /// concurrent writer winning the insert race would.
    struct RacingStore {
        inner: Arc<InMemoryStore>,
        hidden_once: tokio::sync::Mutex<bool>,
    }

    #[async_trait]
    impl BenchmarkStore for RacingStore {
        async fn find_benchmark(
            &self,
            key: &BenchmarkKey,
        ) -> Result<Option<BenchmarkSample>, CoreError> {
            let mut hidden = self.hidden_once.lock().await;
            if !*hidden {
                *hidden = true;
                return Ok(None);
            }
            self.inner.find_benchmark(key).await
        }

        async fn create_benchmark(&self, input: &NewBenchmark) -> Result<CreateBenchmark, CoreError> {
            self.inner.create_benchmark(input).await
        }

        async fn attach_observation(&self, input: &NewObservation) -> Result<Observation, CoreError> {
            self.inner.attach_observation(input).await
        }

        async fn recent_benchmarks(
            &self,
            kind: ComponentKind,
            id: &str,
            limit: i64,
        ) -> Result<Vec<BenchmarkSample>, CoreError> {
            self.inner.recent_benchmarks(kind, id, limit).await
        }

        async fn performance_stats(&self) -> Result<Vec<PerformanceStat>, CoreError> {
            self.inner.performance_stats().await
        }
    }

    #[tokio::test]
    async fn losing_creation_race_falls_back_to_observation() {
        let inner = Arc::new(InMemoryStore::reference());
        let before = inner.benchmark_count().await;
        let racing = RacingStore {
            inner: Arc::clone(&inner),
            hidden_once: tokio::sync::Mutex::new(false),
        };
        let engine = FpsEngine::new(Arc::clone(&inner), racing);

        // The seeded 4090 row exists, but the first lookup misses it.
        let record = engine
            .submit(&FpsSubmission {
                gpu_id: Some("rtx4090".into()),
                cpu_id: Some("i9-14900k".into()),
                game_id: Some("cyberpunk2077".into()),
                resolution: Some("4K".into()),
                settings: Some("Ultra".into()),
                avg_fps: Some(80.0),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!record.created_benchmark);
        assert_eq!(inner.benchmark_count().await, before);
        // The seeded user_001 observation plus this one.
        assert_eq!(inner.observations_for(record.benchmark_id).await.len(), 2);
    }
}
