use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};
use energy_core::ModuleRegistry;
use energy_core::model::{ModuleId, ProgressState, SessionKey};
use energy_core::time::fixed_now;
use services::{
    AssemblyError, AssemblyService, Clock, Feedback, ProgressService, ProgressServiceError,
};
use storage::repository::{InMemoryRepository, ProgressRepository, StorageError};

/// Wraps the in-memory store and counts writes.
#[derive(Default)]
struct CountingRepository {
    inner: InMemoryRepository,
    saves: AtomicUsize,
}

#[async_trait::async_trait]
impl ProgressRepository for CountingRepository {
    async fn load(&self, key: &SessionKey) -> Result<ProgressState, StorageError> {
        self.inner.load(key).await
    }

    async fn save(
        &self,
        key: &SessionKey,
        state: &ProgressState,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(key, state, saved_at).await
    }

    async fn purge_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        self.inner.purge_stale(cutoff).await
    }
}

fn setup() -> (AssemblyService, ProgressService, Arc<CountingRepository>) {
    let registry = Arc::new(ModuleRegistry::builtin().unwrap());
    let repo = Arc::new(CountingRepository::default());
    let clock = Clock::fixed(fixed_now());
    let assembly = AssemblyService::new(clock, Arc::clone(&registry), repo.clone());
    let progress = ProgressService::new(clock, registry, repo.clone());
    (assembly, progress, repo)
}

fn session(raw: &str) -> SessionKey {
    SessionKey::new(raw).unwrap()
}

fn reference(assembly: &AssemblyService, id: ModuleId) -> Vec<String> {
    assembly.registry().module(id).reference_order().to_vec()
}

#[tokio::test]
async fn wrong_order_is_not_saved_and_shows_hint() {
    let (assembly, progress, repo) = setup();
    let mut candidate = reference(&assembly, ModuleId::Solar);
    candidate.swap(0, 2);

    let result = assembly
        .submit(&session("s1"), "solar", &candidate)
        .await
        .unwrap();

    assert!(!result.correct);
    assert!(!result.newly_completed);
    assert_eq!(result.progress.score(ModuleId::Solar), 0);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    match result.feedback {
        Feedback::Incorrect { submitted, hint } => {
            assert!(submitted.starts_with("PN Junction (Silicon Cell) → Front Contact Grid"));
            assert_eq!(hint.flow, assembly.hint("solar").unwrap().flow);
        }
        other => panic!("expected incorrect feedback, got {other:?}"),
    }

    let overview = progress.overview(&session("s1")).await.unwrap();
    assert_eq!(overview.total_score, 0);
}

#[tokio::test]
async fn correct_order_is_saved_once() {
    let (assembly, progress, repo) = setup();
    let wind = reference(&assembly, ModuleId::Wind);

    let first = assembly.submit(&session("s1"), "wind", &wind).await.unwrap();
    assert!(first.correct);
    assert!(first.newly_completed);
    assert_eq!(first.progress.total_score(), 100);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    match &first.feedback {
        Feedback::Correct { steps, all_mastered } => {
            assert_eq!(steps.len(), 8);
            assert_eq!(steps[1].component, "Hub & Pitch System");
            assert!(!all_mastered);
        }
        other => panic!("expected correct feedback, got {other:?}"),
    }

    let again = assembly.submit(&session("s1"), "wind", &wind).await.unwrap();
    assert!(again.correct);
    assert!(!again.newly_completed);
    assert_eq!(again.progress.score(ModuleId::Wind), 100);
    assert_eq!(again.progress.total_score(), 100);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);

    let other = progress.overview(&session("s2")).await.unwrap();
    assert_eq!(other.total_score, 0);
}

#[tokio::test]
async fn completing_every_module_reports_mastery() {
    let (assembly, progress, _repo) = setup();
    let key = session("finisher");
    let mut last = None;
    for id in [ModuleId::Hydro, ModuleId::Biomass, ModuleId::Solar, ModuleId::Wind] {
        let order = reference(&assembly, id);
        last = Some(assembly.submit(&key, id.as_str(), &order).await.unwrap());
    }

    let last = last.unwrap();
    assert_eq!(last.progress.total_score(), 400);
    assert!(matches!(
        last.feedback,
        Feedback::Correct {
            all_mastered: true,
            ..
        }
    ));

    let overview = progress.overview(&key).await.unwrap();
    assert_eq!(overview.total_score, 400);
    assert_eq!(overview.completed_count, 4);
    assert_eq!(overview.completion_rate, 100);
}

#[tokio::test]
async fn unknown_module_is_reported() {
    let (assembly, _progress, _repo) = setup();
    let err = assembly
        .submit(&session("s1"), "geothermal", &["Well"])
        .await
        .unwrap_err();
    assert!(matches!(err, AssemblyError::UnknownModule(ref id) if id == "geothermal"));
    assert!(matches!(
        assembly.hint("tidal"),
        Err(AssemblyError::UnknownModule(_))
    ));
}

#[tokio::test]
async fn purge_expired_uses_clock_cutoff() {
    let (assembly, progress, repo) = setup();
    let stale = session("stale");
    let mut state = ProgressState::new();
    let solar = reference(&assembly, ModuleId::Solar);
    state = energy_core::submit_order(
        assembly.registry().module(ModuleId::Solar),
        &solar,
        state,
    )
    .state;
    repo.save(&stale, &state, fixed_now() - Duration::days(31))
        .await
        .unwrap();
    assembly
        .submit(&session("active"), "solar", &solar)
        .await
        .unwrap();

    let removed = progress.purge_expired(Duration::days(30)).await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(progress.overview(&stale).await.unwrap().total_score, 0);
    assert_eq!(
        progress.overview(&session("active")).await.unwrap().total_score,
        100
    );
}

#[tokio::test]
async fn purge_with_oversized_ttl_is_an_error() {
    let (assembly, progress, _repo) = setup();
    let solar = reference(&assembly, ModuleId::Solar);
    assembly
        .submit(&session("kept"), "solar", &solar)
        .await
        .unwrap();

    let err = progress
        .purge_expired(Duration::days(200_000_000))
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressServiceError::TtlOutOfRange(_)));
    assert_eq!(
        progress.overview(&session("kept")).await.unwrap().total_score,
        100
    );
}
