//! End-to-end: onboarding → routine session → dashboard, over a libSQL file.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use skincare_mentor::clock::{Clock, FixedClock};
use skincare_mentor::config::AppConfig;
use skincare_mentor::dashboard::{Dashboard, ProfileSummary};
use skincare_mentor::diary::{Diary, DiaryEntry};
use skincare_mentor::onboarding::{OnboardingFlow, OnboardingStage, reset_onboarding};
use skincare_mentor::profile::{SkinConcern, SkinType};
use skincare_mentor::routine::{MASK_TIMER_SECS, ProductType, RoutineSession, TimeOfDay};
use skincare_mentor::store::{LibSqlStore, SkinStore};

async fn open(path: &std::path::Path) -> SkinStore {
    SkinStore::new(Arc::new(LibSqlStore::new_local(path).await.unwrap()))
}

#[tokio::test]
async fn onboarding_through_evening_routine() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("skincare.db");
    let store = open(&db_path).await;
    let evening = Utc.with_ymd_and_hms(2025, 11, 21, 20, 0, 0).unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(evening));
    let config = AppConfig {
        db_path: db_path.clone(),
        ..AppConfig::default()
    };

    // ── Onboarding ──────────────────────────────────────────────────
    assert!(!store.is_onboarding_complete().await.unwrap());
    let mut flow = OnboardingFlow::new(store.clone(), Arc::clone(&clock));
    flow.advance();
    for answer in [2, 3, 3, 2, 3, 2, 1] {
        assert!(flow.record_answer(answer));
        flow.advance();
    }
    assert_eq!(flow.stage(), OnboardingStage::ConcernSelection);
    assert_eq!(flow.skin_type(), Some(SkinType::Oily));

    flow.toggle_concern(SkinConcern::Acne);
    flow.set_allergies("fragrance");
    let outcome = flow.finalize().await.unwrap();
    assert_eq!(outcome.routines.len(), 2);
    assert!(store.is_onboarding_complete().await.unwrap());

    // ── Dashboard picks tonight's routine ───────────────────────────
    let dashboard = Dashboard::load(&store, clock.as_ref(), &config).await.unwrap();
    let routine = dashboard.current_routine.clone().unwrap();
    assert_eq!(routine.time_of_day, TimeOfDay::Evening);
    assert_eq!(dashboard.routine_progress(), 0.0);

    let products: Vec<ProductType> = routine.steps.iter().map(|s| s.product_type).collect();
    assert_eq!(
        products,
        vec![
            ProductType::Cleanser,
            ProductType::Toner,
            ProductType::Treatment,
            ProductType::Moisturizer,
            ProductType::Mask,
        ]
    );

    // ── Session ─────────────────────────────────────────────────────
    let mut session = RoutineSession::new(routine.clone(), store.clone(), Duration::from_secs(1));
    let cleanser = routine.steps[0].id;
    let mask = routine.steps[4].id;

    assert!(session.toggle_step_completion(cleanser).await.unwrap());
    assert!(session.start_timer(mask).await);
    assert!(session.is_running().await);
    assert!(session.seconds_remaining().await <= MASK_TIMER_SECS);
    session.stop_timer().await;
    assert!(!session.is_running().await);

    let dashboard = Dashboard::load(&store, clock.as_ref(), &config).await.unwrap();
    assert_eq!(dashboard.routine_progress(), 0.2);

    session.complete_routine().await.unwrap();
    session.close().await;

    let dashboard = Dashboard::load(&store, clock.as_ref(), &config).await.unwrap();
    assert!(!dashboard.has_active_routine());

    // ── Diary ───────────────────────────────────────────────────────
    let mut diary = Diary::load(store.clone(), config.utc_offset).await.unwrap();
    let mut entry = DiaryEntry::new(evening).with_condition(4);
    entry.completed_routines.push(routine.id);
    diary.save_entry(entry).await.unwrap();

    // ── Everything survives a reopen ────────────────────────────────
    drop(store);
    let reopened = open(&db_path).await;
    let summary = ProfileSummary::load(&reopened).await.unwrap();
    let profile = summary.profile.unwrap();
    assert_eq!(profile.skin_type, Some(SkinType::Oily));
    assert_eq!(profile.allergies, vec!["fragrance"]);
    assert_eq!(summary.completed_routines, 1);
    assert_eq!(summary.total_diary_entries, 1);
    assert_eq!(summary.average_condition, 4.0);
}

#[tokio::test]
async fn rerunning_onboarding_appends_a_new_pair() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("skincare.db")).await;
    let morning = Utc.with_ymd_and_hms(2025, 11, 21, 8, 0, 0).unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(morning));

    for answers in [[0, 1, 0, 1, 0, 1, 0], [2, 3, 2, 3, 2, 3, 2]] {
        let mut flow = OnboardingFlow::new(store.clone(), Arc::clone(&clock));
        flow.advance();
        for answer in answers {
            flow.record_answer(answer);
            flow.advance();
        }
        flow.finalize().await.unwrap();
        reset_onboarding(&store).await.unwrap();
    }

    let routines = store.load_routines().await.unwrap();
    assert_eq!(routines.len(), 4);
    assert_eq!(
        store.load_profile().await.unwrap().unwrap().skin_type,
        Some(SkinType::Oily)
    );
    assert!(!store.is_onboarding_complete().await.unwrap());
}
