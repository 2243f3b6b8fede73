use crossterm::event::{KeyEvent, KeyModifiers};

use super::*;
use crate::{
    app::settings::load_preferences,
    domain::sun::SunTimes,
    resilience::freshness::FreshnessState,
    test_support::{fixture_dashboard, test_cli},
};

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn state_with(path: Option<PathBuf>) -> AppState {
    AppState::new(&test_cli(), ChartOrientation::Horizontal, path).expect("state")
}

#[tokio::test]
async fn cli_coordinates_seed_the_location() {
    let state = state_with(None);
    let location = state.location.expect("location from cli");
    assert_eq!((location.latitude, location.longitude), (40.7128, -74.006));
    assert_eq!(state.mode, AppMode::Loading);
}

#[tokio::test]
async fn fetch_success_moves_to_ready_and_resets_backoff() {
    let (tx, _rx) = mpsc::channel(16);
    let cli = test_cli();
    let mut state = state_with(None);
    state.backoff.next_delay();
    state.fetch_in_flight = true;

    state
        .handle_event(AppEvent::FetchSucceeded(Box::new(fixture_dashboard())), &tx, &cli)
        .await
        .expect("handle success");

    assert_eq!(state.mode, AppMode::Ready);
    assert!(!state.fetch_in_flight);
    assert_eq!(state.refresh_meta.state, FreshnessState::Fresh);
    assert_eq!(
        state.backoff.next_delay(),
        Backoff::default().next_delay()
    );
    assert_eq!(
        state.location.as_ref().map(Location::display_name).as_deref(),
        Some("New York, NY")
    );
    assert_eq!(state.days().len(), 7);
}

#[tokio::test]
async fn fetch_failure_records_error_and_schedules_retry() {
    tokio::time::pause();
    let (tx, mut rx) = mpsc::channel(16);
    let cli = test_cli();
    let mut state = state_with(None);

    state
        .handle_event(AppEvent::FetchFailed("API error 500".to_string()), &tx, &cli)
        .await
        .expect("handle failure");

    assert_eq!(state.mode, AppMode::Error);
    assert_eq!(state.last_error.as_deref(), Some("API error 500"));
    assert_eq!(state.refresh_meta.consecutive_failures, 1);

    let retry = rx.recv().await.expect("retry tick");
    assert!(matches!(retry, AppEvent::TickRefresh));
}

#[tokio::test]
async fn unresolved_location_is_an_error() {
    tokio::time::pause();
    let (tx, _rx) = mpsc::channel(16);
    let cli = test_cli();
    let mut state = state_with(None);

    state
        .handle_event(AppEvent::LocationResolved(None), &tx, &cli)
        .await
        .expect("handle");
    assert_eq!(state.mode, AppMode::Error);
    assert!(state.last_error.as_deref().is_some_and(|e| e.contains("--lat")));
}

#[tokio::test]
async fn orientation_key_toggles_and_persists() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    let (tx, _rx) = mpsc::channel(16);
    let cli = test_cli();
    let mut state = state_with(Some(path.clone()));

    state
        .handle_event(key(KeyCode::Char('o')), &tx, &cli)
        .await
        .expect("toggle");
    assert_eq!(state.orientation, ChartOrientation::Vertical);
    assert_eq!(
        load_preferences(Some(&path)).chart_orientation,
        ChartOrientation::Vertical
    );

    state
        .handle_event(key(KeyCode::Char('o')), &tx, &cli)
        .await
        .expect("toggle back");
    assert_eq!(
        load_preferences(Some(&path)).chart_orientation,
        ChartOrientation::Horizontal
    );
}

#[tokio::test]
async fn detail_key_toggles_alert_descriptions() {
    let (tx, _rx) = mpsc::channel(16);
    let cli = test_cli();
    let mut state = state_with(None);
    assert!(!state.alerts_expanded);
    state
        .handle_event(key(KeyCode::Char('d')), &tx, &cli)
        .await
        .expect("toggle");
    assert!(state.alerts_expanded);
}

#[tokio::test]
async fn quit_keys_send_quit() {
    let (tx, mut rx) = mpsc::channel(16);
    let cli = test_cli();
    let mut state = state_with(None);
    state
        .handle_event(key(KeyCode::Char('q')), &tx, &cli)
        .await
        .expect("quit key");
    let event = rx.recv().await.expect("quit event");
    assert!(matches!(event, AppEvent::Quit));

    state.handle_event(event, &tx, &cli).await.expect("quit");
    assert_eq!(state.mode, AppMode::Quit);
}

#[tokio::test]
async fn refresh_is_ignored_while_a_fetch_is_in_flight() {
    let (tx, mut rx) = mpsc::channel(16);
    let cli = test_cli();
    let mut state = state_with(None);
    state.fetch_in_flight = true;

    state
        .handle_event(key(KeyCode::Char('r')), &tx, &cli)
        .await
        .expect("refresh");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn sun_times_follow_the_forecast_offset() {
    let mut state = state_with(None);
    state.dashboard = Some(fixture_dashboard());
    state.now = "2024-06-21T16:00:00Z".parse().expect("utc time");

    assert_eq!(state.local_now().offset().local_minus_utc(), -4 * 3600);
    let sun = state.sun_times().expect("sun times");
    let SunTimes::Crossing { sunrise, sunset } = sun else {
        panic!("expected a crossing, got {sun:?}");
    };
    assert_eq!(sunrise.hour, 5);
    assert_eq!(sunset.hour, 20);

    let progress = state.sun_progress().expect("progress");
    assert!(progress > 0.3 && progress < 0.5, "{progress}");
}
