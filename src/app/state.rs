use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, Utc};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, CLOCK_TICK, schedule_retry, start_clock_task, start_refresh_task},
        settings::{Preferences, save_preferences},
    },
    cli::Cli,
    data::{geoip, nws::NwsClient},
    domain::{
        chart::ChartOrientation,
        forecast::{DaySummary, bucket_days},
        sun::{ClockTime, SunTimes, compute_sun_times, day_progress},
        weather::{Dashboard, Location},
    },
    resilience::{backoff::Backoff, freshness::RefreshMetadata},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub last_error: Option<String>,
    pub location: Option<Location>,
    pub dashboard: Option<Dashboard>,
    pub refresh_meta: RefreshMetadata,
    pub orientation: ChartOrientation,
    pub alerts_expanded: bool,
    pub backoff: Backoff,
    pub fetch_in_flight: bool,
    /// Wall clock as of the last tick; everything time-of-day reads this.
    pub now: DateTime<Utc>,
    preferences_path: Option<PathBuf>,
    client: NwsClient,
}

impl AppState {
    pub fn new(
        cli: &Cli,
        orientation: ChartOrientation,
        preferences_path: Option<PathBuf>,
    ) -> Result<Self> {
        let client = NwsClient::with_base_url(cli.api_url.clone())?;
        Ok(Self {
            mode: AppMode::Loading,
            running: true,
            loading_message: "Initializing...".to_string(),
            last_error: None,
            location: cli
                .coordinates()
                .map(|(lat, lon)| Location::from_coords(lat, lon)),
            dashboard: None,
            refresh_meta: RefreshMetadata::default(),
            orientation,
            alerts_expanded: false,
            backoff: Backoff::default(),
            fetch_in_flight: false,
            now: Utc::now(),
            preferences_path,
            client,
        })
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                start_clock_task(tx.clone(), CLOCK_TICK);
                start_refresh_task(tx.clone(), cli.refresh_interval);
                self.start_fetch(tx).await?;
            }
            AppEvent::TickClock => {
                self.now = Utc::now();
                self.refresh_meta.reevaluate(self.now);
            }
            AppEvent::TickRefresh => {
                if self.mode != AppMode::Quit {
                    self.start_fetch(tx).await?;
                }
            }
            AppEvent::Input(event) => self.handle_input(&event, tx).await?,
            AppEvent::FetchStarted => {
                self.fetch_in_flight = true;
                self.loading_message = "Fetching weather...".to_string();
                if self.dashboard.is_none() {
                    self.mode = AppMode::Loading;
                }
                self.refresh_meta.mark_attempt(Utc::now());
            }
            AppEvent::LocationResolved(Some(location)) => {
                log::info!("located at {}", location.display_name());
                self.location = Some(location.clone());
                self.fetch_dashboard(tx, location);
            }
            AppEvent::LocationResolved(None) => {
                self.handle_failure(
                    tx,
                    "Unable to determine your location. Pass --lat and --lon.".to_string(),
                );
            }
            AppEvent::FetchSucceeded(dashboard) => {
                self.fetch_in_flight = false;
                self.now = Utc::now();
                self.location = Some(dashboard.location.clone());
                self.dashboard = Some(*dashboard);
                self.mode = AppMode::Ready;
                self.last_error = None;
                self.refresh_meta.mark_success(self.now);
                self.backoff.reset();
            }
            AppEvent::FetchFailed(err) => self.handle_failure(tx, err),
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    fn handle_failure(&mut self, tx: &mpsc::Sender<AppEvent>, err: String) {
        log::warn!("fetch failed: {err}");
        self.fetch_in_flight = false;
        self.last_error = Some(err);
        self.mode = AppMode::Error;
        self.refresh_meta.mark_failure(Utc::now());
        schedule_retry(tx.clone(), self.backoff.next_delay());
    }

    async fn handle_input(&mut self, event: &Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    tx.send(AppEvent::Quit).await?;
                }
                KeyCode::Char('r') => {
                    self.start_fetch(tx).await?;
                }
                KeyCode::Char('o') => self.toggle_orientation(),
                KeyCode::Char('d') => {
                    self.alerts_expanded = !self.alerts_expanded;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Flips the weekly chart and remembers the choice. A failed write is
    /// logged; the toggle still applies for this session.
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.toggled();
        if let Some(path) = &self.preferences_path {
            let preferences = Preferences {
                chart_orientation: self.orientation,
            };
            if let Err(err) = save_preferences(path, &preferences) {
                log::error!("saving preferences failed: {err:#}");
            }
        }
    }

    async fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if self.fetch_in_flight {
            return Ok(());
        }
        tx.send(AppEvent::FetchStarted).await?;
        // Mark now so a second trigger before FetchStarted is handled is ignored.
        self.fetch_in_flight = true;

        if let Some(location) = self.location.clone() {
            self.fetch_dashboard(tx, location);
            return Ok(());
        }

        self.loading_message = "Detecting location...".to_string();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let location = geoip::detect_location().await;
            let _ = tx2.send(AppEvent::LocationResolved(location)).await;
        });
        Ok(())
    }

    fn fetch_dashboard(&self, tx: &mpsc::Sender<AppEvent>, location: Location) {
        log::info!(
            "fetching forecast for {:.4},{:.4}",
            location.latitude,
            location.longitude
        );
        let client = self.client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            match client.fetch_dashboard(location).await {
                Ok(data) => {
                    let _ = tx2.send(AppEvent::FetchSucceeded(Box::new(data))).await;
                }
                Err(err) => {
                    let _ = tx2.send(AppEvent::FetchFailed(err.to_string())).await;
                }
            }
        });
    }

    /// Current time in the forecast location's offset when known, otherwise
    /// in the machine's local offset.
    #[must_use]
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.dashboard
            .as_ref()
            .and_then(Dashboard::local_offset)
            .map_or_else(
                || self.now.with_timezone(&Local).fixed_offset(),
                |offset| self.now.with_timezone(&offset),
            )
    }

    #[must_use]
    pub fn sun_times(&self) -> Option<SunTimes> {
        let location = self.location.as_ref()?;
        Some(compute_sun_times(
            location.latitude,
            location.longitude,
            &self.local_now(),
        ))
    }

    #[must_use]
    pub fn sun_progress(&self) -> Option<f64> {
        let sun = self.sun_times()?;
        let (sunrise, sunset) = (sun.sunrise()?, sun.sunset()?);
        Some(day_progress(
            Some(sunrise),
            Some(sunset),
            ClockTime::of(&self.local_now()),
        ))
    }

    #[must_use]
    pub fn days(&self) -> Vec<DaySummary> {
        self.dashboard
            .as_ref()
            .map(|d| bucket_days(&d.forecast))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn preferences_path(&self) -> Option<&PathBuf> {
        self.preferences_path.as_ref()
    }
}

#[cfg(test)]
mod tests;
