use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::{
    sync::mpsc::Sender,
    time::{interval, sleep},
};

use crate::domain::weather::{Dashboard, Location};

/// How often the clock-driven parts (sun position, palette) re-evaluate.
pub const CLOCK_TICK: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickRefresh,
    TickClock,
    Input(Event),
    FetchStarted,
    LocationResolved(Option<Location>),
    FetchSucceeded(Box<Dashboard>),
    FetchFailed(String),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_clock_task(tx: Sender<AppEvent>, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickClock).await.is_err() {
                break;
            }
        }
    });
}

/// Refresh delay with up to ±10% jitter so many clients do not align.
#[must_use]
pub fn jittered(base: Duration) -> Duration {
    let jitter = rand::rng().random_range(-0.1f64..0.1f64);
    Duration::from_secs_f64((base.as_secs_f64() * (1.0 + jitter)).max(1.0))
}

pub fn start_refresh_task(tx: Sender<AppEvent>, refresh_secs: u64) {
    let base = Duration::from_secs(refresh_secs.max(10));
    tokio::spawn(async move {
        loop {
            sleep(jittered(base)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

pub fn schedule_retry(tx: Sender<AppEvent>, delay: Duration) {
    log::info!("retrying in {}s", delay.as_secs());
    tokio::spawn(async move {
        sleep(delay.max(Duration::from_secs(1))).await;
        let _ = tx.send(AppEvent::TickRefresh).await;
    });
}
