use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::{
    sync::mpsc,
    time::{interval, sleep},
};

use crate::domain::weather::{GeocodeResolution, Location, WeatherBundle};

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickRefresh,
    Input(Event),
    FetchStarted,
    GeocodeResolved(GeocodeResolution),
    FetchSucceeded(WeatherBundle),
    FetchFailed(String),
    /// Debounce timer fired for `query`; the request is now in flight.
    SearchStarted(String),
    SearchCompleted {
        query: String,
        results: Vec<Location>,
    },
    SearchFailed {
        query: String,
        error: String,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_frame_task(tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut ticker = interval(FRAME_INTERVAL);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

pub fn start_refresh_task(tx: mpsc::Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        loop {
            sleep(jittered_refresh_delay(refresh_secs)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

pub fn schedule_retry(tx: mpsc::Sender<AppEvent>, delay_secs: u64) {
    tokio::spawn(async move {
        sleep(Duration::from_secs(delay_secs.max(1))).await;
        let _ = tx.send(AppEvent::TickRefresh).await;
    });
}

/// Refresh period with +/-10% jitter, never below ten seconds of base.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn jittered_refresh_delay(refresh_secs: u64) -> Duration {
    let base = refresh_secs.max(10) as f32;
    let jitter = rand::rng().random_range(-0.1f32..0.1f32);
    Duration::from_secs_f32((base * (1.0 + jitter)).max(1.0))
}
