use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lru::LruCache;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app::{
        debounce::Debouncer,
        events::{AppEvent, schedule_retry, start_frame_task, start_refresh_task},
        settings::{
            LocationPermission, RuntimeSettings, load_runtime_settings, save_runtime_settings,
        },
    },
    cli::Cli,
    data::{
        geocode::{GeocodeClient, is_searchable},
        geoip::{IpLocationProvider, locate},
        weather::WeatherClient,
    },
    domain::weather::{GeocodeResolution, Location, RefreshMetadata, Units, WeatherBundle},
    resilience::{backoff::Backoff, freshness::evaluate_freshness},
};

mod input;
mod methods_async;
mod methods_fetch;
mod methods_search;

pub const PERMISSION_REQUIRED_MESSAGE: &str =
    "Location permission is required to get weather data.";

const SEARCH_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Onboarding,
    Loading,
    SelectingLocation,
    Ready,
    Error,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingSlide {
    pub title: &'static str,
    pub body: &'static str,
}

pub static ONBOARDING_SLIDES: [OnboardingSlide; 3] = [
    OnboardingSlide {
        title: "Welcome to ABWeather",
        body: "Get accurate weather forecasts for your location and plan your day accordingly.",
    },
    OnboardingSlide {
        title: "Real-time Updates",
        body: "Receive real-time weather updates and stay prepared for what's coming.",
    },
    OnboardingSlide {
        title: "Plan Your Week",
        body: "View the 5-day forecast and plan your activities with confidence.",
    },
];

/// City search sheet. `selected == results.len()` points at the
/// "Use Current Location" row.
#[derive(Debug, Default)]
pub struct SearchSheet {
    pub open: bool,
    pub query: String,
    pub results: Vec<Location>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    /// Query whose results are currently wanted; anything else is stale.
    pub active_query: Option<String>,
}

impl SearchSheet {
    #[must_use]
    pub fn current_location_selected(&self) -> bool {
        self.selected >= self.results.len()
    }
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub last_error: Option<String>,
    pub selected_location: Option<Location>,
    pub pending_locations: Vec<Location>,
    pub weather: Option<WeatherBundle>,
    pub refresh_meta: RefreshMetadata,
    pub refresh_interval_secs: u64,
    pub backoff: Backoff,
    pub fetch_in_flight: bool,
    pub frame_tick: u64,
    pub forecast_scroll: usize,
    pub help_open: bool,
    pub permission_prompt_open: bool,
    pub onboarding_slide: usize,
    pub search: SearchSheet,
    pub search_cache: LruCache<String, Vec<Location>>,
    pub search_debouncer: Debouncer,
    pub settings: RuntimeSettings,
    pub settings_path: Option<PathBuf>,
    pub(crate) weather_client: WeatherClient,
    pub(crate) geocoder: GeocodeClient,
    pub(crate) locator: IpLocationProvider,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let (settings, settings_path) = load_runtime_settings(cli, !cfg!(test));
        Self::with_settings(cli, settings, settings_path)
    }

    pub fn with_settings(
        cli: &Cli,
        settings: RuntimeSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            mode: AppMode::Loading,
            running: true,
            loading_message: "Initializing...".to_string(),
            last_error: None,
            selected_location: None,
            pending_locations: Vec::new(),
            weather: None,
            refresh_meta: RefreshMetadata::default(),
            refresh_interval_secs: cli.refresh_interval,
            backoff: Backoff::for_weather_fetch(),
            fetch_in_flight: false,
            frame_tick: 0,
            forecast_scroll: 0,
            help_open: false,
            permission_prompt_open: false,
            onboarding_slide: 0,
            search: SearchSheet::default(),
            search_cache: LruCache::new(
                NonZeroUsize::new(SEARCH_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
            search_debouncer: Debouncer::new(Duration::from_millis(cli.search_debounce_ms)),
            settings,
            settings_path,
            weather_client: WeatherClient::from_cli(cli),
            geocoder: GeocodeClient::from_cli(cli),
            locator: IpLocationProvider::from_cli(cli),
        }
    }

    #[must_use]
    pub fn units(&self) -> Units {
        self.settings.units
    }

    pub(crate) fn set_units(&mut self, units: Units) {
        if self.settings.units != units {
            self.settings.units = units;
            self.persist_settings();
        }
    }

    pub(crate) fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        match save_runtime_settings(path, &self.settings) {
            Ok(()) => debug!(path = %path.display(), "settings saved"),
            Err(err) => warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "settings not saved"
            ),
        }
    }

    #[must_use]
    pub fn onboarding(&self) -> Option<&'static OnboardingSlide> {
        (self.mode == AppMode::Onboarding)
            .then(|| ONBOARDING_SLIDES.get(self.onboarding_slide))
            .flatten()
    }

    #[must_use]
    pub fn spinner_frame(&self) -> char {
        const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
        FRAMES[usize::try_from(self.frame_tick % 4).unwrap_or(0)]
    }

    /// Highest useful forecast scroll offset.
    #[must_use]
    pub fn max_forecast_scroll(&self) -> usize {
        self.weather
            .as_ref()
            .map_or(0, |bundle| bundle.daily.len().saturating_sub(1))
    }
}
