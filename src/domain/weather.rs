use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resilience::freshness::FreshnessState;

mod conditions;
mod conversions;

pub use conditions::*;
pub use conversions::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            country: None,
            state: None,
            latitude: lat,
            longitude: lon,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }

    /// Search-result label; includes the state when the provider reports one.
    #[must_use]
    pub fn detail_name(&self) -> String {
        match (&self.state, &self.country) {
            (Some(state), Some(country)) => format!("{state}, {country}"),
            (None, Some(country)) => country.clone(),
            (Some(state), None) => state.clone(),
            (None, None) => format!("{:.2}, {:.2}", self.latitude, self.longitude),
        }
    }

    #[must_use]
    pub fn same_place(&self, other: &Location) -> bool {
        const COORD_EPSILON: f64 = 0.01;
        self.name.to_lowercase() == other.name.to_lowercase()
            && self.country == other.country
            && (self.latitude - other.latitude).abs() < COORD_EPSILON
            && (self.longitude - other.longitude).abs() < COORD_EPSILON
    }
}

/// One 3-hour entry of the forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Unix timestamp, seconds.
    pub dt: i64,
    pub main: SampleMain,
    #[serde(default)]
    pub weather: Vec<SampleCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleMain {
    pub temp: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCondition {
    pub description: String,
    pub icon: String,
}

impl ForecastSample {
    #[must_use]
    pub fn condition(&self) -> Option<&SampleCondition> {
        self.weather.first()
    }

    #[must_use]
    pub fn temp(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.main.temp, units))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature_c: f32,
    pub feels_like_c: f32,
    pub humidity: u8,
    pub wind_speed_ms: f32,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub location: Location,
    pub current: CurrentWeather,
    /// Already reduced to one representative per upcoming day.
    pub daily: Vec<ForecastSample>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherBundle {
    #[must_use]
    pub fn current_category(&self) -> WeatherCategory {
        category_for_icon(&self.current.icon)
    }

    #[must_use]
    pub fn is_day(&self) -> bool {
        !is_night_icon(&self.current.icon)
    }

    #[must_use]
    pub fn current_temp(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.current.temperature_c, units))
    }

    #[must_use]
    pub fn feels_like(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.current.feels_like_c, units))
    }
}

#[derive(Debug, Clone)]
pub enum GeocodeResolution {
    Selected(Location),
    NeedsDisambiguation(Vec<Location>),
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct RefreshMetadata {
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub state: FreshnessState,
    pub consecutive_failures: u32,
    pub next_retry_at: Option<DateTime<Utc>>,
}

impl Default for RefreshMetadata {
    fn default() -> Self {
        Self {
            last_success: None,
            last_attempt: None,
            state: FreshnessState::Stale,
            consecutive_failures: 0,
            next_retry_at: None,
        }
    }
}

impl RefreshMetadata {
    pub fn mark_success(&mut self) {
        let now = Utc::now();
        self.last_attempt = Some(now);
        self.last_success = Some(now);
        self.consecutive_failures = 0;
        self.next_retry_at = None;
        self.state = FreshnessState::Fresh;
    }

    pub fn mark_failure(&mut self) {
        self.last_attempt = Some(Utc::now());
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    pub fn schedule_retry_in(&mut self, delay_secs: u64) {
        let delay = i64::try_from(delay_secs)
            .ok()
            .and_then(chrono::TimeDelta::try_seconds);
        self.next_retry_at = delay.and_then(|delay| Utc::now().checked_add_signed(delay));
    }

    pub fn clear_retry(&mut self) {
        self.next_retry_at = None;
    }
}
