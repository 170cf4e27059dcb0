use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    cli::Cli,
    data::error::get_json,
    domain::{
        forecast::bucket_daily_forecast,
        weather::{CurrentWeather, ForecastSample, Location, WeatherBundle},
    },
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.base_url.clone(), cli.api_key().unwrap_or_default())
    }

    /// Current conditions plus the bucketed daily forecast for `location`.
    /// Both requests run concurrently; either failing fails the whole fetch.
    pub async fn fetch(&self, location: Location) -> Result<WeatherBundle> {
        let (current, samples) = tokio::try_join!(
            self.fetch_current(location.latitude, location.longitude),
            self.fetch_forecast(location.latitude, location.longitude),
        )?;

        let raw_count = samples.len();
        let daily = bucket_daily_forecast(samples);
        debug!(
            location = %location.display_name(),
            raw_count,
            days = daily.len(),
            "weather fetched"
        );

        Ok(WeatherBundle {
            location,
            current,
            daily,
            fetched_at: Utc::now(),
        })
    }

    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        let payload: CurrentResponse = get_json(
            self.client
                .get(format!("{}/weather", self.base_url))
                .query(&self.coord_query(lat, lon)),
        )
        .await
        .context("current weather request failed")?;

        let condition = payload.weather.into_iter().next().unwrap_or_default();
        Ok(CurrentWeather {
            temperature_c: payload.main.temp,
            feels_like_c: payload.main.feels_like,
            humidity: payload.main.humidity,
            wind_speed_ms: payload.wind.speed,
            description: condition.description,
            icon: condition.icon,
        })
    }

    /// Raw 3-hour samples, in feed order. Samples without a condition entry
    /// are dropped here so downstream code can rely on `weather[0]`.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSample>> {
        let payload: ForecastResponse = get_json(
            self.client
                .get(format!("{}/forecast", self.base_url))
                .query(&self.coord_query(lat, lon)),
        )
        .await
        .context("forecast request failed")?;

        let total = payload.list.len();
        let samples = payload
            .list
            .into_iter()
            .filter(|sample| !sample.weather.is_empty())
            .collect::<Vec<_>>();
        if samples.len() < total {
            warn!(
                dropped = total - samples.len(),
                "forecast samples without weather entries"
            );
        }
        Ok(samples)
    }

    fn coord_query(&self, lat: f64, lon: f64) -> [(&'static str, String); 4] {
        [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", "metric".to_string()),
            ("appid", self.api_key.clone()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    main: CurrentMain,
    #[serde(default)]
    wind: WindBlock,
}

#[derive(Debug, Deserialize, Default)]
struct ConditionBlock {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f32,
    feels_like: f32,
    humidity: u8,
}

#[derive(Debug, Deserialize, Default)]
struct WindBlock {
    #[serde(default)]
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastSample>,
}
