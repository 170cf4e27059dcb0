use chrono::Utc;

use crate::{
    cli::{Cli, ColorArg, UnitsArg},
    domain::weather::{
        CurrentWeather, ForecastSample, Location, SampleCondition, SampleMain, WeatherBundle,
    },
};

/// Nothing listens here; spawned requests fail fast instead of reaching out.
pub(crate) const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// 2026-03-02T12:00:00Z
pub(crate) const NOON_UTC: i64 = 1_772_452_800;

pub(crate) fn test_cli() -> Cli {
    Cli {
        city: None,
        lat: None,
        lon: None,
        units: UnitsArg::Celsius,
        ascii_icons: false,
        emoji_icons: false,
        color: ColorArg::Auto,
        no_color: false,
        refresh_interval: 600,
        search_debounce_ms: 500,
        api_key: Some("test-key".to_string()),
        base_url: UNREACHABLE_URL.to_string(),
        geo_url: UNREACHABLE_URL.to_string(),
        ip_location_url: UNREACHABLE_URL.to_string(),
        skip_onboarding: false,
        reset_onboarding: false,
        log_file: None,
        one_shot: false,
    }
}

pub(crate) fn berlin() -> Location {
    Location {
        name: "Berlin".to_string(),
        country: Some("DE".to_string()),
        state: Some("Berlin".to_string()),
        latitude: 52.52,
        longitude: 13.405,
    }
}

pub(crate) fn lagos() -> Location {
    Location {
        name: "Lagos".to_string(),
        country: Some("NG".to_string()),
        state: Some("Lagos".to_string()),
        latitude: 6.455,
        longitude: 3.394,
    }
}

pub(crate) fn sample(dt: i64, temp: f32, description: &str, icon: &str) -> ForecastSample {
    ForecastSample {
        dt,
        main: SampleMain { temp },
        weather: vec![SampleCondition {
            description: description.to_string(),
            icon: icon.to_string(),
        }],
    }
}

pub(crate) fn sample_bundle() -> WeatherBundle {
    let daily = (1..=5_i64)
        .map(|day| {
            sample(
                NOON_UTC + day * 86_400,
                18.0 + day as f32,
                "light rain",
                "10d",
            )
        })
        .collect();

    WeatherBundle {
        location: berlin(),
        current: CurrentWeather {
            temperature_c: 21.4,
            feels_like_c: 20.6,
            humidity: 48,
            wind_speed_ms: 3.6,
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        },
        daily,
        fetched_at: Utc::now(),
    }
}
