#![allow(dead_code)]
#![allow(clippy::cast_precision_loss)]

use abweather::{
    app::{
        settings::RuntimeSettings,
        state::{AppMode, AppState},
    },
    cli::{Cli, ColorArg, UnitsArg},
    domain::weather::{
        CurrentWeather, ForecastSample, Location, SampleCondition, SampleMain, WeatherBundle,
    },
};
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

/// 2026-03-02T12:00:00Z, a Monday.
pub const NOON_UTC: i64 = 1_772_452_800;
pub const DAY_SECS: i64 = 86_400;

pub fn cli_for(server_uri: &str) -> Cli {
    Cli {
        city: None,
        lat: None,
        lon: None,
        units: UnitsArg::Celsius,
        ascii_icons: false,
        emoji_icons: false,
        color: ColorArg::Never,
        no_color: false,
        refresh_interval: 600,
        search_debounce_ms: 500,
        api_key: Some("test-key".to_string()),
        base_url: server_uri.to_string(),
        geo_url: server_uri.to_string(),
        ip_location_url: server_uri.to_string(),
        skip_onboarding: true,
        reset_onboarding: false,
        log_file: None,
        one_shot: false,
    }
}

/// A CLI whose endpoints refuse connections.
pub fn offline_cli() -> Cli {
    cli_for("http://127.0.0.1:9")
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).expect("utc offset")
}

/// Unix seconds for `hour:00` on `date` in `tz`.
pub fn at<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32) -> i64 {
    tz.from_local_datetime(&date.and_hms_opt(hour, 0, 0).expect("valid hour"))
        .single()
        .expect("unambiguous local time")
        .timestamp()
}

pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .expect("valid date")
        .checked_add_days(chrono::Days::new(offset))
        .expect("date in range")
}

pub fn sample(dt: i64, temp: f32) -> ForecastSample {
    sample_with(dt, temp, "light rain", "10d")
}

pub fn sample_with(dt: i64, temp: f32, description: &str, icon: &str) -> ForecastSample {
    ForecastSample {
        dt,
        main: SampleMain { temp },
        weather: vec![SampleCondition {
            description: description.to_string(),
            icon: icon.to_string(),
        }],
    }
}

pub fn berlin() -> Location {
    Location {
        name: "Berlin".to_string(),
        country: Some("DE".to_string()),
        state: Some("Berlin".to_string()),
        latitude: 52.52,
        longitude: 13.405,
    }
}

/// Berlin with five forecast days at noon UTC, 19..=23 °C.
pub fn berlin_bundle() -> WeatherBundle {
    let daily = (1..=5_i64)
        .map(|offset| sample(NOON_UTC + offset * DAY_SECS, 18.0 + offset as f32))
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

pub fn ready_state(cli: &Cli, bundle: WeatherBundle) -> AppState {
    let settings = RuntimeSettings {
        onboarding_complete: true,
        ..RuntimeSettings::default()
    };
    let mut state = AppState::with_settings(cli, settings, None);
    state.selected_location = Some(bundle.location.clone());
    state.weather = Some(bundle);
    state.refresh_meta.mark_success();
    state.mode = AppMode::Ready;
    state
}

pub fn current_payload() -> serde_json::Value {
    serde_json::json!({
        "weather": [{ "id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d" }],
        "main": { "temp": 21.4, "feels_like": 20.6, "humidity": 48, "pressure": 1012 },
        "wind": { "speed": 3.6, "deg": 250 },
        "name": "Berlin"
    })
}

/// Seven consecutive days at noon UTC; distinct local days in any zone.
pub fn forecast_payload() -> serde_json::Value {
    let list = (0..7_i64)
        .map(|offset| {
            serde_json::json!({
                "dt": NOON_UTC + offset * DAY_SECS,
                "main": { "temp": 10.0 + offset as f64, "humidity": 70 },
                "weather": [{ "description": "light rain", "icon": "10d" }],
                "dt_txt": "ignored"
            })
        })
        .collect::<Vec<_>>();
    serde_json::json!({ "cod": "200", "cnt": list.len(), "list": list })
}
