mod common;

use abweather::{cli::IconMode, domain::weather::Units, format_report};
use chrono::FixedOffset;
use common::berlin_bundle;

#[test]
fn one_shot_report_layout() {
    let tz = FixedOffset::east_opt(3600).expect("offset");
    let report = format_report(&berlin_bundle(), Units::Celsius, IconMode::Ascii, &tz);

    insta::assert_snapshot!(report.trim_end(), @r"
    Berlin, DE
    CLD 21°C  Scattered Clouds
    Feels like 21°C  Humidity 48%  Wind 3.6 m/s

    5-Day Forecast
    Tuesday    RAN Light Rain           19°C
    Wednesday  RAN Light Rain           20°C
    Thursday   RAN Light Rain           21°C
    Friday     RAN Light Rain           22°C
    Saturday   RAN Light Rain           23°C
    ");
}

#[test]
fn empty_forecast_is_reported() {
    let mut bundle = berlin_bundle();
    bundle.daily.clear();
    let utc = FixedOffset::east_opt(0).expect("utc");
    let report = format_report(&bundle, Units::Fahrenheit, IconMode::Unicode, &utc);

    assert!(report.contains("71°F"));
    assert!(report.contains("No data available"));
}
