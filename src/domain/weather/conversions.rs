use chrono::{DateTime, TimeZone, Utc};

use super::Units;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn unit_symbol(units: Units) -> &'static str {
    match units {
        Units::Celsius => "°C",
        Units::Fahrenheit => "°F",
    }
}

/// `None` only for timestamps outside chrono's representable range.
#[must_use]
pub fn local_time<Tz: TimeZone>(unix_secs: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp(unix_secs, 0).map(|utc| utc.with_timezone(tz))
}

#[must_use]
pub fn weekday_name<Tz: TimeZone>(unix_secs: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local_time(unix_secs, tz).map_or_else(|| "--".to_string(), |t| t.format("%A").to_string())
}

/// Uppercases the first letter of every word ("light rain" -> "Light Rain").
#[must_use]
pub fn capitalize_words(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
