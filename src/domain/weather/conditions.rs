use crate::cli::IconMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunder,
    Snow,
    Fog,
    Unknown,
}

/// Maps an OpenWeatherMap icon code (`01d`, `10n`, ...) to a category.
/// Only the two-digit condition prefix matters; the `d`/`n` suffix is ignored.
#[must_use]
pub fn category_for_icon(icon: &str) -> WeatherCategory {
    match icon.get(..2) {
        Some("01") => WeatherCategory::Clear,
        Some("02") => WeatherCategory::PartlyCloudy,
        Some("03" | "04") => WeatherCategory::Cloudy,
        Some("09" | "10") => WeatherCategory::Rain,
        Some("11") => WeatherCategory::Thunder,
        Some("13") => WeatherCategory::Snow,
        Some("50") => WeatherCategory::Fog,
        _ => WeatherCategory::Unknown,
    }
}

#[must_use]
pub fn is_night_icon(icon: &str) -> bool {
    icon.ends_with('n')
}

#[must_use]
pub fn weather_icon(icon: &str, mode: IconMode) -> &'static str {
    let (ascii, emoji, unicode) = icon_tokens(category_for_icon(icon), !is_night_icon(icon));
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}

fn icon_tokens(
    category: WeatherCategory,
    is_day: bool,
) -> (&'static str, &'static str, &'static str) {
    match (category, is_day) {
        (WeatherCategory::Clear, true) => ("SUN", "☀️", "☀"),
        (WeatherCategory::Clear, false) => ("MON", "🌙", "☾"),
        (WeatherCategory::PartlyCloudy, true) => ("PTC", "⛅", "⛅"),
        (WeatherCategory::PartlyCloudy, false) => ("PTC", "☁️", "☁"),
        (WeatherCategory::Cloudy, _) => ("CLD", "☁️", "☁"),
        (WeatherCategory::Rain, _) => ("RAN", "🌧️", "☂"),
        (WeatherCategory::Thunder, _) => ("THN", "⛈️", "⚡"),
        (WeatherCategory::Snow, _) => ("SNW", "🌨️", "❄"),
        (WeatherCategory::Fog, _) => ("FOG", "🌫️", "░"),
        (WeatherCategory::Unknown, _) => ("---", "☁️", "☁"),
    }
}
