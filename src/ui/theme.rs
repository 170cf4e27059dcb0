use ratatui::style::Color;

use crate::{cli::ColorArg, domain::weather::WeatherCategory};

mod capability;

use capability::detect_color_capability_from;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub surface: Color,
    pub popup_surface: Color,
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub border: Color,
    pub popup_border: Color,
    pub warning: Color,
    pub danger: Color,
    pub temp_cold: Color,
    pub temp_mild: Color,
    pub temp_warm: Color,
    pub temp_hot: Color,
}

type Rgb = (u8, u8, u8);

pub fn detect_color_capability(mode: ColorArg) -> ColorCapability {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var("NO_COLOR").ok();
    detect_color_capability_from(
        mode,
        term.as_deref(),
        colorterm.as_deref(),
        no_color.as_deref(),
    )
}

/// Surface and accent follow the current conditions; night variants are darker.
#[must_use]
pub fn theme_for(category: WeatherCategory, is_day: bool, capability: ColorCapability) -> Theme {
    if capability == ColorCapability::Basic16 {
        return basic16_theme(category);
    }

    let (surface, accent) = palette_seed(category, is_day);
    let popup = mix(surface, (255, 255, 255), 0.12);
    let rgb = |value: Rgb| quantize(Color::Rgb(value.0, value.1, value.2), capability);

    Theme {
        surface: rgb(surface),
        popup_surface: rgb(popup),
        accent: rgb(accent),
        text: rgb((236, 241, 247)),
        muted_text: rgb((160, 173, 190)),
        border: rgb(mix(accent, surface, 0.45)),
        popup_border: rgb(accent),
        warning: rgb((255, 196, 87)),
        danger: rgb((255, 110, 110)),
        temp_cold: rgb((126, 190, 255)),
        temp_mild: rgb((132, 222, 160)),
        temp_warm: rgb((255, 208, 102)),
        temp_hot: rgb((255, 128, 96)),
    }
}

fn palette_seed(category: WeatherCategory, is_day: bool) -> (Rgb, Rgb) {
    match (category, is_day) {
        (WeatherCategory::Clear, true) => ((13, 53, 102), (255, 215, 117)),
        (WeatherCategory::Clear, false) => ((9, 18, 44), (173, 216, 255)),
        (WeatherCategory::PartlyCloudy, true) => ((22, 50, 84), (238, 214, 150)),
        (WeatherCategory::PartlyCloudy, false) => ((15, 24, 44), (188, 208, 236)),
        (WeatherCategory::Cloudy, true) => ((25, 36, 51), (210, 223, 235)),
        (WeatherCategory::Cloudy, false) => ((20, 26, 40), (194, 207, 224)),
        (WeatherCategory::Rain, true) => ((17, 47, 88), (153, 214, 255)),
        (WeatherCategory::Rain, false) => ((12, 25, 52), (143, 196, 255)),
        (WeatherCategory::Thunder, true) => ((28, 25, 66), (255, 223, 112)),
        (WeatherCategory::Thunder, false) => ((18, 15, 44), (255, 208, 95)),
        (WeatherCategory::Snow, true) => ((27, 51, 77), (237, 247, 255)),
        (WeatherCategory::Snow, false) => ((19, 35, 55), (226, 241, 255)),
        (WeatherCategory::Fog, true) => ((30, 34, 40), (216, 220, 224)),
        (WeatherCategory::Fog, false) => ((21, 24, 30), (201, 207, 211)),
        (WeatherCategory::Unknown, true) => ((28, 36, 51), (205, 219, 234)),
        (WeatherCategory::Unknown, false) => ((19, 24, 35), (195, 205, 215)),
    }
}

fn basic16_theme(category: WeatherCategory) -> Theme {
    let accent = match category {
        WeatherCategory::Clear | WeatherCategory::Thunder => Color::Yellow,
        WeatherCategory::Rain => Color::LightBlue,
        WeatherCategory::Snow | WeatherCategory::Fog => Color::White,
        WeatherCategory::PartlyCloudy | WeatherCategory::Cloudy | WeatherCategory::Unknown => {
            Color::Cyan
        }
    };
    Theme {
        surface: Color::Black,
        popup_surface: Color::Blue,
        accent,
        text: Color::White,
        muted_text: Color::Gray,
        border: Color::LightCyan,
        popup_border: Color::Yellow,
        warning: Color::Yellow,
        danger: Color::LightRed,
        temp_cold: Color::LightBlue,
        temp_mild: Color::Green,
        temp_warm: Color::Yellow,
        temp_hot: Color::LightRed,
    }
}

/// Color for a temperature in Celsius.
#[must_use]
pub fn temp_color(theme: &Theme, celsius: f32) -> Color {
    match celsius {
        t if t < 5.0 => theme.temp_cold,
        t if t < 18.0 => theme.temp_mild,
        t if t < 28.0 => theme.temp_warm,
        _ => theme.temp_hot,
    }
}

#[must_use]
pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    match (capability, color) {
        (ColorCapability::Xterm256, Color::Rgb(r, g, b)) => {
            Color::Indexed(16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b))
        }
        (ColorCapability::Basic16, Color::Rgb(r, g, b)) => basic16_from_rgb(r, g, b),
        (_, c) => c,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_cube(value: u8) -> u8 {
    ((f32::from(value) / 255.0) * 5.0).round() as u8
}

/// Nearest of the sixteen ANSI colors by dominant channel and brightness.
fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max - min < 24 {
        return match max {
            0..=50 => Color::Black,
            51..=110 => Color::DarkGray,
            111..=190 => Color::Gray,
            _ => Color::White,
        };
    }

    let bright = max > 170;
    let high = |channel: u8| u16::from(channel) * 10 >= u16::from(max) * 7;
    match (high(r), high(g), high(b), bright) {
        (true, true, false, _) => Color::Yellow,
        (true, false, true, false) => Color::Magenta,
        (true, false, true, true) => Color::LightMagenta,
        (false, true, true, false) => Color::Cyan,
        (false, true, true, true) => Color::LightCyan,
        (true, false, false, false) => Color::Red,
        (true, false, false, true) => Color::LightRed,
        (false, true, false, false) => Color::Green,
        (false, true, false, true) => Color::LightGreen,
        (false, false, true, false) => Color::Blue,
        (false, false, true, true) => Color::LightBlue,
        _ => Color::White,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix(from: Rgb, to: Rgb, amount: f32) -> Rgb {
    let channel = |a: u8, b: u8| -> u8 {
        (f32::from(a) + (f32::from(b) - f32::from(a)) * amount)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}
