pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod resilience;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::{
    fmt::{Display, Write as _},
    io::{self, Stdout},
};

use anyhow::{Result, bail};
use app::events::{AppEvent, spawn_input_task};
use app::settings::load_runtime_settings;
use app::state::{AppMode, AppState};
use chrono::{Local, TimeZone};
use cli::{Cli, IconMode};
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::{
    geocode::GeocodeClient,
    geoip::{IpLocationProvider, locate},
    weather::WeatherClient,
};
use domain::weather::{
    GeocodeResolution, Location, Units, WeatherBundle, capitalize_words, unit_symbol,
    weather_icon, weekday_name,
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    logging::init(logging::LogTarget::select(
        cli.log_file.as_deref(),
        cli.one_shot,
    ))?;
    if cli.one_shot {
        return run_one_shot(&cli).await;
    }

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app, &cli))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

/// Fetches once and prints a plain-text report to stdout.
async fn run_one_shot(cli: &Cli) -> Result<()> {
    cli.validate()?;
    let geocoder = GeocodeClient::from_cli(cli);
    let location = one_shot_location(cli, &geocoder).await?;
    info!(location = %location.display_name(), "one-shot fetch");

    let (settings, _) = load_runtime_settings(cli, true);
    let bundle = WeatherClient::from_cli(cli).fetch(location).await?;
    let report = format_report(&bundle, settings.units, settings.icon_mode, &Local);
    print!("{report}");
    Ok(())
}

async fn one_shot_location(cli: &Cli, geocoder: &GeocodeClient) -> Result<Location> {
    if let Some(city) = cli.city_query() {
        return match geocoder.resolve(city).await? {
            GeocodeResolution::Selected(location) => Ok(location),
            GeocodeResolution::NeedsDisambiguation(mut candidates) if !candidates.is_empty() => {
                Ok(candidates.swap_remove(0))
            }
            GeocodeResolution::NeedsDisambiguation(_) => bail!("no location matched"),
            GeocodeResolution::NotFound(city) => bail!("No location found for {city}"),
        };
    }
    if let Some((lat, lon)) = cli.coordinates() {
        return Ok(geocoder
            .reverse(lat, lon)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| Location::from_coords(lat, lon)));
    }
    locate(&IpLocationProvider::from_cli(cli), geocoder).await
}

/// Plain-text rendering of a bundle: current conditions, then one line per
/// forecast day with weekdays taken in `tz`.
#[must_use]
pub fn format_report<Tz: TimeZone>(
    bundle: &WeatherBundle,
    units: Units,
    icon_mode: IconMode,
    tz: &Tz,
) -> String
where
    Tz::Offset: Display,
{
    let symbol = unit_symbol(units);
    let current = &bundle.current;
    let mut out = String::new();

    let _ = writeln!(out, "{}", bundle.location.display_name());
    let _ = writeln!(
        out,
        "{} {}{symbol}  {}",
        weather_icon(&current.icon, icon_mode),
        bundle.current_temp(units),
        capitalize_words(&current.description)
    );
    let _ = writeln!(
        out,
        "Feels like {}{symbol}  Humidity {}%  Wind {:.1} m/s",
        bundle.feels_like(units),
        current.humidity,
        current.wind_speed_ms
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "5-Day Forecast");
    if bundle.daily.is_empty() {
        let _ = writeln!(out, "No data available");
    }
    for sample in &bundle.daily {
        let (icon, description) = sample.condition().map_or(("", String::new()), |c| {
            (weather_icon(&c.icon, icon_mode), capitalize_words(&c.description))
        });
        let _ = writeln!(
            out,
            "{:<10} {icon:<3} {description:<18} {:>4}{symbol}",
            weekday_name(sample.dt, tz),
            sample.temp(units),
        );
    }
    out
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
