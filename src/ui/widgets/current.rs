use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::state::{AppMode, AppState},
    domain::weather::{WeatherBundle, capitalize_words, unit_symbol},
    ui::{
        layout::cards_side_by_side,
        theme::{Theme, temp_color},
        widgets::shared::panel_block,
    },
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let block = panel_block(location_title(state), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(bundle) = &state.weather else {
        render_placeholder(frame, inner, state, theme);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    render_headline(frame, chunks[0], state, bundle, theme);
    render_details(frame, chunks[1], state, bundle, theme);
}

/// "Name, CC" with a spinner while a fetch is running.
fn location_title(state: &AppState) -> String {
    let name = state
        .weather
        .as_ref()
        .map(|bundle| bundle.location.display_name())
        .or_else(|| state.selected_location.as_ref().map(|l| l.display_name()))
        .unwrap_or_else(|| "Current Location".to_string());
    if state.fetch_in_flight {
        format!(" {name} {} ", state.spinner_frame())
    } else {
        format!(" {name} ")
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let line = match (&state.last_error, state.mode) {
        (Some(err), AppMode::Error) => {
            Line::from(Span::styled(err.clone(), Style::default().fg(theme.danger)))
        }
        _ => Line::from(format!("{} {}", state.spinner_frame(), state.loading_message)),
    };
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_headline(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    bundle: &WeatherBundle,
    theme: Theme,
) {
    let units = state.units();
    let temp = format!("{}{}", bundle.current_temp(units), unit_symbol(units));
    let lines = vec![
        Line::from(Span::styled(
            temp,
            Style::default()
                .fg(temp_color(&theme, bundle.current.temperature_c))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            capitalize_words(&bundle.current.description),
            Style::default().fg(theme.muted_text),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_details(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    bundle: &WeatherBundle,
    theme: Theme,
) {
    let units = state.units();
    let cards = [
        (
            "Feels Like",
            format!("{}{}", bundle.feels_like(units), unit_symbol(units)),
        ),
        ("Humidity", format!("{}%", bundle.current.humidity)),
        (
            "Wind Speed",
            format!("{:.1} m/s", bundle.current.wind_speed_ms),
        ),
    ];

    if !cards_side_by_side(area.width) || area.height < 4 {
        let summary = cards
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("  ");
        frame.render_widget(
            Paragraph::new(summary)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    for ((label, value), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(label, Style::default().fg(theme.muted_text))),
            Line::from(Span::styled(
                value,
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(card, *column);
    }
}
