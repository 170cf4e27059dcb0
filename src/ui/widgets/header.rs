use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::state::AppState, domain::weather::weather_icon, ui::theme::Theme};

const SEARCH_HINT: &str = "/ search  ? help ";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let icon = state
        .weather
        .as_ref()
        .map_or("", |bundle| weather_icon(&bundle.current.icon, state.settings.icon_mode));
    let date = Local::now().format("%A, %-d %B").to_string();

    let left = Line::from(vec![
        Span::styled(
            format!(" {icon} "),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("ABWeather", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {date}"), Style::default().fg(theme.muted_text)),
    ]);
    frame.render_widget(Paragraph::new(left), area);

    let hint = Paragraph::new(Line::from(Span::styled(
        SEARCH_HINT,
        Style::default().fg(theme.muted_text),
    )))
    .alignment(Alignment::Right);
    // The status badge shares this row on the right.
    if state.refresh_meta.state.badge().is_none() || state.weather.is_none() {
        frame.render_widget(hint, area);
    }
}
