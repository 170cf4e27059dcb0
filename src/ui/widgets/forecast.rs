use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::weather::{capitalize_words, unit_symbol, weather_icon, weekday_name},
    ui::{
        theme::{Theme, temp_color},
        widgets::shared::{panel_block, sparkline_blocks},
    },
};

const DAY_COLUMN: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let mut block = panel_block(" 5-Day Forecast ".to_string(), theme);
    let daily = state
        .weather
        .as_ref()
        .map_or(&[][..], |bundle| bundle.daily.as_slice());

    if daily.is_empty() {
        let message = if state.fetch_in_flight || state.weather.is_none() {
            format!("{} {}", state.spinner_frame(), state.loading_message)
        } else {
            "No data available".to_string()
        };
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let temps = daily.iter().map(|sample| sample.main.temp).collect::<Vec<_>>();
    block = block.title_bottom(
        Line::from(Span::styled(
            format!(" {} ", sparkline_blocks(&temps)),
            Style::default().fg(theme.accent),
        ))
        .right_aligned(),
    );

    let units = state.units();
    let icon_mode = state.settings.icon_mode;
    let lines = daily
        .iter()
        .skip(state.forecast_scroll)
        .map(|sample| {
            let (icon, description) = sample.condition().map_or(("", String::new()), |c| {
                (weather_icon(&c.icon, icon_mode), capitalize_words(&c.description))
            });
            Line::from(vec![
                Span::styled(
                    format!("{:<DAY_COLUMN$}", weekday_name(sample.dt, &Local)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {icon:<3} ")),
                Span::styled(
                    format!("{description:<18}"),
                    Style::default().fg(theme.muted_text),
                ),
                Span::styled(
                    format!("{:>4}{}", sample.temp(units), unit_symbol(units)),
                    Style::default().fg(temp_color(&theme, sample.main.temp)),
                ),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
