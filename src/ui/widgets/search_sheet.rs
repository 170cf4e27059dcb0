use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::state::AppState,
    ui::{
        theme::Theme,
        widgets::shared::{popup_block, popup_panel_style},
    },
};

pub const CURRENT_LOCATION_LABEL: &str = "Use Current Location";
const PLACEHOLDER: &str = "Enter city name...";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    frame.render_widget(Clear, area);

    let panel_style = popup_panel_style(theme);
    let block = popup_block("Search City", theme, panel_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let query = if state.search.query.is_empty() {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(PLACEHOLDER, Style::default().fg(theme.muted_text)),
        ])
    } else {
        Line::from(format!("> {}_", state.search.query))
    };
    frame.render_widget(Paragraph::new(query).style(panel_style), rows[0]);

    frame.render_widget(
        Paragraph::new(result_lines(state, theme)).style(panel_style),
        rows[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Up/Down move  Enter select  Esc close",
            Style::default().fg(theme.muted_text),
        ))
        .style(panel_style),
        rows[2],
    );
}

fn result_lines(state: &AppState, theme: Theme) -> Vec<Line<'static>> {
    let search = &state.search;
    let mut lines = Vec::new();

    if state.search_in_flight() {
        lines.push(Line::from(format!("{} Searching...", state.spinner_frame())));
    } else if let Some(err) = &search.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(theme.danger),
        )));
    } else if search.results.is_empty() {
        let message = if !search.query.trim().is_empty() {
            "No locations found"
        } else {
            "Start typing to search for locations"
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(theme.muted_text),
        )));
    } else {
        for (idx, location) in search.results.iter().enumerate() {
            lines.push(row(
                idx == search.selected,
                vec![
                    Span::raw(location.name.clone()),
                    Span::styled(
                        format!("  {}", location.detail_name()),
                        Style::default().fg(theme.muted_text),
                    ),
                ],
                theme,
            ));
        }
    }

    lines.push(Line::from(""));
    lines.push(row(
        search.current_location_selected(),
        vec![Span::styled(
            CURRENT_LOCATION_LABEL,
            Style::default().fg(theme.accent),
        )],
        theme,
    ));
    lines
}

fn row(selected: bool, mut spans: Vec<Span<'static>>, theme: Theme) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    spans.insert(0, Span::styled(marker, Style::default().fg(theme.accent)));
    let line = Line::from(spans);
    if selected {
        line.style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        line
    }
}
