use chrono::Utc;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::{AppMode, AppState},
    ui::theme::Theme,
};

const HINTS: &str = "q quit  r refresh  / search  f/c units  Up/Down scroll  ? help";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let line = if let Some(err) = state.last_error.as_deref()
        && (state.mode == AppMode::Error || state.refresh_meta.consecutive_failures > 0)
    {
        Line::from(Span::styled(
            format!(" {err}{}", retry_suffix(state)),
            Style::default().fg(theme.danger),
        ))
    } else if state.fetch_in_flight {
        Line::from(format!(
            " {} {}",
            state.spinner_frame(),
            state.loading_message
        ))
    } else {
        Line::from(Span::styled(
            format!(" {HINTS}"),
            Style::default().fg(theme.muted_text),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn retry_suffix(state: &AppState) -> String {
    state
        .refresh_meta
        .next_retry_at
        .map(|at| (at - Utc::now()).num_seconds().max(0))
        .map_or_else(String::new, |secs| format!(" (retry in {secs}s)"))
}
