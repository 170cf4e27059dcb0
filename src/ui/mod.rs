pub mod layout;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::{AppMode, AppState},
    cli::Cli,
    domain::weather::WeatherCategory,
    resilience::freshness::FreshnessState,
    ui::theme::{Theme, detect_color_capability, theme_for},
};

pub fn render(frame: &mut Frame, state: &AppState, cli: &Cli) {
    let area = frame.area();
    let theme = current_theme(state, cli);

    if area.width < layout::MIN_WIDTH || area.height < layout::MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {}x{}.",
            layout::MIN_WIDTH,
            layout::MIN_HEIGHT
        ))
        .block(Block::default().borders(Borders::ALL).title("abweather"));
        frame.render_widget(warning, area);
        return;
    }

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.surface).fg(theme.text)),
        area,
    );

    if state.mode == AppMode::Onboarding {
        widgets::onboarding::render(frame, area, state, theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout::HEADER_HEIGHT),
            Constraint::Length(layout::current_height(area.height)),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    widgets::header::render(frame, chunks[0], state, theme);
    widgets::current::render(frame, chunks[1], state, theme);
    widgets::forecast::render(frame, chunks[2], state, theme);
    widgets::footer::render(frame, chunks[3], state, theme);

    render_status_badge(frame, area, state, theme);

    if state.mode == AppMode::SelectingLocation {
        widgets::selector::render(frame, centered_rect(70, 60, area), state, theme);
    }
    if state.search.open {
        widgets::search_sheet::render(frame, centered_rect(70, 80, area), state, theme);
    }
    if state.permission_prompt_open {
        widgets::permission::render(frame, centered_rect(60, 40, area), theme);
    }
    if state.help_open {
        widgets::help::render(frame, centered_rect(80, 80, area), theme, cli);
    }
}

fn current_theme(state: &AppState, cli: &Cli) -> Theme {
    let (category, is_day) = state
        .weather
        .as_ref()
        .map_or((WeatherCategory::Unknown, true), |w| {
            (w.current_category(), w.is_day())
        });
    theme_for(
        category,
        is_day,
        detect_color_capability(cli.effective_color_mode()),
    )
}

fn render_status_badge(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    // Nothing to be stale about before the first successful fetch.
    if state.weather.is_none() {
        return;
    }
    let color = match state.refresh_meta.state {
        FreshnessState::Fresh => return,
        FreshnessState::Stale => theme.warning,
        FreshnessState::Offline => theme.danger,
    };
    let Some(text) = state.refresh_meta.state.badge() else {
        return;
    };

    let width = u16::try_from(text.chars().count() + 2)
        .unwrap_or(u16::MAX)
        .min(area.width);
    let badge_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y,
        width,
        height: 1,
    };
    let badge = Paragraph::new(Line::from(format!(" {text} "))).style(
        Style::default()
            .fg(color)
            .bg(theme.surface)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(badge, badge_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
