use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::state::{AppState, ONBOARDING_SLIDES},
    cli::IconMode,
    ui::{theme::Theme, widgets::shared::panel_block},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let Some(slide) = state.onboarding() else {
        return;
    };

    let block = panel_block(" ABWeather ".to_string(), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let icon = slide_icon(state.onboarding_slide, state.settings.icon_mode);
    let body = vec![
        Line::from(Span::styled(
            icon,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            slide.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(slide.body, Style::default().fg(theme.muted_text))),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[1],
    );

    let dots = (0..ONBOARDING_SLIDES.len())
        .map(|idx| {
            if idx == state.onboarding_slide {
                Span::styled("● ", Style::default().fg(theme.accent))
            } else {
                Span::styled("○ ", Style::default().fg(theme.muted_text))
            }
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        rows[2],
    );

    let last = state.onboarding_slide + 1 == ONBOARDING_SLIDES.len();
    let hint = if last {
        "Enter get started  |  <- back  |  q quit"
    } else {
        "Enter/-> next  |  <- back  |  s skip  |  q quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(theme.muted_text)))
            .alignment(Alignment::Center),
        rows[3],
    );
}

fn slide_icon(idx: usize, mode: IconMode) -> &'static str {
    let icons: [(&str, &str, &str); 3] = [
        ("SUN", "☀️", "☀"),
        ("RAN", "🌧️", "☂"),
        ("CLD", "📅", "☁"),
    ];
    let (ascii, emoji, unicode) = icons.get(idx).copied().unwrap_or(icons[0]);
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}
