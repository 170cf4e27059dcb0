use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::ui::{
    theme::Theme,
    widgets::shared::{popup_block, popup_panel_style},
};

pub fn render(frame: &mut Frame, area: Rect, theme: Theme) {
    frame.render_widget(Clear, area);

    let panel_style = popup_panel_style(theme);
    let lines = vec![
        Line::from(Span::styled(
            "Location Permission Required",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("This app needs access to your location to show weather information."),
        Line::from(""),
        Line::from(Span::styled(
            "[y] Allow  [n] Deny",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .style(panel_style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(popup_block("Location", theme, panel_style)),
        area,
    );
}
