use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{
    cli::{Cli, ColorArg},
    ui::{
        theme::Theme,
        widgets::shared::{popup_block, popup_panel_style},
    },
};

pub fn render(frame: &mut Frame, area: Rect, theme: Theme, cli: &Cli) {
    frame.render_widget(Clear, area);

    let panel_style = popup_panel_style(theme);
    let block = popup_block("Help", theme, panel_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = Paragraph::new(help_lines(theme, cli.effective_color_mode()))
        .style(panel_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}

fn help_lines(theme: Theme, color_mode: ColorArg) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    push_section(
        &mut lines,
        theme,
        "Global",
        [
            "q / Esc quit  |  Ctrl+C immediate quit",
            "r refresh now  |  f/c units  |  Up/Down scroll forecast",
            "/ or l search city  |  ? or F1 toggle help",
        ],
    );
    push_section(
        &mut lines,
        theme,
        "Search",
        [
            "Type at least 2 letters; results follow as you type",
            "Up/Down move  |  Enter select  |  Esc close",
            "Last row uses your current location",
        ],
    );
    push_section(
        &mut lines,
        theme,
        "Refresh & Status",
        [
            "Fresh: live data  |  Stale: retrying  |  Offline: fetch failed",
            "Use r to retry immediately while stale/offline",
        ],
    );
    lines.push(section_title_line(theme, "Color Policy"));
    lines.push(Line::from(format!(
        "Current mode: {}",
        color_mode_label(color_mode)
    )));
    lines.push(Line::from("CLI: --color auto|always|never  |  --no-color"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Any key closes this help",
        Style::default()
            .fg(theme.muted_text)
            .add_modifier(Modifier::BOLD),
    )));
    lines
}

fn push_section<const N: usize>(
    lines: &mut Vec<Line<'static>>,
    theme: Theme,
    title: &'static str,
    body: [&'static str; N],
) {
    lines.push(section_title_line(theme, title));
    lines.extend(body.into_iter().map(Line::from));
    lines.push(Line::from(""));
}

fn section_title_line(theme: Theme, title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn color_mode_label(mode: ColorArg) -> &'static str {
    match mode {
        ColorArg::Auto => "auto",
        ColorArg::Always => "always",
        ColorArg::Never => "never",
    }
}
