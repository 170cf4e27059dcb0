use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Clear, List, ListItem},
};

use crate::{
    app::state::AppState,
    ui::{
        theme::Theme,
        widgets::shared::{popup_block, popup_panel_style},
    },
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    frame.render_widget(Clear, area);

    let items = state
        .pending_locations
        .iter()
        .enumerate()
        .map(|(idx, loc)| {
            ListItem::new(format!(
                "{}. {} ({})",
                idx + 1,
                loc.name,
                loc.detail_name()
            ))
        })
        .collect::<Vec<_>>();

    let panel_style = popup_panel_style(theme);
    let list = List::new(items)
        .style(panel_style)
        .block(popup_block("Select location 1-5", theme, panel_style))
        .highlight_style(Style::default().fg(theme.accent));

    frame.render_widget(list, area);
}
