pub mod alerts;
pub mod current;
pub mod daily;
pub mod hourly;

use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

use crate::ui::theme::Theme;

/// Bordered panel in the session palette.
pub(crate) fn panel<'a>(title: impl Into<ratatui::text::Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .border_style(Style::default().fg(theme.border).bg(theme.surface))
}
