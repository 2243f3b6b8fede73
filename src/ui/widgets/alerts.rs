use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::state::AppState,
    domain::alerts::{Alert, AlertSeverity, has_severe, sorted_by_severity},
    ui::theme::Theme,
};

const DETAIL_LINES: u16 = 3;

/// Rows the alerts panel wants; zero hides it.
#[must_use]
pub fn panel_height(alerts: &[Alert], expanded: bool, screen_height: u16) -> u16 {
    if alerts.is_empty() {
        return 0;
    }
    let count = u16::try_from(alerts.len()).unwrap_or(u16::MAX);
    let per_alert = if expanded { 1 + DETAIL_LINES } else { 1 };
    count
        .saturating_mul(per_alert)
        .saturating_add(2)
        .min(screen_height / 3)
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(dashboard) = state.dashboard.as_ref() else {
        return;
    };
    if dashboard.alerts.is_empty() || area.height == 0 {
        return;
    }

    let severe = has_severe(&dashboard.alerts);
    let edge = if severe { theme.danger } else { theme.warning };
    let hint = if state.alerts_expanded {
        "d hide details"
    } else {
        "d details"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!("Active Alerts ({})", dashboard.alerts.len()),
            Style::default().fg(edge).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(hint).right_aligned())
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .border_style(Style::default().fg(edge).bg(theme.surface));

    let mut lines = Vec::new();
    for alert in sorted_by_severity(&dashboard.alerts) {
        let color = severity_color(alert.severity, theme);
        lines.push(Line::from(vec![
            Span::styled(
                format!("⚠ {} ", alert.event),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", alert.severity.label()),
                Style::default().fg(theme.muted_text),
            ),
            Span::styled(alert.headline.clone(), Style::default().fg(theme.text)),
        ]));
        if state.alerts_expanded
            && let Some(description) = &alert.description
        {
            lines.push(Line::from(Span::styled(
                description.replace('\n', " "),
                Style::default().fg(theme.muted_text),
            )));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn severity_color(severity: AlertSeverity, theme: &Theme) -> ratatui::style::Color {
    match severity {
        AlertSeverity::Extreme | AlertSeverity::Severe => theme.danger,
        AlertSeverity::Moderate => theme.warning,
        AlertSeverity::Minor | AlertSeverity::Unknown => theme.muted_text,
    }
}
