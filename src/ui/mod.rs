pub mod text;
pub mod theme;
pub mod widgets;

use chrono::Timelike;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::AppState,
    cli::Cli,
    resilience::freshness::FreshnessState,
    ui::theme::{DayPhase, Theme, detect_color_capability, theme_for},
};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 24;
const TOP_ROW_HEIGHT: u16 = 13;

/// Palette for the forecast location's current hour.
#[must_use]
pub fn session_theme(state: &AppState, cli: &Cli) -> Theme {
    let capability = detect_color_capability(cli.effective_color_mode());
    theme_for(DayPhase::for_hour(state.local_now().hour()), capability)
}

pub fn render(frame: &mut Frame, state: &AppState, cli: &Cli) {
    let area = frame.area();
    let theme = session_theme(state, cli);
    frame.render_widget(
        Block::default().style(Style::default().fg(theme.text).bg(theme.background)),
        area,
    );

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(Block::default().borders(Borders::ALL).title("skycast"));
        frame.render_widget(warning, area);
        return;
    }

    let alerts = state
        .dashboard
        .as_ref()
        .map_or(&[][..], |d| d.alerts.as_slice());
    let alert_height = widgets::alerts::panel_height(alerts, state.alerts_expanded, area.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(alert_height),
            Constraint::Length(TOP_ROW_HEIGHT),
            Constraint::Min(6),
        ])
        .split(area);

    render_header(frame, chunks[0], state, &theme);
    widgets::alerts::render(frame, chunks[1], state, &theme);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    widgets::current::render(frame, top[0], state, cli, &theme);
    widgets::hourly::render(frame, top[1], state, cli, &theme);
    widgets::daily::render(frame, chunks[3], state, cli, &theme);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let place = state
        .location
        .as_ref()
        .map_or_else(|| "Locating...".to_string(), |l| l.display_name());

    let mut spans = vec![
        Span::styled(
            " skycast ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(place, Style::default().fg(theme.text)),
    ];

    if let Some(updated) = updated_label(state) {
        spans.push(Span::styled(
            format!("  {updated}"),
            Style::default().fg(theme.muted_text),
        ));
    }

    if let Some(badge) = state.refresh_meta.state.badge() {
        let color = match state.refresh_meta.state {
            FreshnessState::Offline => theme.danger,
            _ => theme.warning,
        };
        spans.push(Span::styled(
            format!("  ⚠ {badge}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    if state.fetch_in_flight {
        spans.push(Span::styled(
            "  ⟳",
            Style::default().fg(theme.muted_text),
        ));
    }

    let hints = "r refresh · o orientation · d details · q quit ";
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let gap = usize::from(area.width).saturating_sub(used + hints.chars().count());
    if gap > 0 {
        spans.push(Span::raw(" ".repeat(gap)));
        spans.push(Span::styled(hints, Style::default().fg(theme.subtle_text)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface)),
        area,
    );
}

/// `Updated 3:05 PM`, in the forecast location's offset.
#[must_use]
pub fn updated_label(state: &AppState) -> Option<String> {
    let fetched = state.dashboard.as_ref()?.fetched_at;
    let local = fetched.with_timezone(state.local_now().offset());
    Some(format!("Updated {}", local.format("%-I:%M %p")))
}
