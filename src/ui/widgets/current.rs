#![allow(clippy::cast_precision_loss)]

use chrono::Timelike;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Paragraph, Wrap,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::{
    app::state::{AppMode, AppState},
    cli::Cli,
    domain::{
        conditions::condition_glyph,
        sun::{ClockTime, SunTimes, format_sun_time, sun_arc_point},
        weather::{Dashboard, PLACEHOLDER, is_daytime_hour},
    },
    ui::{theme::Theme, widgets::panel},
};

const ARC_WIDTH: u16 = 22;
const ARC_SAMPLES: usize = 32;
const ARC_BOX: (f64, f64) = (100.0, 50.0);
const HORIZON_Y: f64 = 45.0;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, cli: &Cli, theme: &Theme) {
    let block = panel("Current Conditions", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(dashboard) = state.dashboard.as_ref() else {
        render_placeholder(frame, inner, state, theme);
        return;
    };

    let (text_area, arc_area) = if inner.width >= ARC_WIDTH * 2 + 4 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(24), Constraint::Length(ARC_WIDTH)])
            .split(inner);
        (cols[0], Some(cols[1]))
    } else {
        (inner, None)
    };

    let lines = summary_lines(state, dashboard, cli, theme);
    frame.render_widget(Paragraph::new(lines), text_area);

    if let Some(arc_area) = arc_area {
        render_sun_arc(frame, arc_area, state, theme);
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let lines = if state.mode == AppMode::Error {
        vec![
            Line::from(Span::styled(
                "Unable to load weather data.",
                Style::default().fg(theme.danger).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                state.last_error.clone().unwrap_or_default(),
                Style::default().fg(theme.muted_text),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Retrying automatically. Press r to retry now.",
                Style::default().fg(theme.subtle_text),
            )),
        ]
    } else {
        vec![Line::from(Span::styled(
            state.loading_message.clone(),
            Style::default().fg(theme.muted_text),
        ))]
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn summary_lines(
    state: &AppState,
    dashboard: &Dashboard,
    cli: &Cli,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let observation = &dashboard.observation;
    let daytime = is_daytime_hour(state.local_now().hour());
    let glyph = condition_glyph(&observation.text_description, daytime, cli.icons);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{glyph} "), Style::default().fg(theme.celestial(daytime))),
        Span::styled(
            observation.temperature_label(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", observation.text_description),
            Style::default().fg(theme.muted_text),
        ),
    ])];
    if let Some(feels) = observation.feels_like_label() {
        lines.push(Line::from(Span::styled(
            format!("Feels like {feels}"),
            Style::default().fg(theme.muted_text),
        )));
    }

    let (high, low) = dashboard.high_low();
    let degrees = |t: Option<i32>| t.map_or_else(|| PLACEHOLDER.to_string(), |t| format!("{t}°"));
    let sun = state.sun_times().unwrap_or(SunTimes::Unknown);

    let details = [
        ("High", degrees(high)),
        ("Low", degrees(low)),
        ("Humidity", observation.humidity_label()),
        ("Dew Point", observation.dewpoint_label()),
        ("Wind", observation.wind_label()),
        ("Pressure", observation.pressure_label()),
        ("Visibility", observation.visibility_label()),
        ("Sunrise", sun_label(sun, sun.sunrise())),
        ("Sunset", sun_label(sun, sun.sunset())),
    ];
    lines.extend(details.into_iter().map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("{label:<11}"), Style::default().fg(theme.subtle_text)),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    }));
    lines
}

fn sun_label(sun: SunTimes, time: Option<ClockTime>) -> String {
    match sun {
        SunTimes::PolarDay => "Polar day".to_string(),
        SunTimes::PolarNight => "Polar night".to_string(),
        SunTimes::Crossing { .. } | SunTimes::Unknown => format_sun_time(time),
    }
}

fn render_sun_arc(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let sun = state.sun_times().unwrap_or(SunTimes::Unknown);
    let progress = match sun {
        SunTimes::PolarDay => Some(0.5),
        SunTimes::PolarNight => None,
        _ => state.sun_progress().filter(|p| *p > 0.0 && *p < 1.0),
    };
    let up = progress.is_some();
    let color = theme.celestial(up);
    let track = theme.track;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, ARC_BOX.0])
        .y_bounds([0.0, ARC_BOX.1])
        .background_color(theme.surface)
        .paint(move |ctx| {
            ctx.draw(&CanvasLine {
                x1: 5.0,
                y1: ARC_BOX.1 - HORIZON_Y,
                x2: 95.0,
                y2: ARC_BOX.1 - HORIZON_Y,
                color: track,
            });
            let arc = arc_points();
            for pair in arc.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].0,
                    y1: pair[0].1,
                    x2: pair[1].0,
                    y2: pair[1].1,
                    color,
                });
            }
            if let Some(progress) = progress {
                let (x, y) = sun_arc_point(progress);
                ctx.draw(&Points {
                    coords: &[(x, ARC_BOX.1 - y)],
                    color,
                });
                ctx.print(x, ARC_BOX.1 - y, Span::styled("●", Style::default().fg(color)));
            }
        });
    frame.render_widget(canvas, area);
}

/// The arc sampled into canvas space (y up).
fn arc_points() -> Vec<(f64, f64)> {
    (0..=ARC_SAMPLES)
        .map(|i| {
            let (x, y) = sun_arc_point(i as f64 / ARC_SAMPLES as f64);
            (x, ARC_BOX.1 - y)
        })
        .collect()
}
