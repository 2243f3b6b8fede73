use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};

use crate::{
    app::state::AppState,
    cli::Cli,
    domain::chart::{HourlyChart, Viewport, hourly_chart, temp_color},
    ui::{theme::Theme, widgets::panel},
};

const VIEW: Viewport = Viewport::HOURLY;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, _cli: &Cli, theme: &Theme) {
    let block = panel("Next 24 Hours", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 || inner.width < 10 {
        return;
    }

    let chart = state
        .dashboard
        .as_ref()
        .and_then(|d| hourly_chart(&d.hourly));
    let Some(chart) = chart else {
        if state.dashboard.is_some() {
            frame.render_widget(
                Paragraph::new("No hourly data").style(Style::default().fg(theme.muted_text)),
                inner,
            );
        }
        return;
    };

    let theme = *theme;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, VIEW.width])
        .y_bounds([0.0, VIEW.height])
        .background_color(theme.surface)
        .paint(move |ctx| {
            draw_area(ctx, &chart, &theme);
            ctx.layer();
            draw_outline(ctx, &chart, &theme);
            draw_labels(ctx, &chart, &theme);
        });
    frame.render_widget(canvas, inner);
}

/// Surface y (down) to canvas y (up).
fn flip(y: f64) -> f64 {
    VIEW.height - y
}

fn draw_area(ctx: &mut Context<'_>, chart: &HourlyChart, theme: &Theme) {
    let baseline = flip(VIEW.baseline());
    for point in &chart.points {
        let (x, y) = VIEW.project(point.x, point.y);
        ctx.draw(&CanvasLine {
            x1: x,
            y1: baseline,
            x2: x,
            y2: flip(y),
            color: theme.track,
        });
    }
}

fn draw_outline(ctx: &mut Context<'_>, chart: &HourlyChart, theme: &Theme) {
    for pair in chart.points.windows(2) {
        let (x1, y1) = VIEW.project(pair[0].x, pair[0].y);
        let (x2, y2) = VIEW.project(pair[1].x, pair[1].y);
        let warmer = pair[0].temperature.max(pair[1].temperature);
        ctx.draw(&CanvasLine {
            x1,
            y1: flip(y1),
            x2,
            y2: flip(y2),
            color: theme.chart_color(temp_color(warmer, chart.range)),
        });
    }
}

fn draw_labels(ctx: &mut Context<'_>, chart: &HourlyChart, theme: &Theme) {
    let baseline = VIEW.baseline();
    for (point, label) in chart.labelled_points() {
        let (x, y) = VIEW.project(point.x, point.y);
        // Keep the last label inside the right edge.
        let x = x.min(VIEW.width - VIEW.pad_right * 4.0);
        ctx.print(
            x,
            flip((y - 12.0).max(0.0)),
            Span::styled(
                label.temperature.clone(),
                Style::default()
                    .fg(theme.chart_color(temp_color(point.temperature, chart.range)))
                    .add_modifier(Modifier::BOLD),
            ),
        );
        ctx.print(
            x,
            flip(baseline + 14.0),
            Span::styled(label.time.clone(), Style::default().fg(theme.muted_text)),
        );
        if let Some(precipitation) = &label.precipitation {
            ctx.print(
                x,
                flip(baseline + 30.0),
                Span::styled(precipitation.clone(), Style::default().fg(theme.rain)),
            );
        }
    }
}
