#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    cli::{Cli, IconMode},
    domain::{
        chart::{ChartOrientation, PillBar, PillChart, pill_chart, pill_gradient},
        conditions::{condition_glyph, raindrop_glyph},
    },
    ui::{theme::Theme, widgets::panel},
};

const DAY_COL: usize = 6;
const TEMP_COL: usize = 4;
const PRECIP_COL: usize = 6;
const MIN_TRACK: usize = 6;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, cli: &Cli, theme: &Theme) {
    let hint = match state.orientation {
        ChartOrientation::Horizontal => "↕",
        ChartOrientation::Vertical => "↔",
    };
    let block = panel(format!("7-Day Forecast  [o {hint}]"), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if state.dashboard.is_none() || inner.height == 0 {
        return;
    }

    let days = state.days();
    let Some(chart) = pill_chart(&days, state.orientation) else {
        frame.render_widget(
            Paragraph::new("No forecast data available.")
                .style(Style::default().fg(theme.muted_text)),
            inner,
        );
        return;
    };

    let lines = match chart.orientation {
        ChartOrientation::Horizontal => horizontal_lines(&chart, inner, cli.icons, theme),
        ChartOrientation::Vertical => vertical_lines(&chart, inner, cli.icons, theme),
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

/// First filled cell and filled length of a track `width` cells long.
/// At least one cell is always filled.
#[must_use]
pub fn track_cells(start: f64, extent: f64, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let w = width as f64;
    let first = ((start * w).round().max(0.0) as usize).min(width - 1);
    let len = ((extent * w).round().max(1.0) as usize).min(width - first);
    (first, len)
}

fn horizontal_lines(
    chart: &PillChart,
    area: Rect,
    icons: IconMode,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let fixed = DAY_COL + 3 + (TEMP_COL + 1) * 2 + PRECIP_COL;
    let track = usize::from(area.width).saturating_sub(fixed).max(MIN_TRACK);
    let spaced = usize::from(area.height) >= chart.bars.len() * 2;

    let mut lines = Vec::new();
    for bar in chart.bars.iter().take(usize::from(area.height)) {
        let mut spans = vec![
            day_span(bar, DAY_COL, theme),
            Span::styled(
                format!("{} ", condition_glyph(&bar.condition, bar.is_daytime, icons)),
                Style::default().fg(theme.celestial(bar.is_daytime)),
            ),
            Span::styled(
                format!("{:>TEMP_COL$} ", bar.low.label),
                Style::default().fg(theme.chart_color(bar.low.color)),
            ),
        ];

        let (first, len) = track_cells(bar.start, bar.extent, track);
        spans.push(Span::styled(
            "·".repeat(first),
            Style::default().fg(theme.track),
        ));
        spans.extend(gradient_cells(bar, len, theme));
        spans.push(Span::styled(
            "·".repeat(track - first - len),
            Style::default().fg(theme.track),
        ));

        spans.push(Span::styled(
            format!(" {:<TEMP_COL$}", bar.high.label),
            Style::default()
                .fg(theme.chart_color(bar.high.color))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(precip_span(bar, icons, theme));
        lines.push(Line::from(spans));
        if spaced {
            lines.push(Line::from(""));
        }
    }
    lines
}

fn vertical_lines(
    chart: &PillChart,
    area: Rect,
    icons: IconMode,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let count = chart.bars.len().max(1);
    let col = (usize::from(area.width) / count).max(4);
    let track = usize::from(area.height).saturating_sub(5).max(3);
    let bar_width = if col >= 6 { 2 } else { 1 };

    let cells = chart
        .bars
        .iter()
        .map(|bar| track_cells(bar.start, bar.extent, track))
        .collect::<Vec<_>>();

    let mut lines = vec![Line::from(
        chart
            .bars
            .iter()
            .map(|bar| {
                Span::styled(
                    center(&bar.high.label, col),
                    Style::default()
                        .fg(theme.chart_color(bar.high.color))
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect::<Vec<_>>(),
    )];

    // Rows run top to bottom; track cells count up from the bottom.
    for row in (0..track).rev() {
        let spans = chart
            .bars
            .iter()
            .zip(&cells)
            .map(|(bar, &(first, len))| {
                if row >= first && row < first + len {
                    let along = if len > 1 {
                        (row - first) as f64 / (len - 1) as f64
                    } else {
                        0.5
                    };
                    Span::styled(
                        center(&"█".repeat(bar_width), col),
                        Style::default().fg(theme.chart_color(pill_gradient(bar, along))),
                    )
                } else {
                    Span::styled(center("·", col), Style::default().fg(theme.track))
                }
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(
        chart
            .bars
            .iter()
            .map(|bar| {
                Span::styled(
                    center(&bar.low.label, col),
                    Style::default().fg(theme.chart_color(bar.low.color)),
                )
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::from(
        chart
            .bars
            .iter()
            .map(|bar| {
                Span::styled(
                    center(condition_glyph(&bar.condition, bar.is_daytime, icons), col),
                    Style::default().fg(theme.celestial(bar.is_daytime)),
                )
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::from(
        chart
            .bars
            .iter()
            .map(|bar| {
                let text = if bar.precipitation_chance > 0 {
                    format!("{}%", bar.precipitation_chance)
                } else {
                    String::new()
                };
                Span::styled(center(&text, col), Style::default().fg(theme.rain))
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::from(
        chart
            .bars
            .iter()
            .map(|bar| {
                let span = day_span(bar, 0, theme);
                Span::styled(center(&bar.day_label, col), span.style)
            })
            .collect::<Vec<_>>(),
    ));
    lines
}

fn gradient_cells(bar: &PillBar, len: usize, theme: &Theme) -> Vec<Span<'static>> {
    (0..len)
        .map(|i| {
            let along = if len > 1 {
                i as f64 / (len - 1) as f64
            } else {
                0.5
            };
            Span::styled(
                "█",
                Style::default().fg(theme.chart_color(pill_gradient(bar, along))),
            )
        })
        .collect()
}

fn day_span(bar: &PillBar, width: usize, theme: &Theme) -> Span<'static> {
    let style = if bar.is_today {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted_text)
    };
    Span::styled(format!("{:<width$}", bar.day_label), style)
}

fn precip_span(bar: &PillBar, icons: IconMode, theme: &Theme) -> Span<'static> {
    if bar.precipitation_chance == 0 {
        return Span::raw("");
    }
    Span::styled(
        format!(" {}{}%", raindrop_glyph(icons), bar.precipitation_chance),
        Style::default().fg(theme.rain),
    )
}

fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}
