#![allow(clippy::cast_precision_loss)]

//! Chart geometry for the weekly temperature-range pills and the hourly
//! temperature line.
//!
//! Everything here works in unit fractions of a chart track; the renderer
//! decides how many cells or pixels a track spans.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::forecast::{DaySummary, ForecastPeriod};

/// Smallest bar length, as a share of the track, for horizontal pills.
pub const MIN_VISIBLE_WIDTH: f64 = 0.03;
/// Vertical tracks are shorter, so their pills need a larger floor.
pub const MIN_VISIBLE_HEIGHT: f64 = 0.05;
/// Hours of hourly data the time-series chart covers.
pub const HOURLY_WINDOW: usize = 24;
/// Every n-th hourly sample carries text labels.
pub const HOURLY_LABEL_STRIDE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const COLD: Rgb = Rgb::new(109, 179, 242);
pub const WARM: Rgb = Rgb::new(242, 136, 109);

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear blend; `ratio` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, ratio: f64) -> Self {
        let t = if ratio.is_nan() {
            0.5
        } else {
            ratio.clamp(0.0, 1.0)
        };
        let channel = |a: u8, b: u8| {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

/// Inclusive temperature bounds shared by every bar of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempRange {
    pub min: i32,
    pub max: i32,
}

impl TempRange {
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Option<Self> {
        values.into_iter().fold(None, |acc, value| match acc {
            None => Some(Self {
                min: value,
                max: value,
            }),
            Some(range) => Some(Self {
                min: range.min.min(value),
                max: range.max.max(value),
            }),
        })
    }

    #[must_use]
    pub fn is_flat(self) -> bool {
        self.min == self.max
    }

    /// Denominator for position math; 1 for a flat range.
    #[must_use]
    pub fn span(self) -> f64 {
        if self.is_flat() {
            1.0
        } else {
            f64::from(self.max) - f64::from(self.min)
        }
    }

    #[must_use]
    pub fn fraction(self, temp: i32) -> f64 {
        (f64::from(temp) - f64::from(self.min)) / self.span()
    }

    /// Position on the cold-to-warm gradient; the midpoint for a flat range.
    #[must_use]
    pub fn color_ratio(self, temp: i32) -> f64 {
        if self.is_flat() {
            0.5
        } else {
            self.fraction(temp).clamp(0.0, 1.0)
        }
    }
}

/// Bounds over every known high and low of the week.
#[must_use]
pub fn temp_range(days: &[DaySummary]) -> Option<TempRange> {
    TempRange::from_values(days.iter().flat_map(|d| [d.high, d.low]).flatten())
}

#[must_use]
pub fn temp_color(temp: i32, range: TempRange) -> Rgb {
    COLD.lerp(WARM, range.color_ratio(temp))
}

#[must_use]
pub fn degrees_label(temp: i32) -> String {
    format!("{temp}°")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChartOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl ChartOrientation {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    #[must_use]
    pub fn min_visible_extent(self) -> f64 {
        match self {
            Self::Horizontal => MIN_VISIBLE_WIDTH,
            Self::Vertical => MIN_VISIBLE_HEIGHT,
        }
    }
}

/// A value placed along one chart axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub position: f64,
    pub color: Rgb,
    pub label: String,
}

/// One day's pill. `start` is the left edge (horizontal) or bottom edge
/// (vertical) of the bar; `extent` is its width or height.
///
/// `start` is the low's fraction of the week's range, clamped to
/// `1.0 - extent` so a bar widened to the minimum visible size still ends
/// inside the track. `low.position` keeps the unclamped fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct PillBar {
    pub day_label: String,
    pub is_today: bool,
    pub start: f64,
    pub extent: f64,
    pub low: ChartPoint,
    pub high: ChartPoint,
    pub condition: String,
    pub is_daytime: bool,
    pub precipitation_chance: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PillChart {
    pub orientation: ChartOrientation,
    pub range: TempRange,
    pub bars: Vec<PillBar>,
}

/// Lays out the weekly pills. `None` when there is nothing to draw.
#[must_use]
pub fn pill_chart(days: &[DaySummary], orientation: ChartOrientation) -> Option<PillChart> {
    let range = temp_range(days)?;
    let bars = days
        .iter()
        .filter_map(|day| pill_bar(day, range, orientation))
        .collect::<Vec<_>>();
    if bars.is_empty() {
        return None;
    }
    Some(PillChart {
        orientation,
        range,
        bars,
    })
}

fn pill_bar(day: &DaySummary, range: TempRange, orientation: ChartOrientation) -> Option<PillBar> {
    let (low, high) = day.bounds()?;
    let extent = ((f64::from(high) - f64::from(low)) / range.span())
        .max(orientation.min_visible_extent())
        .min(1.0);
    let start = range.fraction(low).clamp(0.0, 1.0 - extent);

    Some(PillBar {
        day_label: day.label.clone(),
        is_today: day.is_today,
        start,
        extent,
        low: ChartPoint {
            position: range.fraction(low),
            color: temp_color(low, range),
            label: degrees_label(low),
        },
        high: ChartPoint {
            position: range.fraction(high),
            color: temp_color(high, range),
            label: degrees_label(high),
        },
        condition: day.condition.clone(),
        is_daytime: day.is_daytime,
        precipitation_chance: day.precipitation_chance,
    })
}

/// Colour at a position along a pill, blending its two end colours.
#[must_use]
pub fn pill_gradient(bar: &PillBar, along: f64) -> Rgb {
    bar.low.color.lerp(bar.high.color, along)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPoint {
    /// 0 at the first sample, 1 at the last.
    pub x: f64,
    /// 0 at the top of the chart (warmest), 1 at the bottom (coldest).
    pub y: f64,
    pub temperature: i32,
    pub precipitation_chance: u8,
    pub time: DateTime<FixedOffset>,
    pub condition: String,
    pub is_daytime: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyLabel {
    pub index: usize,
    pub time: String,
    pub temperature: String,
    pub precipitation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyChart {
    pub range: TempRange,
    pub points: Vec<HourlyPoint>,
    pub labels: Vec<HourlyLabel>,
}

impl HourlyChart {
    /// Polyline through every sample.
    #[must_use]
    pub fn outline(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    /// Closed polygon: the outline followed by the baseline back to the start.
    #[must_use]
    pub fn area(&self) -> Vec<(f64, f64)> {
        let mut polygon = self.outline();
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            polygon.push((last.x, 1.0));
            polygon.push((first.x, 1.0));
        }
        polygon
    }

    #[must_use]
    pub fn labelled_points(&self) -> impl Iterator<Item = (&HourlyPoint, &HourlyLabel)> {
        self.labels
            .iter()
            .filter_map(|label| self.points.get(label.index).map(|point| (point, label)))
    }
}

/// Lays out the next day of hourly samples. Samples are spaced evenly by
/// index rather than by timestamp. `None` when fewer than two samples exist.
#[must_use]
pub fn hourly_chart(periods: &[ForecastPeriod]) -> Option<HourlyChart> {
    let window = &periods[..periods.len().min(HOURLY_WINDOW)];
    if window.len() < 2 {
        return None;
    }
    let range = TempRange::from_values(window.iter().map(|p| p.temperature))?;
    let last_index = (window.len() - 1) as f64;

    let points = window
        .iter()
        .enumerate()
        .map(|(idx, period)| HourlyPoint {
            x: idx as f64 / last_index,
            y: 1.0 - range.fraction(period.temperature),
            temperature: period.temperature,
            precipitation_chance: period.precipitation_chance.unwrap_or(0),
            time: period.start_time,
            condition: period.short_forecast.clone(),
            is_daytime: period.is_daytime,
        })
        .collect::<Vec<_>>();

    let labels = points
        .iter()
        .enumerate()
        .step_by(HOURLY_LABEL_STRIDE)
        .map(|(idx, point)| HourlyLabel {
            index: idx,
            time: if idx == 0 {
                "Now".to_string()
            } else {
                short_hour_label(&point.time)
            },
            temperature: degrees_label(point.temperature),
            precipitation: (point.precipitation_chance > 0)
                .then(|| format!("{}%", point.precipitation_chance)),
        })
        .collect();

    Some(HourlyChart {
        range,
        points,
        labels,
    })
}

/// Compact hour such as `3p` or `12a`.
#[must_use]
pub fn short_hour_label(time: &DateTime<FixedOffset>) -> String {
    let hour = time.hour();
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    let suffix = if hour < 12 { 'a' } else { 'p' };
    format!("{display}{suffix}")
}

/// A drawing surface with padding; maps chart fractions onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
    pub pad_left: f64,
    pub pad_right: f64,
}

impl Viewport {
    /// The hourly chart's reference surface.
    pub const HOURLY: Self = Self {
        width: 560.0,
        height: 120.0,
        pad_top: 22.0,
        pad_bottom: 40.0,
        pad_left: 8.0,
        pad_right: 8.0,
    };

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        (self.width - self.pad_left - self.pad_right).max(0.0)
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.height - self.pad_top - self.pad_bottom).max(0.0)
    }

    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.pad_top + self.plot_height()
    }

    /// Fractions to surface coordinates, y growing downward.
    #[must_use]
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.pad_left + x * self.plot_width(),
            self.pad_top + y * self.plot_height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(label: &str, high: Option<i32>, low: Option<i32>) -> DaySummary {
        DaySummary {
            label: label.to_string(),
            high,
            low,
            is_today: label == "Today",
            condition: "Sunny".to_string(),
            is_daytime: true,
            precipitation_chance: 0,
        }
    }

    fn hour(offset: i64, temperature: i32, precip: Option<u8>) -> ForecastPeriod {
        let base = DateTime::parse_from_rfc3339("2024-06-21T14:00:00-04:00").expect("valid time");
        ForecastPeriod {
            name: String::new(),
            start_time: base + chrono::Duration::hours(offset),
            is_daytime: true,
            temperature,
            short_forecast: "Sunny".to_string(),
            precipitation_chance: precip,
        }
    }

    #[test]
    fn color_endpoints_and_midpoint() {
        assert_eq!(COLD.lerp(WARM, 0.0), COLD);
        assert_eq!(COLD.lerp(WARM, 1.0), WARM);
        // (109+242)/2 = 175.5, (179+136)/2 = 157.5, (242+109)/2 = 175.5
        assert_eq!(COLD.lerp(WARM, 0.5), Rgb::new(176, 158, 176));
    }

    #[test]
    fn temp_color_uses_range_and_clamps() {
        let range = TempRange { min: 50, max: 80 };
        assert_eq!(temp_color(50, range), COLD);
        assert_eq!(temp_color(80, range), WARM);
        assert_eq!(temp_color(20, range), COLD);
        assert_eq!(temp_color(99, range), WARM);
    }

    #[test]
    fn flat_range_uses_midpoint_color_and_unit_span() {
        let range = TempRange { min: 70, max: 70 };
        assert_eq!(range.span(), 1.0);
        assert_eq!(temp_color(70, range), COLD.lerp(WARM, 0.5));
    }

    #[test]
    fn temp_range_ignores_missing_values() {
        let days = vec![day("Tonight", None, Some(48)), day("Tue", Some(75), Some(55))];
        assert_eq!(temp_range(&days), Some(TempRange { min: 48, max: 75 }));
        assert_eq!(temp_range(&[]), None);
    }

    #[test]
    fn horizontal_pills_map_low_and_span() {
        let days = vec![day("Today", Some(70), Some(50)), day("Tue", Some(80), Some(60))];
        let chart = pill_chart(&days, ChartOrientation::Horizontal).expect("chart");
        assert_eq!(chart.range, TempRange { min: 50, max: 80 });

        let today = &chart.bars[0];
        assert_eq!(today.start, 0.0);
        assert!((today.extent - 20.0 / 30.0).abs() < 1e-9);
        assert_eq!(today.low.color, COLD);
        assert_eq!(today.low.label, "50°");
        assert_eq!(today.high.label, "70°");

        let tuesday = &chart.bars[1];
        assert!((tuesday.start - 10.0 / 30.0).abs() < 1e-9);
        assert_eq!(tuesday.high.color, WARM);
    }

    #[test]
    fn zero_width_pills_stay_visible() {
        let days = vec![day("Today", Some(70), Some(50)), day("Tue", Some(60), Some(60))];
        let horizontal = pill_chart(&days, ChartOrientation::Horizontal).expect("chart");
        assert_eq!(horizontal.bars[1].extent, MIN_VISIBLE_WIDTH);
        let vertical = pill_chart(&days, ChartOrientation::Vertical).expect("chart");
        assert_eq!(vertical.bars[1].extent, MIN_VISIBLE_HEIGHT);
    }

    #[test]
    fn all_equal_temperatures_produce_finite_positions() {
        let days = (0..7)
            .map(|idx| day(&format!("D{idx}"), Some(70), Some(70)))
            .collect::<Vec<_>>();
        for orientation in [ChartOrientation::Horizontal, ChartOrientation::Vertical] {
            let chart = pill_chart(&days, orientation).expect("chart");
            for bar in &chart.bars {
                assert!(bar.start.is_finite() && bar.extent.is_finite());
                assert!(bar.start >= 0.0 && bar.start + bar.extent <= 1.0);
                assert_eq!(bar.extent, orientation.min_visible_extent());
            }
        }
    }

    #[test]
    fn pill_at_the_top_is_pulled_back_into_the_track() {
        let days = vec![day("Today", Some(70), Some(50)), day("Tue", Some(70), Some(70))];
        let chart = pill_chart(&days, ChartOrientation::Vertical).expect("chart");
        let bar = &chart.bars[1];
        assert!((bar.start + bar.extent - 1.0).abs() < 1e-9);
        assert_eq!(bar.high.position, 1.0);
    }

    #[test]
    fn extreme_temperatures_do_not_overflow() {
        let days = vec![
            day("Today", Some(i32::MAX), Some(i32::MIN)),
            day("Tue", Some(i32::MIN), Some(i32::MIN)),
        ];
        for orientation in [ChartOrientation::Horizontal, ChartOrientation::Vertical] {
            let chart = pill_chart(&days, orientation).expect("chart");
            let wide = &chart.bars[0];
            assert_eq!(wide.start, 0.0);
            assert_eq!(wide.extent, 1.0);
            let narrow = &chart.bars[1];
            assert_eq!(narrow.start, 0.0);
            assert_eq!(narrow.extent, orientation.min_visible_extent());
        }
    }

    #[test]
    fn empty_week_has_no_chart() {
        assert!(pill_chart(&[], ChartOrientation::Horizontal).is_none());
    }

    #[test]
    fn low_only_day_draws_as_single_value() {
        let days = vec![day("Tonight", None, Some(55))];
        let chart = pill_chart(&days, ChartOrientation::Horizontal).expect("chart");
        assert_eq!(chart.bars[0].low.label, "55°");
        assert_eq!(chart.bars[0].high.label, "55°");
    }

    #[test]
    fn pill_gradient_runs_from_low_to_high_color() {
        let days = vec![day("Today", Some(80), Some(50))];
        let chart = pill_chart(&days, ChartOrientation::Horizontal).expect("chart");
        let bar = &chart.bars[0];
        assert_eq!(pill_gradient(bar, 0.0), COLD);
        assert_eq!(pill_gradient(bar, 1.0), WARM);
    }

    #[test]
    fn hourly_chart_needs_two_samples() {
        assert!(hourly_chart(&[]).is_none());
        assert!(hourly_chart(&[hour(0, 70, None)]).is_none());
        assert!(hourly_chart(&[hour(0, 70, None), hour(1, 71, None)]).is_some());
    }

    #[test]
    fn hourly_chart_spaces_by_index_and_inverts_y() {
        let periods = vec![hour(0, 60, None), hour(1, 70, None), hour(2, 80, None)];
        let chart = hourly_chart(&periods).expect("chart");
        let xs = chart.points.iter().map(|p| p.x).collect::<Vec<_>>();
        assert_eq!(xs, vec![0.0, 0.5, 1.0]);
        assert_eq!(chart.points[0].y, 1.0);
        assert_eq!(chart.points[1].y, 0.5);
        assert_eq!(chart.points[2].y, 0.0);
    }

    #[test]
    fn hourly_chart_truncates_to_a_day() {
        let periods = (0..48).map(|h| hour(h, 60 + (h % 5) as i32, None)).collect::<Vec<_>>();
        let chart = hourly_chart(&periods).expect("chart");
        assert_eq!(chart.points.len(), HOURLY_WINDOW);
        assert_eq!(chart.labels.len(), HOURLY_WINDOW / HOURLY_LABEL_STRIDE);
        assert_eq!(chart.points.last().map(|p| p.x), Some(1.0));
    }

    #[test]
    fn hourly_labels_every_third_sample_with_now_first() {
        let periods = (0..7)
            .map(|h| hour(h, 70, if h == 3 { Some(40) } else { Some(0) }))
            .collect::<Vec<_>>();
        let chart = hourly_chart(&periods).expect("chart");
        let indices = chart.labels.iter().map(|l| l.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 3, 6]);
        assert_eq!(chart.labels[0].time, "Now");
        assert_eq!(chart.labels[1].time, "5p");
        assert_eq!(chart.labels[2].time, "8p");
        assert_eq!(chart.labels[0].precipitation, None);
        assert_eq!(chart.labels[1].precipitation.as_deref(), Some("40%"));
        assert_eq!(chart.labels[1].temperature, "70°");
    }

    #[test]
    fn flat_hourly_series_sits_on_the_baseline() {
        let periods = (0..4).map(|h| hour(h, 65, None)).collect::<Vec<_>>();
        let chart = hourly_chart(&periods).expect("chart");
        assert!(chart.points.iter().all(|p| p.y == 1.0));
    }

    #[test]
    fn area_closes_along_the_baseline() {
        let periods = vec![hour(0, 60, None), hour(1, 80, None)];
        let chart = hourly_chart(&periods).expect("chart");
        let area = chart.area();
        assert_eq!(area.len(), 4);
        assert_eq!(area[2], (1.0, 1.0));
        assert_eq!(area[3], (0.0, 1.0));
    }

    #[test]
    fn short_hour_label_covers_midnight_and_noon() {
        let midnight = DateTime::parse_from_rfc3339("2024-06-21T00:00:00-04:00").expect("time");
        let noon = DateTime::parse_from_rfc3339("2024-06-21T12:00:00-04:00").expect("time");
        assert_eq!(short_hour_label(&midnight), "12a");
        assert_eq!(short_hour_label(&noon), "12p");
    }

    #[test]
    fn viewport_projects_into_padded_area() {
        let viewport = Viewport::HOURLY;
        assert_eq!(viewport.project(0.0, 0.0), (8.0, 22.0));
        assert_eq!(viewport.project(1.0, 1.0), (552.0, 80.0));
        assert_eq!(viewport.baseline(), 80.0);
    }
}
