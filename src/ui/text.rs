//! Plain-text rendering of a dashboard for `--one-shot`.

use chrono::{DateTime, Offset, Timelike, Utc};

use crate::{
    cli::IconMode,
    domain::{
        alerts::sorted_by_severity,
        chart::hourly_chart,
        conditions::{condition_glyph, raindrop_glyph},
        forecast::bucket_days,
        sun::{SunTimes, compute_sun_times, format_sun_time},
        weather::{Dashboard, PLACEHOLDER, is_daytime_hour},
    },
};

#[must_use]
pub fn report(dashboard: &Dashboard, now: DateTime<Utc>, icons: IconMode) -> String {
    let offset = dashboard.local_offset().unwrap_or_else(|| Utc.fix());
    let local_now = now.with_timezone(&offset);
    let observation = &dashboard.observation;

    let mut lines = vec![format!(
        "{}  (updated {})",
        dashboard.location.display_name(),
        dashboard.fetched_at.with_timezone(&offset).format("%-I:%M %p")
    )];

    let daytime = is_daytime_hour(local_now.hour());
    let mut now_line = format!(
        "Now: {} {}  {}",
        condition_glyph(&observation.text_description, daytime, icons),
        observation.temperature_label(),
        observation.text_description
    );
    if let Some(feels) = observation.feels_like_label() {
        now_line.push_str(&format!("  (feels like {feels})"));
    }
    lines.push(now_line);

    let (high, low) = dashboard.high_low();
    let degrees = |t: Option<i32>| t.map_or_else(|| PLACEHOLDER.to_string(), |t| format!("{t}°"));
    lines.push(format!(
        "High {} · Low {} · Humidity {} · Dew Point {}",
        degrees(high),
        degrees(low),
        observation.humidity_label(),
        observation.dewpoint_label()
    ));
    lines.push(format!(
        "Wind {} · Pressure {} · Visibility {}",
        observation.wind_label(),
        observation.pressure_label(),
        observation.visibility_label()
    ));

    let sun = compute_sun_times(
        dashboard.location.latitude,
        dashboard.location.longitude,
        &local_now,
    );
    lines.push(match sun {
        SunTimes::PolarDay => "Polar day: the sun does not set today".to_string(),
        SunTimes::PolarNight => "Polar night: the sun does not rise today".to_string(),
        _ => format!(
            "Sunrise {} · Sunset {}",
            format_sun_time(sun.sunrise()),
            format_sun_time(sun.sunset())
        ),
    });

    if let Some(chart) = hourly_chart(&dashboard.hourly) {
        lines.push(String::new());
        lines.push("Next 24 hours".to_string());
        for (_, label) in chart.labelled_points() {
            let mut row = format!("  {:<4} {:>4}", label.time, label.temperature);
            if let Some(precipitation) = &label.precipitation {
                row.push_str(&format!("  {}{precipitation}", raindrop_glyph(icons)));
            }
            lines.push(row);
        }
    }

    let days = bucket_days(&dashboard.forecast);
    if !days.is_empty() {
        lines.push(String::new());
        lines.push("7-day forecast".to_string());
        for day in &days {
            let range = match day.bounds() {
                Some((low, high)) => format!("{low:>4}° – {high}°"),
                None => PLACEHOLDER.to_string(),
            };
            let mut row = format!(
                "  {:<6} {} {range}  {}",
                day.label,
                condition_glyph(&day.condition, day.is_daytime, icons),
                day.condition
            );
            if day.precipitation_chance > 0 {
                row.push_str(&format!("  {}%", day.precipitation_chance));
            }
            lines.push(row);
        }
    }

    if !dashboard.alerts.is_empty() {
        lines.push(String::new());
        lines.push("Alerts".to_string());
        for alert in sorted_by_severity(&dashboard.alerts) {
            lines.push(format!(
                "  ⚠ {} [{}] {}",
                alert.event,
                alert.severity.label(),
                alert.headline
            ));
        }
    }

    lines.join("\n")
}
