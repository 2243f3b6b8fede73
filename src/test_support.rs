use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use clap::Parser;

use crate::{
    cli::Cli,
    domain::{
        alerts::Alert,
        forecast::ForecastPeriod,
        weather::{CurrentObservation, Dashboard, Location, QuantitativeValue},
    },
};

pub(crate) fn test_cli() -> Cli {
    Cli::parse_from([
        "skycast",
        "--lat",
        "40.7128",
        "--lon",
        "-74.006",
        "--api-url",
        "http://127.0.0.1:9",
    ])
}

pub(crate) fn nyc_location() -> Location {
    Location::from_coords(40.7128, -74.006)
        .with_place(Some("New York".to_string()), Some("NY".to_string()))
}

fn eastern() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).expect("valid offset")
}

fn start() -> DateTime<FixedOffset> {
    eastern()
        .with_ymd_and_hms(2024, 6, 21, 6, 0, 0)
        .single()
        .expect("valid fixture start")
}

pub(crate) fn fixture_forecast() -> Vec<ForecastPeriod> {
    (0..14)
        .map(|idx: i32| {
            let is_daytime = idx % 2 == 0;
            let day = idx / 2;
            ForecastPeriod {
                name: if is_daytime {
                    format!("Day {day}")
                } else {
                    format!("Day {day} Night")
                },
                start_time: start() + Duration::hours(i64::from(idx) * 12),
                is_daytime,
                temperature: if is_daytime { 78 + day } else { 60 + day },
                short_forecast: if day % 3 == 1 {
                    "Chance Showers".to_string()
                } else {
                    "Sunny".to_string()
                },
                precipitation_chance: (day % 3 == 1).then_some(40),
            }
        })
        .collect()
}

pub(crate) fn fixture_hourly() -> Vec<ForecastPeriod> {
    (0..30)
        .map(|idx: i32| {
            let time = start() + Duration::hours(i64::from(idx) + 8);
            ForecastPeriod {
                name: String::new(),
                start_time: time,
                is_daytime: (6..20).contains(&((idx + 14) % 24)),
                temperature: 70 + (idx % 12) - (idx % 5),
                short_forecast: "Partly Cloudy".to_string(),
                precipitation_chance: Some(u8::try_from(idx * 3).unwrap_or(100)),
            }
        })
        .collect()
}

pub(crate) fn fixture_observation() -> CurrentObservation {
    CurrentObservation {
        station: "KNYC".to_string(),
        text_description: "Mostly Sunny".to_string(),
        timestamp: Some(Utc::now()),
        temperature: QuantitativeValue::new(Some(25.0), "wmoUnit:degC"),
        dewpoint: QuantitativeValue::new(Some(15.0), "wmoUnit:degC"),
        heat_index: QuantitativeValue::new(Some(26.0), "wmoUnit:degC"),
        relative_humidity: QuantitativeValue::new(Some(55.0), "wmoUnit:percent"),
        wind_speed: QuantitativeValue::new(Some(14.4), "wmoUnit:km_h-1"),
        wind_direction: QuantitativeValue::new(Some(225.0), "wmoUnit:degree_(angle)"),
        barometric_pressure: QuantitativeValue::new(Some(101_325.0), "wmoUnit:Pa"),
        visibility: QuantitativeValue::new(Some(16_093.4), "wmoUnit:m"),
        ..CurrentObservation::default()
    }
}

pub(crate) fn fixture_dashboard() -> Dashboard {
    Dashboard {
        location: nyc_location(),
        observation: fixture_observation(),
        forecast: fixture_forecast(),
        hourly: fixture_hourly(),
        alerts: vec![Alert::new(
            Some("Heat Advisory".to_string()),
            Some("Heat Advisory in effect until 8 PM".to_string()),
            Some("Heat index values up to 105 expected.".to_string()),
            Some("Moderate"),
        )],
        fetched_at: Utc::now(),
    }
}
