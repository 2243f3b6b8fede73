#![allow(clippy::missing_errors_doc)]

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::chart::ChartOrientation;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IconMode {
    #[default]
    Unicode,
    Ascii,
    Emoji,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OrientationArg {
    Horizontal,
    Vertical,
}

impl From<OrientationArg> for ChartOrientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::Horizontal => Self::Horizontal,
            OrientationArg::Vertical => Self::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for log::LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Off => Self::Off,
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Trace => Self::Trace,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "skycast",
    version,
    about = "Terminal weather dashboard for the US National Weather Service"
)]
pub struct Cli {
    /// Latitude (requires --lon); skips IP geolocation
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Weekly chart orientation for this session (overrides the saved one)
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Icon glyph set
    #[arg(long, value_enum, default_value_t = IconMode::Unicode)]
    pub icons: IconMode,

    /// Color output policy
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, conflicts_with = "no_color")]
    pub color: ColorArg,

    /// Alias for --color never
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(60..))]
    pub refresh_interval: u64,

    /// Weather API base URL
    #[arg(long, default_value = "https://api.weather.gov")]
    pub api_url: String,

    /// Log level for the log file
    #[arg(long, value_enum, default_value_t = LogLevelArg::Info)]
    pub log_level: LogLevelArg,

    /// Print a weather report to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    anyhow::bail!("--lat must be within -90..=90, got {lat}");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    anyhow::bail!("--lon must be within -180..=180, got {lon}");
                }
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    #[must_use]
    pub fn effective_color_mode(&self) -> ColorArg {
        if self.no_color {
            ColorArg::Never
        } else {
            self.color
        }
    }
}
