use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::cli::IconMode;

/// Icon families a free-text forecast can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    Fog,
    Wind,
    Haze,
}

#[derive(Debug, Clone, Copy)]
enum Match {
    Fixed(WeatherIcon),
    /// Clear or partly cloudy, depending on the text and time of day.
    Sky,
}

/// Ordered: the first matching pattern wins.
const CONDITION_TABLE: &[(&str, Match)] = &[
    ("thunder", Match::Fixed(WeatherIcon::Thunderstorm)),
    ("hurricane|tropical", Match::Fixed(WeatherIcon::HeavyRain)),
    ("tornado", Match::Fixed(WeatherIcon::Wind)),
    ("blizzard", Match::Fixed(WeatherIcon::Snow)),
    ("ice|freezing rain|sleet", Match::Fixed(WeatherIcon::Sleet)),
    ("snow|flurr", Match::Fixed(WeatherIcon::Snow)),
    ("heavy rain|downpour", Match::Fixed(WeatherIcon::HeavyRain)),
    ("rain|shower|drizzle", Match::Fixed(WeatherIcon::Rain)),
    ("fog|mist", Match::Fixed(WeatherIcon::Fog)),
    ("haze|smoke|dust", Match::Fixed(WeatherIcon::Haze)),
    ("wind|breezy|blustery", Match::Fixed(WeatherIcon::Wind)),
    (
        "partly.*cloud|partly.*sunny|mostly.*sunny|few.*cloud",
        Match::Sky,
    ),
    ("mostly.*cloud|consider.*cloud", Match::Fixed(WeatherIcon::Cloudy)),
    ("cloud|overcast", Match::Fixed(WeatherIcon::Cloudy)),
    ("clear|sunny|fair", Match::Sky),
];

const PARTIAL_SKY: &str = "partly|few|mostly.*sunny";

fn compile(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

fn condition_table() -> &'static [(Regex, Match)] {
    static TABLE: OnceLock<Vec<(Regex, Match)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CONDITION_TABLE
            .iter()
            .filter_map(|(pattern, kind)| compile(pattern).map(|re| (re, *kind)))
            .collect()
    })
}

fn is_partial_sky(text: &str) -> bool {
    static PARTIAL: OnceLock<Option<Regex>> = OnceLock::new();
    PARTIAL
        .get_or_init(|| compile(PARTIAL_SKY))
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Maps a short forecast such as "Chance Rain Showers" to an icon.
/// Unrecognised text falls back to a clear sky.
#[must_use]
pub fn icon_for(short_forecast: &str, is_daytime: bool) -> WeatherIcon {
    let matched = condition_table()
        .iter()
        .find_map(|(re, kind)| re.is_match(short_forecast).then_some(*kind))
        .unwrap_or(Match::Sky);

    match matched {
        Match::Fixed(icon) => icon,
        Match::Sky if is_partial_sky(short_forecast) => {
            if is_daytime {
                WeatherIcon::PartlyCloudyDay
            } else {
                WeatherIcon::PartlyCloudyNight
            }
        }
        Match::Sky => {
            if is_daytime {
                WeatherIcon::ClearDay
            } else {
                WeatherIcon::ClearNight
            }
        }
    }
}

#[must_use]
pub fn icon_glyph(icon: WeatherIcon, mode: IconMode) -> &'static str {
    let (ascii, emoji, unicode) = glyph_tokens(icon);
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}

/// Convenience for widgets: text straight to glyph.
#[must_use]
pub fn condition_glyph(short_forecast: &str, is_daytime: bool, mode: IconMode) -> &'static str {
    icon_glyph(icon_for(short_forecast, is_daytime), mode)
}

#[must_use]
pub fn raindrop_glyph(mode: IconMode) -> &'static str {
    match mode {
        IconMode::Ascii => "*",
        IconMode::Emoji => "💧",
        IconMode::Unicode => "💧",
    }
}

fn glyph_tokens(icon: WeatherIcon) -> (&'static str, &'static str, &'static str) {
    match icon {
        WeatherIcon::ClearDay => ("SUN", "☀️", "☀"),
        WeatherIcon::ClearNight => ("MON", "🌙", "☾"),
        WeatherIcon::PartlyCloudyDay => ("PCD", "⛅", "⛅"),
        WeatherIcon::PartlyCloudyNight => ("PCN", "☁️", "☁"),
        WeatherIcon::Cloudy => ("CLD", "☁️", "☁"),
        WeatherIcon::Rain => ("RAN", "🌧️", "☂"),
        WeatherIcon::HeavyRain => ("HVY", "🌧️", "☔"),
        WeatherIcon::Snow => ("SNW", "🌨️", "❄"),
        WeatherIcon::Sleet => ("SLT", "🌨️", "❅"),
        WeatherIcon::Thunderstorm => ("THN", "⛈️", "⚡"),
        WeatherIcon::Fog => ("FOG", "🌫️", "░"),
        WeatherIcon::Wind => ("WND", "💨", "≋"),
        WeatherIcon::Haze => ("HAZ", "🌫️", "▒"),
    }
}
