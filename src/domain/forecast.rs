use chrono::{DateTime, FixedOffset};

/// Most summaries the weekly chart shows.
pub const MAX_DAYS: usize = 7;

/// One forecast period as published by the forecast service, either a
/// daytime or an overnight block (or one hour, for the hourly feed).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub is_daytime: bool,
    /// Degrees Fahrenheit.
    pub temperature: i32,
    pub short_forecast: String,
    pub precipitation_chance: Option<u8>,
}

impl ForecastPeriod {
    fn precipitation_or_zero(&self) -> u8 {
        self.precipitation_chance.unwrap_or(0)
    }
}

/// A calendar day's high/low pair, ready for charting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub label: String,
    pub high: Option<i32>,
    pub low: Option<i32>,
    pub is_today: bool,
    pub condition: String,
    pub is_daytime: bool,
    pub precipitation_chance: u8,
}

impl DaySummary {
    /// Low and high with each side falling back to the other.
    #[must_use]
    pub fn bounds(&self) -> Option<(i32, i32)> {
        let low = self.low.or(self.high)?;
        let high = self.high.or(self.low)?;
        Some((low, high))
    }
}

/// Folds a chronological list of day/night periods into at most
/// [`MAX_DAYS`] day summaries.
///
/// A series that starts overnight yields a leading low-only summary for the
/// remainder of tonight. Day periods pair with the night period that follows
/// them; a day without a night partner reports its own temperature as the low.
#[must_use]
pub fn bucket_days(periods: &[ForecastPeriod]) -> Vec<DaySummary> {
    let mut days = Vec::with_capacity(MAX_DAYS);
    let mut cursor = 0;

    if let Some(first) = periods.first()
        && !first.is_daytime
    {
        days.push(leading_night(first));
        cursor = 1;
    }

    while cursor < periods.len() && days.len() < MAX_DAYS {
        let day = &periods[cursor];
        let night = periods.get(cursor + 1).filter(|p| !p.is_daytime);
        days.push(paired_day(day, night, days.is_empty()));
        cursor += if night.is_some() { 2 } else { 1 };
    }

    if days.len() > 1
        && let Some(first) = days.first_mut()
        && first.high.is_none()
    {
        first.high = first.low;
    }

    days
}

fn leading_night(period: &ForecastPeriod) -> DaySummary {
    let label = period
        .name
        .strip_suffix(" Night")
        .unwrap_or(&period.name)
        .to_string();
    DaySummary {
        label,
        high: None,
        low: Some(period.temperature),
        is_today: true,
        condition: period.short_forecast.clone(),
        is_daytime: false,
        precipitation_chance: period.precipitation_or_zero(),
    }
}

fn paired_day(day: &ForecastPeriod, night: Option<&ForecastPeriod>, first: bool) -> DaySummary {
    let label = if first {
        "Today".to_string()
    } else {
        weekday_label(&day.start_time)
    };
    let precipitation = night.map_or(day.precipitation_or_zero(), |n| {
        day.precipitation_or_zero().max(n.precipitation_or_zero())
    });

    DaySummary {
        label,
        high: Some(day.temperature),
        low: Some(night.map_or(day.temperature, |n| n.temperature)),
        is_today: first,
        condition: day.short_forecast.clone(),
        is_daytime: true,
        precipitation_chance: precipitation,
    }
}

/// Short weekday name (`Mon`, `Tue`, ...) in the period's own offset.
#[must_use]
pub fn weekday_label(at: &DateTime<FixedOffset>) -> String {
    at.format("%a").to_string()
}

/// Today's high and low: the first daytime and first overnight temperature.
#[must_use]
pub fn today_high_low(periods: &[ForecastPeriod]) -> (Option<i32>, Option<i32>) {
    let high = periods.iter().find(|p| p.is_daytime).map(|p| p.temperature);
    let low = periods.iter().find(|p| !p.is_daytime).map(|p| p.temperature);
    (high, low)
}
