//! Sunrise and sunset from latitude, longitude and date.
//!
//! Uses the NOAA low-precision solar position approximation (the "sunrise
//! equation"): mean anomaly, a three-term equation of center, ecliptic
//! longitude, declination and solar transit, then the hour angle at which
//! the sun's upper limb touches a refracted horizon (−0.833°).

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike};

const J2000: f64 = 2_451_545.0;
const OBLIQUITY_DEG: f64 = 23.4397;
const HORIZON_DEG: f64 = -0.833;
const MINUTES_PER_DAY: i64 = 1440;

/// A wall-clock time of day, always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    #[must_use]
    pub fn from_minutes_of_day(minutes: i64) -> Self {
        let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (wrapped / 60) as u8,
            minute: (wrapped % 60) as u8,
        }
    }

    #[must_use]
    pub fn of<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self::new(at.hour() as u8, at.minute() as u8)
    }

    #[must_use]
    pub fn minutes_of_day(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarState {
    /// The sun stays above the horizon all day.
    Day,
    /// The sun stays below the horizon all day.
    Night,
}

/// Outcome of a sunrise/sunset computation.
///
/// Polar conditions are data, not errors. `Unknown` only appears for
/// non-finite inputs where no meaningful answer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunTimes {
    Crossing { sunrise: ClockTime, sunset: ClockTime },
    PolarDay,
    PolarNight,
    Unknown,
}

impl SunTimes {
    #[must_use]
    pub fn sunrise(&self) -> Option<ClockTime> {
        match self {
            Self::Crossing { sunrise, .. } => Some(*sunrise),
            _ => None,
        }
    }

    #[must_use]
    pub fn sunset(&self) -> Option<ClockTime> {
        match self {
            Self::Crossing { sunset, .. } => Some(*sunset),
            _ => None,
        }
    }

    #[must_use]
    pub fn polar_state(&self) -> Option<PolarState> {
        match self {
            Self::PolarDay => Some(PolarState::Day),
            Self::PolarNight => Some(PolarState::Night),
            Self::Crossing { .. } | Self::Unknown => None,
        }
    }
}

/// Integer Julian day number of a Gregorian calendar date (noon-based).
#[must_use]
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let year = i64::from(year);
    let month = i64::from(month);
    let day = i64::from(day);
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

/// Computes sunrise and sunset for the calendar date of `at`, expressed in
/// the UTC offset `at` carries.
pub fn compute_sun_times<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    at: &DateTime<Tz>,
) -> SunTimes {
    let date = at.date_naive();
    let offset_minutes = f64::from(at.offset().fix().local_minus_utc()) / 60.0;

    let jd = julian_day_number(date.year(), date.month(), date.day()) as f64;
    let n = jd - J2000 + 0.0008;
    let j_star = n - longitude / 360.0;

    let mean_anomaly = (357.5291 + 0.985_600_28 * j_star).rem_euclid(360.0);
    let m = mean_anomaly.to_radians();
    let center = 1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin();
    let ecliptic = (mean_anomaly + center + 180.0 + 102.9372).rem_euclid(360.0);
    let lambda = ecliptic.to_radians();

    let declination = (lambda.sin() * OBLIQUITY_DEG.to_radians().sin()).asin();
    let transit = J2000 + j_star + 0.0053 * m.sin() - 0.0069 * (2.0 * lambda).sin();

    let phi = latitude.to_radians();
    let cos_omega = (HORIZON_DEG.to_radians().sin() - phi.sin() * declination.sin())
        / (phi.cos() * declination.cos());

    if cos_omega.is_nan() {
        return SunTimes::Unknown;
    }
    if cos_omega > 1.0 {
        return SunTimes::PolarNight;
    }
    if cos_omega < -1.0 {
        return SunTimes::PolarDay;
    }

    let omega = cos_omega.acos().to_degrees();
    let rise = julian_to_clock(transit - omega / 360.0, offset_minutes);
    let set = julian_to_clock(transit + omega / 360.0, offset_minutes);
    match (rise, set) {
        (Some(sunrise), Some(sunset)) => SunTimes::Crossing { sunrise, sunset },
        _ => SunTimes::Unknown,
    }
}

/// Julian days begin at noon, so the civil fraction of the day is shifted
/// by half a day before scaling to minutes.
fn julian_to_clock(julian: f64, offset_minutes: f64) -> Option<ClockTime> {
    if !julian.is_finite() {
        return None;
    }
    let fraction = (julian.fract() + 0.5).rem_euclid(1.0);
    let local = (fraction * MINUTES_PER_DAY as f64 + offset_minutes).round() as i64;
    Some(ClockTime::from_minutes_of_day(local))
}

/// Twelve-hour rendering such as `5:26 AM`; a dash when there is no time.
#[must_use]
pub fn format_sun_time(time: Option<ClockTime>) -> String {
    let Some(time) = time else {
        return "—".to_string();
    };
    let hour = match time.hour % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if time.hour < 12 { "AM" } else { "PM" };
    format!("{hour}:{:02} {meridiem}", time.minute)
}

/// Fraction of daylight elapsed at `now`.
///
/// Returns 0.5 when either bound is missing, so the sun marker sits at the
/// top of its arc rather than disappearing.
#[must_use]
pub fn day_progress(
    sunrise: Option<ClockTime>,
    sunset: Option<ClockTime>,
    now: ClockTime,
) -> f64 {
    let (Some(sunrise), Some(sunset)) = (sunrise, sunset) else {
        return 0.5;
    };
    let now = f64::from(now.minutes_of_day());
    let rise = f64::from(sunrise.minutes_of_day());
    let set = f64::from(sunset.minutes_of_day());

    if now <= rise {
        return 0.0;
    }
    if now >= set {
        return 1.0;
    }
    (now - rise) / (set - rise)
}

/// Point on the sun arc, a quadratic Bézier from (10, 45) through the
/// control point (50, −10) to (90, 45) inside a 100×50 box, y pointing down.
#[must_use]
pub fn sun_arc_point(progress: f64) -> (f64, f64) {
    const START: (f64, f64) = (10.0, 45.0);
    const CONTROL: (f64, f64) = (50.0, -10.0);
    const END: (f64, f64) = (90.0, 45.0);

    let t = if progress.is_nan() {
        0.5
    } else {
        progress.clamp(0.0, 1.0)
    };
    let u = 1.0 - t;
    let x = u * u * START.0 + 2.0 * u * t * CONTROL.0 + t * t * END.0;
    let y = u * u * START.1 + 2.0 * u * t * CONTROL.1 + t * t * END.1;
    (x, y)
}
