use chrono::{DateTime, NaiveDate, Timelike, Utc};

/// Fractional hour of day for a timestamp (hour + minute/60 + second/3600).
///
/// This is the unit the schedule grid works in: 09:30:00 maps to 9.5.
pub fn fractional_hour(dt: DateTime<Utc>) -> f64 {
    dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0
}

/// UTC calendar date of a timestamp.
pub fn utc_day(dt: DateTime<Utc>) -> NaiveDate {
    dt.date_naive()
}

/// Whether a timestamp falls on the given UTC calendar day.
///
/// Day attribution for the schedule grid is by start timestamp only; a
/// booking that crosses midnight belongs to the day it starts on.
pub fn falls_on_day(dt: DateTime<Utc>, day: NaiveDate) -> bool {
    dt.date_naive() == day
}
