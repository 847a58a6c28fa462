//! Weekday arithmetic, seconds-of-day interval overlap, and instant derivation.
//!
//! All instants are naive/local by contract (`chrono::NaiveDateTime`); the
//! caller owns any time-zone decision.

use chrono::{Datelike, Duration, NaiveDateTime};

use crate::domain::ShiftTemplate;
use crate::options::WeekdayOrigin;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// True iff `[aStart, aStart+aDur)` and `[bStart, bStart+bDur)` overlap, both
/// measured in seconds on the same day.
pub fn overlap(a_start: i64, a_dur: i64, b_start: i64, b_dur: i64) -> bool {
    a_start.max(b_start) < (a_start + a_dur).min(b_start + b_dur)
}

/// The amount of a `[start, start+dur)` interval that spills past midnight
/// of the day it starts on, at spillover offset `j` (`j = 1` is the
/// immediately following day).
pub fn spillover_at(start: i64, dur: i64, j: i64) -> i64 {
    (start + dur - j * SECONDS_PER_DAY).max(0)
}

/// The amount of template A that extends into the following calendar day.
pub fn spillover(start: i64, dur: i64) -> i64 {
    spillover_at(start, dur, 1)
}

/// `(w + 1) mod 7`, with weekdays encoded `0 = Sunday .. 6 = Saturday`.
pub fn next_weekday(w: u8) -> u8 {
    (w + 1) % 7
}

/// Weekday `w` shifted forward by `j` days, wrapping through the week.
pub fn weekday_plus(w: u8, j: i64) -> u8 {
    (((w as i64 + j) % 7 + 7) % 7) as u8
}

/// Wall-clock `[start, end)` of the occurrence of `template` on day
/// `day_index` of a window starting at `window_start`.
pub fn instant_of(
    window_start: NaiveDateTime,
    day_index: i64,
    template: &ShiftTemplate,
) -> (NaiveDateTime, NaiveDateTime) {
    let start = window_start
        + Duration::days(day_index)
        + Duration::seconds(template.start_of_day_seconds);
    let end = start + Duration::seconds(template.duration_seconds);
    (start, end)
}

/// Weekday-of-day-index, given the weekday of day `0`.
pub fn weekday_of_day(window_start_weekday: u8, day_index: i64) -> u8 {
    weekday_plus(window_start_weekday, day_index)
}

/// The `[0, 7)` weekday index of `instant`, under `origin`. This is the only
/// place the `weekday_origin` option takes effect: it picks which real-world
/// day maps to bit `0` of a [`ShiftTemplate::weekdays`] mask — the mask
/// arithmetic itself is always the fixed `0..7` encoding from `spec.md` §3.
pub fn weekday_index(instant: NaiveDateTime, origin: WeekdayOrigin) -> u8 {
    match origin {
        WeekdayOrigin::Sunday => instant.weekday().num_days_from_sunday() as u8,
        WeekdayOrigin::Monday => instant.weekday().num_days_from_monday() as u8,
    }
}
