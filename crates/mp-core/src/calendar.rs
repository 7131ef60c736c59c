//! Calendar positions for the simulation clock.
//!
//! `CalendarDate` is a validated, second-resolution wrapper around
//! [`chrono::NaiveDateTime`].  The clock has no time zone; all rollover
//! (leap years included) is chrono's.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

pub use chrono::Weekday;

use crate::{CoreError, CoreResult};

/// Text forms accepted by [`CalendarDate::from_str`], tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated calendar position with one-second resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate(NaiveDateTime);

impl CalendarDate {
    /// Build a date, rejecting out-of-range components with
    /// [`CoreError::InvalidDate`].
    pub fn new(
        year:   i32,
        month:  u8,
        day:    u8,
        hour:   u8,
        minute: u8,
        second: u8,
    ) -> CoreResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month.into(), day.into()).ok_or_else(|| {
            CoreError::InvalidDate(format!("no such day {year:04}-{month:02}-{day:02}"))
        })?;
        let at = date
            .and_hms_opt(hour.into(), minute.into(), second.into())
            .ok_or_else(|| {
                CoreError::InvalidDate(format!(
                    "time {hour:02}:{minute:02}:{second:02} out of range"
                ))
            })?;
        Self::checked(at)
    }

    /// Midnight at the start of the given day.
    pub fn ymd(year: i32, month: u8, day: u8) -> CoreResult<Self> {
        Self::new(year, month, day, 0, 0, 0)
    }

    fn checked(at: NaiveDateTime) -> CoreResult<Self> {
        if !(1..=9999).contains(&at.year()) {
            return Err(CoreError::InvalidDate(format!("year {} outside 1..=9999", at.year())));
        }
        Ok(Self(at))
    }

    /// `secs` seconds later, or `None` past chrono's representable range.
    pub fn checked_add_secs(self, secs: i64) -> Option<Self> {
        let delta = TimeDelta::try_seconds(secs)?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Whole seconds from `earlier` to `self` (negative if `earlier` is later).
    pub fn secs_since(self, earlier: CalendarDate) -> i64 {
        (self.0 - earlier.0).num_seconds()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn year(&self) -> i32 { self.0.year() }
    pub fn month(&self) -> u8 { self.0.month() as u8 }
    pub fn day(&self) -> u8 { self.0.day() as u8 }
    pub fn hour(&self) -> u8 { self.0.hour() as u8 }
    pub fn minute(&self) -> u8 { self.0.minute() as u8 }
    pub fn second(&self) -> u8 { self.0.second() as u8 }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl Default for CalendarDate {
    /// 2020-01-01 00:00:00, the default simulation start.
    fn default() -> Self {
        Self(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default().and_time(Default::default()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl FromStr for CalendarDate {
    type Err = CoreError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` and `YYYY-MM-DD HH:MM:SS`,
    /// with either a space or `T` between date and time.
    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let at = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .ok()
                    .map(|d| d.and_time(Default::default()))
            })
            .ok_or_else(|| CoreError::InvalidDate(format!("unparseable date {s:?}")))?;
        Self::checked(at)
    }
}
