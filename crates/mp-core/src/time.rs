//! Simulation time model.
//!
//! # Design
//!
//! Time is represented by a monotonically increasing `Tick` (the step
//! index) plus a calendar position held by `SimClock`:
//!
//!   now = start + step_index * delta * unit_seconds
//!
//! The step index counts calls to `advance`; each call moves simulated time
//! forward by `delta` units of the configured [`TimeStepUnit`].  The calendar
//! position is a [`CalendarDate`], so rollover is chrono's.
//!
//! Disease and place rates are expressed per simulated hour; callers scale
//! them with [`SimClock::hours_per_step`].

use std::fmt;
use std::str::FromStr;

use crate::{CalendarDate, CoreError, CoreResult, Weekday};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Steps elapsed from `earlier` to `self` (saturating at zero).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeStepUnit ──────────────────────────────────────────────────────────────

/// The unit in which the per-step delta is expressed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeStepUnit {
    Second,
    Minute,
    #[default]
    Hour,
    Day,
}

impl TimeStepUnit {
    /// Length of one unit in seconds.
    #[inline]
    pub fn seconds(self) -> u64 {
        match self {
            TimeStepUnit::Second => 1,
            TimeStepUnit::Minute => 60,
            TimeStepUnit::Hour   => 3_600,
            TimeStepUnit::Day    => 86_400,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeStepUnit::Second => "seconds",
            TimeStepUnit::Minute => "minutes",
            TimeStepUnit::Hour   => "hours",
            TimeStepUnit::Day    => "days",
        }
    }
}

impl fmt::Display for TimeStepUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeStepUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" => Ok(TimeStepUnit::Second),
            "minute" | "minutes" => Ok(TimeStepUnit::Minute),
            "hour" | "hours"     => Ok(TimeStepUnit::Hour),
            "day" | "days"       => Ok(TimeStepUnit::Day),
            other => Err(CoreError::Parse(format!(
                "unknown time step unit {other:?}: expected seconds, minutes, hours or days"
            ))),
        }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Step counter plus calendar position.
///
/// `SimClock` holds no heap data and is cheap to clone.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Number of completed `advance` calls.
    current_step: Tick,
    unit:         TimeStepUnit,
    /// Units of `unit` per step.  Always > 0.
    delta:        u32,
    now:          CalendarDate,
    /// Calendar position at construction (or the last `set_date`), used for
    /// elapsed-time queries.
    origin:       CalendarDate,
}

impl SimClock {
    /// A clock at step 0 positioned at `start`, advancing `delta` units of
    /// `unit` per step.
    ///
    /// Fails with `InvalidParameter` if `delta == 0`.
    pub fn new(start: CalendarDate, unit: TimeStepUnit, delta: u32) -> CoreResult<Self> {
        check_delta(delta)?;
        Ok(Self {
            current_step: Tick::ZERO,
            unit,
            delta,
            now:          start,
            origin:       start,
        })
    }

    /// One-hour steps starting 2020-01-01 00:00:00.
    pub fn hourly() -> Self {
        Self {
            current_step: Tick::ZERO,
            unit:         TimeStepUnit::Hour,
            delta:        1,
            now:          CalendarDate::default(),
            origin:       CalendarDate::default(),
        }
    }

    /// Advance by one step.  The calendar stops at chrono's upper bound.
    pub fn advance(&mut self) {
        self.current_step = self.current_step + 1;
        let secs = i64::try_from(self.seconds_per_step()).unwrap_or(i64::MAX);
        if let Some(next) = self.now.checked_add_secs(secs) {
            self.now = next;
        }
    }

    // ── Setters ───────────────────────────────────────────────────────────

    /// Set the absolute calendar position.  The step index is unchanged.
    pub fn set_date(
        &mut self,
        year:   i32,
        month:  u8,
        day:    u8,
        hour:   u8,
        minute: u8,
        second: u8,
    ) -> CoreResult<()> {
        let date = CalendarDate::new(year, month, day, hour, minute, second)?;
        self.set_calendar(date);
        Ok(())
    }

    /// Set the absolute calendar position from text (see
    /// [`CalendarDate::from_str`] for accepted forms).
    pub fn set_date_str(&mut self, text: &str) -> CoreResult<()> {
        let date: CalendarDate = text.parse()?;
        self.set_calendar(date);
        Ok(())
    }

    pub fn set_calendar(&mut self, date: CalendarDate) {
        self.now = date;
        self.origin = date;
    }

    pub fn set_time_step_unit(&mut self, unit: TimeStepUnit) {
        self.unit = unit;
    }

    /// Set the number of units per step.
    pub fn set_delta(&mut self, delta: u32) -> CoreResult<()> {
        self.delta = check_delta(delta)?;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn current_step(&self) -> Tick {
        self.current_step
    }

    #[inline]
    pub fn unit(&self) -> TimeStepUnit {
        self.unit
    }

    #[inline]
    pub fn delta(&self) -> u32 {
        self.delta
    }

    #[inline]
    pub fn seconds_per_step(&self) -> u64 {
        self.delta as u64 * self.unit.seconds()
    }

    /// Simulated hours represented by one step (1.0 at the default resolution).
    #[inline]
    pub fn hours_per_step(&self) -> f64 {
        self.seconds_per_step() as f64 / 3_600.0
    }

    #[inline]
    pub fn steps_per_hour(&self) -> f64 {
        1.0 / self.hours_per_step()
    }

    #[inline]
    pub fn steps_per_day(&self) -> f64 {
        24.0 * self.steps_per_hour()
    }

    /// Current calendar position.
    pub fn date(&self) -> CalendarDate {
        self.now
    }

    pub fn year(&self) -> i32 { self.date().year() }
    pub fn month(&self) -> u8 { self.date().month() }
    pub fn day_of_month(&self) -> u8 { self.date().day() }
    pub fn hour(&self) -> u8 { self.date().hour() }
    pub fn minute(&self) -> u8 { self.date().minute() }
    pub fn second(&self) -> u8 { self.date().second() }

    pub fn weekday(&self) -> Weekday {
        self.date().weekday()
    }

    /// Simulated seconds since the origin (construction or last `set_date`).
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.now.secs_since(self.origin)
    }

    #[inline]
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_secs() as f64 / 3_600.0
    }

    // ── Step-count helpers ────────────────────────────────────────────────

    /// How many steps span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs.div_ceil(self.seconds_per_step())
    }

    #[inline]
    pub fn ticks_for_hours(&self, hours: u64) -> u64 {
        self.ticks_for_secs(hours * 3_600)
    }

    #[inline]
    pub fn ticks_for_days(&self, days: u64) -> u64 {
        self.ticks_for_secs(days * 86_400)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::hourly()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date();
        write!(f, "{} ({} {})", self.current_step, date, date.weekday())
    }
}

fn check_delta(delta: u32) -> CoreResult<u32> {
    if delta == 0 {
        Err(CoreError::InvalidParameter { name: "timeStep.dt", value: 0.0 })
    } else {
        Ok(delta)
    }
}
