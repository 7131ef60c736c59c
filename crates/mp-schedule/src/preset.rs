//! Built-in schedule shapes, scaled to the clock's step length.

use std::fmt;
use std::str::FromStr;

use mp_core::{SimClock, Tick};

use crate::{Destination, ScheduleError, TravelSchedule};

/// Named schedule presets.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ScheduleKind {
    /// Stay at the initial place forever.
    Stationary,
    /// Daily commute: home, transport, work, transport, home.
    #[default]
    Mobile,
    /// Long trip away: transport, remote stay, transport, then home.
    RemoteTravel,
    /// Ride home: transport, then home.
    ReturnTrip,
}

impl ScheduleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleKind::Stationary   => "stationary",
            ScheduleKind::Mobile       => "mobile",
            ScheduleKind::RemoteTravel => "remoteTravel",
            ScheduleKind::ReturnTrip   => "returnTrip",
        }
    }

    /// Build this schedule for `clock`'s resolution.  One-off schedules start
    /// at `start`; the mobile cycle is measured from step 0.
    pub fn build(self, clock: &SimClock, start: Tick) -> TravelSchedule {
        let h = |hours: u64| clock.ticks_for_hours(hours);
        match self {
            ScheduleKind::Stationary => TravelSchedule::stationary(),
            ScheduleKind::Mobile => {
                let mut s = TravelSchedule::cyclic(h(24));
                s.switch_to(Destination::Home, Tick(0))
                    .switch_to(Destination::Transport, Tick(h(7)))
                    .switch_to(Destination::Work, Tick(h(8)))
                    .switch_to(Destination::Transport, Tick(h(16)))
                    .switch_to(Destination::Home, Tick(h(17)));
                s
            }
            ScheduleKind::RemoteTravel => {
                let mut s = TravelSchedule::once();
                s.switch_to(Destination::Transport, start)
                    .switch_to(Destination::Remote, start + h(8))
                    .switch_to(Destination::Transport, start + h(8 + 136))
                    .switch_to(Destination::Home, start + h(8 + 136 + 8));
                s
            }
            ScheduleKind::ReturnTrip => {
                let mut s = TravelSchedule::once();
                s.switch_to(Destination::Transport, start)
                    .switch_to(Destination::Home, start + h(8));
                s
            }
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, ScheduleError> {
        match s.trim() {
            "stationary"   => Ok(ScheduleKind::Stationary),
            "mobile"       => Ok(ScheduleKind::Mobile),
            "remoteTravel" => Ok(ScheduleKind::RemoteTravel),
            "returnTrip"   => Ok(ScheduleKind::ReturnTrip),
            other => Err(ScheduleError::UnknownSchedule(other.to_owned())),
        }
    }
}
