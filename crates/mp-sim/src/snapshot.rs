use std::fmt;

use mp_agent::HealthCounts;
use mp_core::{CalendarDate, Tick};
use mp_place::PlaceSnapshot;

/// Aggregate model state at one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub step:       Tick,
    /// Simulated hours since the clock's start date.
    pub time_hours: f64,
    pub date:       CalendarDate,
    pub counts:     HealthCounts,
    /// Per-place state, present when place reporting is enabled.
    pub places:     Option<Vec<PlaceSnapshot>>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counts;
        write!(
            f,
            "{} {} S={} D={} I={} R={} dead={}",
            self.step, self.date, c.susceptible, c.diseased, c.immune, c.recovered, c.dead
        )
    }
}
