//! Core schedule types: `Destination` and `TravelSchedule`.
//!
//! # Destination resolution
//!
//! `Home`, `Work`, `Transport` and `Remote` are sentinels.  The simulation
//! layer maps them to the agent's registered place references before moving
//! the agent, so one schedule value can be shared by many agents.

use std::collections::BTreeMap;
use std::fmt;

use mp_core::{PlaceId, Tick};

// ── Destination ───────────────────────────────────────────────────────────────

/// Where an agent should be from a schedule entry onward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    /// A specific place (fully resolved).
    Place(PlaceId),
    /// Sentinel: the agent's home.
    Home,
    /// Sentinel: the agent's workplace.
    Work,
    /// Sentinel: the agent's vehicle.
    Transport,
    /// Sentinel: the agent's remote destination.
    Remote,
}

impl Destination {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Destination::Place(_))
    }

    /// The `PlaceId` if resolved, otherwise `None`.
    pub fn place_id(&self) -> Option<PlaceId> {
        match self {
            Destination::Place(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Place(p)  => write!(f, "{}", p.0),
            Destination::Home      => f.write_str("home"),
            Destination::Work      => f.write_str("work"),
            Destination::Transport => f.write_str("transport"),
            Destination::Remote    => f.write_str("remote"),
        }
    }
}

// ── TravelSchedule ────────────────────────────────────────────────────────────

/// One agent's time-indexed sequence of destinations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelSchedule {
    /// Effective tick (cycle position when cyclic) → destination.
    entries:    BTreeMap<u64, Destination>,
    /// Period in ticks.  `None` for one-off schedules.  Never `Some(0)`.
    cycle:      Option<u64>,
    stationary: bool,
}

impl TravelSchedule {
    /// A schedule that is never resolved: the agent stays where it is.
    pub fn stationary() -> Self {
        Self { entries: BTreeMap::new(), cycle: None, stationary: true }
    }

    /// An empty one-off schedule.
    pub fn once() -> Self {
        Self { entries: BTreeMap::new(), cycle: None, stationary: false }
    }

    /// An empty schedule repeating every `cycle_ticks`.  Zero means one-off.
    pub fn cyclic(cycle_ticks: u64) -> Self {
        Self {
            entries:    BTreeMap::new(),
            cycle:      (cycle_ticks > 0).then_some(cycle_ticks),
            stationary: false,
        }
    }

    /// Insert or overwrite the assignment effective at `at`.  For cyclic
    /// schedules `at` is reduced modulo the cycle.  Clears the stationary
    /// flag.
    pub fn switch_to(&mut self, destination: Destination, at: Tick) -> &mut Self {
        let key = match self.cycle {
            Some(c) => at.0 % c,
            None => at.0,
        };
        self.entries.insert(key, destination);
        self.stationary = false;
        self
    }

    /// Destination effective at `now`, or `None` meaning "stay".
    pub fn resolve(&self, now: Tick) -> Option<Destination> {
        if self.stationary {
            return None;
        }
        let key = match self.cycle {
            Some(c) => now.0 % c,
            None => now.0,
        };
        match self.entries.range(..=key).next_back() {
            Some((_, d)) => Some(*d),
            // Before the first entry: a cyclic schedule is still in the last
            // entry of the previous cycle.
            None if self.cycle.is_some() => self.entries.values().next_back().copied(),
            None => None,
        }
    }

    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    #[inline]
    pub fn cycle_ticks(&self) -> Option<u64> {
        self.cycle
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(tick, destination)` pairs in tick order.
    pub fn entries(&self) -> impl Iterator<Item = (Tick, Destination)> + '_ {
        self.entries.iter().map(|(&t, &d)| (Tick(t), d))
    }
}

impl Default for TravelSchedule {
    fn default() -> Self {
        Self::stationary()
    }
}
