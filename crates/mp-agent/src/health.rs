//! The agent health state machine.
//!
//! ```text
//!            Infect            Recover
//! Susceptible ──────▶ Diseased ───────▶ Recovered
//!                        │
//!                        │ Die
//!                        ▼
//!                      (dead)
//!
//! any living state ── Immunize ──▶ Immune
//! ```
//!
//! Death is orthogonal to the state: a dead agent keeps the state it died in
//! (always `Diseased`) with `alive == false`, and no further change applies.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    #[default]
    Susceptible,
    Diseased,
    Immune,
    Recovered,
}

impl HealthState {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Diseased    => "diseased",
            HealthState::Immune      => "immune",
            HealthState::Recovered   => "recovered",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested health transition.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthChange {
    Infect,
    Recover,
    Die,
    Immunize,
}

impl fmt::Display for HealthChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthChange::Infect   => "infect",
            HealthChange::Recover  => "recover",
            HealthChange::Die      => "die",
            HealthChange::Immunize => "immunize",
        })
    }
}

/// Health state plus the orthogonal alive flag.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthStatus {
    pub state: HealthState,
    pub alive: bool,
}

impl HealthStatus {
    pub const SUSCEPTIBLE: HealthStatus = HealthStatus { state: HealthState::Susceptible, alive: true };

    /// The status after `change`, or `None` if the transition is illegal.
    pub fn apply(self, change: HealthChange) -> Option<HealthStatus> {
        if !self.alive {
            return None;
        }
        use HealthChange::*;
        use HealthState::*;
        match (self.state, change) {
            (Susceptible, Infect) => Some(HealthStatus { state: Diseased, alive: true }),
            (Diseased, Recover)   => Some(HealthStatus { state: Recovered, alive: true }),
            (Diseased, Die)       => Some(HealthStatus { state: Diseased, alive: false }),
            (_, Immunize)         => Some(HealthStatus { state: Immune, alive: true }),
            _ => None,
        }
    }

    /// Living and Susceptible.
    #[inline]
    pub fn is_susceptible(self) -> bool {
        self.alive && self.state == HealthState::Susceptible
    }

    /// Living and Diseased, i.e. infectious.
    #[inline]
    pub fn is_infectious(self) -> bool {
        self.alive && self.state == HealthState::Diseased
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::SUSCEPTIBLE
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alive {
            fmt::Display::fmt(&self.state, f)
        } else {
            f.write_str("dead")
        }
    }
}

/// Population totals per health category.  Dead agents count only as `dead`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthCounts {
    pub susceptible: usize,
    pub diseased:    usize,
    pub immune:      usize,
    pub recovered:   usize,
    pub dead:        usize,
}

impl HealthCounts {
    pub fn add(&mut self, status: HealthStatus) {
        if !status.alive {
            self.dead += 1;
            return;
        }
        match status.state {
            HealthState::Susceptible => self.susceptible += 1,
            HealthState::Diseased    => self.diseased += 1,
            HealthState::Immune      => self.immune += 1,
            HealthState::Recovered   => self.recovered += 1,
        }
    }

    pub fn living(&self) -> usize {
        self.susceptible + self.diseased + self.immune + self.recovered
    }

    pub fn total(&self) -> usize {
        self.living() + self.dead
    }
}

impl FromIterator<HealthStatus> for HealthCounts {
    fn from_iter<I: IntoIterator<Item = HealthStatus>>(iter: I) -> Self {
        let mut counts = HealthCounts::default();
        for s in iter {
            counts.add(s);
        }
        counts
    }
}
