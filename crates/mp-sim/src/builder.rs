//! Fluent builder for constructing a [`Model`].

use log::info;

use mp_agent::AgentStore;
use mp_core::{PlaceId, RandomSource, SimClock};
use mp_disease::TransmissionModel;
use mp_place::PlaceStore;
use mp_schedule::TravelSchedule;

use crate::{Model, ReportSchedule, SimError, SimResult};

/// Fluent builder for [`Model<R, T>`].
///
/// # Required inputs
///
/// - [`SimClock`] — step length and start date
/// - [`AgentStore`] — from [`mp_agent::AgentStoreBuilder`], with home
///   references assigned
/// - [`PlaceStore`] — every place the agents refer to
/// - `T: TransmissionModel` — wraps the `Disease`
/// - `R: RandomSource` — the model's only source of randomness
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                       |
/// |-------------------------|-------------------------------|
/// | `.schedules(v)`         | Stationary for every agent    |
/// | `.report_interval(n)`   | `1`                           |
/// | `.report_places(b)`     | `false`                       |
///
/// # Example
///
/// ```rust,ignore
/// let agents = AgentStoreBuilder::new(n).build()?;
/// let mut model = ModelBuilder::new(clock, agents, places, transmission, rng)
///     .schedules(schedules)
///     .report_interval(24)
///     .build()?;
/// model.run(240, &mut NoopReporter)?;
/// ```
pub struct ModelBuilder<R: RandomSource, T: TransmissionModel> {
    clock:           SimClock,
    agents:          AgentStore,
    places:          PlaceStore,
    transmission:    T,
    rng:             R,
    schedules:       Option<Vec<TravelSchedule>>,
    report_interval: u64,
    report_places:   bool,
}

impl<R: RandomSource, T: TransmissionModel> ModelBuilder<R, T> {
    pub fn new(
        clock:        SimClock,
        agents:       AgentStore,
        places:       PlaceStore,
        transmission: T,
        rng:          R,
    ) -> Self {
        Self {
            clock,
            agents,
            places,
            transmission,
            rng,
            schedules:       None,
            report_interval: 1,
            report_places:   false,
        }
    }

    /// Per-agent schedules (must be length `agent_count`).
    pub fn schedules(mut self, schedules: Vec<TravelSchedule>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    pub fn report_interval(mut self, steps: u64) -> Self {
        self.report_interval = steps;
        self
    }

    /// Include per-place state in every snapshot.
    pub fn report_places(mut self, on: bool) -> Self {
        self.report_places = on;
        self
    }

    /// Validate inputs, place every agent that has no current place at its
    /// home, and return a ready-to-run [`Model`].
    pub fn build(mut self) -> SimResult<Model<R, T>> {
        let agent_count = self.agents.len();

        let schedules = match self.schedules {
            Some(s) => {
                if s.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      s.len(),
                        what:     "travel schedules",
                    });
                }
                s
            }
            None => vec![TravelSchedule::stationary(); agent_count],
        };

        let report = ReportSchedule::new(self.report_interval).ok_or_else(|| {
            SimError::Config("report interval must be at least one step".to_owned())
        })?;

        // ── Initial placement ─────────────────────────────────────────────
        let unplaced: Vec<_> = self
            .agents
            .agent_ids()
            .filter(|&a| !self.agents.current_place(a).is_valid())
            .collect();
        for &agent in &unplaced {
            let home = self.agents.home(agent);
            if !home.is_valid() {
                return Err(SimError::Config(format!("{agent} has neither a current place nor a home")));
            }
            self.places.get(home)?;
        }
        for agent in unplaced {
            let home = self.agents.home(agent);
            self.places.relocate(agent, PlaceId::INVALID, home)?;
            self.agents.set_current_place(agent, home)?;
        }

        // Agents placed by the caller must appear in their place's occupant set.
        for agent in self.agents.agent_ids() {
            let here = self.agents.current_place(agent);
            if !self.places.get(here)?.contains(agent) {
                self.places.relocate(agent, PlaceId::INVALID, here)?;
            }
        }

        info!(
            "model built: {agent_count} agents, {} places, {} transmission, {}",
            self.places.len(),
            self.transmission.name(),
            self.clock
        );

        Ok(Model {
            clock:         self.clock,
            agents:        self.agents,
            places:        self.places,
            schedules,
            transmission:  self.transmission,
            rng:           self.rng,
            report,
            report_places: self.report_places,
        })
    }
}
