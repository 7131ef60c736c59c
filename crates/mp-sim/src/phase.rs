//! The state-changing phases of a step, as free functions.
//!
//! Every phase is split into a `plan_*` function that only reads and a
//! `commit_*` function that validates the whole plan before applying any of
//! it.  `Model::step` calls them in order; tests call them directly.

use std::fmt;

use log::trace;

use mp_agent::{AgentError, AgentStore, HealthChange, HealthStatus};
use mp_core::{AgentId, PlaceId, RandomSource, Tick};
use mp_disease::{Disease, PlaceExposure, TransmissionModel, expose_place, occupant_health, progress};
use mp_place::{PlaceError, PlaceStore};
use mp_schedule::{Destination, TravelSchedule};

use crate::PhaseError;

/// Names of the fallible phases, for error reporting.  Contamination
/// decay cannot fail and has no entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Relocation,
    Transmission,
    Progression,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Relocation   => "relocation",
            Phase::Transmission => "transmission",
            Phase::Progression  => "progression",
        })
    }
}

// ── Relocation ────────────────────────────────────────────────────────────────

/// One planned occupancy change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub agent: AgentId,
    pub from:  PlaceId,
    pub to:    PlaceId,
}

/// Map a schedule destination to a concrete place for `agent`.
pub fn resolve_destination(agents: &AgentStore, agent: AgentId, dest: Destination) -> PlaceId {
    match dest {
        Destination::Place(p)  => p,
        Destination::Home      => agents.home(agent),
        Destination::Work      => agents.work(agent),
        Destination::Transport => agents.transport(agent),
        Destination::Remote    => agents.remote(agent),
    }
}

/// Resolve every living agent's schedule at `now` and list the agents whose
/// resolved place differs from their current one.  Dead agents and
/// stationary schedules are skipped.
pub fn plan_relocation(
    agents:    &AgentStore,
    places:    &PlaceStore,
    schedules: &[TravelSchedule],
    now:       Tick,
) -> Result<Vec<Move>, PhaseError> {
    let mut moves = Vec::new();
    for (agent, schedule) in agents.agent_ids().zip(schedules) {
        if !agents.health(agent).alive || schedule.is_stationary() {
            continue;
        }
        let Some(dest) = schedule.resolve(now) else {
            continue;
        };
        let to = resolve_destination(agents, agent, dest);
        if !to.is_valid() {
            return Err(AgentError::UnknownPlace { agent, place: to }.into());
        }
        if !places.contains(to) {
            return Err(PlaceError::UnknownPlace(to).into());
        }
        let from = agents.current_place(agent);
        if from != to {
            moves.push(Move { agent, from, to });
        }
    }
    Ok(moves)
}

/// Apply planned moves to both the occupant sets and the agents' current
/// place.  Returns the number of agents moved.
pub fn commit_relocation(
    agents: &mut AgentStore,
    places: &mut PlaceStore,
    moves:  &[Move],
) -> Result<usize, PhaseError> {
    for m in moves {
        if m.from.is_valid() && !places.get(m.from)?.contains(m.agent) {
            return Err(PlaceError::NotAnOccupant { agent: m.agent, place: m.from }.into());
        }
    }
    for m in moves {
        places.relocate(m.agent, m.from, m.to)?;
        agents.set_current_place(m.agent, m.to)?;
    }
    trace!("relocation: {} agents moved", moves.len());
    Ok(moves.len())
}

// ── Transmission ──────────────────────────────────────────────────────────────

/// Places holding at least one living Diseased agent, ascending.  Every
/// occupant of every place must have a health entry.
fn infectious_places(places: &PlaceStore, health: &[HealthStatus]) -> Result<Vec<PlaceId>, PhaseError> {
    let mut out = Vec::new();
    for place in places.iter() {
        if occupant_health(place, health)?.iter().any(|(_, h)| h.is_infectious()) {
            out.push(place.id());
        }
    }
    Ok(out)
}

/// Evaluate transmission at every place with an infectious occupant.
///
/// Each such place draws from its own sub-stream, split from `rng` in
/// ascending place order, so the outcome does not depend on evaluation
/// order.  With the `parallel` feature places are evaluated on Rayon's pool.
/// An occupant unknown to `agents` rejects the whole phase.
pub fn plan_transmission<T, R>(
    model:  &T,
    agents: &AgentStore,
    places: &PlaceStore,
    hours:  f64,
    rng:    &mut R,
) -> Result<Vec<PlaceExposure>, PhaseError>
where
    T: TransmissionModel + ?Sized,
    R: RandomSource,
{
    let health = agents.health_slice();
    let work: Vec<(PlaceId, R)> = infectious_places(places, health)?
        .into_iter()
        .map(|id| (id, rng.split(id.0 as u64)))
        .collect();

    let slice = places.as_slice();

    #[cfg(not(feature = "parallel"))]
    let planned: Result<Vec<Option<PlaceExposure>>, AgentError> = work
        .into_iter()
        .map(|(id, mut place_rng)| {
            expose_place(model, &slice[id.index()], health, hours, &mut place_rng)
        })
        .collect();

    #[cfg(feature = "parallel")]
    let planned: Result<Vec<Option<PlaceExposure>>, AgentError> = {
        use rayon::prelude::*;

        // `collect` keeps input order.
        work.into_par_iter()
            .map(|(id, mut place_rng)| {
                expose_place(model, &slice[id.index()], health, hours, &mut place_rng)
            })
            .collect()
    };

    Ok(planned?.into_iter().flatten().collect())
}

/// Add each place's shedding and infect the selected agents.  Returns the
/// number of new infections.
pub fn commit_transmission(
    agents:    &mut AgentStore,
    places:    &mut PlaceStore,
    exposures: &[PlaceExposure],
) -> Result<usize, PhaseError> {
    for e in exposures {
        places.get(e.place)?;
        for &agent in &e.infected {
            agents.check_health(agent, HealthChange::Infect)?;
        }
    }
    let mut infected = 0;
    for e in exposures {
        places.get_mut(e.place)?.increase_contamination(e.shed);
        for &agent in &e.infected {
            agents.apply_health(agent, HealthChange::Infect)?;
            infected += 1;
        }
    }
    trace!("transmission: {} places exposed, {infected} infections", exposures.len());
    Ok(infected)
}

// ── Progression ───────────────────────────────────────────────────────────────

/// Living Diseased agents, ascending.  Collected at the start of a step so
/// agents infected during the step are not progressed in it.
pub fn diseased_agents(agents: &AgentStore) -> Vec<AgentId> {
    agents
        .agent_ids()
        .filter(|&a| agents.health(a).is_infectious())
        .collect()
}

/// Recovery/death decisions for `candidates`, drawn in ascending order.
pub fn plan_progression<R: RandomSource>(
    disease:    &Disease,
    agents:     &AgentStore,
    candidates: &[AgentId],
    hours:      f64,
    rng:        &mut R,
) -> Vec<(AgentId, HealthChange)> {
    candidates
        .iter()
        .filter_map(|&a| progress(disease, agents.health(a), hours, rng).map(|c| (a, c)))
        .collect()
}

pub fn commit_progression(
    agents:  &mut AgentStore,
    changes: &[(AgentId, HealthChange)],
) -> Result<usize, PhaseError> {
    for &(agent, change) in changes {
        agents.check_health(agent, change)?;
    }
    for &(agent, change) in changes {
        agents.apply_health(agent, change)?;
    }
    trace!("progression: {} agents changed state", changes.len());
    Ok(changes.len())
}

// ── Contamination ─────────────────────────────────────────────────────────────

pub fn update_contamination(places: &mut PlaceStore, hours: f64) {
    places.update_contamination(hours);
}
