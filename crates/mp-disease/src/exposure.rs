use mp_agent::{AgentError, AgentResult, HealthStatus};
use mp_core::{AgentId, PlaceId, RandomSource};
use mp_place::Place;

use crate::TransmissionModel;

/// What one place's transmission evaluation decided for this step.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceExposure {
    pub place:      PlaceId,
    /// Contamination to add to the place.
    pub shed:       f64,
    pub infectious: usize,
    /// Susceptible occupants that become Diseased, ascending.
    pub infected:   Vec<AgentId>,
}

/// Evaluate transmission at `place` for one step of `hours`.
///
/// Returns `Ok(None)` when no living Diseased agent is present, and
/// `UnknownAgent` if an occupant has no entry in `health`.  Otherwise the
/// infectious occupants shed into the place and every Susceptible occupant
/// gets exactly one draw against the model's per-step probability, which
/// already aggregates over all infectious occupants.  `health` is indexed by
/// `AgentId`.
pub fn expose_place<T, R>(
    model:  &T,
    place:  &Place,
    health: &[HealthStatus],
    hours:  f64,
    rng:    &mut R,
) -> AgentResult<Option<PlaceExposure>>
where
    T: TransmissionModel + ?Sized,
    R: RandomSource,
{
    let occupants = occupant_health(place, health)?;
    let infectious = occupants.iter().filter(|(_, h)| h.is_infectious()).count();
    if infectious == 0 {
        return Ok(None);
    }

    let shed = model.disease().shed(infectious, hours);
    let contamination = place.contamination() + shed;
    let p = model.infection_probability(contamination, infectious, hours);

    let infected = occupants
        .into_iter()
        .filter(|(_, h)| h.is_susceptible())
        .filter(|_| rng.number() < p)
        .map(|(a, _)| a)
        .collect();

    Ok(Some(PlaceExposure { place: place.id(), shed, infectious, infected }))
}

/// Each occupant with its health, ascending.  Fails on the first occupant
/// that `health` does not cover.
pub fn occupant_health(
    place:  &Place,
    health: &[HealthStatus],
) -> AgentResult<Vec<(AgentId, HealthStatus)>> {
    place
        .occupants()
        .iter()
        .map(|&a| {
            health
                .get(a.index())
                .map(|&h| (a, h))
                .ok_or(AgentError::UnknownAgent(a))
        })
        .collect()
}
