use mp_agent::{HealthChange, HealthStatus};
use mp_core::RandomSource;

use crate::Disease;

/// Decide what happens to one agent over a step of `hours`.
///
/// Only living Diseased agents progress.  The recovery draw comes first;
/// the death draw is made only if the agent did not recover.
pub fn progress<R: RandomSource>(
    disease: &Disease,
    status:  HealthStatus,
    hours:   f64,
    rng:     &mut R,
) -> Option<HealthChange> {
    if !status.is_infectious() {
        return None;
    }
    if rng.number() < disease.recovery_probability(hours) {
        return Some(HealthChange::Recover);
    }
    if rng.number() < disease.death_probability(hours) {
        return Some(HealthChange::Die);
    }
    None
}
