use mp_core::error::check_probability;
use mp_core::{CoreResult, ParameterStore};

/// Scale a per-hour probability to a step of `hours` hours: `p · hours`,
/// capped at 1.
#[inline]
pub fn per_step_probability(p_hour: f64, hours: f64) -> f64 {
    if p_hour <= 0.0 || hours <= 0.0 {
        return 0.0;
    }
    (p_hour * hours).min(1.0)
}

/// Per-hour disease rates.  Every rate is a probability in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Disease {
    recovery_rate: f64,
    death_rate:    f64,
    shedding_rate: f64,
}

impl Disease {
    pub fn new(recovery_rate: f64, death_rate: f64, shedding_rate: f64) -> CoreResult<Self> {
        Ok(Self {
            recovery_rate: check_probability("disease.simplistic.recoveryRate", recovery_rate)?,
            death_rate:    check_probability("disease.simplistic.deathRate", death_rate)?,
            shedding_rate: check_probability("disease.simplistic.infectionShedLoad", shedding_rate)?,
        })
    }

    pub fn from_parameters(params: &ParameterStore) -> CoreResult<Self> {
        Self::new(
            params.get("disease.simplistic.recoveryRate")?,
            params.get("disease.simplistic.deathRate")?,
            params.get("disease.simplistic.infectionShedLoad")?,
        )
    }

    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    #[inline]
    pub fn death_rate(&self) -> f64 {
        self.death_rate
    }

    #[inline]
    pub fn shedding_rate(&self) -> f64 {
        self.shedding_rate
    }

    pub fn set_recovery_rate(&mut self, value: f64) -> CoreResult<()> {
        self.recovery_rate = check_probability("disease.simplistic.recoveryRate", value)?;
        Ok(())
    }

    pub fn set_death_rate(&mut self, value: f64) -> CoreResult<()> {
        self.death_rate = check_probability("disease.simplistic.deathRate", value)?;
        Ok(())
    }

    pub fn set_shedding_rate(&mut self, value: f64) -> CoreResult<()> {
        self.shedding_rate = check_probability("disease.simplistic.infectionShedLoad", value)?;
        Ok(())
    }

    // ── Per-step quantities ───────────────────────────────────────────────

    #[inline]
    pub fn recovery_probability(&self, hours: f64) -> f64 {
        per_step_probability(self.recovery_rate, hours)
    }

    #[inline]
    pub fn death_probability(&self, hours: f64) -> f64 {
        per_step_probability(self.death_rate, hours)
    }

    /// Contamination shed into a place by `infectious` agents over `hours`.
    #[inline]
    pub fn shed(&self, infectious: usize, hours: f64) -> f64 {
        self.shedding_rate * infectious as f64 * hours
    }
}

impl Default for Disease {
    fn default() -> Self {
        Self { recovery_rate: 0.0007, death_rate: 0.0007, shedding_rate: 0.001 }
    }
}
