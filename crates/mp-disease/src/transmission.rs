use crate::{Disease, per_step_probability};

/// How co-located infectious agents turn into an infection probability for
/// each susceptible occupant.
///
/// Implementations must be `Send + Sync`: places may be evaluated from
/// several threads against one shared model.
pub trait TransmissionModel: Send + Sync {
    /// Parameter-file name of this model (`disease.model`).
    fn name(&self) -> &'static str;

    fn disease(&self) -> &Disease;

    fn disease_mut(&mut self) -> &mut Disease;

    /// Per-hour infection probability for one susceptible agent in a place
    /// holding `infectious` infectious agents and `contamination` (this
    /// step's shedding included).
    fn hourly_probability(&self, contamination: f64, infectious: usize) -> f64;

    /// Infection probability over one step of `hours`.
    fn infection_probability(&self, contamination: f64, infectious: usize, hours: f64) -> f64 {
        per_step_probability(self.hourly_probability(contamination, infectious), hours)
    }
}

// ── ContaminationTransmission ─────────────────────────────────────────────────

/// Infection driven by the place's accumulated contamination
/// (`disease.model = simplistic`).
#[derive(Clone, Debug, Default)]
pub struct ContaminationTransmission {
    disease: Disease,
}

impl ContaminationTransmission {
    pub fn new(disease: Disease) -> Self {
        Self { disease }
    }
}

impl TransmissionModel for ContaminationTransmission {
    fn name(&self) -> &'static str {
        "simplistic"
    }

    fn disease(&self) -> &Disease {
        &self.disease
    }

    fn disease_mut(&mut self) -> &mut Disease {
        &mut self.disease
    }

    fn hourly_probability(&self, contamination: f64, _infectious: usize) -> f64 {
        contamination.clamp(0.0, 1.0)
    }
}

// ── ContactTransmission ───────────────────────────────────────────────────────

/// Infection driven by direct contact: each infectious occupant independently
/// infects with the shedding rate per hour (`disease.model = contact`).
#[derive(Clone, Debug, Default)]
pub struct ContactTransmission {
    disease: Disease,
}

impl ContactTransmission {
    pub fn new(disease: Disease) -> Self {
        Self { disease }
    }
}

impl TransmissionModel for ContactTransmission {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn disease(&self) -> &Disease {
        &self.disease
    }

    fn disease_mut(&mut self) -> &mut Disease {
        &mut self.disease
    }

    fn hourly_probability(&self, _contamination: f64, infectious: usize) -> f64 {
        let n = i32::try_from(infectious).unwrap_or(i32::MAX);
        1.0 - (1.0 - self.disease.shedding_rate()).powi(n)
    }
}
