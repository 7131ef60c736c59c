//! Plain data row types written by output backends.

use mp_place::PlaceSnapshot;
use mp_sim::Snapshot;

/// Health-state totals at one reported step.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub step:        u64,
    pub time_hours:  f64,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub date:        String,
    pub susceptible: usize,
    pub diseased:    usize,
    pub immune:      usize,
    pub recovered:   usize,
    pub dead:        usize,
}

impl From<&Snapshot> for SummaryRow {
    fn from(s: &Snapshot) -> Self {
        Self {
            step:        s.step.0,
            time_hours:  s.time_hours,
            date:        s.date.to_string(),
            susceptible: s.counts.susceptible,
            diseased:    s.counts.diseased,
            immune:      s.counts.immune,
            recovered:   s.counts.recovered,
            dead:        s.counts.dead,
        }
    }
}

/// One place's state at a reported step.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRow {
    pub step:          u64,
    pub place_id:      u32,
    pub category:      String,
    pub occupants:     usize,
    pub contamination: f64,
}

impl PlaceRow {
    pub fn new(step: u64, place: &PlaceSnapshot) -> Self {
        Self {
            step,
            place_id:      place.id.0,
            category:      place.category.to_string(),
            occupants:     place.occupant_count,
            contamination: place.contamination,
        }
    }
}
