use std::collections::BTreeSet;
use std::fmt;

use mp_core::{AgentId, CoreError, CoreResult, PlaceId};

/// Free-form place label.  The built-in layouts use the constants below.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceCategory(pub u16);

impl PlaceCategory {
    pub const GENERIC:   PlaceCategory = PlaceCategory(0);
    pub const HOME:      PlaceCategory = PlaceCategory(1);
    pub const WORK:      PlaceCategory = PlaceCategory(2);
    pub const TRANSPORT: PlaceCategory = PlaceCategory(3);
    pub const REMOTE:    PlaceCategory = PlaceCategory(4);

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceCategory::GENERIC   => "generic",
            PlaceCategory::HOME      => "home",
            PlaceCategory::WORK      => "work",
            PlaceCategory::TRANSPORT => "transport",
            PlaceCategory::REMOTE    => "remote",
            _ => "other",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            "other" => write!(f, "category-{}", self.0),
            s => f.write_str(s),
        }
    }
}

// ── Place ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    id:                    PlaceId,
    category:              PlaceCategory,
    occupants:             BTreeSet<AgentId>,
    /// Always >= 0.
    contamination:         f64,
    clean_every_step:      bool,
    /// Per-hour decay constant.  Always >= 0.
    fractional_decrement:  f64,
}

impl Place {
    pub fn new(id: PlaceId, category: PlaceCategory) -> Self {
        Self {
            id,
            category,
            occupants:            BTreeSet::new(),
            contamination:        0.0,
            clean_every_step:     false,
            fractional_decrement: 1.0,
        }
    }

    #[inline]
    pub fn id(&self) -> PlaceId {
        self.id
    }

    #[inline]
    pub fn category(&self) -> PlaceCategory {
        self.category
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Occupants in ascending `AgentId` order.
    pub fn occupants(&self) -> &BTreeSet<AgentId> {
        &self.occupants
    }

    #[inline]
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.occupants.contains(&agent)
    }

    pub(crate) fn insert(&mut self, agent: AgentId) -> bool {
        self.occupants.insert(agent)
    }

    pub(crate) fn remove(&mut self, agent: AgentId) -> bool {
        self.occupants.remove(&agent)
    }

    // ── Contamination ─────────────────────────────────────────────────────

    #[inline]
    pub fn contamination(&self) -> f64 {
        self.contamination
    }

    /// Add `amount` (an exposure event).  The result never drops below zero.
    pub fn increase_contamination(&mut self, amount: f64) {
        self.contamination = (self.contamination + amount).max(0.0);
    }

    /// End-of-step update covering `hours` of simulated time.  With
    /// clean-every-step set, contamination decays as
    /// `c · exp(-fractional_decrement · hours)`; otherwise it persists.
    pub fn update_contamination(&mut self, hours: f64) {
        if self.clean_every_step {
            self.contamination *= (-self.fractional_decrement * hours).exp();
        }
    }

    /// Reset contamination to zero.
    pub fn clean(&mut self) {
        self.contamination = 0.0;
    }

    #[inline]
    pub fn clean_every_step(&self) -> bool {
        self.clean_every_step
    }

    pub fn set_clean_every_step(&mut self, on: bool) {
        self.clean_every_step = on;
    }

    #[inline]
    pub fn fractional_decrement(&self) -> f64 {
        self.fractional_decrement
    }

    /// Fails on negative or NaN values, leaving the place unchanged.
    pub fn set_fractional_decrement(&mut self, value: f64) -> CoreResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidParameter {
                name: "places.disease.simplistic.fractionalDecrement",
                value,
            });
        }
        self.fractional_decrement = value;
        Ok(())
    }

    /// Read-only view of this place.  `list_all` includes the occupant list.
    pub fn show(&self, list_all: bool) -> PlaceSnapshot {
        PlaceSnapshot {
            id:             self.id,
            category:       self.category,
            occupant_count: self.occupants.len(),
            contamination:  self.contamination,
            occupants:      list_all.then(|| self.occupants.iter().copied().collect()),
        }
    }
}

// ── PlaceSnapshot ─────────────────────────────────────────────────────────────

/// Point-in-time copy of a place's observable state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceSnapshot {
    pub id:             PlaceId,
    pub category:       PlaceCategory,
    pub occupant_count: usize,
    pub contamination:  f64,
    /// Present only when requested.
    pub occupants:      Option<Vec<AgentId>>,
}

impl fmt::Display for PlaceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] occupants={} contamination={:.6}",
            self.id, self.category, self.occupant_count, self.contamination
        )?;
        if let Some(list) = &self.occupants {
            let ids: Vec<String> = list.iter().map(|a| a.0.to_string()).collect();
            write!(f, " [{}]", ids.join(", "))?;
        }
        Ok(())
    }
}
