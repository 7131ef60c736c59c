//! Dense storage for every place in a model.

use mp_core::{AgentId, CoreResult, PlaceId};

use crate::{Place, PlaceCategory, PlaceError, PlaceResult, PlaceSnapshot};

/// All places, indexed by `PlaceId`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceStore {
    places: Vec<Place>,
}

impl PlaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { places: Vec::with_capacity(n) }
    }

    /// Append a new empty place and return its ID.
    pub fn add(&mut self, category: PlaceCategory) -> PlaceId {
        let id = PlaceId(self.places.len() as u32);
        self.places.push(Place::new(id, category));
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: PlaceId) -> bool {
        id.index() < self.places.len()
    }

    pub fn get(&self, id: PlaceId) -> PlaceResult<&Place> {
        self.places.get(id.index()).ok_or(PlaceError::UnknownPlace(id))
    }

    pub fn get_mut(&mut self, id: PlaceId) -> PlaceResult<&mut Place> {
        self.places.get_mut(id.index()).ok_or(PlaceError::UnknownPlace(id))
    }

    /// Places in ascending ID order.
    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Place> {
        self.places.iter_mut()
    }

    pub fn as_slice(&self) -> &[Place] {
        &self.places
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Move `agent` from `from` to `to`.  `from` may be `PlaceId::INVALID`
    /// for an agent that has not been placed yet.  Both ends are validated
    /// before either set is touched.
    pub fn relocate(&mut self, agent: AgentId, from: PlaceId, to: PlaceId) -> PlaceResult<()> {
        if !self.contains(to) {
            return Err(PlaceError::UnknownPlace(to));
        }
        if from.is_valid() {
            if !self.get(from)?.contains(agent) {
                return Err(PlaceError::NotAnOccupant { agent, place: from });
            }
            if from == to {
                return Ok(());
            }
            self.places[from.index()].remove(agent);
        }
        self.places[to.index()].insert(agent);
        Ok(())
    }

    /// Sum of occupant counts over all places.
    pub fn total_occupants(&self) -> usize {
        self.places.iter().map(Place::occupant_count).sum()
    }

    // ── Contamination ─────────────────────────────────────────────────────

    /// End-of-step contamination update for every place.
    pub fn update_contamination(&mut self, hours: f64) {
        for place in &mut self.places {
            place.update_contamination(hours);
        }
    }

    pub fn clean_all(&mut self) {
        for place in &mut self.places {
            place.clean();
        }
    }

    pub fn set_clean_every_step(&mut self, on: bool) {
        for place in &mut self.places {
            place.set_clean_every_step(on);
        }
    }

    /// Applies to every place, or none if `value` is rejected.
    pub fn set_fractional_decrement(&mut self, value: f64) -> CoreResult<()> {
        for place in &mut self.places {
            place.set_fractional_decrement(value)?;
        }
        Ok(())
    }

    pub fn total_contamination(&self) -> f64 {
        self.places.iter().map(Place::contamination).sum()
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    pub fn snapshots(&self, list_all: bool) -> Vec<PlaceSnapshot> {
        self.places.iter().map(|p| p.show(list_all)).collect()
    }
}
