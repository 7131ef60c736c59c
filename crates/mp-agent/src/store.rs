//! Core agent storage: `AgentStore` (SoA data).
//!
//! Every `Vec` has exactly `count` elements and the `AgentId` value is the
//! index into all of them:
//!
//! ```ignore
//! let here = store.current_place(agent);  // O(1), cache-friendly
//! ```
//!
//! Fields are private so health only changes through [`AgentStore::apply_health`]
//! and location references only through [`AgentStore::assign`].

use mp_core::{AgentId, PlaceId, TransportMode};

use crate::{AgentError, AgentResult, HealthChange, HealthCounts, HealthStatus, LocationChange};

/// Structure-of-Arrays storage for all agent state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    count:   usize,
    /// Offset added to the index to form an agent's external ID.
    id_base: u64,

    // ── Health ────────────────────────────────────────────────────────────
    health: Vec<HealthStatus>,

    // ── Location references ───────────────────────────────────────────────
    home:      Vec<PlaceId>,
    work:      Vec<PlaceId>,
    transport: Vec<PlaceId>,
    remote:    Vec<PlaceId>,
    mode:      Vec<TransportMode>,

    /// Where the agent is right now.  `PlaceId::INVALID` before placement.
    current_place: Vec<PlaceId>,
}

impl AgentStore {
    pub(crate) fn new(count: usize, id_base: u64) -> Self {
        Self {
            count,
            id_base,
            health:        vec![HealthStatus::SUSCEPTIBLE; count],
            home:          vec![PlaceId::INVALID; count],
            work:          vec![PlaceId::INVALID; count],
            transport:     vec![PlaceId::INVALID; count],
            remote:        vec![PlaceId::INVALID; count],
            mode:          vec![TransportMode::None; count],
            current_place: vec![PlaceId::INVALID; count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        // `count` never exceeds `AgentId::INVALID.0`; see the builder.
        let end = u32::try_from(self.count).unwrap_or(AgentId::INVALID.0);
        (0..end).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    fn check(&self, agent: AgentId) -> AgentResult<usize> {
        if self.contains(agent) {
            Ok(agent.index())
        } else {
            Err(AgentError::UnknownAgent(agent))
        }
    }

    // ── Identity ──────────────────────────────────────────────────────────

    #[inline]
    pub fn id_base(&self) -> u64 {
        self.id_base
    }

    /// Externally visible ID: `id_base + index`.
    #[inline]
    pub fn external_id(&self, agent: AgentId) -> u64 {
        self.id_base + agent.0 as u64
    }

    /// Inverse of [`external_id`](Self::external_id).
    pub fn find_external(&self, external: u64) -> Option<AgentId> {
        let idx = external.checked_sub(self.id_base)?;
        let id = AgentId(u32::try_from(idx).ok()?);
        self.contains(id).then_some(id)
    }

    // ── Health ────────────────────────────────────────────────────────────

    /// Current status of `agent`.  Panics if `agent` is out of range.
    #[inline]
    pub fn health(&self, agent: AgentId) -> HealthStatus {
        self.health[agent.index()]
    }

    /// All statuses, indexed by `AgentId`.
    #[inline]
    pub fn health_slice(&self) -> &[HealthStatus] {
        &self.health
    }

    /// Validate `change` for `agent` without mutating anything.
    pub fn check_health(&self, agent: AgentId, change: HealthChange) -> AgentResult<HealthStatus> {
        let i = self.check(agent)?;
        let state = self.health[i];
        state
            .apply(change)
            .ok_or(AgentError::InvalidState { agent, state, change })
    }

    /// Apply `change` to `agent`.  On error the agent is unchanged.
    pub fn apply_health(&mut self, agent: AgentId, change: HealthChange) -> AgentResult<HealthStatus> {
        let next = self.check_health(agent, change)?;
        self.health[agent.index()] = next;
        Ok(next)
    }

    pub fn health_counts(&self) -> HealthCounts {
        self.health.iter().copied().collect()
    }

    // ── Location references ───────────────────────────────────────────────

    /// Apply one location-reference change.  Health is never touched.
    pub fn assign(&mut self, agent: AgentId, change: LocationChange) -> AgentResult<()> {
        let i = self.check(agent)?;
        if let Some(place) = change.place() {
            if !place.is_valid() {
                return Err(AgentError::UnknownPlace { agent, place });
            }
        }
        match change {
            LocationChange::Home(p)      => self.home[i] = p,
            LocationChange::Work(p)      => self.work[i] = p,
            LocationChange::Transport(p) => self.transport[i] = p,
            LocationChange::Remote(p)    => self.remote[i] = p,
            LocationChange::Mode(m)      => self.mode[i] = m,
        }
        Ok(())
    }

    #[inline]
    pub fn home(&self, agent: AgentId) -> PlaceId {
        self.home[agent.index()]
    }

    #[inline]
    pub fn work(&self, agent: AgentId) -> PlaceId {
        self.work[agent.index()]
    }

    #[inline]
    pub fn transport(&self, agent: AgentId) -> PlaceId {
        self.transport[agent.index()]
    }

    #[inline]
    pub fn remote(&self, agent: AgentId) -> PlaceId {
        self.remote[agent.index()]
    }

    #[inline]
    pub fn transport_mode(&self, agent: AgentId) -> TransportMode {
        self.mode[agent.index()]
    }

    // ── Current place ─────────────────────────────────────────────────────

    #[inline]
    pub fn current_place(&self, agent: AgentId) -> PlaceId {
        self.current_place[agent.index()]
    }

    /// Record that `agent` now occupies `place`, returning the previous
    /// place.  Callers keep the place store's occupant sets in step.
    pub fn set_current_place(&mut self, agent: AgentId, place: PlaceId) -> AgentResult<PlaceId> {
        let i = self.check(agent)?;
        if !place.is_valid() {
            return Err(AgentError::UnknownPlace { agent, place });
        }
        Ok(std::mem::replace(&mut self.current_place[i], place))
    }
}
