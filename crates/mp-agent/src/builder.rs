//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use mp_agent::{AgentStoreBuilder, LocationChange};
//! use mp_core::{AgentId, PlaceId};
//!
//! let mut store = AgentStoreBuilder::new(3).id_base(1_000).build().unwrap();
//! store.assign(AgentId(0), LocationChange::Home(PlaceId(0))).unwrap();
//!
//! assert_eq!(store.len(), 3);
//! assert_eq!(store.external_id(AgentId(2)), 1_002);
//! ```

use mp_core::AgentId;

use crate::{AgentError, AgentResult, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// All arrays are pre-allocated so later writes are indexed assignments.
/// Every agent starts Susceptible and alive with no place references.
pub struct AgentStoreBuilder {
    count:   usize,
    id_base: u64,
}

impl AgentStoreBuilder {
    pub fn new(count: usize) -> Self {
        Self { count, id_base: 0 }
    }

    /// Offset for external agent IDs, so several populations can share one
    /// ID namespace.
    pub fn id_base(mut self, base: u64) -> Self {
        self.id_base = base;
        self
    }

    /// Allocate the store.  Every agent index must fit below
    /// [`AgentId::INVALID`], so larger counts are rejected before allocating.
    pub fn build(self) -> AgentResult<AgentStore> {
        if self.count > AgentId::INVALID.index() {
            return Err(AgentError::TooManyAgents(self.count));
        }
        Ok(AgentStore::new(self.count, self.id_base))
    }
}
