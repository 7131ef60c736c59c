use mp_core::{AgentId, PlaceId};
use thiserror::Error;

use crate::{HealthChange, HealthStatus};

#[derive(Debug, Error)]
pub enum AgentError {
    /// The requested health change is not a legal transition from the
    /// agent's current status.  Nothing was mutated.
    #[error("{agent}: cannot apply {change} to a {state} agent")]
    InvalidState {
        agent:  AgentId,
        state:  HealthStatus,
        change: HealthChange,
    },

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("{agent}: place reference {place} is not valid")]
    UnknownPlace { agent: AgentId, place: PlaceId },

    /// More agents than `AgentId` can address below its sentinel.
    #[error("{0} agents exceed the AgentId range")]
    TooManyAgents(usize),
}

pub type AgentResult<T> = Result<T, AgentError>;
