use mp_agent::AgentError;
use mp_core::{CoreError, Tick};
use mp_place::PlaceError;
use mp_schedule::ScheduleError;
use thiserror::Error;

use crate::Phase;

/// Why a single phase was rejected.  The offending agent or place is carried
/// by the inner error.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Place(#[from] PlaceError),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    /// A phase of `step` was rejected before it mutated anything.  Earlier
    /// phases of the same step have already been committed.
    #[error("step {step}, {phase} phase: {source}")]
    Step {
        step:   Tick,
        phase:  Phase,
        #[source]
        source: PhaseError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Place(#[from] PlaceError),
}

pub type SimResult<T> = Result<T, SimError>;
