use mp_core::{AgentId, CoreError, PlaceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("unknown place {0}")]
    UnknownPlace(PlaceId),

    #[error("{agent} is not an occupant of {place}")]
    NotAnOccupant { agent: AgentId, place: PlaceId },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type PlaceResult<T> = Result<T, PlaceError>;
